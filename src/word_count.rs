//! Word-frequency counting on top of `ChainedHashMap`.
//!
//! Only the public map contract is used: `contains`, `get`, `add`, `len`
//! and `iter`.

use crate::chained_hash_map::ChainedHashMap;
use core::fmt;
use core::hash::BuildHasher;
use hashbrown::hash_map::DefaultHashBuilder;
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Characters trimmed from both edges of every token.
pub const PUNCTUATION: &[char] = &[',', '.', '"', '\'', ';', ':', '-', '!', '?'];

/// Width of accumulated table text after which `write_table` breaks the line.
const TABLE_LINE_WIDTH: usize = 51;

pub type WordTable<S = DefaultHashBuilder> = ChainedHashMap<String, u64, S>;

/// Strips edge punctuation and lowercases; `None` if nothing is left.
pub fn normalize_token(token: &str) -> Option<String> {
    let word = token.trim_matches(PUNCTUATION);
    if word.is_empty() {
        None
    } else {
        Some(word.to_lowercase())
    }
}

/// Records every word read from `reader` in `table`, returning how many
/// words were counted.
pub fn count_words<R, S>(table: &mut WordTable<S>, reader: R) -> io::Result<usize>
where
    R: BufRead,
    S: BuildHasher,
{
    let mut counted = 0;
    for line in reader.lines() {
        let line = line?;
        for word in line.split_whitespace().filter_map(normalize_token) {
            let count = if table.contains(word.as_str()) {
                table.get(word.as_str()).copied().unwrap_or(0) + 1
            } else {
                1
            };
            table.add(word, count);
            counted += 1;
        }
    }
    debug!("counted {counted} words, {} unique", table.len());
    Ok(counted)
}

pub fn count_file<S: BuildHasher>(table: &mut WordTable<S>, path: &Path) -> io::Result<usize> {
    info!("reading words from {}", path.display());
    let file = File::open(path)?;
    count_words(table, BufReader::new(file))
}

/// Totals over a word table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub unique: usize,
    pub total: u64,
    pub most_common: String,
    pub most_common_count: u64,
}

impl Summary {
    /// Ties keep the first word met in enumeration order.
    pub fn from_table<S>(table: &WordTable<S>) -> Self {
        let mut total = 0;
        let mut most_common: &str = "";
        let mut most_common_count = 0;
        for (word, &count) in table {
            total += count;
            if count > most_common_count {
                most_common_count = count;
                most_common = word.as_str();
            }
        }
        Self {
            unique: table.len(),
            total,
            most_common: most_common.to_string(),
            most_common_count,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unique words: {}", self.unique)?;
        writeln!(f, "Total words: {}", self.total)?;
        write!(
            f,
            "\"{}\" appeared {} times, more than any other word.",
            self.most_common, self.most_common_count
        )
    }
}

/// Prints every `(word,count)` pair tuple-style, wrapping long lines.
pub fn write_table<S, W: Write>(table: &WordTable<S>, out: &mut W) -> io::Result<()> {
    writeln!(out, "Word Count Data ---------------")?;
    let mut width = 0;
    for (word, count) in table {
        let text = format!("({word},{count})");
        width += text.chars().count();
        if width > TABLE_LINE_WIDTH {
            writeln!(out, "{text}")?;
            width = 0;
        } else {
            write!(out, "{text} ")?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn table() -> WordTable {
        ChainedHashMap::default()
    }

    #[test]
    fn normalize_strips_edges_and_lowercases() {
        assert_eq!(normalize_token("Hello,"), Some("hello".to_string()));
        assert_eq!(normalize_token("\"Quoted!\""), Some("quoted".to_string()));
        assert_eq!(normalize_token("don't"), Some("don't".to_string()));
        assert_eq!(normalize_token("--"), None);
        assert_eq!(normalize_token("well-known."), Some("well-known".to_string()));
    }

    #[test]
    fn counts_across_lines() {
        let text = "To be, or not to be:\nthat is the question.\n-- ! --\n";
        let mut t = table();
        let n = count_words(&mut t, Cursor::new(text)).unwrap();
        assert_eq!(n, 10);
        assert_eq!(t.get("to"), Ok(&2));
        assert_eq!(t.get("be"), Ok(&2));
        assert_eq!(t.get("question"), Ok(&1));
        assert!(!t.contains("To"));
        assert_eq!(t.len(), 8);
    }

    #[test]
    fn summary_of_counts() {
        let mut t = table();
        count_words(&mut t, Cursor::new("a b a c a b")).unwrap();
        let s = Summary::from_table(&t);
        assert_eq!(
            s,
            Summary {
                unique: 3,
                total: 6,
                most_common: "a".to_string(),
                most_common_count: 3,
            }
        );
        assert_eq!(
            s.to_string(),
            "Unique words: 3\nTotal words: 6\n\"a\" appeared 3 times, more than any other word."
        );
    }

    #[test]
    fn summary_with_custom_hasher() {
        let mut t: WordTable<std::collections::hash_map::RandomState> =
            ChainedHashMap::with_config_and_hasher(crate::MapConfig::default(), Default::default())
                .unwrap();
        count_words(&mut t, Cursor::new("x y x")).unwrap();
        let s = Summary::from_table(&t);
        assert_eq!(s.unique, 2);
        assert_eq!(s.total, 3);
        assert_eq!(s.most_common, "x");
    }

    #[test]
    fn summary_of_empty_table() {
        let s = Summary::from_table(&table());
        assert_eq!(s.unique, 0);
        assert_eq!(s.total, 0);
        assert_eq!(s.most_common, "");
        assert_eq!(s.most_common_count, 0);
    }

    #[test]
    fn table_wraps_after_line_width() {
        let mut t = table();
        for i in 0..12 {
            t.add(format!("word{i:02}"), 1);
        }
        let mut out = Vec::new();
        write_table(&t, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Word Count Data ---------------"));
        // "(wordNN,1)" is 10 wide: five fit, the sixth pushes past 51.
        let first = lines.next().unwrap();
        assert_eq!(first.matches('(').count(), 6);
        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('(').count(), 12);
    }

    #[test]
    fn table_width_counts_characters() {
        let mut t = table();
        for word in ["éééééééé", "ééééééé", "éééééé"] {
            t.add(word.to_string(), 1);
        }
        let mut out = Vec::new();
        write_table(&t, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // 12 + 11 + 10 characters, but 54 bytes: still one line.
        let body = text
            .strip_prefix("Word Count Data ---------------\n")
            .unwrap();
        assert_eq!(body.lines().count(), 1);
        assert!(body.ends_with(") \n"));
        for tuple in ["(éééééééé,1) ", "(ééééééé,1) ", "(éééééé,1) "] {
            assert!(body.contains(tuple));
        }
        assert_eq!(body.chars().count(), 33 + 3 + 1);
    }
}
