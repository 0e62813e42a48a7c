// Word counting end to end: file in, summary and query answers out.
//
// Invariants exercised:
// - Tokens are trimmed of edge punctuation and lowercased before counting.
// - Counts sum to the number of tokens read; unique words equal `len()`.
// - Query answers agree with `contains`/`get` on the counted table.
use chained_hashmap::query::{answer, run_menu, Command};
use chained_hashmap::word_count::{count_file, count_words, write_table, Summary, WordTable};
use chained_hashmap::{ChainedHashMap, MapConfig};
use std::io::Cursor;
use std::path::PathBuf;

const TEXT: &str = "\
It was the best of times, it was the worst of times;
it was the age of wisdom, it was the age of foolishness...
\"It was!\" -- said nobody?
";

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "chained-hashmap-{}-{}.txt",
        std::process::id(),
        name
    ));
    std::fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn counts_file_and_summarizes() {
    let path = temp_file("summary", TEXT);
    let mut table: WordTable = ChainedHashMap::with_config(MapConfig::new(2, 0.75)).unwrap();
    let counted = count_file(&mut table, &path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(counted, 28);
    assert_eq!(table.get("it"), Ok(&5));
    assert_eq!(table.get("was"), Ok(&5));
    assert_eq!(table.get("times"), Ok(&2));
    assert_eq!(table.get("foolishness"), Ok(&1));
    assert_eq!(table.get("nobody"), Ok(&1));
    assert!(!table.contains("--"));
    assert!(table.capacity() > 2);

    let summary = Summary::from_table(&table);
    assert_eq!(summary.unique, table.len());
    assert_eq!(summary.total, counted as u64);
    assert_eq!(summary.most_common_count, 5);
    assert!(summary.most_common == "it" || summary.most_common == "was");
}

#[test]
fn missing_file_is_an_error() {
    let mut table: WordTable = ChainedHashMap::default();
    let missing = std::env::temp_dir().join("chained-hashmap-definitely-missing.txt");
    assert!(count_file(&mut table, &missing).is_err());
    assert!(table.is_empty());
}

#[test]
fn queries_match_table() {
    let mut table: WordTable = ChainedHashMap::default();
    count_words(&mut table, Cursor::new(TEXT)).unwrap();

    let mut out = Vec::new();
    for line in ["k Wisdom", "f times", "f dragons", "k dragons"] {
        let cmd = Command::parse(line).unwrap();
        assert!(answer(&table, &cmd, &mut out).unwrap());
    }
    assert!(!answer(&table, &Command::Quit, &mut out).unwrap());

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "( wisdom in text ) is true.\n\
         times appears 2 times.\n\
         dragons is not in the text.\n\
         ( dragons in text ) is false.\n"
    );
}

#[test]
fn full_session_with_table() {
    let mut table: WordTable = ChainedHashMap::default();
    count_words(&mut table, Cursor::new("one two two")).unwrap();

    let mut input = Cursor::new("f two\nq\ny\n");
    let mut out = Vec::new();
    run_menu(&table, &mut input, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("two appears 2 times."));

    let mut expected_table = Vec::new();
    write_table(&table, &mut expected_table).unwrap();
    assert!(text.ends_with(&String::from_utf8(expected_table).unwrap()));
}
