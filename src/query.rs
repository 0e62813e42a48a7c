//! Line-oriented query menu over a word table.

use crate::error::QueryError;
use crate::word_count::{write_table, WordTable};
use core::hash::BuildHasher;
use log::debug;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Commands: k[ey] <word> f[ind] <word> q[uit] ?  :- ";
pub const TABLE_PROMPT: &str = "Do you want to see the entire table?(y/n) ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `k <word>`: is the word in the text?
    Key(String),
    /// `f <word>`: how often does the word appear?
    Find(String),
    Quit,
}

impl Command {
    /// Dispatches on the first letter of the first token, so `key`, `find`
    /// and `quit` work as well as `k`, `f` and `q`.
    pub fn parse(line: &str) -> Result<Self, QueryError> {
        let invalid = || QueryError::Invalid(line.to_string());
        let mut parts = line.split_whitespace();
        let cmd = parts.next().ok_or_else(invalid)?;
        match cmd.chars().next() {
            Some('q') => Ok(Command::Quit),
            Some(c @ ('k' | 'f')) => {
                let word = parts.next().ok_or_else(invalid)?.to_lowercase();
                Ok(if c == 'k' {
                    Command::Key(word)
                } else {
                    Command::Find(word)
                })
            }
            _ => Err(invalid()),
        }
    }
}

/// Answers one command. Returns `false` once the user quits.
pub fn answer<S, W>(table: &WordTable<S>, cmd: &Command, out: &mut W) -> io::Result<bool>
where
    S: BuildHasher,
    W: Write,
{
    match cmd {
        Command::Key(word) => {
            writeln!(out, "( {word} in text ) is {}.", table.contains(word.as_str()))?;
        }
        Command::Find(word) => match table.get(word.as_str()) {
            Ok(count) => writeln!(out, "{word} appears {count} times.")?,
            Err(_) => writeln!(out, "{word} is not in the text.")?,
        },
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Runs the menu until `q` or end of input, then offers to print the table.
pub fn run_menu<S, R, W>(table: &WordTable<S>, input: &mut R, out: &mut W) -> io::Result<()>
where
    S: BuildHasher,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("query input closed");
            return Ok(());
        }
        let response = line.trim_end_matches(['\r', '\n']);
        match Command::parse(response) {
            Ok(cmd) => {
                if !answer(table, &cmd, out)? {
                    break;
                }
            }
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    write!(out, "{TABLE_PROMPT}")?;
    out.flush()?;
    line.clear();
    input.read_line(&mut line)?;
    if line.trim() == "y" {
        write_table(table, out)?;
    }
    Ok(())
}
