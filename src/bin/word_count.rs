//! word-count: counts word frequencies in a text file with a
//! `ChainedHashMap`, prints a summary and then answers queries.

use anyhow::{Context, Result};
use chained_hashmap::logger::initialize_logger;
use chained_hashmap::word_count::{count_file, Summary};
use chained_hashmap::{query, ChainedHashMap, MapConfig};
use clap::Parser;
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Initial bucket count (default 10).
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Load factor above which the table doubles.
    #[arg(short, long)]
    load_limit: Option<f64>,

    /// Log table resizes to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Text file to count; prompted for when omitted.
    file: Option<PathBuf>,
}

impl Args {
    fn map_config(&self) -> MapConfig {
        let mut config = MapConfig::default();
        if let Some(load_limit) = self.load_limit {
            config = MapConfig::new(config.initial_capacity, load_limit);
        }
        if let Some(capacity) = self.capacity {
            config = config.with_initial_capacity(capacity);
        }
        config
    }
}

fn prompt_filename<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<PathBuf> {
    write!(out, "Enter filename: ")?;
    out.flush()?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read filename")?;
    let name = line.trim();
    anyhow::ensure!(!name.is_empty(), "no filename given");
    Ok(PathBuf::from(name))
}

fn main() -> Result<()> {
    let args = Args::parse();
    initialize_logger(args.verbose);

    let config = args.map_config();
    let mut table = ChainedHashMap::with_config(config)
        .with_context(|| format!("invalid table configuration {config:?}"))?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let path = match args.file {
        Some(path) => path,
        None => prompt_filename(&mut input, &mut out)?,
    };

    count_file(&mut table, &path).with_context(|| format!("failed to read {}", path.display()))?;
    info!(
        "table holds {} words in {} buckets, imbalance {:.3}",
        table.len(),
        table.capacity(),
        table.imbalance()
    );

    writeln!(out, "{}", Summary::from_table(&table))?;
    query::run_menu(&table, &mut input, &mut out)?;
    Ok(())
}
