//! Process-wide `env_logger` setup for the word-count tool.
//!
//! The map logs node traffic at `trace`, resizes at `debug` and skipped
//! resizes at `warn`. Word counting and the binary log at `info`.

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

const MAP_MODULE: &str = "chained_hashmap::chained_hash_map";
const WORD_COUNT_MODULE: &str = "chained_hashmap::word_count";
const QUERY_MODULE: &str = "chained_hashmap::query";
const BIN_MODULE: &str = "word_count";

/// Per-module filters. `verbose` surfaces resize traces from the map.
pub fn module_levels(verbose: bool) -> [(&'static str, LevelFilter); 4] {
    let map_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    [
        (MAP_MODULE, map_level),
        (WORD_COUNT_MODULE, LevelFilter::Info),
        (QUERY_MODULE, LevelFilter::Warn),
        (BIN_MODULE, LevelFilter::Info),
    ]
}

/// Installs the logger once per process; later calls are no-ops.
/// `RUST_LOG` is applied last and wins over `module_levels`.
pub fn initialize_logger(verbose: bool) {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();
        builder.filter_level(LevelFilter::Warn);
        for (module, level) in module_levels(verbose) {
            builder.filter_module(module, level);
        }
        builder.format_timestamp_millis().parse_default_env();

        // A test harness may have installed one already.
        let _ = builder.try_init();
    });
}
