//! chained-hashmap: a single-threaded hash map that resolves collisions
//! by separate chaining, plus a word-frequency counter built on it.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a chaining hash table whose chain handling stays correct
//!   under insertion, deletion and resizing, exposed through a small
//!   contract (`add`, `remove`, `contains`, `get`, `imbalance`, `iter`,
//!   `len`) that consumers can drive without touching internals.
//! - Layers:
//!   - ChainedHashMap<K, V, S>: bucket array of chain heads over a node
//!     arena; grows by doubling, shrinks by halving.
//!   - word_count: tokenizes text and keeps per-word counts using only
//!     `contains`/`get`/`add`; summarizes and prints the table.
//!   - query: parses `k <word>` / `f <word>` / `q` lines and answers
//!     them from a counted table.
//!
//! Chains
//! - Nodes live in a `slotmap::SlotMap` arena. A bucket stores the arena
//!   key of its chain head and each node stores the key of its successor,
//!   so no node is owned through a pointer chain and unlinking is a
//!   single link rewrite.
//! - New keys are appended at the chain tail; existing keys are updated
//!   in place, so a key appears at most once in the whole table.
//! - Lookups compare cached hashes first and then full keys with `Eq`.
//!
//! Hasher and rehashing invariants
//! - Each node stores its `u64` hash, computed once by the map's
//!   `BuildHasher` (hashbrown's default builder unless one is supplied).
//!   Every node reachable from bucket `i` has `hash % capacity == i`.
//! - A resize fills a fresh bucket array by relinking every node by its
//!   cached hash, then swaps the array in. `K: Hash` is never invoked
//!   during a resize and no caller can observe a partial table.
//!
//! Resize policy
//! - After an insert, `len / capacity > load_limit` doubles the table.
//! - After a removal, `len / capacity < shrink_limit` halves it, never
//!   below one bucket and never past the load limit. A shrink limit of
//!   zero disables shrinking.
//!
//! Notes and non-goals
//! - Single-threaded; mutation takes `&mut self`, so enumeration and
//!   mutation cannot overlap. Share across threads behind a lock.
//! - No persistence and no incremental rehashing.
//!
//! ```
//! use chained_hashmap::{ChainedHashMap, MapError};
//!
//! let mut map: ChainedHashMap<String, u32> = ChainedHashMap::new(10, 0.75)?;
//! map.add("to".to_string(), 1);
//! map.add("be".to_string(), 1);
//! map.add("to".to_string(), 2);
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("to"), Ok(&2));
//! assert_eq!(map.remove("to"), Ok(2));
//! assert_eq!(map.get("to"), Err(MapError::KeyNotFound));
//! # Ok::<(), MapError>(())
//! ```

pub mod chained_hash_map;
mod chained_hash_map_proptest;
pub mod config;
pub mod error;
pub mod logger;
pub mod query;
pub mod word_count;

// Public surface
pub use chained_hash_map::{ChainedHashMap, IntoIter, Iter, IterMut};
pub use config::MapConfig;
pub use error::{MapError, QueryError};
