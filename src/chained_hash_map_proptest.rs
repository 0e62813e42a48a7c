#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can call
// the internal structural check (`assert_consistent`).

use crate::chained_hash_map::ChainedHashMap;
use crate::config::MapConfig;
use crate::error::MapError;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Add(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{1,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Add(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{1,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn arb_config() -> impl Strategy<Value = MapConfig> {
    (1usize..8, prop_oneof![Just(0.5), Just(0.75), Just(1.0), Just(3.0)], any::<bool>()).prop_map(
        |(cap, load, shrink)| {
            let cfg = MapConfig::new(cap, load);
            if shrink {
                cfg
            } else {
                cfg.with_shrink_limit(0.0)
            }
        },
    )
}

// State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `add` on an existing key returns the previous value and keeps `len`.
// - `remove` returns the model's value, or `KeyNotFound` when absent.
// - `get`/`contains` parity with each other and with the model.
// - `iter` yields each live entry exactly once with the model's value.
// - After every op: chain structure is consistent, `len` matches, and the
//   load factor never exceeds the load limit.
fn run_scenario<S: BuildHasher>(
    mut sut: ChainedHashMap<Key, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Add(i, v) => {
                let k = key_from(pool, i);
                let prev = sut.add(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k, v));
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                match model.remove(&k) {
                    Some(mv) => prop_assert_eq!(sut.remove(&k), Ok(mv)),
                    None => prop_assert_eq!(sut.remove(&k), Err(MapError::KeyNotFound)),
                }
                prop_assert!(!sut.contains(&k));
            }
            OpI::Get(i) => {
                let k = key_from(pool, i);
                let got = sut.get(&k).ok().copied();
                prop_assert_eq!(got, model.get(&k).copied());
                prop_assert_eq!(got.is_some(), sut.contains(&k));
            }
            OpI::Contains(s) => {
                let has = sut.contains(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                if let Some(mv) = model.get_mut(&k) {
                    let vr = sut.get_mut(&k).expect("live key resolves");
                    *vr = vr.saturating_add(d);
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(sut.get_mut(&k).is_err());
                }
            }
            OpI::Iterate => {
                let entries: Vec<(Key, i32)> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(entries.len(), model.len());
                let s_keys: BTreeSet<_> = entries.iter().map(|(k, _)| k.clone()).collect();
                prop_assert_eq!(s_keys.len(), entries.len(), "duplicate key in iteration");
                for (k, v) in &entries {
                    prop_assert_eq!(model.get(k), Some(v));
                }
            }
        }

        sut.assert_consistent();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.capacity() >= 1);
        prop_assert!(sut.load_factor() <= sut.load_limit());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), cfg in arb_config()) {
        let sut: ChainedHashMap<Key, i32> = ChainedHashMap::with_config(cfg).unwrap();
        run_scenario(sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher: every key lands in one chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Same invariants under worst-case collisions, which stresses chain
// walking, unlinking at every chain position, and rebuilds that put
// every node back into a single bucket.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), cfg in arb_config()) {
        let sut: ChainedHashMap<Key, i32, ConstBuildHasher> =
            ChainedHashMap::with_config_and_hasher(cfg, ConstBuildHasher).unwrap();
        run_scenario(sut, &pool, ops)?;
    }
}

// Imbalance is the mean non-empty chain length minus one, so it is zero
// exactly when no chain holds more than one node, and never negative.
proptest! {
    #[test]
    fn prop_imbalance_bounds(keys in proptest::collection::vec(any::<u32>(), 0..64)) {
        let mut m: ChainedHashMap<u32, ()> = ChainedHashMap::default();
        for k in keys {
            m.add(k, ());
        }
        let imb = m.imbalance();
        prop_assert!(imb >= 0.0);
        prop_assert!(imb <= m.len().saturating_sub(1) as f64);
        if m.is_empty() {
            prop_assert_eq!(imb, 0.0);
        }
    }
}
