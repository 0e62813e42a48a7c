//! ChainedHashMap: separate chaining over an arena of nodes.

use crate::config::MapConfig;
use crate::error::MapError;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::mem;
use hashbrown::hash_map::DefaultHashBuilder;
use log::{debug, trace, warn};
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    hash: u64,
    next: Option<DefaultKey>,
}

#[inline]
fn bucket_for(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

/// A hash map that resolves collisions by chaining.
///
/// Each bucket holds the head of a singly linked chain. Nodes live in a
/// `SlotMap` arena and link to their successor by arena key, so a node is
/// owned by the arena and reachable from exactly one predecessor (or its
/// bucket). The hash of every key is computed once, at insertion; resizes
/// relink nodes by that cached hash and never call `K: Hash` again.
pub struct ChainedHashMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Vec<Option<DefaultKey>>,
    nodes: SlotMap<DefaultKey, Node<K, V>>,
    load_limit: f64,
    shrink_limit: f64,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty map with `initial_capacity` buckets that doubles
    /// once `len / capacity` exceeds `load_limit`.
    pub fn new(initial_capacity: usize, load_limit: f64) -> Result<Self, MapError> {
        Self::with_config(MapConfig::new(initial_capacity, load_limit))
    }

    pub fn with_config(config: MapConfig) -> Result<Self, MapError> {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::from_valid_config(MapConfig::default(), DefaultHashBuilder::default())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_config_and_hasher(config: MapConfig, hasher: S) -> Result<Self, MapError> {
        config.validate()?;
        Ok(Self::from_valid_config(config, hasher))
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Walks the key's chain and returns the arena key of its node.
    fn find_node<Q>(&self, q: &Q) -> Option<DefaultKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let mut cur = self.buckets[bucket_for(hash, self.capacity())];
        while let Some(k) = cur {
            let node = self.nodes.get(k)?;
            if node.hash == hash && node.key.borrow() == q {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    /// Returns whether an entry with exactly this key is stored.
    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_node(q).is_some()
    }

    /// Returns the value stored under `q`, or `KeyNotFound`.
    pub fn get<Q>(&self, q: &Q) -> Result<&V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_node(q)
            .and_then(|k| self.nodes.get(k))
            .map(|n| &n.value)
            .ok_or(MapError::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Result<&mut V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.find_node(q) {
            Some(k) => self
                .nodes
                .get_mut(k)
                .map(|n| &mut n.value)
                .ok_or(MapError::KeyNotFound),
            None => Err(MapError::KeyNotFound),
        }
    }

    /// Inserts or updates `key`.
    ///
    /// An existing key keeps its node and has its value replaced; the old
    /// value is returned. A new key is appended to the tail of its chain,
    /// after which the table doubles if the load limit is exceeded.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        let idx = bucket_for(hash, self.capacity());

        let mut tail = None;
        let mut cur = self.buckets[idx];
        while let Some(k) = cur {
            let node = &mut self.nodes[k];
            if node.hash == hash && node.key == key {
                return Some(mem::replace(&mut node.value, value));
            }
            tail = Some(k);
            cur = node.next;
        }

        let k = self.nodes.insert(Node {
            key,
            value,
            hash,
            next: None,
        });
        match tail {
            Some(t) => self.nodes[t].next = Some(k),
            None => self.buckets[idx] = Some(k),
        }
        trace!("added node to bucket {idx}, len now {}", self.len());

        self.grow_if_needed();
        None
    }

    /// Unlinks and returns the value stored under `q`, or `KeyNotFound`.
    ///
    /// May halve the table afterwards if the load drops below the
    /// shrink limit.
    pub fn remove<Q>(&mut self, q: &Q) -> Result<V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let idx = bucket_for(hash, self.capacity());

        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[idx];
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.hash == hash && node.key.borrow() == q {
                let next = node.next;
                match prev {
                    Some(p) => self.nodes[p].next = next,
                    None => self.buckets[idx] = next,
                }
                let removed = self.nodes.remove(k).ok_or(MapError::KeyNotFound)?;
                trace!("removed node from bucket {idx}, len now {}", self.len());
                self.shrink_if_needed();
                return Ok(removed.value);
            }
            prev = Some(k);
            cur = node.next;
        }
        Err(MapError::KeyNotFound)
    }

    /// Removes every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.iter_mut().for_each(|b| *b = None);
    }

    /// Average chain length over non-empty buckets, minus one.
    ///
    /// `0.0` for an empty table and for a table without collisions.
    pub fn imbalance(&self) -> f64 {
        let (chains, total) = self
            .buckets
            .iter()
            .map(|&head| self.chain_len(head))
            .filter(|&n| n > 0)
            .fold((0usize, 0usize), |(c, t), n| (c + 1, t + n));
        if chains == 0 {
            return 0.0;
        }
        total as f64 / chains as f64 - 1.0
    }

    fn chain_len(&self, head: Option<DefaultKey>) -> usize {
        core::iter::successors(head, |&k| self.nodes.get(k).and_then(|n| n.next)).count()
    }

    fn grow_if_needed(&mut self) {
        if self.load_factor() <= self.load_limit {
            return;
        }
        match self.capacity().checked_mul(2) {
            Some(new_capacity) => {
                if let Err(e) = self.rebuild(new_capacity) {
                    warn!("skipping growth: {e}");
                }
            }
            None => warn!(
                "skipping growth: bucket count {} cannot double",
                self.capacity()
            ),
        }
    }

    fn shrink_if_needed(&mut self) {
        if self.shrink_limit <= 0.0 || self.capacity() <= 1 {
            return;
        }
        if self.load_factor() < self.shrink_limit {
            let new_capacity = (self.capacity() / 2).max(1);
            // Odd bucket counts round down; never shrink past the load limit.
            if self.len() as f64 / new_capacity as f64 > self.load_limit {
                return;
            }
            if let Err(e) = self.rebuild(new_capacity) {
                warn!("skipping shrink: {e}");
            }
        }
    }

    /// Relinks every node into a fresh bucket array of `new_capacity`
    /// slots, then swaps it in. Nodes keep their arena keys; only the
    /// `next` links and bucket heads change.
    fn rebuild(&mut self, new_capacity: usize) -> Result<(), MapError> {
        if new_capacity == 0 {
            return Err(MapError::InvalidCapacity(new_capacity));
        }
        let mut buckets = vec![None; new_capacity];
        for (k, node) in self.nodes.iter_mut() {
            let idx = bucket_for(node.hash, new_capacity);
            node.next = buckets[idx];
            buckets[idx] = Some(k);
        }
        let old = mem::replace(&mut self.buckets, buckets);
        debug!(
            "rehashed {} entries from {} to {} buckets",
            self.len(),
            old.len(),
            new_capacity
        );
        Ok(())
    }

    /// Checks chain structure against the bookkeeping: every node sits in
    /// the bucket its hash selects and is reachable exactly once.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut seen = std::collections::HashSet::new();
        for (i, &head) in self.buckets.iter().enumerate() {
            let mut cur = head;
            while let Some(k) = cur {
                let node = self.nodes.get(k).expect("chain links to a live node");
                assert_eq!(bucket_for(node.hash, self.capacity()), i, "node in wrong bucket");
                assert!(seen.insert(k), "node reachable twice");
                cur = node.next;
            }
        }
        assert_eq!(seen.len(), self.len(), "unreachable nodes in arena");
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Builds an empty table from a config that already passed `validate`.
    fn from_valid_config(config: MapConfig, hasher: S) -> Self {
        Self {
            hasher,
            buckets: vec![None; config.initial_capacity],
            nodes: SlotMap::with_key(),
            load_limit: config.load_limit,
            shrink_limit: config.shrink_limit,
        }
    }

    /// Number of entries stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_limit(&self) -> f64 {
        self.load_limit
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Iterates entries bucket by bucket, each chain head to tail.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            nodes: &self.nodes,
            cur: None,
            remaining: self.nodes.len(),
        }
    }

    /// Mutable access to every value. Visits entries in arena order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.nodes.iter_mut(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

/// Iterator over `(&K, &V)` in bucket order.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Option<DefaultKey>>,
    nodes: &'a SlotMap<DefaultKey, Node<K, V>>,
    cur: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cur {
                let node = self.nodes.get(k)?;
                self.cur = node.next;
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&node.key, &node.value));
            }
            self.cur = *self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)`.
pub struct IterMut<'a, K, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Node<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, n)| (&n.key, &mut n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

/// Owning iterator over `(K, V)`.
pub struct IntoIter<K, V> {
    it: slotmap::basic::IntoIter<DefaultKey, Node<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, n)| (n.key, n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for ChainedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            it: self.nodes.into_iter(),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.add(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
