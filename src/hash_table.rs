//! Separate-chaining Hash Table implementation
//!
//! Keys are spread over an array of buckets by `hash(key) mod capacity`; each
//! bucket is itself a [`DynamicArray`] of entries scanned linearly on lookup.
//! After an insert pushes the load factor (`len / capacity`) above the
//! configured threshold, the bucket array doubles and every entry is
//! re-inserted.
//!
//! Hashing goes through a [`BuildHasher`] type parameter that defaults to
//! FxHash, which is fast for the small integer and string keys graphs use.
//!
//! # Example
//!
//! ```rust
//! use rust_classic_collections::hash_table::HashTable;
//! use rust_classic_collections::CollectionError;
//!
//! let mut table = HashTable::new();
//! table.add("ut", "Utrecht Centraal").unwrap();
//!
//! assert_eq!(table.get(&"ut"), Ok(&"Utrecht Centraal"));
//! assert!(matches!(table.add("ut", "again"), Err(CollectionError::DuplicateKey(_))));
//! ```

use crate::array::DynamicArray;
use crate::error::{CollectionError, Result};
use crate::traits::Collection;
use rustc_hash::FxBuildHasher;
use std::fmt::{self, Write as _};
use std::hash::{BuildHasher, Hash};

/// Bucket count used by [`HashTable::new`]
pub const INITIAL_CAPACITY: usize = 16;

/// Load factor above which the table rehashes
pub const LOAD_FACTOR: f64 = 0.75;

#[derive(Clone, Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

type Bucket<K, V> = DynamicArray<Entry<K, V>>;

fn empty_buckets<K, V>(capacity: usize) -> DynamicArray<Bucket<K, V>> {
    let mut buckets = DynamicArray::with_capacity(capacity);
    for _ in 0..capacity {
        buckets.add_last(DynamicArray::with_capacity(0));
    }
    buckets
}

/// A key → value map with unique keys
#[derive(Clone)]
pub struct HashTable<K, V, S = FxBuildHasher> {
    buckets: DynamicArray<Bucket<K, V>>,
    size: usize,
    load_factor: f64,
    hasher: S,
}

impl<K, V> HashTable<K, V> {
    /// Creates an empty table with [`INITIAL_CAPACITY`] buckets
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty table with `capacity` buckets (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher)
    }

    /// Creates an empty table with a custom resize threshold
    ///
    /// # Errors
    /// [`CollectionError::InvalidConfig`] if `capacity` is zero or
    /// `load_factor` is not in `(0, 1]`.
    pub fn try_with_load_factor(capacity: usize, load_factor: f64) -> Result<Self> {
        Self::try_with_load_factor_and_hasher(capacity, load_factor, FxBuildHasher)
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Creates an empty table hashing with `hasher`
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(INITIAL_CAPACITY, hasher)
    }

    /// Creates an empty table with `capacity` buckets hashing with `hasher`
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        HashTable {
            buckets: empty_buckets(capacity.max(1)),
            size: 0,
            load_factor: LOAD_FACTOR,
            hasher,
        }
    }

    /// Fully configured constructor
    pub fn try_with_load_factor_and_hasher(
        capacity: usize,
        load_factor: f64,
        hasher: S,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CollectionError::InvalidConfig(
                "capacity must be > 0".to_string(),
            ));
        }
        if !(load_factor > 0.0 && load_factor <= 1.0) {
            return Err(CollectionError::InvalidConfig(format!(
                "load factor must be in (0, 1], got {load_factor}"
            )));
        }
        let mut table = Self::with_capacity_and_hasher(capacity, hasher);
        table.load_factor = load_factor;
        Ok(table)
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the current number of buckets
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Iterates over `(key, value)` pairs in bucket order, then insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|entry| (&entry.key, &entry.value)))
    }

    /// Returns every key in bucket order
    ///
    /// The order is not sorted and changes whenever the table rehashes.
    pub fn keys(&self) -> DynamicArray<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Returns every value, in the same order as [`HashTable::keys`]
    pub fn values(&self) -> DynamicArray<&V> {
        self.iter().map(|(_, value)| value).collect()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq + fmt::Debug,
    S: BuildHasher,
{
    fn bucket_index(&self, key: &K) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Locates `key` as (bucket index, position in bucket)
    fn find(&self, key: &K) -> Option<(usize, usize)> {
        let index = self.bucket_index(key);
        let bucket = self.buckets.get(index).ok()?;
        bucket
            .iter()
            .position(|entry| entry.key == *key)
            .map(|position| (index, position))
    }

    /// Returns true if `key` is present
    ///
    /// # Time Complexity
    /// O(bucket length)
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns the value stored under `key`
    ///
    /// # Errors
    /// [`CollectionError::KeyNotFound`] if `key` is absent.
    pub fn get(&self, key: &K) -> Result<&V> {
        let (index, position) = self
            .find(key)
            .ok_or_else(|| CollectionError::key_not_found(key))?;
        Ok(&self.buckets.get(index)?.get(position)?.value)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let (index, position) = self
            .find(key)
            .ok_or_else(|| CollectionError::key_not_found(key))?;
        Ok(&mut self.buckets.get_mut(index)?.get_mut(position)?.value)
    }

    /// Inserts a new entry
    ///
    /// Existing entries are never overwritten. If the insert pushes the load
    /// factor over the threshold the table doubles and rehashes.
    ///
    /// # Errors
    /// [`CollectionError::DuplicateKey`] if `key` is already present; the
    /// stored value is left untouched.
    pub fn add(&mut self, key: K, value: V) -> Result<()> {
        if self.contains(&key) {
            return Err(CollectionError::duplicate_key(&key));
        }
        let index = self.bucket_index(&key);
        self.buckets.get_mut(index)?.add_last(Entry { key, value });
        self.size += 1;
        if self.size as f64 / self.buckets.len() as f64 > self.load_factor {
            self.rehash()?;
        }
        Ok(())
    }

    /// Removes `key` and returns its value
    ///
    /// # Errors
    /// [`CollectionError::KeyNotFound`] if `key` is absent.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let (index, position) = self
            .find(key)
            .ok_or_else(|| CollectionError::key_not_found(key))?;
        let entry = self.buckets.get_mut(index)?.remove_at(position)?;
        self.size -= 1;
        Ok(entry.value)
    }

    fn rehash(&mut self) -> Result<()> {
        let capacity = self.buckets.len() * 2;
        log::debug!(
            "rehashing hash table from {} to {} buckets ({} entries)",
            self.buckets.len(),
            capacity,
            self.size
        );
        let old = std::mem::replace(&mut self.buckets, empty_buckets(capacity));
        for entry in old.into_iter().flatten() {
            let index = self.bucket_index(&entry.key);
            self.buckets.get_mut(index)?.add_last(entry);
        }
        Ok(())
    }
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, S> Collection for HashTable<K, V, S> {
    fn len(&self) -> usize {
        self.size
    }

    /// One record node per bucket, with its entries chained behind it
    fn graph_viz(&self, name: &str) -> String {
        let mut dot = format!("digraph \"{name}\" {{\nrankdir=LR;\nnode [shape=record];\n");
        for (i, bucket) in self.buckets.iter().enumerate() {
            let _ = writeln!(dot, "bucket{i} [label=\"Bucket {i}\"];");
            if bucket.is_empty() {
                let _ = writeln!(dot, "bucket{i} -> empty{i};");
                let _ = writeln!(dot, "empty{i} [label=\"Empty\"];");
                continue;
            }
            for (j, entry) in bucket.iter().enumerate() {
                let _ = writeln!(
                    dot,
                    "entry{i}_{j} [label=\"{{<key> Key: {} | <value> Value: {}}}\"];",
                    entry.key, entry.value
                );
                if j == 0 {
                    let _ = writeln!(dot, "bucket{i} -> entry{i}_{j};");
                } else {
                    let _ = writeln!(dot, "entry{i}_{} -> entry{i}_{j};", j - 1);
                }
            }
        }
        dot.push_str("}\n");
        dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::{BuildHasherDefault, Hasher};

    /// Sends every key to bucket 0
    #[derive(Default)]
    struct CollidingHasher;

    impl Hasher for CollidingHasher {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    type Colliding = BuildHasherDefault<CollidingHasher>;

    #[test]
    fn test_add_get_contains() {
        let mut table = HashTable::new();
        table.add(1, "one").unwrap();
        table.add(2, "two").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&1), Ok(&"one"));
        assert!(table.contains(&2));
        assert!(!table.contains(&3));
    }

    #[test]
    fn test_duplicate_key_keeps_value() {
        let mut table = HashTable::new();
        table.add("a", 1).unwrap();
        assert_eq!(
            table.add("a", 2),
            Err(CollectionError::DuplicateKey("\"a\"".to_string()))
        );
        assert_eq!(table.get(&"a"), Ok(&1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_key() {
        let mut table: HashTable<i32, i32> = HashTable::new();
        assert_eq!(
            table.get(&7),
            Err(CollectionError::KeyNotFound("7".to_string()))
        );
        assert!(table.remove(&7).is_err());
    }

    #[test]
    fn test_remove() {
        let mut table = HashTable::new();
        table.add("x", 10).unwrap();
        table.add("y", 20).unwrap();
        assert_eq!(table.remove(&"x"), Ok(10));
        assert!(!table.contains(&"x"));
        assert_eq!(table.len(), 1);
        // the key can be re-added after removal
        table.add("x", 11).unwrap();
        assert_eq!(table.get(&"x"), Ok(&11));
    }

    #[test]
    fn test_rehash_threshold() {
        let mut table = HashTable::new();
        for i in 0..12 {
            table.add(i, i * 10).unwrap();
        }
        // 12 / 16 == 0.75 is not above the threshold
        assert_eq!(table.capacity(), 16);
        table.add(12, 120).unwrap();
        assert_eq!(table.capacity(), 32);
        for i in 0..13 {
            assert_eq!(table.get(&i), Ok(&(i * 10)));
        }
    }

    #[test]
    fn test_many_entries_survive_resizes() {
        let mut table = HashTable::new();
        for i in 0..1000u32 {
            table.add(i, i.to_string()).unwrap();
        }
        assert_eq!(table.len(), 1000);
        assert!(table.capacity() >= 1000);
        for i in 0..1000u32 {
            assert_eq!(table.get(&i).map(String::as_str), Ok(i.to_string().as_str()));
        }
    }

    #[test]
    fn test_collisions_chain_in_one_bucket() {
        let mut table: HashTable<i32, i32, Colliding> =
            HashTable::try_with_load_factor_and_hasher(4, 1.0, Colliding::default()).unwrap();
        for i in 0..4 {
            table.add(i, -i).unwrap();
        }
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.remove(&1), Ok(-1));
        assert_eq!(table.get(&3), Ok(&-3));
        assert_eq!(table.keys().iter().map(|k| **k).collect::<Vec<_>>(), vec![0, 2, 3]);
    }

    #[test]
    fn test_get_mut() {
        let mut table = HashTable::new();
        table.add("count", 1).unwrap();
        *table.get_mut(&"count").unwrap() += 1;
        assert_eq!(table.get(&"count"), Ok(&2));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            HashTable::<i32, i32>::try_with_load_factor(0, 0.5),
            Err(CollectionError::InvalidConfig(_))
        ));
        assert!(HashTable::<i32, i32>::try_with_load_factor(8, 1.5).is_err());
        assert!(HashTable::<i32, i32>::try_with_load_factor(8, 0.0).is_err());
        assert!(HashTable::<i32, i32>::try_with_load_factor(8, 0.5).is_ok());
    }

    #[test]
    fn test_graph_viz() {
        let mut table: HashTable<&str, i32, Colliding> =
            HashTable::try_with_load_factor_and_hasher(2, 1.0, Colliding::default()).unwrap();
        table.add("a", 1).unwrap();
        table.add("b", 2).unwrap();

        let expected = "digraph \"T\" {\n\
                        rankdir=LR;\n\
                        node [shape=record];\n\
                        bucket0 [label=\"Bucket 0\"];\n\
                        entry0_0 [label=\"{<key> Key: a | <value> Value: 1}\"];\n\
                        bucket0 -> entry0_0;\n\
                        entry0_1 [label=\"{<key> Key: b | <value> Value: 2}\"];\n\
                        entry0_0 -> entry0_1;\n\
                        bucket1 [label=\"Bucket 1\"];\n\
                        bucket1 -> empty1;\n\
                        empty1 [label=\"Empty\"];\n\
                        }\n";
        assert_eq!(table.graph_viz("T"), expected);
    }
}
