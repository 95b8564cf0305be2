//! Persistent (immutable) hash map based on a big-endian Patricia trie.
//!
//! This module provides [`PatriciaHashMap`], an immutable hash map
//! that uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! `PatriciaHashMap` routes each key by the bits of its 64-bit hash
//! through a binary radix tree. Every branch records the highest bit at
//! which the hashes below it disagree, so the depth never exceeds the
//! hash width and is much smaller in practice.
//!
//! - O(min(n, 64)) get
//! - O(min(n, 64)) insert
//! - O(min(n, 64)) remove
//! - O(1) clone
//!
//! All operations return new maps without modifying the original,
//! and structural sharing ensures memory efficiency.
//!
//! # Examples
//!
//! ```rust
//! use patmap::persistent::PatriciaHashMap;
//!
//! let map = PatriciaHashMap::new()
//!     .insert("one".to_string(), 1)
//!     .insert("two".to_string(), 2)
//!     .insert("three".to_string(), 3);
//!
//! assert_eq!(map.get("one"), Some(&1));
//! assert_eq!(map.get("two"), Some(&2));
//! assert_eq!(map.get("three"), Some(&3));
//!
//! // Structural sharing: the original map is preserved
//! let updated = map.insert("one".to_string(), 100);
//! assert_eq!(map.get("one"), Some(&1));       // Original unchanged
//! assert_eq!(updated.get("one"), Some(&100)); // New version
//! ```
//!
//! # Internal Structure
//!
//! The trie has three node shapes:
//! - `Empty`: the canonical empty map
//! - `Leaf`: a collision bucket holding every entry with one hash value
//! - `Branch`: a prefix/branching-bit pair partitioning the hash space
//!
//! The trie compares only hashes; key equality is confined to the bucket
//! at a leaf. Subtrees are shared via reference counting, so any number
//! of map versions may alias the same nodes.

use std::borrow::Borrow;
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::ReferenceCounter;
use super::bits;
use super::bucket::{Bucket, Removal};
use crate::typeclass::{Foldable, TypeConstructor};

// =============================================================================
// Hash computation
// =============================================================================

/// Computes the hash of a key using `DefaultHasher`.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
fn compute_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Computes the hash of a key using `rustc-hash`'s `FxHasher`.
#[cfg(feature = "fxhash")]
fn compute_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = rustc_hash::FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Computes the hash of a key using `ahash`'s `AHasher`.
///
/// Uses `AHasher::default()` rather than `RandomState`: per-instance
/// random seeding would make the same key hash differently across maps.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
fn compute_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut hasher = ahash::AHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// Node Definition
// =============================================================================

/// Internal node structure for the Patricia trie.
#[derive(Clone)]
enum Node<K, V> {
    /// The empty map.
    Empty,
    /// Every entry whose key hashes to `hash`.
    ///
    /// The bucket is non-empty and key-unique.
    Leaf { hash: u64, bucket: Bucket<K, V> },
    /// A binary fork over the hash space.
    ///
    /// `branching_bit` has exactly one bit set: the highest bit at which
    /// hashes below this node disagree. `prefix` holds the bits strictly
    /// above it, everything else zero. Hashes with the branching bit
    /// clear live under `left`, the rest under `right`. Neither child is
    /// ever `Empty`.
    Branch {
        prefix: u64,
        branching_bit: u64,
        left: ReferenceCounter<Node<K, V>>,
        right: ReferenceCounter<Node<K, V>>,
    },
}

/// Creates a branch joining two subtrees whose prefixes differ.
///
/// Computes the highest bit at which the prefixes disagree and places
/// each subtree on the side that bit assigns it. This is the only
/// operation that creates new branching structure.
fn join<K, V>(
    prefix1: u64,
    tree1: ReferenceCounter<Node<K, V>>,
    prefix2: u64,
    tree2: ReferenceCounter<Node<K, V>>,
) -> Node<K, V> {
    let branching_bit = bits::branch_mask(prefix1, prefix2);
    let prefix = bits::mask(prefix1, branching_bit);

    if bits::zero(prefix1, branching_bit) {
        Node::Branch {
            prefix,
            branching_bit,
            left: tree1,
            right: tree2,
        }
    } else {
        Node::Branch {
            prefix,
            branching_bit,
            left: tree2,
            right: tree1,
        }
    }
}

/// Smart constructor: collapses a branch with an empty child into the
/// other child, restoring the no-empty-children invariant after removal.
fn branch<K, V>(
    prefix: u64,
    branching_bit: u64,
    left: ReferenceCounter<Node<K, V>>,
    right: ReferenceCounter<Node<K, V>>,
) -> ReferenceCounter<Node<K, V>> {
    if matches!(left.as_ref(), Node::Empty) {
        return right;
    }
    if matches!(right.as_ref(), Node::Empty) {
        return left;
    }
    ReferenceCounter::new(Node::Branch {
        prefix,
        branching_bit,
        left,
        right,
    })
}

// =============================================================================
// PatriciaHashMap Definition
// =============================================================================

/// A persistent (immutable) hash map based on a big-endian Patricia trie.
///
/// `PatriciaHashMap` is an immutable data structure that uses structural
/// sharing to efficiently support functional programming patterns. Keys
/// are routed by their hash, so key comparisons happen at most once per
/// operation regardless of how expensive the key's `Eq` is.
///
/// # Time Complexity
///
/// | Operation      | Complexity        |
/// |----------------|-------------------|
/// | `new`          | O(1)              |
/// | `get`          | O(min(n, 64))     |
/// | `insert`       | O(min(n, 64))     |
/// | `remove`       | O(min(n, 64))     |
/// | `contains_key` | O(min(n, 64))     |
/// | `len`          | O(n)              |
/// | `is_empty`     | O(1)              |
///
/// # Examples
///
/// ```rust
/// use patmap::persistent::PatriciaHashMap;
///
/// let map = PatriciaHashMap::singleton("key".to_string(), 42);
/// assert_eq!(map.get("key"), Some(&42));
/// ```
#[derive(Clone)]
pub struct PatriciaHashMap<K, V> {
    /// Root node of the trie
    root: ReferenceCounter<Node<K, V>>,
}

impl<K, V> PatriciaHashMap<K, V> {
    /// Creates a new empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map: PatriciaHashMap<String, i32> = PatriciaHashMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: ReferenceCounter::new(Node::Empty),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// The count is a structural sum over the trie that asks each leaf's
    /// bucket for its length, so colliding keys are all counted.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new()
    ///     .insert("a".to_string(), 1)
    ///     .insert("b".to_string(), 2);
    /// assert_eq!(map.len(), 2);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        Self::size_of_node(&self.root)
    }

    /// Recursive helper for len.
    fn size_of_node(node: &Node<K, V>) -> usize {
        match node {
            Node::Empty => 0,
            Node::Leaf { bucket, .. } => bucket.len(),
            Node::Branch { left, right, .. } => {
                Self::size_of_node(left) + Self::size_of_node(right)
            }
        }
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let empty: PatriciaHashMap<String, i32> = PatriciaHashMap::new();
    /// assert!(empty.is_empty());
    ///
    /// let non_empty = empty.insert("key".to_string(), 42);
    /// assert!(!non_empty.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self.root.as_ref(), Node::Empty)
    }

    /// Folds over all `(key, value)` pairs with an accumulator.
    ///
    /// The traversal is strict and visits every entry exactly once. The
    /// visit order is an implementation artifact; callers must not rely
    /// on it.
    ///
    /// # Arguments
    ///
    /// * `init` - The initial accumulator value
    /// * `combine` - A function combining the accumulator with each entry
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new()
    ///     .insert("a".to_string(), 1)
    ///     .insert("b".to_string(), 2);
    ///
    /// let sum = map.fold_entries(0, |accumulator, _key, value| accumulator + value);
    /// assert_eq!(sum, 3);
    /// ```
    pub fn fold_entries<'a, B, F>(&'a self, init: B, mut combine: F) -> B
    where
        F: FnMut(B, &'a K, &'a V) -> B,
    {
        Self::fold_node(&self.root, init, &mut combine)
    }

    /// Recursive helper for `fold_entries`; visits right before left.
    fn fold_node<'a, B, F>(node: &'a Node<K, V>, accumulator: B, combine: &mut F) -> B
    where
        F: FnMut(B, &'a K, &'a V) -> B,
    {
        match node {
            Node::Empty => accumulator,
            Node::Leaf { bucket, .. } => bucket
                .iter()
                .fold(accumulator, |accumulator, (key, value)| {
                    combine(accumulator, key, value)
                }),
            Node::Branch { left, right, .. } => {
                let accumulator = Self::fold_node(right, accumulator, combine);
                Self::fold_node(left, accumulator, combine)
            }
        }
    }

    /// Returns an iterator over key-value pairs.
    ///
    /// The iteration order is unspecified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new()
    ///     .insert("a".to_string(), 1)
    ///     .insert("b".to_string(), 2);
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{}: {}", key, value);
    /// }
    /// ```
    #[must_use]
    pub fn iter(&self) -> PatriciaHashMapIterator<'_, K, V> {
        let entries = self.fold_entries(Vec::new(), |mut entries, key, value| {
            entries.push((key, value));
            entries
        });
        PatriciaHashMapIterator {
            entries,
            current_index: 0,
        }
    }

    /// Returns an iterator over keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new()
    ///     .insert("a".to_string(), 1)
    ///     .insert("b".to_string(), 2);
    ///
    /// assert_eq!(map.keys().count(), 2);
    /// ```
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new()
    ///     .insert("a".to_string(), 1)
    ///     .insert("b".to_string(), 2);
    ///
    /// let sum: i32 = map.values().sum();
    /// assert_eq!(sum, 3);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: Clone + Hash + Eq, V: Clone> PatriciaHashMap<K, V> {
    /// Creates a map containing a single key-value pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::singleton("key".to_string(), 42);
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get("key"), Some(&42));
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        let hash = compute_hash(&key);
        Self {
            root: ReferenceCounter::new(Node::Leaf {
                hash,
                bucket: Bucket::singleton(key, value),
            }),
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but `Hash`
    /// and `Eq` on the borrowed form must match those for the key type.
    ///
    /// # Complexity
    ///
    /// O(min(n, 64))
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new()
    ///     .insert("hello".to_string(), 42);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = compute_hash(key);
        Self::get_from_node(&self.root, key, hash)
    }

    /// Recursive helper for get.
    fn get_from_node<'a, Q>(node: &'a Node<K, V>, key: &Q, hash: u64) -> Option<&'a V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        match node {
            Node::Empty => None,
            Node::Leaf {
                hash: leaf_hash,
                bucket,
            } => {
                if *leaf_hash == hash {
                    bucket.lookup(key)
                } else {
                    None
                }
            }
            Node::Branch {
                branching_bit,
                left,
                right,
                ..
            } => {
                if bits::zero(hash, *branching_bit) {
                    Self::get_from_node(left, key, hash)
                } else {
                    Self::get_from_node(right, key, hash)
                }
            }
        }
    }

    /// Returns the stored key and value for the given lookup key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new().insert("key".to_string(), 42);
    ///
    /// let (key, value) = map.get_key_value("key").unwrap();
    /// assert_eq!(key, "key");
    /// assert_eq!(*value, 42);
    /// ```
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = compute_hash(key);
        Self::entry_from_node(&self.root, key, hash)
    }

    /// Recursive helper for `get_key_value`.
    fn entry_from_node<'a, Q>(node: &'a Node<K, V>, key: &Q, hash: u64) -> Option<(&'a K, &'a V)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        match node {
            Node::Empty => None,
            Node::Leaf {
                hash: leaf_hash,
                bucket,
            } => {
                if *leaf_hash == hash {
                    bucket.entry(key)
                } else {
                    None
                }
            }
            Node::Branch {
                branching_bit,
                left,
                right,
                ..
            } => {
                if bits::zero(hash, *branching_bit) {
                    Self::entry_from_node(left, key, hash)
                } else {
                    Self::entry_from_node(right, key, hash)
                }
            }
        }
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new().insert("key".to_string(), 42);
    ///
    /// assert!(map.contains_key("key"));
    /// assert!(!map.contains_key("other"));
    /// ```
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contains the key, the value is replaced. Two
    /// distinct keys whose hashes collide both stay retrievable; they
    /// share a leaf's collision bucket.
    ///
    /// # Complexity
    ///
    /// O(min(n, 64))
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map1 = PatriciaHashMap::new().insert("key".to_string(), 1);
    /// let map2 = map1.insert("key".to_string(), 2);
    ///
    /// assert_eq!(map1.get("key"), Some(&1)); // Original unchanged
    /// assert_eq!(map2.get("key"), Some(&2)); // New version
    /// ```
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let hash = compute_hash(&key);
        Self {
            root: Self::insert_into_node(&self.root, key, value, hash),
        }
    }

    /// Recursive helper for insert.
    fn insert_into_node(
        node: &ReferenceCounter<Node<K, V>>,
        key: K,
        value: V,
        hash: u64,
    ) -> ReferenceCounter<Node<K, V>> {
        match node.as_ref() {
            Node::Empty => ReferenceCounter::new(Node::Leaf {
                hash,
                bucket: Bucket::singleton(key, value),
            }),
            Node::Leaf {
                hash: leaf_hash,
                bucket,
            } => {
                if *leaf_hash == hash {
                    // Same hash: the bucket overwrites an equal key or
                    // appends a truly colliding one.
                    ReferenceCounter::new(Node::Leaf {
                        hash,
                        bucket: bucket.insert(key, value),
                    })
                } else {
                    let leaf = ReferenceCounter::new(Node::Leaf {
                        hash,
                        bucket: Bucket::singleton(key, value),
                    });
                    ReferenceCounter::new(join(hash, leaf, *leaf_hash, node.clone()))
                }
            }
            Node::Branch {
                prefix,
                branching_bit,
                left,
                right,
            } => {
                if bits::no_match(hash, *prefix, *branching_bit) {
                    // The hash lives outside this subtree's prefix; fork
                    // above it instead of descending further.
                    let leaf = ReferenceCounter::new(Node::Leaf {
                        hash,
                        bucket: Bucket::singleton(key, value),
                    });
                    ReferenceCounter::new(join(hash, leaf, *prefix, node.clone()))
                } else if bits::zero(hash, *branching_bit) {
                    ReferenceCounter::new(Node::Branch {
                        prefix: *prefix,
                        branching_bit: *branching_bit,
                        left: Self::insert_into_node(left, key, value, hash),
                        right: right.clone(),
                    })
                } else {
                    ReferenceCounter::new(Node::Branch {
                        prefix: *prefix,
                        branching_bit: *branching_bit,
                        left: left.clone(),
                        right: Self::insert_into_node(right, key, value, hash),
                    })
                }
            }
        }
    }

    /// Removes a key from the map.
    ///
    /// Returns a new map without the key. If the key doesn't exist,
    /// returns a clone of the original map (sharing the entire trie).
    ///
    /// # Complexity
    ///
    /// O(min(n, 64))
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new()
    ///     .insert("a".to_string(), 1)
    ///     .insert("b".to_string(), 2);
    /// let removed = map.remove("a");
    ///
    /// assert_eq!(map.len(), 2);     // Original unchanged
    /// assert_eq!(removed.len(), 1); // New version
    /// assert_eq!(removed.get("a"), None);
    /// ```
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = compute_hash(key);
        match Self::remove_from_node(&self.root, key, hash) {
            Some(new_root) => Self { root: new_root },
            None => self.clone(),
        }
    }

    /// Recursive helper for remove.
    ///
    /// Returns `None` when the key is absent, so the caller keeps the
    /// original subtree untouched at every level.
    fn remove_from_node<Q>(
        node: &ReferenceCounter<Node<K, V>>,
        key: &Q,
        hash: u64,
    ) -> Option<ReferenceCounter<Node<K, V>>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        match node.as_ref() {
            Node::Empty => None,
            Node::Leaf {
                hash: leaf_hash,
                bucket,
            } => {
                if *leaf_hash != hash {
                    return None;
                }
                match bucket.remove(key) {
                    Removal::NotFound => None,
                    Removal::Emptied => Some(ReferenceCounter::new(Node::Empty)),
                    Removal::Shrunk(bucket) => {
                        Some(ReferenceCounter::new(Node::Leaf { hash, bucket }))
                    }
                }
            }
            Node::Branch {
                prefix,
                branching_bit,
                left,
                right,
            } => {
                if bits::no_match(hash, *prefix, *branching_bit) {
                    return None;
                }
                if bits::zero(hash, *branching_bit) {
                    let new_left = Self::remove_from_node(left, key, hash)?;
                    Some(branch(*prefix, *branching_bit, new_left, right.clone()))
                } else {
                    let new_right = Self::remove_from_node(right, key, hash)?;
                    Some(branch(*prefix, *branching_bit, left.clone(), new_right))
                }
            }
        }
    }

    /// Applies a function to the value at a key, if present.
    ///
    /// Returns the map unchanged when the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new().insert("count".to_string(), 10);
    ///
    /// let adjusted = map.adjust("count", |value| value + 1);
    /// assert_eq!(adjusted.get("count"), Some(&11));
    ///
    /// let untouched = map.adjust("missing", |value| value + 1);
    /// assert_eq!(untouched.get("missing"), None);
    /// ```
    #[must_use]
    pub fn adjust<Q, F>(&self, key: &Q, function: F) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> V,
    {
        match self.get_key_value(key) {
            None => self.clone(),
            Some((stored_key, value)) => {
                let new_key = stored_key.clone();
                let new_value = function(value);
                self.insert(new_key, new_value)
            }
        }
    }

    /// Updates or removes a value for a key using an updater function.
    ///
    /// The updater receives `Some(&V)` if the key exists, or `None` if it
    /// doesn't. If the updater returns `Some(V)`, the value is inserted
    /// or updated. If it returns `None`, the key is removed (if present).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new().insert("count".to_string(), 10);
    ///
    /// // Increment existing value
    /// let updated = map.update_with("count", |maybe_value| {
    ///     maybe_value.map(|value| value + 1)
    /// });
    /// assert_eq!(updated.get("count"), Some(&11));
    ///
    /// // Insert if not exists
    /// let inserted = map.update_with("new_key", |_| Some(100));
    /// assert_eq!(inserted.get("new_key"), Some(&100));
    ///
    /// // Remove by returning None
    /// let removed = map.update_with("count", |_| None);
    /// assert_eq!(removed.get("count"), None);
    /// ```
    #[must_use]
    pub fn update_with<Q, F>(&self, key: &Q, updater: F) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        F: FnOnce(Option<&V>) -> Option<V>,
    {
        let current_value = self.get(key);
        let new_value = updater(current_value);

        match (current_value, new_value) {
            (Some(_), Some(value)) => {
                let actual_key = self
                    .get_key_value(key)
                    .map_or_else(|| key.to_owned(), |(stored_key, _)| stored_key.clone());
                self.insert(actual_key, value)
            }
            (Some(_), None) => self.remove(key),
            (None, Some(value)) => self.insert(key.to_owned(), value),
            (None, None) => self.clone(),
        }
    }

    /// Merges two maps, with values from `other` taking precedence on key
    /// conflicts.
    ///
    /// # Complexity
    ///
    /// O(m log n) where m is the size of `other`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map1 = PatriciaHashMap::new()
    ///     .insert("a".to_string(), 1)
    ///     .insert("b".to_string(), 2);
    /// let map2 = PatriciaHashMap::new()
    ///     .insert("b".to_string(), 20)
    ///     .insert("c".to_string(), 3);
    ///
    /// let merged = map1.merge(&map2);
    ///
    /// assert_eq!(merged.get("a"), Some(&1));
    /// assert_eq!(merged.get("b"), Some(&20)); // From map2
    /// assert_eq!(merged.get("c"), Some(&3));
    /// ```
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        other.fold_entries(self.clone(), |merged, key, value| {
            merged.insert(key.clone(), value.clone())
        })
    }

    /// Collects all key-value pairs into a `Vec`.
    ///
    /// The result contains every entry exactly once, in unspecified
    /// order; its length equals `len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use patmap::persistent::PatriciaHashMap;
    ///
    /// let map = PatriciaHashMap::new().insert("a".to_string(), 1);
    /// assert_eq!(map.to_list(), vec![("a".to_string(), 1)]);
    /// ```
    #[must_use]
    pub fn to_list(&self) -> Vec<(K, V)> {
        self.fold_entries(Vec::new(), |mut entries, key, value| {
            entries.push((key.clone(), value.clone()));
            entries
        })
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over key-value pairs of a [`PatriciaHashMap`].
pub struct PatriciaHashMapIterator<'a, K, V> {
    entries: Vec<(&'a K, &'a V)>,
    current_index: usize,
}

impl<'a, K, V> Iterator for PatriciaHashMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index >= self.entries.len() {
            None
        } else {
            let entry = self.entries[self.current_index];
            self.current_index += 1;
            Some(entry)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len().saturating_sub(self.current_index);
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for PatriciaHashMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.entries.len().saturating_sub(self.current_index)
    }
}

/// An owning iterator over key-value pairs of a [`PatriciaHashMap`].
pub struct PatriciaHashMapIntoIterator<K, V> {
    entries: Vec<(K, V)>,
    current_index: usize,
}

impl<K: Clone, V: Clone> Iterator for PatriciaHashMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index >= self.entries.len() {
            None
        } else {
            let entry = self.entries[self.current_index].clone();
            self.current_index += 1;
            Some(entry)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len().saturating_sub(self.current_index);
        (remaining, Some(remaining))
    }
}

impl<K: Clone, V: Clone> ExactSizeIterator for PatriciaHashMapIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.entries.len().saturating_sub(self.current_index)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for PatriciaHashMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Hash + Eq, V: Clone> FromIterator<(K, V)> for PatriciaHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map = map.insert(key, value);
        }
        map
    }
}

impl<K: Clone + Hash + Eq, V: Clone> IntoIterator for PatriciaHashMap<K, V> {
    type Item = (K, V);
    type IntoIter = PatriciaHashMapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        PatriciaHashMapIntoIterator {
            entries: Self::to_list(&self),
            current_index: 0,
        }
    }
}

impl<'a, K, V> IntoIterator for &'a PatriciaHashMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = PatriciaHashMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Clone + Hash + Eq, V: Clone + PartialEq> PartialEq for PatriciaHashMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        for (key, value) in self {
            match other.get(key) {
                Some(other_value) if other_value == value => {}
                _ => return false,
            }
        }

        true
    }
}

impl<K: Clone + Hash + Eq, V: Clone + Eq> Eq for PatriciaHashMap<K, V> {}

impl<K: Clone + Hash + Eq + fmt::Debug, V: Clone + fmt::Debug> fmt::Debug
    for PatriciaHashMap<K, V>
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

/// Wrapper to make `PatriciaHashMap` implement `TypeConstructor` for values.
///
/// Since `PatriciaHashMap` has two type parameters (K, V), we treat it as
/// a container of V values with K being fixed.
impl<K, V> TypeConstructor for PatriciaHashMap<K, V> {
    type Inner = V;
    type WithType<B> = PatriciaHashMap<K, B>;
}

impl<K: Clone + Hash + Eq, V: Clone> Foldable for PatriciaHashMap<K, V> {
    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, V) -> B,
    {
        self.into_iter()
            .fold(init, |accumulator, (_, value)| function(accumulator, value))
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(V, B) -> B,
    {
        // For unordered collections, fold_right is semantically equivalent
        // to fold_left
        self.into_iter()
            .fold(init, |accumulator, (_, value)| function(value, accumulator))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        matches!(self.root.as_ref(), Node::Empty)
    }

    #[inline]
    fn length(&self) -> usize {
        Self::size_of_node(&self.root)
    }
}

// =============================================================================
// Tests
// =============================================================================
