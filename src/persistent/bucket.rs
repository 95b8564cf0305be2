//! Collision bucket: the entries sharing one hash value.
//!
//! Every leaf of the trie owns one bucket holding all `(key, value)` pairs
//! whose keys hash to that leaf's hash value. A bucket is non-empty by
//! construction and never contains the same key twice; key equality is
//! only ever tested here, never in the trie itself.
//!
//! The common case is a single entry (no collision), so storage is a
//! `SmallVec` with one inline slot.

use smallvec::{SmallVec, smallvec};
use std::borrow::Borrow;

/// A non-empty collection of entries whose keys share a single hash value.
#[derive(Clone)]
pub(crate) struct Bucket<K, V> {
    entries: SmallVec<[(K, V); 1]>,
}

/// Result of removing a key from a bucket.
pub(crate) enum Removal<K, V> {
    /// The key was not present; nothing changed.
    NotFound,
    /// The key held the bucket's only entry; no bucket remains.
    Emptied,
    /// The key was removed; the surviving entries.
    Shrunk(Bucket<K, V>),
}

impl<K, V> Bucket<K, V> {
    /// Creates a bucket holding a single entry.
    pub(crate) fn singleton(key: K, value: V) -> Self {
        Self {
            entries: smallvec![(key, value)],
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over the entries in storage order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }
}

impl<K: Clone + Eq, V: Clone> Bucket<K, V> {
    /// Returns the stored entry whose key equals `key`, if any.
    pub(crate) fn entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key.borrow() == key)
            .map(|(entry_key, value)| (entry_key, value))
    }

    /// Returns the value stored under `key`, if any.
    pub(crate) fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.entry(key).map(|(_, value)| value)
    }

    /// Inserts an entry, returning a new bucket.
    ///
    /// An existing entry with an equal key has its value replaced; a new
    /// key is appended. A key is never duplicated.
    pub(crate) fn insert(&self, key: K, value: V) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|(entry_key, _)| *entry_key == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
        Self { entries }
    }

    /// Removes the entry stored under `key`.
    pub(crate) fn remove<Q>(&self, key: &Q) -> Removal<K, V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let Some(position) = self
            .entries
            .iter()
            .position(|(entry_key, _)| entry_key.borrow() == key)
        else {
            return Removal::NotFound;
        };

        if self.entries.len() == 1 {
            return Removal::Emptied;
        }

        let mut entries = self.entries.clone();
        entries.remove(position);
        Removal::Shrunk(Self { entries })
    }
}
