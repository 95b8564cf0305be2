//! # patmap
//!
//! A persistent (immutable) hash map built on a big-endian Patricia trie.
//!
//! ## Overview
//!
//! [`PatriciaHashMap`](persistent::PatriciaHashMap) maps arbitrary hashable
//! keys to values by routing on the bits of each key's 64-bit hash. Every
//! operation returns a new map and reuses all untouched subtrees, so old
//! versions stay valid and cheap to keep around:
//!
//! - O(min(n, 64)) get
//! - O(min(n, 64)) insert
//! - O(min(n, 64)) remove
//! - O(1) clone
//!
//! Keys whose equality or ordering is expensive (long strings, deep
//! composites) are compared at most once per operation, inside the
//! collision bucket of a single leaf; the trie itself only ever compares
//! hashes.
//!
//! ## Feature Flags
//!
//! - `arc`: share subtrees with `Arc` instead of `Rc`, making maps
//!   `Send + Sync` when their contents are
//! - `fxhash`: hash keys with `rustc-hash`'s `FxHasher`
//! - `ahash`: hash keys with `ahash`'s `AHasher`
//!
//! ## Example
//!
//! ```rust
//! use patmap::persistent::PatriciaHashMap;
//!
//! let map = PatriciaHashMap::new()
//!     .insert("one".to_string(), 1)
//!     .insert("two".to_string(), 2);
//!
//! let updated = map.insert("one".to_string(), 100);
//! assert_eq!(map.get("one"), Some(&1));       // Original unchanged
//! assert_eq!(updated.get("one"), Some(&100)); // New version
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use patmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;
    pub use crate::typeclass::*;
}

pub mod persistent;
pub mod typeclass;
