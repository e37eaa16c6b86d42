//! Sorted and recency-ordered collections over index-linked arenas.
//!
//! Two containers, both built the same way: nodes live in a slab-backed
//! arena and link to each other through `u32` handles instead of pointers.
//! Unlinking a node is O(1) given its handle and nothing is reference
//! counted.
//!
//! ```text
//! Arena (Slab)  - owns nodes, hands out stable u32 handles
//! List          - head/tail/len; prev/next live inside the nodes
//! SkipList      - one List per level, towers linked by up/sub handles
//! LruCache      - one List in recency order, HashTable of handles by key
//! ```
//!
//! # Data Structures
//!
//! | Structure | Use Case | Key Operations |
//! |-----------|----------|----------------|
//! | [`SkipList`] | Sorted multisets, order books | O(log n) insert/contains/remove |
//! | [`LruCache`] | Bounded memoization | O(1) get/set/evict |
//!
//! # Quick Start
//!
//! ```
//! use toolbox_collections::{LruCache, SkipList};
//!
//! let mut prices: SkipList<u32> = [105, 101, 103].into_iter().collect();
//! prices.insert(102);
//! assert_eq!(prices.first(), Some(&101));
//! assert_eq!(prices.to_vec(), vec![101, 102, 103, 105]);
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.set("x", 1);
//! cache.set("y", 2);
//! cache.get("x");
//! assert_eq!(cache.try_insert("z", 3), Ok(Some(("y", 2))));
//! ```
//!
//! # Skip List Promotion
//!
//! [`SkipList`] does not flip coins. Searches count runs of unpromoted nodes
//! and promote one once a run exceeds the list's threshold, so the shape is a
//! pure function of the operation sequence. See the [`skiplist`] module.
//!
//! # Thread Safety
//!
//! Neither container locks internally. [`Synchronized`] puts a whole
//! container behind one `parking_lot` mutex for shared use.
//!
//! # Iteration
//!
//! Borrowing iterators are checked by the compiler. For walks that interleave
//! with mutation, [`SkipList::cursor`] and [`LruCache::cursor`] hand out
//! detached cursors that fail with [`Invalidated`](error::Invalidated) after
//! any structural change.

#![warn(missing_docs)]

mod arena;
mod handle;
mod linked;
mod version;

pub mod compare;
pub mod error;
pub mod lru;
pub mod skiplist;
pub mod sync;

pub use compare::{Comparator, Natural};
pub use error::{ConfigError, DuplicateKey, Invalidated, KeyNotFound, TooSmall};
pub use lru::LruCache;
pub use skiplist::{DEFAULT_THRESHOLD, MIN_THRESHOLD, SkipList};
pub use sync::Synchronized;
