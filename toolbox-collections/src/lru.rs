//! Fixed-capacity cache with least-recently-used eviction.
//!
//! A hash index maps each key to its entry's handle; the entries themselves
//! form an intrusive recency list in an arena, least recently used at the
//! head and most recently used at the tail. Every operation is O(1).
//!
//! # Example
//!
//! ```
//! use toolbox_collections::LruCache;
//!
//! let mut cache = LruCache::new(2).unwrap();
//! cache.set("a", 1);
//! cache.set("b", 2);
//! assert_eq!(cache.get("a"), Some(&1)); // "a" is now most recent
//! cache.set("c", 3); // evicts "b"
//!
//! assert!(!cache.contains_key("b"));
//! assert!(cache.contains_key("a"));
//! assert!(cache.contains_key("c"));
//! ```

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::mem;

use hashbrown::HashTable;
use rustc_hash::FxBuildHasher;
use tracing::trace;

use crate::arena::Arena;
use crate::error::{ConfigError, DuplicateKey, Invalidated, KeyNotFound};
use crate::handle::Handle;
use crate::linked::{Linked, List};
use crate::version::{Stamp, Version};

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
    prev: u32,
    next: u32,
}

impl<K, V> Linked for Entry<K, V> {
    #[inline]
    fn next(&self) -> u32 {
        self.next
    }

    #[inline]
    fn prev(&self) -> u32 {
        self.prev
    }

    #[inline]
    fn set_next(&mut self, idx: u32) {
        self.next = idx;
    }

    #[inline]
    fn set_prev(&mut self, idx: u32) {
        self.prev = idx;
    }
}

/// A key/value map holding at most `capacity` entries.
///
/// Adding a new key to a full cache evicts the least recently used entry.
/// Reads through [`get`](Self::get), [`get_mut`](Self::get_mut) and
/// [`fetch`](Self::fetch), and writes through [`set`](Self::set), mark the
/// entry most recently used. [`peek`](Self::peek) and
/// [`contains_key`](Self::contains_key) do not.
///
/// Not internally synchronized; wrap it in
/// [`Synchronized`](crate::Synchronized) to share it between threads.
#[derive(Clone)]
pub struct LruCache<K, V> {
    /// Entry handles, hashed by their entry's key.
    table: HashTable<u32>,
    hasher: FxBuildHasher,
    entries: Arena<Entry<K, V>>,
    /// Head is least recently used, tail is most recently used.
    order: List,
    capacity: usize,
    version: Version,
}

impl<K, V> LruCache<K, V> {
    /// Returns the maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if the next new key will evict an entry.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.order.len() == self.capacity
    }

    /// Returns the least recently used entry without touching it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.entries
            .get(self.order.head())
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the most recently used entry without touching it.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.entries
            .get(self.order.tail())
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Returns an iterator over the entries from least to most recently used.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: &self.entries,
            front: self.order.head(),
            back: self.order.tail(),
            remaining: self.order.len(),
        }
    }

    /// Returns an iterator over the keys from least to most recently used.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values from least to most recently used.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns a detached cursor positioned before the least recently used
    /// entry.
    ///
    /// Any later change to the cache, including a lookup that reorders it,
    /// makes the cursor fail with [`Invalidated`].
    #[inline]
    pub fn cursor(&self) -> Cursor {
        Cursor {
            next: self.order.head(),
            stamp: self.version.stamp(),
        }
    }

    /// Moves `idx` to the most recently used position.
    #[inline]
    fn touch(&mut self, idx: u32) {
        if self.order.tail() != idx {
            self.order.remove(&mut self.entries, idx);
            self.order.push_back(&mut self.entries, idx);
            self.version.bump();
        }
    }
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            table: HashTable::new(),
            hasher: FxBuildHasher,
            entries: Arena::new(),
            order: List::new(),
            capacity,
            version: Version::new(),
        })
    }

    /// Returns `true` if `key` is present. Does not touch the entry.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(self.hasher.hash_one(key), key).is_some()
    }

    /// Returns the value for `key` without touching the entry.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(self.hasher.hash_one(key), key)?;
        Some(&self.entries[idx].value)
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(self.hasher.hash_one(key), key)?;
        self.touch(idx);
        Some(&self.entries[idx].value)
    }

    /// Mutable variant of [`get`](Self::get). Also touches the entry.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.find(self.hasher.hash_one(key), key)?;
        self.touch(idx);
        Some(&mut self.entries[idx].value)
    }

    /// Like [`get`](Self::get), but treats a missing key as an error.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`] if `key` is absent.
    #[inline]
    pub fn fetch<Q>(&mut self, key: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(KeyNotFound)
    }

    /// Inserts or replaces the value for `key` and marks it most recently
    /// used. Returns the replaced value.
    ///
    /// A new key arriving at a full cache evicts the least recently used
    /// entry; use [`try_insert`](Self::try_insert) to learn which.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash_one(&key);
        if let Some(idx) = self.find(hash, &key) {
            self.touch(idx);
            return Some(mem::replace(&mut self.entries[idx].value, value));
        }
        self.push(hash, key, value);
        None
    }

    /// Inserts a new key as the most recently used entry.
    ///
    /// Returns the entry evicted to make room, if any.
    ///
    /// # Errors
    ///
    /// [`DuplicateKey`] carrying the pair back if `key` is already present.
    /// The cache is unchanged in that case.
    pub fn try_insert(
        &mut self,
        key: K,
        value: V,
    ) -> Result<Option<(K, V)>, DuplicateKey<K, V>> {
        let hash = self.hasher.hash_one(&key);
        if self.find(hash, &key).is_some() {
            return Err(DuplicateKey { key, value });
        }
        Ok(self.push(hash, key, value))
    }

    /// Removes `key`, returning its value. Other entries keep their order.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);
        let entries = &self.entries;
        let slot = self
            .table
            .find_entry(hash, |&idx| entries[idx].key.borrow() == key)
            .ok()?;
        let (idx, _) = slot.remove();
        self.order.remove(&mut self.entries, idx);
        Some(self.release(idx))
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let idx = self.order.pop_front(&mut self.entries);
        self.evict(idx)
    }

    /// Removes and returns the most recently used entry.
    pub fn pop_mru(&mut self) -> Option<(K, V)> {
        let idx = self.order.pop_back(&mut self.entries);
        self.evict(idx)
    }

    /// Removes all entries. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.table.clear();
        self.entries.clear();
        self.order.reset();
        self.version.bump();
    }

    /// Looks up the handle of the entry whose key hashes to `hash` and
    /// equals `key`.
    #[inline]
    fn find<Q>(&self, hash: u64, key: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.table
            .find(hash, |&idx| self.entries[idx].key.borrow() == key)
            .copied()
    }

    /// Links a key known to be absent, evicting first if full.
    fn push(&mut self, hash: u64, key: K, value: V) -> Option<(K, V)> {
        let evicted = if self.is_full() {
            let evicted = self.pop_lru();
            trace!(capacity = self.capacity, "lru entry evicted");
            evicted
        } else {
            None
        };

        let idx = self.entries.insert(Entry {
            key,
            value,
            hash,
            prev: u32::NONE,
            next: u32::NONE,
        });
        self.order.push_back(&mut self.entries, idx);
        let entries = &self.entries;
        self.table
            .insert_unique(hash, idx, |&other| entries[other].hash);
        self.version.bump();
        evicted
    }

    /// Frees an entry already popped off the recency list and drops it from
    /// the hash table.
    fn evict(&mut self, idx: u32) -> Option<(K, V)> {
        if idx.is_none() {
            return None;
        }
        let hash = self.entries[idx].hash;
        if let Ok(slot) = self.table.find_entry(hash, |&other| other == idx) {
            slot.remove();
        }
        Some(self.release(idx))
    }

    /// Frees an entry that is in neither the recency list nor the table.
    fn release(&mut self, idx: u32) -> (K, V) {
        self.version.bump();
        let Entry { key, value, .. } = self.entries.remove(idx);
        (key, value)
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        assert!(self.len() <= self.capacity);
        assert_eq!(self.table.len(), self.order.len());
        assert_eq!(self.entries.len(), self.order.len());

        let mut prev = u32::NONE;
        let mut cur = self.order.head();
        let mut count = 0;
        while cur.is_some() {
            let entry = &self.entries[cur];
            assert_eq!(entry.prev, prev);
            assert_eq!(entry.hash, self.hasher.hash_one(&entry.key));
            assert_eq!(self.find(entry.hash, &entry.key), Some(cur));
            count += 1;
            prev = cur;
            cur = entry.next;
        }
        assert_eq!(prev, self.order.tail());
        assert_eq!(count, self.order.len());
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for LruCache<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// Iterator over a cache's entries, least recently used first.
pub struct Iter<'a, K, V> {
    entries: &'a Arena<Entry<K, V>>,
    front: u32,
    back: u32,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = &self.entries[self.front];
        self.front = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = &self.entries[self.back];
        self.back = entry.prev;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over a cache's keys, least recently used first.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over a cache's values, least recently used first.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

// ============================================================================
// Cursor
// ============================================================================

/// A fail-fast position in an [`LruCache`] that does not borrow it.
///
/// ```
/// use toolbox_collections::LruCache;
/// use toolbox_collections::error::Invalidated;
///
/// let mut cache = LruCache::new(4).unwrap();
/// cache.extend([(1, 'a'), (2, 'b')]);
///
/// let mut cursor = cache.cursor();
/// assert_eq!(cursor.advance(&cache), Ok(Some((&1, &'a'))));
///
/// cache.get(&1); // reorders, so the cursor is stale
/// assert_eq!(cursor.advance(&cache), Err(Invalidated));
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    next: u32,
    stamp: Stamp,
}

impl Cursor {
    /// Returns the next entry, or `Ok(None)` past the most recently used one.
    ///
    /// # Errors
    ///
    /// [`Invalidated`] if `cache` changed since the cursor was created or is
    /// not the cache that created it.
    pub fn advance<'a, K, V>(
        &mut self,
        cache: &'a LruCache<K, V>,
    ) -> Result<Option<(&'a K, &'a V)>, Invalidated> {
        cache.version.check(self.stamp)?;
        let Some(entry) = cache.entries.get(self.next) else {
            return Ok(None);
        };
        self.next = entry.next;
        Ok(Some((&entry.key, &entry.value)))
    }
}
