//! Whole-container locking for shared use.
//!
//! [`SkipList`](crate::SkipList) and [`LruCache`](crate::LruCache) are plain
//! single-threaded structures. A lookup on the cache reorders it, so even
//! reads mutate; sharing either one across threads means putting the whole
//! instance behind one lock. [`Synchronized`] is that lock.
//!
//! ```
//! use std::thread;
//! use toolbox_collections::{LruCache, Synchronized};
//!
//! let cache = Synchronized::new(LruCache::new(128).unwrap());
//!
//! thread::scope(|s| {
//!     for t in 0..4u32 {
//!         let cache = &cache;
//!         s.spawn(move || {
//!             for i in 0..16 {
//!                 cache.with(|c| c.set(t * 100 + i, i));
//!             }
//!         });
//!     }
//! });
//!
//! assert_eq!(cache.lock().len(), 64);
//! ```

use parking_lot::{Mutex, MutexGuard};

/// A container behind a single mutex.
///
/// Every access goes through [`lock`](Self::lock) or [`with`](Self::with);
/// hold one guard across a multi-step sequence to keep it atomic.
#[derive(Debug, Default)]
pub struct Synchronized<C> {
    inner: Mutex<C>,
}

impl<C> Synchronized<C> {
    /// Wraps `container`.
    pub fn new(container: C) -> Self {
        Self {
            inner: Mutex::new(container),
        }
    }

    /// Locks the container, blocking until it is available.
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, C> {
        self.inner.lock()
    }

    /// Runs `f` with the container locked.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Returns the container without locking; `&mut self` proves exclusivity.
    #[inline]
    pub fn get_mut(&mut self) -> &mut C {
        self.inner.get_mut()
    }

    /// Unwraps the container.
    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }
}

impl<C> From<C> for Synchronized<C> {
    fn from(container: C) -> Self {
        Self::new(container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LruCache, SkipList};
    use std::thread;

    #[test]
    fn concurrent_inserts_are_all_kept() {
        let list = Synchronized::new(SkipList::new());

        thread::scope(|s| {
            for t in 0..4u64 {
                let list = &list;
                s.spawn(move || {
                    for i in 0..250 {
                        list.with(|l| l.insert(i * 4 + t));
                    }
                });
            }
        });

        let list = list.into_inner();
        assert_eq!(list.len(), 1000);
        assert_eq!(list.to_vec(), (0..1000).collect::<Vec<u64>>());
    }

    #[test]
    fn guard_spans_multiple_steps() {
        let cache: Synchronized<LruCache<u32, u32>> = LruCache::new(2).unwrap().into();

        thread::scope(|s| {
            for t in 0..8u32 {
                let cache = &cache;
                s.spawn(move || {
                    let mut guard = cache.lock();
                    let next = guard.peek(&0).copied().unwrap_or(0) + 1;
                    guard.set(0, next);
                    guard.set(100 + t, t);
                });
            }
        });

        let mut cache = cache;
        assert_eq!(cache.get_mut().peek(&0), Some(&8));
        assert_eq!(cache.get_mut().len(), 2);
    }

    #[test]
    fn default_wraps_default() {
        let list: Synchronized<SkipList<u8>> = Synchronized::default();
        assert!(list.lock().is_empty());
    }
}
