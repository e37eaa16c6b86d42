//! Slab-backed arena handing out stable, typed handles.
//!
//! Nodes of both containers live here and refer to each other by handle,
//! so the skip list's `prev`/`next`/`up`/`sub` graph and the recency list
//! never form ownership cycles. A handle stays valid until its slot is
//! removed; freed slots are reused by later inserts.

use core::ops;

use slab::Slab;

use crate::handle::Handle;

/// Growable node storage addressed by `u32` handles.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Slab<T>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Creates an empty arena.
    pub(crate) fn new() -> Self {
        Self { slots: Slab::new() }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Stores `value` and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if the slot number does not fit below the `u32` sentinel.
    #[inline]
    pub(crate) fn insert(&mut self, value: T) -> u32 {
        let slot = self.slots.insert(value);
        match u32::try_from(slot) {
            Ok(idx) if idx.is_some() => idx,
            _ => panic!("arena exhausted the handle space"),
        }
    }

    /// Removes the value behind `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is vacant.
    #[inline]
    pub(crate) fn remove(&mut self, idx: u32) -> T {
        self.slots
            .try_remove(idx as usize)
            .expect("invalid index")
    }

    #[inline]
    pub(crate) fn get(&self, idx: u32) -> Option<&T> {
        if idx.is_none() {
            return None;
        }
        self.slots.get(idx as usize)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, idx: u32) -> Option<&mut T> {
        if idx.is_none() {
            return None;
        }
        self.slots.get_mut(idx as usize)
    }

    /// Drops every value. All outstanding handles become vacant.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}

impl<T> ops::Index<u32> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, idx: u32) -> &T {
        self.get(idx).expect("invalid index")
    }
}

impl<T> ops::IndexMut<u32> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, idx: u32) -> &mut T {
        self.get_mut(idx).expect("invalid index")
    }
}
