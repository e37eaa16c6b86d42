//! Skip list - a deterministic, threshold-promoted sorted multiset.
//!
//! The bottom level links every value in comparator order. Each level above
//! is a sparser subsequence of the one below; a node on level `L + 1` sits
//! directly above (`sub`) the node on level `L` holding the same value, and
//! that node points back `up` at it.
//!
//! ```text
//! Level 2:  1 ─────────────────────────► 9 ───────────────► 14
//!           │                            │                  │
//! Level 1:  1 ──────────► 5 ───────────► 9 ──────► 12 ────► 14
//!           │             │              │         │        │
//! Level 0:  1 ──► 3 ──► 5 ──► 6 ──► 8 ──► 9 ──► 11 ──► 12 ──► 13 ──► 14
//! ```
//!
//! # Promotion
//!
//! There is no coin flipping. While an insert searches a level it counts the
//! consecutive nodes it steps over that have no `up` link; once that run
//! exceeds the configured threshold, the node it stands on is promoted one
//! level up (creating a new top level if needed). Given the same inserts and
//! threshold the structure is always the same.
//!
//! The global minimum and maximum are present on every level, so every level
//! starts and ends with the same two values. New extremes are threaded
//! through every level; the boundary they replace keeps its upper nodes only
//! while it ends a run longer than the threshold.
//!
//! # Example
//!
//! ```
//! use toolbox_collections::SkipList;
//!
//! let mut list = SkipList::with_threshold(2).unwrap();
//! for v in [5, 1, 3, 9, 7] {
//!     list.insert(v);
//! }
//! assert_eq!(list.to_vec(), vec![1, 3, 5, 7, 9]);
//!
//! assert!(list.remove(&5));
//! assert!(!list.remove(&5));
//! assert_eq!(list.to_vec(), vec![1, 3, 7, 9]);
//! assert_eq!(list.len(), 4);
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use tracing::trace;

use crate::arena::Arena;
use crate::compare::{Comparator, Natural};
use crate::error::{ConfigError, Invalidated, TooSmall};
use crate::handle::Handle;
use crate::linked::{Linked, List};
use crate::version::{Stamp, Version};

/// Promotion threshold used by [`SkipList::new`] and [`SkipList::with_comparator`].
pub const DEFAULT_THRESHOLD: usize = 10;

/// Smallest accepted promotion threshold.
pub const MIN_THRESHOLD: usize = 2;

// ============================================================================
// Node
// ============================================================================

/// One position on one level. The value lives in a separate arena and is
/// shared by every node of the same tower.
#[derive(Debug, Clone, Copy)]
struct Node {
    value: u32,
    prev: u32,
    next: u32,
    up: u32,
    sub: u32,
}

impl Node {
    #[inline]
    fn new(value: u32, sub: u32) -> Self {
        Self {
            value,
            prev: u32::NONE,
            next: u32::NONE,
            up: u32::NONE,
            sub,
        }
    }
}

impl Linked for Node {
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

// ============================================================================
// SkipList
// ============================================================================

/// A sorted, duplicate-tolerant collection with O(log n) expected search,
/// insertion and removal.
///
/// # Type Parameters
///
/// - `T`: element type
/// - `C`: [`Comparator`] over `T`, defaults to [`Natural`] (`Ord`)
///
/// Not internally synchronized; wrap it in
/// [`Synchronized`](crate::Synchronized) to share it between threads.
#[derive(Clone)]
pub struct SkipList<T, C = Natural> {
    /// Element storage. One slot per element, shared by its whole tower.
    values: Arena<T>,
    /// Node storage for every level.
    nodes: Arena<Node>,
    /// `levels[0]` is the bottom level. Never empty.
    levels: Vec<List>,
    comparator: C,
    threshold: usize,
    version: Version,
}

impl<T: Ord> SkipList<T> {
    /// Creates an empty list in natural order with [`DEFAULT_THRESHOLD`].
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Creates an empty list in natural order with a custom promotion threshold.
    ///
    /// Lower thresholds build more levels: more memory, shorter scans.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ThresholdTooSmall`] if `threshold < MIN_THRESHOLD`.
    pub fn with_threshold(threshold: usize) -> Result<Self, ConfigError> {
        Self::with_threshold_and_comparator(threshold, Natural)
    }
}

impl<T: Ord> Default for SkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> SkipList<T, C> {
    /// Creates an empty list ordered by `comparator` with [`DEFAULT_THRESHOLD`].
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            values: Arena::new(),
            nodes: Arena::new(),
            levels: vec![List::new()],
            comparator,
            threshold: DEFAULT_THRESHOLD,
            version: Version::new(),
        }
    }

    /// Creates an empty list ordered by `comparator` with a custom threshold.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ThresholdTooSmall`] if `threshold < MIN_THRESHOLD`.
    pub fn with_threshold_and_comparator(
        threshold: usize,
        comparator: C,
    ) -> Result<Self, ConfigError> {
        if threshold < MIN_THRESHOLD {
            return Err(ConfigError::ThresholdTooSmall { threshold });
        }
        let mut list = Self::with_comparator(comparator);
        list.threshold = threshold;
        Ok(list)
    }

    /// Returns the promotion threshold.
    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the number of elements, duplicates counted individually.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    /// Returns the number of levels, including the bottom one.
    #[inline]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Returns the smallest element.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        let head = self.levels[0].head();
        head.is_some().then(|| self.value_at(head))
    }

    /// Returns the largest element.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        let tail = self.levels[0].tail();
        tail.is_some().then(|| self.value_at(tail))
    }

    /// Removes and returns the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        let head = self.levels[0].head();
        head.is_some().then(|| self.detach(head))
    }

    /// Removes and returns the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        let tail = self.levels[0].tail();
        tail.is_some().then(|| self.detach(tail))
    }

    /// Removes all elements and every upper level.
    pub fn clear(&mut self) {
        self.version.bump();
        self.values.clear();
        self.reset_levels();
    }

    /// Returns an iterator over the elements in ascending order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            list: self,
            front: self.levels[0].head(),
            back: self.levels[0].tail(),
            remaining: self.len(),
        }
    }

    /// Returns a detached cursor positioned before the smallest element.
    ///
    /// Unlike [`iter`](Self::iter) the cursor does not borrow the list, so
    /// the list may be mutated between steps; the next step then fails with
    /// [`Invalidated`] instead of walking a changed structure.
    #[inline]
    pub fn cursor(&self) -> Cursor {
        Cursor {
            next: self.levels[0].head(),
            stamp: self.version.stamp(),
        }
    }

    /// Clones the elements into a `Vec` in ascending order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Clones the elements in ascending order into `dest`, starting at `start`.
    ///
    /// # Errors
    ///
    /// [`TooSmall`] if `dest[start..]` cannot hold every element. `dest` is
    /// left untouched in that case.
    pub fn copy_to(&self, dest: &mut [T], start: usize) -> Result<(), TooSmall>
    where
        T: Clone,
    {
        let required = self.len();
        let Some(window) = dest.get_mut(start..) else {
            return Err(TooSmall {
                required,
                available: 0,
            });
        };
        if window.len() < required {
            return Err(TooSmall {
                required,
                available: window.len(),
            });
        }
        for (slot, value) in window.iter_mut().zip(self.iter()) {
            slot.clone_from(value);
        }
        Ok(())
    }

    // ========================================================================
    // Structural helpers (no comparisons)
    // ========================================================================

    #[inline]
    fn value_at(&self, node: u32) -> &T {
        &self.values[self.nodes[node].value]
    }

    fn reset_levels(&mut self) {
        self.nodes.clear();
        self.levels.truncate(1);
        self.levels[0].reset();
    }

    /// Creates an unlinked node one level above `below`, mirroring its value.
    fn raise(&mut self, below: u32) -> u32 {
        let value = self.nodes[below].value;
        let node = self.nodes.insert(Node::new(value, below));
        self.nodes[below].up = node;
        node
    }

    /// Pushes a new top level holding mirrors of `spine`, left to right.
    fn grow(&mut self, spine: [u32; 3]) {
        let mut level = List::new();
        for below in spine {
            let node = self.raise(below);
            level.push_back(&mut self.nodes, node);
        }
        self.levels.push(level);
        trace!(depth = self.levels.len(), len = self.len(), "skiplist level added");
    }

    /// Unlinks `node` from `level` and frees it. Links into it are not repaired.
    fn discard(&mut self, level: usize, node: u32) {
        self.levels[level].remove(&mut self.nodes, node);
        self.nodes.remove(node);
    }

    /// Promotes the node `node` on `level`, which the caller just stepped onto.
    fn promote(&mut self, level: usize, node: u32) {
        if level + 1 == self.levels.len() {
            let first = self.levels[level].head();
            let last = self.levels[level].tail();
            self.grow([first, node, last]);
            return;
        }

        // Below the top the level head is always promoted, so this terminates.
        let mut left = self.nodes[node].prev;
        while self.nodes[left].up.is_none() {
            left = self.nodes[left].prev;
        }
        let anchor = self.nodes[left].up;
        let raised = self.raise(node);
        self.levels[level + 1].insert_after(&mut self.nodes, anchor, raised);
    }

    /// Length of the unpromoted run on `level` ending at `node`, counting
    /// `node` itself. Stops counting once the run exceeds the threshold.
    fn tail_run(&self, level: usize, node: u32) -> usize {
        let head = self.levels[level].head();
        let mut run = 1;
        let mut cur = self.nodes[node].prev;
        while run <= self.threshold && cur.is_some() && cur != head && self.nodes[cur].up.is_none()
        {
            run += 1;
            cur = self.nodes[cur].prev;
        }
        run
    }

    /// Mirror of [`tail_run`](Self::tail_run) walking right from `node`.
    fn head_run(&self, level: usize, node: u32) -> usize {
        let tail = self.levels[level].tail();
        let mut run = 1;
        let mut cur = self.nodes[node].next;
        while run <= self.threshold && cur.is_some() && cur != tail && self.nodes[cur].up.is_none()
        {
            run += 1;
            cur = self.nodes[cur].next;
        }
        run
    }

    /// Threads a new minimum through every level.
    fn push_front(&mut self, value: T) {
        let slot = self.values.insert(value);
        let mut below = u32::NONE;
        let mut old = u32::NONE;
        let mut keep = true;

        for level in 0..self.levels.len() {
            old = self.levels[level].head();
            if !keep {
                self.discard(level, old);
            }

            let node = self.nodes.insert(Node::new(slot, below));
            if below.is_some() {
                self.nodes[below].up = node;
            }
            self.levels[level].push_front(&mut self.nodes, node);

            let promoted = keep && self.head_run(level, old) > self.threshold;
            if keep && !promoted {
                self.nodes[old].up = u32::NONE;
            }
            keep = promoted;
            below = node;
        }

        if keep {
            let top = self.levels.len() - 1;
            let last = self.levels[top].tail();
            self.grow([below, old, last]);
        }
    }

    /// Threads a new maximum through every level.
    fn push_back(&mut self, value: T) {
        let slot = self.values.insert(value);
        let mut below = u32::NONE;
        let mut old = u32::NONE;
        let mut keep = true;

        for level in 0..self.levels.len() {
            old = self.levels[level].tail();
            if !keep {
                self.discard(level, old);
            }

            let node = self.nodes.insert(Node::new(slot, below));
            if below.is_some() {
                self.nodes[below].up = node;
            }
            self.levels[level].push_back(&mut self.nodes, node);

            let promoted = keep && self.tail_run(level, old) > self.threshold;
            if keep && !promoted {
                self.nodes[old].up = u32::NONE;
            }
            keep = promoted;
            below = node;
        }

        if keep {
            let top = self.levels.len() - 1;
            let first = self.levels[top].head();
            self.grow([first, old, below]);
        }
    }

    /// Removes the bottom-level node `node` with its tower and returns its value.
    fn detach(&mut self, node: u32) -> T {
        self.version.bump();
        let slot = self.nodes[node].value;

        if self.len() == 1 {
            self.reset_levels();
        } else if node == self.levels[0].head() {
            self.retire_head();
        } else if node == self.levels[0].tail() {
            self.retire_tail();
        } else {
            self.unlink_tower(node);
        }

        self.collapse();
        self.values.remove(slot)
    }

    /// Removes the minimum's tower after raising its successor to full height.
    fn retire_head(&mut self) {
        let depth = self.levels.len();
        let mut old = self.levels[0].head();
        let mut heir = self.nodes[old].next;

        for level in 0..depth {
            let old_up = self.nodes[old].up;
            let heir_up = if level + 1 == depth {
                u32::NONE
            } else if self.nodes[heir].up.is_some() {
                self.nodes[heir].up
            } else {
                let raised = self.raise(heir);
                self.levels[level + 1].insert_after(&mut self.nodes, old_up, raised);
                raised
            };
            self.discard(level, old);
            old = old_up;
            heir = heir_up;
        }
    }

    /// Removes the maximum's tower after raising its predecessor to full height.
    fn retire_tail(&mut self) {
        let depth = self.levels.len();
        let mut old = self.levels[0].tail();
        let mut heir = self.nodes[old].prev;

        for level in 0..depth {
            let old_up = self.nodes[old].up;
            let heir_up = if level + 1 == depth {
                u32::NONE
            } else if self.nodes[heir].up.is_some() {
                self.nodes[heir].up
            } else {
                let raised = self.raise(heir);
                self.levels[level + 1].insert_before(&mut self.nodes, old_up, raised);
                raised
            };
            self.discard(level, old);
            old = old_up;
            heir = heir_up;
        }
    }

    /// Removes an interior bottom node and every node stacked above it.
    fn unlink_tower(&mut self, bottom: u32) {
        let mut node = bottom;
        let mut level = 0;
        while node.is_some() {
            let up = self.nodes[node].up;
            self.discard(level, node);
            node = up;
            level += 1;
        }
    }

    /// Drops top levels that hold nothing but the two boundary nodes.
    fn collapse(&mut self) {
        while self.levels.len() > 1 && self.levels[self.levels.len() - 1].len() <= 2 {
            let Some(level) = self.levels.pop() else {
                break;
            };
            let mut node = level.head();
            while node.is_some() {
                let Node { next, sub, .. } = self.nodes.remove(node);
                self.nodes[sub].up = u32::NONE;
                node = next;
            }
            trace!(depth = self.levels.len(), len = self.len(), "skiplist level collapsed");
        }
    }
}

impl<T, C: Comparator<T>> SkipList<T, C> {
    /// Inserts `value` in order. Equal values are kept, after existing ones.
    pub fn insert(&mut self, value: T) {
        self.version.bump();

        let head = self.levels[0].head();
        if head.is_none() {
            let slot = self.values.insert(value);
            let node = self.nodes.insert(Node::new(slot, u32::NONE));
            self.levels[0].push_back(&mut self.nodes, node);
            return;
        }

        let tail = self.levels[0].tail();
        if self.comparator.compare(&value, self.value_at(head)) == Ordering::Less {
            self.push_front(value);
        } else if self.comparator.compare(&value, self.value_at(tail)) != Ordering::Less {
            self.push_back(value);
        } else {
            let pred = self.descend_promoting(&value);
            let slot = self.values.insert(value);
            let node = self.nodes.insert(Node::new(slot, u32::NONE));
            self.levels[0].insert_after(&mut self.nodes, pred, node);
        }
    }

    /// Returns `true` if an element comparing equal to `value` is present.
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Returns the element comparing equal to `value`, if any.
    #[inline]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.find(value).map(|node| self.value_at(node))
    }

    /// Removes one element comparing equal to `value`.
    ///
    /// Returns `false` if there is none; the elements are then unchanged.
    #[inline]
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns one element comparing equal to `value`.
    ///
    /// Among equal elements the most recently inserted one is removed. The
    /// search promotes like an insert does, so removals keep refilling the
    /// levels their towers leave behind.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let head = self.levels[0].head();
        if head.is_none() || self.comparator.compare(self.value_at(head), value) == Ordering::Greater
        {
            return None;
        }

        let node = self.descend_promoting(value);
        if self.comparator.compare(self.value_at(node), value) != Ordering::Equal {
            return None;
        }
        Some(self.detach(node))
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Finds the last bottom-level node comparing equal to `value`.
    fn find(&self, value: &T) -> Option<u32> {
        let mut level = self.levels.len() - 1;
        let mut cur = self.levels[level].head();
        if cur.is_none() || self.comparator.compare(self.value_at(cur), value) == Ordering::Greater
        {
            return None;
        }

        loop {
            loop {
                let next = self.nodes[cur].next;
                if next.is_none()
                    || self.comparator.compare(self.value_at(next), value) == Ordering::Greater
                {
                    break;
                }
                cur = next;
            }
            if level == 0 {
                break;
            }
            cur = self.nodes[cur].sub;
            level -= 1;
        }

        (self.comparator.compare(self.value_at(cur), value) == Ordering::Equal).then_some(cur)
    }

    /// Finds the last bottom-level node comparing `<=` to `value`, promoting
    /// along the way.
    ///
    /// The caller guarantees `first <= value`. Level tails end a run without
    /// being promoted themselves.
    fn descend_promoting(&mut self, value: &T) -> u32 {
        let mut level = self.levels.len() - 1;
        let mut cur = self.levels[level].head();

        loop {
            let mut run = 0;
            loop {
                let next = self.nodes[cur].next;
                if next.is_none()
                    || self.comparator.compare(self.value_at(next), value) == Ordering::Greater
                {
                    break;
                }
                cur = next;
                if self.nodes[cur].up.is_some() || cur == self.levels[level].tail() {
                    run = 0;
                } else {
                    run += 1;
                    if run > self.threshold {
                        self.promote(level, cur);
                        run = 0;
                    }
                }
            }
            if level == 0 {
                return cur;
            }
            cur = self.nodes[cur].sub;
            level -= 1;
        }
    }

    #[cfg(test)]
    fn assert_invariants(&self) {
        assert!(!self.levels.is_empty());
        assert_eq!(self.values.len(), self.len());
        let total: usize = self.levels.iter().map(List::len).sum();
        assert_eq!(self.nodes.len(), total, "orphaned nodes");
        if self.levels.len() > 1 {
            assert!(self.levels[self.levels.len() - 1].len() >= 3, "degenerate top level");
        }

        let depth = self.levels.len();
        for (level, list) in self.levels.iter().enumerate() {
            let mut count = 0;
            let mut prev = u32::NONE;
            let mut cur = list.head();
            let mut below = if level > 0 {
                self.levels[level - 1].head()
            } else {
                u32::NONE
            };

            while cur.is_some() {
                let node = self.nodes[cur];
                assert_eq!(node.prev, prev, "broken prev link on level {level}");
                if prev.is_some() {
                    assert_ne!(
                        self.comparator.compare(self.value_at(prev), self.value_at(cur)),
                        Ordering::Greater,
                        "level {level} out of order"
                    );
                }

                if level == 0 {
                    assert!(node.sub.is_none());
                } else {
                    let sub = self.nodes[node.sub];
                    assert_eq!(sub.up, cur, "sub/up mismatch on level {level}");
                    assert_eq!(sub.value, node.value, "tower value mismatch");
                    while below != node.sub {
                        assert!(below.is_some(), "level {level} not a subsequence");
                        below = self.nodes[below].next;
                    }
                    below = self.nodes[below].next;
                }

                if node.up.is_some() {
                    assert!(level + 1 < depth);
                    assert_eq!(self.nodes[node.up].sub, cur);
                }

                count += 1;
                prev = cur;
                cur = node.next;
            }

            assert_eq!(prev, list.tail());
            assert_eq!(count, list.len());
            if level > 0 {
                assert_eq!(self.nodes[list.head()].sub, self.levels[level - 1].head());
                assert_eq!(self.nodes[list.tail()].sub, self.levels[level - 1].tail());
            }
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SkipList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, C: Comparator<T>> Extend<T> for SkipList<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a SkipList<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for SkipList<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

// ============================================================================
// Iterators
// ============================================================================

/// Borrowing iterator over a [`SkipList`] in ascending order.
pub struct Iter<'a, T, C> {
    list: &'a SkipList<T, C>,
    front: u32,
    back: u32,
    remaining: usize,
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.front;
        self.front = self.list.nodes[node].next;
        self.remaining -= 1;
        Some(self.list.value_at(node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C> DoubleEndedIterator for Iter<'_, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.back;
        self.back = self.list.nodes[node].prev;
        self.remaining -= 1;
        Some(self.list.value_at(node))
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

impl<T, C> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Owning iterator over a [`SkipList`] in ascending order.
pub struct IntoIter<T, C> {
    list: SkipList<T, C>,
}

impl<T, C> Iterator for IntoIter<T, C> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, C> DoubleEndedIterator for IntoIter<T, C> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_last()
    }
}

impl<T, C> ExactSizeIterator for IntoIter<T, C> {}

impl<T, C> FusedIterator for IntoIter<T, C> {}

// ============================================================================
// Cursor
// ============================================================================

/// A fail-fast position in a [`SkipList`] that does not borrow it.
///
/// Obtained from [`SkipList::cursor`]. Every step re-validates against the
/// list: after any insert, removal or clear, [`advance`](Self::advance)
/// returns [`Invalidated`] for good.
///
/// ```
/// use toolbox_collections::SkipList;
/// use toolbox_collections::error::Invalidated;
///
/// let mut list: SkipList<u32> = [2, 1].into_iter().collect();
/// let mut cursor = list.cursor();
/// assert_eq!(cursor.advance(&list), Ok(Some(&1)));
///
/// list.insert(3);
/// assert_eq!(cursor.advance(&list), Err(Invalidated));
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    next: u32,
    stamp: Stamp,
}

impl Cursor {
    /// Returns the next element, or `Ok(None)` past the end.
    ///
    /// # Errors
    ///
    /// [`Invalidated`] if `list` changed since the cursor was created or is
    /// not the list that created it.
    pub fn advance<'a, T, C>(
        &mut self,
        list: &'a SkipList<T, C>,
    ) -> Result<Option<&'a T>, Invalidated> {
        list.version.check(self.stamp)?;
        if self.next.is_none() {
            return Ok(None);
        }
        let node = self.next;
        self.next = list.nodes[node].next;
        Ok(Some(list.value_at(node)))
    }
}
