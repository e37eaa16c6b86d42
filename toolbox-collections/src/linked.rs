//! Intrusive doubly linked list over arena handles.
//!
//! Nodes embed their own prev/next links, so a node can be unlinked in O(1)
//! given only its handle. Every skip-list level is one of these lists, and so
//! is the cache's recency ordering.

use crate::arena::Arena;
use crate::handle::Handle;

/// Trait for arena nodes that participate in a [`List`].
pub(crate) trait Linked {
    /// Returns the next node's handle, or `u32::NONE` at the tail.
    fn next(&self) -> u32;

    /// Returns the previous node's handle, or `u32::NONE` at the head.
    fn prev(&self) -> u32;

    fn set_next(&mut self, idx: u32);

    fn set_prev(&mut self, idx: u32);
}

/// A doubly linked list whose nodes live in an [`Arena`].
///
/// The list itself only stores head, tail, and length.
#[derive(Debug, Clone)]
pub(crate) struct List {
    head: u32,
    tail: u32,
    len: usize,
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl List {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            head: u32::NONE,
            tail: u32::NONE,
            len: 0,
        }
    }

    #[inline]
    pub(crate) const fn head(&self) -> u32 {
        self.head
    }

    #[inline]
    pub(crate) const fn tail(&self) -> u32 {
        self.tail
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Links `idx` in as the new tail.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not occupied in `arena`.
    #[inline]
    pub(crate) fn push_back<T: Linked>(&mut self, arena: &mut Arena<T>, idx: u32) {
        {
            let node = &mut arena[idx];
            node.set_prev(self.tail);
            node.set_next(u32::NONE);
        }

        if self.tail.is_some() {
            arena[self.tail].set_next(idx);
        } else {
            self.head = idx;
        }

        self.tail = idx;
        self.len += 1;
    }

    /// Links `idx` in as the new head.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not occupied in `arena`.
    #[inline]
    pub(crate) fn push_front<T: Linked>(&mut self, arena: &mut Arena<T>, idx: u32) {
        {
            let node = &mut arena[idx];
            node.set_next(self.head);
            node.set_prev(u32::NONE);
        }

        if self.head.is_some() {
            arena[self.head].set_prev(idx);
        } else {
            self.tail = idx;
        }

        self.head = idx;
        self.len += 1;
    }

    /// Unlinks and returns the head, or `u32::NONE` if empty.
    ///
    /// The node stays in the arena.
    #[inline]
    pub(crate) fn pop_front<T: Linked>(&mut self, arena: &mut Arena<T>) -> u32 {
        let idx = self.head;
        if idx.is_some() {
            self.remove(arena, idx);
        }
        idx
    }

    /// Unlinks and returns the tail, or `u32::NONE` if empty.
    ///
    /// The node stays in the arena.
    #[inline]
    pub(crate) fn pop_back<T: Linked>(&mut self, arena: &mut Arena<T>) -> u32 {
        let idx = self.tail;
        if idx.is_some() {
            self.remove(arena, idx);
        }
        idx
    }

    /// Unlinks `idx` in O(1). The node stays in the arena with cleared links.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not occupied in `arena`.
    #[inline]
    pub(crate) fn remove<T: Linked>(&mut self, arena: &mut Arena<T>, idx: u32) {
        let (prev, next) = {
            let node = &arena[idx];
            (node.prev(), node.next())
        };

        if prev.is_some() {
            arena[prev].set_next(next);
        } else {
            self.head = next;
        }

        if next.is_some() {
            arena[next].set_prev(prev);
        } else {
            self.tail = prev;
        }

        let node = &mut arena[idx];
        node.set_prev(u32::NONE);
        node.set_next(u32::NONE);

        self.len -= 1;
    }

    /// Links `idx` in directly after `after`.
    ///
    /// # Panics
    ///
    /// Panics if `after` or `idx` is not occupied in `arena`.
    #[inline]
    pub(crate) fn insert_after<T: Linked>(
        &mut self,
        arena: &mut Arena<T>,
        after: u32,
        idx: u32,
    ) {
        let next = arena[after].next();

        {
            let node = &mut arena[idx];
            node.set_prev(after);
            node.set_next(next);
        }

        arena[after].set_next(idx);

        if next.is_some() {
            arena[next].set_prev(idx);
        } else {
            self.tail = idx;
        }

        self.len += 1;
    }

    /// Links `idx` in directly before `before`.
    ///
    /// # Panics
    ///
    /// Panics if `before` or `idx` is not occupied in `arena`.
    #[inline]
    pub(crate) fn insert_before<T: Linked>(
        &mut self,
        arena: &mut Arena<T>,
        before: u32,
        idx: u32,
    ) {
        let prev = arena[before].prev();

        {
            let node = &mut arena[idx];
            node.set_next(before);
            node.set_prev(prev);
        }

        arena[before].set_prev(idx);

        if prev.is_some() {
            arena[prev].set_next(idx);
        } else {
            self.head = idx;
        }

        self.len += 1;
    }

    /// Forgets every node without touching the arena.
    ///
    /// Only valid when the caller drops or clears the nodes itself.
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.head = u32::NONE;
        self.tail = u32::NONE;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Node {
        value: u64,
        next: u32,
        prev: u32,
    }

    impl Node {
        fn new(value: u64) -> Self {
            Self {
                value,
                next: u32::NONE,
                prev: u32::NONE,
            }
        }
    }

    impl Linked for Node {
        fn next(&self) -> u32 {
            self.next
        }
        fn prev(&self) -> u32 {
            self.prev
        }
        fn set_next(&mut self, idx: u32) {
            self.next = idx;
        }
        fn set_prev(&mut self, idx: u32) {
            self.prev = idx;
        }
    }

    fn forward(list: &List, arena: &Arena<Node>) -> Vec<u64> {
        let mut values = Vec::new();
        let mut idx = list.head();
        while idx.is_some() {
            values.push(arena[idx].value);
            idx = arena[idx].next;
        }
        values
    }

    fn backward(list: &List, arena: &Arena<Node>) -> Vec<u64> {
        let mut values = Vec::new();
        let mut idx = list.tail();
        while idx.is_some() {
            values.push(arena[idx].value);
            idx = arena[idx].prev;
        }
        values
    }

    fn filled(values: &[u64]) -> (List, Arena<Node>, Vec<u32>) {
        let mut arena = Arena::new();
        let mut list = List::new();
        let handles = values
            .iter()
            .map(|&v| {
                let idx = arena.insert(Node::new(v));
                list.push_back(&mut arena, idx);
                idx
            })
            .collect();
        (list, arena, handles)
    }

    #[test]
    fn new_list_is_empty() {
        let list: List = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
    }

    #[test]
    fn push_back_keeps_order() {
        let (list, arena, handles) = filled(&[1, 2, 3]);

        assert_eq!(list.len(), 3);
        assert_eq!(list.head(), handles[0]);
        assert_eq!(list.tail(), handles[2]);
        assert_eq!(forward(&list, &arena), vec![1, 2, 3]);
        assert_eq!(backward(&list, &arena), vec![3, 2, 1]);
    }

    #[test]
    fn push_front_reverses_order() {
        let mut arena: Arena<Node> = Arena::new();
        let mut list: List = List::new();

        for v in 1..=3 {
            let idx = arena.insert(Node::new(v));
            list.push_front(&mut arena, idx);
        }

        assert_eq!(forward(&list, &arena), vec![3, 2, 1]);
        assert_eq!(backward(&list, &arena), vec![1, 2, 3]);
    }

    #[test]
    fn pop_front_and_back() {
        let (mut list, mut arena, handles) = filled(&[1, 2, 3]);

        assert_eq!(list.pop_front(&mut arena), handles[0]);
        assert_eq!(list.pop_back(&mut arena), handles[2]);
        assert_eq!(forward(&list, &arena), vec![2]);

        assert_eq!(list.pop_back(&mut arena), handles[1]);
        assert!(list.is_empty());
        assert!(list.pop_front(&mut arena).is_none());
        assert!(list.pop_back(&mut arena).is_none());
    }

    #[test]
    fn remove_middle_clears_links() {
        let (mut list, mut arena, handles) = filled(&[1, 2, 3]);

        list.remove(&mut arena, handles[1]);

        assert_eq!(list.len(), 2);
        assert_eq!(forward(&list, &arena), vec![1, 3]);
        assert_eq!(backward(&list, &arena), vec![3, 1]);
        assert!(arena[handles[1]].next.is_none());
        assert!(arena[handles[1]].prev.is_none());
    }

    #[test]
    fn remove_head_and_tail() {
        let (mut list, mut arena, handles) = filled(&[1, 2, 3]);

        list.remove(&mut arena, handles[0]);
        assert_eq!(list.head(), handles[1]);

        list.remove(&mut arena, handles[2]);
        assert_eq!(list.tail(), handles[1]);
        assert_eq!(list.head(), handles[1]);
    }

    #[test]
    fn insert_after_and_before() {
        let (mut list, mut arena, handles) = filled(&[1, 3]);

        let two = arena.insert(Node::new(2));
        list.insert_after(&mut arena, handles[0], two);
        let four = arena.insert(Node::new(4));
        list.insert_after(&mut arena, handles[1], four);
        let zero = arena.insert(Node::new(0));
        list.insert_before(&mut arena, handles[0], zero);

        assert_eq!(list.len(), 5);
        assert_eq!(list.head(), zero);
        assert_eq!(list.tail(), four);
        assert_eq!(forward(&list, &arena), vec![0, 1, 2, 3, 4]);
        assert_eq!(backward(&list, &arena), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn reset_forgets_nodes() {
        let (mut list, mut arena, _) = filled(&[1, 2]);

        list.reset();
        arena.clear();

        assert!(list.is_empty());
        assert!(list.head().is_none());
        assert!(list.tail().is_none());
    }
}
