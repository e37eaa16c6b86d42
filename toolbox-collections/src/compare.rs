//! Ordering strategies for [`SkipList`](crate::SkipList).

use core::cmp::Ordering;

/// A total order over `T`.
///
/// Implementations must be consistent for the lifetime of the collection
/// that uses them: anti-symmetric, transitive, and deterministic. A skip
/// list built with an inconsistent comparator still never exhibits memory
/// unsafety, but its ordering and membership answers become meaningless.
///
/// Any `Fn(&T, &T) -> Ordering` closure is a comparator:
///
/// ```
/// use toolbox_collections::SkipList;
///
/// let mut descending: SkipList<u32, _> = SkipList::with_comparator(|a: &u32, b: &u32| b.cmp(a));
/// descending.extend([3, 9, 1]);
/// assert_eq!(descending.to_vec(), vec![9, 3, 1]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The natural order of `T`, as given by its [`Ord`] impl.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_matches_ord() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare(&2, &2), Ordering::Equal);
        assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
    }

    #[test]
    fn closure_is_a_comparator() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"abc", &"z"), Ordering::Greater);
        assert_eq!(by_len.compare(&"ab", &"yz"), Ordering::Equal);
    }
}
