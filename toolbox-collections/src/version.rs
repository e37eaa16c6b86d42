//! Structural version counters backing fail-fast cursors.
//!
//! Each container carries a [`Version`]: a process-unique owner id plus a
//! counter bumped on every structural mutation. Cursors capture a [`Stamp`]
//! at creation and compare it on every step.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Invalidated;

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
pub(crate) struct Version {
    owner: u64,
    count: u64,
}

/// A snapshot of a [`Version`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Stamp {
    owner: u64,
    count: u64,
}

impl Version {
    pub(crate) fn new() -> Self {
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            count: 0,
        }
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        self.count = self.count.wrapping_add(1);
    }

    #[inline]
    pub(crate) fn stamp(&self) -> Stamp {
        Stamp {
            owner: self.owner,
            count: self.count,
        }
    }

    /// Fails if `stamp` came from another container or an older version.
    #[inline]
    pub(crate) fn check(&self, stamp: Stamp) -> Result<(), Invalidated> {
        if stamp == self.stamp() {
            Ok(())
        } else {
            Err(Invalidated)
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new()
    }
}

// A clone is a different container; its cursors must not validate against
// the source.
impl Clone for Version {
    fn clone(&self) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stamp_validates() {
        let version = Version::new();
        assert_eq!(version.check(version.stamp()), Ok(()));
    }

    #[test]
    fn bump_invalidates_old_stamps() {
        let mut version = Version::new();
        let stamp = version.stamp();
        version.bump();
        assert_eq!(version.check(stamp), Err(Invalidated));
        assert_eq!(version.check(version.stamp()), Ok(()));
    }

    #[test]
    fn owners_are_distinct() {
        let a = Version::new();
        let b = a.clone();
        assert_eq!(b.check(a.stamp()), Err(Invalidated));
    }
}
