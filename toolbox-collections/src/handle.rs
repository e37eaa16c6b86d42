//! `u32` node handles with an in-band "no link" value.
//!
//! Links are stored as bare `u32`s rather than `Option<u32>`, so a skip-list
//! node with four links stays at 16 bytes of links. `u32::MAX` is never
//! handed out by an arena and marks the end of a chain.

/// Sentinel checks on a raw `u32` link.
pub(crate) trait Handle: Copy {
    /// The "no node" handle.
    const NONE: Self;

    fn is_none(self) -> bool;

    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }
}

impl Handle for u32 {
    const NONE: Self = u32::MAX;

    #[inline]
    fn is_none(self) -> bool {
        self == u32::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_is_the_only_sentinel() {
        assert!(u32::NONE.is_none());
        assert!(!u32::NONE.is_some());
        assert!(0u32.is_some());
        assert!((u32::MAX - 1).is_some());
    }
}
