//! Error types for container operations.

use core::fmt;

/// Invalid construction parameter. Parameters are never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Skip-list promotion threshold below [`MIN_THRESHOLD`](crate::skiplist::MIN_THRESHOLD).
    ThresholdTooSmall {
        /// The rejected threshold.
        threshold: usize,
    },
    /// Cache capacity of zero.
    ZeroCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ThresholdTooSmall { threshold } => write!(
                f,
                "threshold {} is below the minimum of {}",
                threshold,
                crate::skiplist::MIN_THRESHOLD
            ),
            ConfigError::ZeroCapacity => write!(f, "capacity must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Lookup of a key that is not present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFound;

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key not found")
    }
}

impl std::error::Error for KeyNotFound {}

/// Insertion of a key that is already present.
///
/// Carries the rejected pair back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateKey<K, V> {
    /// The key that was already present.
    pub key: K,
    /// The value that was not inserted.
    pub value: V,
}

impl<K, V> DuplicateKey<K, V> {
    /// Returns the pair that could not be inserted.
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> fmt::Display for DuplicateKey<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key is already present")
    }
}

impl<K: fmt::Debug, V: fmt::Debug> std::error::Error for DuplicateKey<K, V> {}

/// A cursor observed a structural change to its collection.
///
/// Also returned when a cursor is driven against a collection other than the
/// one that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidated;

impl fmt::Display for Invalidated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collection was modified during iteration")
    }
}

impl std::error::Error for Invalidated {}

/// Destination slice too short for a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooSmall {
    /// Slots needed from the start offset.
    pub required: usize,
    /// Slots available from the start offset.
    pub available: usize,
}

impl fmt::Display for TooSmall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "destination has room for {} elements, {} required",
            self.available, self.required
        )
    }
}

impl std::error::Error for TooSmall {}
