//! Error types for lazy map lookups.

/// Represents a failed "must exist" lookup.
///
/// Returned by [`LazyMap::at`](super::LazyMap::at) when the key is absent
/// from every layer of the handle's chain, or deleted by a nearer layer.
///
/// # Examples
///
/// ```rust
/// use lazymap::{KeyNotFoundError, LazyMap};
///
/// let map = LazyMap::from([(1, 10)]);
/// assert_eq!(map.at(&2), Err(KeyNotFoundError));
/// assert_eq!(format!("{}", KeyNotFoundError), "key not found in lazy map");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyNotFoundError;

impl std::fmt::Display for KeyNotFoundError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("key not found in lazy map")
    }
}

impl std::error::Error for KeyNotFoundError {}
