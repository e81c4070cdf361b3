//! Copy-on-write maps built from shared diff layers.
//!
//! This module provides [`LazyMap`], a hash map with value semantics whose
//! copies are O(1):
//!
//! - Cloning a map aliases its current layer; no entries are copied.
//! - The first write through a handle whose layer is shared forks a small
//!   private layer holding just that edit.
//! - Writes through a handle that owns its layer exclusively mutate it in
//!   place.
//! - [`LazyMap::detach`] collapses a long chain of layers back into a single
//!   flat root.
//!
//! # Examples
//!
//! ```rust
//! use lazymap::LazyMap;
//!
//! let original = LazyMap::from([(1, 10), (2, 20), (3, 30)]);
//! let mut copy = original.clone();
//!
//! copy.insert(4, 40);
//! assert_eq!(copy.len(), 4);
//! assert_eq!(original.len(), 3);     // Original unchanged
//! assert!(!original.contains_key(&4));
//!
//! // The copy reads through a one-edit layer on top of the original
//! assert_eq!(copy.depth(), 1);
//! assert!(copy.detach());
//! assert_eq!(copy.depth(), 0);
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type for layers.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Layer Hasher Type Alias
// =============================================================================

/// Hasher used by every layer's edit table.
#[cfg(feature = "fxhash")]
pub(crate) type LayerHasher = rustc_hash::FxBuildHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub(crate) type LayerHasher = ahash::RandomState;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub(crate) type LayerHasher = std::collections::hash_map::RandomState;

mod error;
mod layer;
mod lazy_map;

pub use error::KeyNotFoundError;
pub use lazy_map::LazyMap;
pub use lazy_map::LazyMapIntoIterator;
pub use lazy_map::LazyMapIterator;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(LazyMap<String, i32>: Send, Sync, Clone);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(LazyMap<String, i32>: Send, Sync);

static_assertions::assert_impl_all!(KeyNotFoundError: std::error::Error, Send, Sync);

// =============================================================================
// Tests
// =============================================================================
