//! # lazymap
//!
//! A hash map with value semantics and O(1) copies, backed by a chain of
//! reference-counted copy-on-write diff layers.
//!
//! ## Overview
//!
//! Copying a [`LazyMap`] never duplicates its entries, yet every copy is
//! logically independent: mutating one copy is invisible to the others.
//!
//! - **Layers**: small overlays of key edits (set or deleted) stacked on a
//!   shared parent, with a complete snapshot at the root
//! - **Fork on write**: a write through a shared layer allocates a private
//!   one-edit layer; a write through an exclusive layer mutates it in place
//! - **Detach**: an explicit operation that collapses a long chain back into
//!   a single flat root
//!
//! ## Feature Flags
//!
//! - `arc`: Share layers through `Arc` so maps are `Send + Sync`
//! - `serde`: `Serialize`/`Deserialize` for `LazyMap`
//! - `fxhash`: Use `rustc-hash` for layer edit tables
//! - `ahash`: Use `ahash` for layer edit tables
//! - `rayon`: Parallel iteration over the merged view (implies `arc`)
//!
//! ## Example
//!
//! ```rust
//! use lazymap::prelude::*;
//!
//! let original = LazyMap::from([(1, 10), (2, 20), (3, 30)]);
//! let mut copy = original.clone();
//! copy.insert(4, 40);
//!
//! assert_eq!(copy.len(), 4);
//! assert_eq!(original.len(), 3);
//! assert_eq!(copy.at(&4), Ok(&40));
//! assert_eq!(original.at(&4), Err(KeyNotFoundError));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use lazymap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::map::*;
}

pub mod map;

pub use map::{KeyNotFoundError, LazyMap, LazyMapIntoIterator, LazyMapIterator};
