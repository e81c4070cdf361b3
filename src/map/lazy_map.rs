//! Value-semantic hash map with O(1) copies.
//!
//! This module provides [`LazyMap`], a handle onto a chain of shared diff
//! layers.
//!
//! # Overview
//!
//! Every handle points at exactly one layer. A layer records local edits
//! (set or deleted) relative to its parent; a layer with no parent is a root
//! holding the complete content. Reads walk from the handle's layer toward
//! the root and the nearest layer that mentions a key decides its value.
//!
//! Writes go through a write barrier:
//!
//! - If the handle holds the only reference to its layer, the layer is
//!   mutated in place.
//! - Otherwise a new layer holding just this edit is forked on top of the
//!   shared one, and the handle moves to it.
//!
//! A layer is referenced by handles and by the layers forked from it, so a
//! layer that is the parent of another layer is never mutated in place.
//!
//! - O(1) clone, `len` and `is_empty`
//! - O(depth) `get`, `insert`, `erase` and friends
//! - O(depth + size) `detach` and iteration
//!
//! # Examples
//!
//! ```rust
//! use lazymap::LazyMap;
//!
//! let mut first = LazyMap::from([("a", 1), ("b", 2)]);
//! let second = first.clone();
//!
//! first.insert_or_assign("a", 100);
//! first.erase("b");
//!
//! assert_eq!(first.get("a"), Some(&100));
//! assert_eq!(second.get("a"), Some(&1));   // Copy unchanged
//! assert_eq!(second.get("b"), Some(&2));
//! ```

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::iter::successors;

use log::{debug, trace};

use super::layer::{Edit, Layer, Lookup};
use super::{KeyNotFoundError, LayerHasher, ReferenceCounter};

// =============================================================================
// LazyMap Definition
// =============================================================================

/// A hash map whose copies share storage until written.
///
/// `LazyMap` behaves like an ordinary key-value dictionary with value
/// semantics: mutating one copy is never visible through another. Cloning
/// is O(1) because the clone aliases the same layer; the first write through
/// either handle forks a private layer.
///
/// Long fork chains slow down lookups. [`detach`](Self::detach) flattens the
/// chain into a fresh root on request; nothing compacts automatically.
///
/// # Time Complexity
///
/// | Operation          | Complexity        |
/// |--------------------|-------------------|
/// | `clone`            | O(1)              |
/// | `len`              | O(1)              |
/// | `get`              | O(depth)          |
/// | `insert`           | O(depth)          |
/// | `insert_or_assign` | O(depth)          |
/// | `erase`            | O(depth)          |
/// | `clear`            | O(1)              |
/// | `depth`            | O(depth)          |
/// | `detach`           | O(depth + size)   |
/// | `iter`             | O(depth + size)   |
///
/// # Examples
///
/// ```rust
/// use lazymap::LazyMap;
///
/// let mut map: LazyMap<i32, i32> = LazyMap::new();
/// assert!(map.insert(1, 10));
/// assert!(!map.insert(1, 11)); // Does not overwrite
/// assert_eq!(map.at(&1), Ok(&10));
/// ```
pub struct LazyMap<K, V> {
    current: ReferenceCounter<Layer<K, V>>,
}

impl<K, V> LazyMap<K, V> {
    /// Creates an empty map backed by a fresh root layer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let map: LazyMap<String, i32> = LazyMap::new();
    /// assert!(map.is_empty());
    /// assert!(map.is_detached());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: ReferenceCounter::new(Layer::empty()),
        }
    }

    /// Returns the number of live entries.
    ///
    /// # Complexity
    ///
    /// O(1); every layer caches its effective size.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.size()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of parent hops from the current layer to its root.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let original = LazyMap::from([(1, 10)]);
    /// let mut copy = original.clone();
    /// assert_eq!(copy.depth(), 0);
    ///
    /// copy.insert(2, 20); // Shared layer: forks
    /// assert_eq!(copy.depth(), 1);
    ///
    /// copy.insert(3, 30); // Exclusive layer: mutates in place
    /// assert_eq!(copy.depth(), 1);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers().count() - 1
    }

    /// Returns `true` if the current layer is a root.
    #[inline]
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.current.is_root()
    }

    /// Returns `true` if both handles currently point at the same layer.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let original = LazyMap::from([(1, 10)]);
    /// let mut copy = original.clone();
    /// assert!(copy.ptr_eq(&original));
    ///
    /// copy.insert(2, 20);
    /// assert!(!copy.ptr_eq(&original));
    /// ```
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.current, &other.current)
    }

    /// Replaces the content with a fresh, empty root.
    ///
    /// The old layer chain is released by this handle only; other handles
    /// sharing it are unaffected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let original = LazyMap::from([(1, 10), (2, 20)]);
    /// let mut copy = original.clone();
    /// copy.clear();
    ///
    /// assert!(copy.is_empty());
    /// assert_eq!(original.len(), 2);
    /// ```
    pub fn clear(&mut self) {
        debug!(
            "clearing lazy map of {} entries at depth {}",
            self.len(),
            self.depth()
        );
        self.current = ReferenceCounter::new(Layer::empty());
    }

    /// Iterates the layers from the current one toward the root.
    fn layers(&self) -> impl Iterator<Item = &Layer<K, V>> {
        successors(Some(&*self.current), |layer| layer.parent())
    }
}

impl<K: Hash + Eq, V> LazyMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but `Hash` and
    /// `Eq` on the borrowed form must match those for the key type.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let map = LazyMap::from([("hello".to_string(), 42)]);
    ///
    /// // Can use &str to look up String keys
    /// assert_eq!(map.get("hello"), Some(&42));
    /// assert_eq!(map.get("world"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value for the key, or `None` when absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let mut map = LazyMap::new();
    /// map.insert(10, 20 + 30);
    /// assert_eq!(map.find(&10), Some((&10, &50)));
    /// assert_eq!(map.find(&11), None);
    /// ```
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Self::resolve(&self.current, key)
    }

    /// Returns the value for a key that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFoundError`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::{KeyNotFoundError, LazyMap};
    ///
    /// let map = LazyMap::from([(1, 10)]);
    /// assert_eq!(map.at(&1), Ok(&10));
    /// assert_eq!(map.at(&2), Err(KeyNotFoundError));
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V, KeyNotFoundError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(KeyNotFoundError)
    }

    /// Returns `true` if the map contains a value for the key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Inserts the pair only if the key is absent.
    ///
    /// Returns `true` if the pair was inserted and `false` if the key was
    /// already present, in which case the existing value is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let mut map = LazyMap::from([(1, 10)]);
    /// assert!(!map.insert(1, 99));
    /// assert!(map.insert(2, 20));
    /// assert_eq!(map.get(&1), Some(&10));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.emplace(key, || value)
    }

    /// Inserts a value built by `constructor` only if the key is absent.
    ///
    /// The constructor runs at most once and only when the key is absent, so
    /// no value is built and thrown away when the key already exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let mut map = LazyMap::from([(1, vec![1])]);
    /// assert!(!map.emplace(1, || unreachable!()));
    /// assert!(map.emplace(2, || vec![2; 3]));
    /// assert_eq!(map.get(&2), Some(&vec![2, 2, 2]));
    /// ```
    pub fn emplace<F>(&mut self, key: K, constructor: F) -> bool
    where
        F: FnOnce() -> V,
    {
        if self.contains_key(&key) {
            return false;
        }
        let size = self.len() + 1;
        self.write(key, Edit::Set(constructor()), size);
        true
    }

    /// Sets the key to the value, overwriting any existing value.
    ///
    /// Returns `true` if the key was newly inserted and `false` if an
    /// existing value was replaced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let mut map = LazyMap::from([(3, 30)]);
    /// let copy = map.clone();
    ///
    /// assert!(!map.insert_or_assign(3, 50));
    /// assert_eq!(map.at(&3), Ok(&50));
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(copy.at(&3), Ok(&30));
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> bool {
        let inserted = !self.contains_key(&key);
        let size = if inserted { self.len() + 1 } else { self.len() };
        self.write(key, Edit::Set(value), size);
        inserted
    }

    /// Applies one edit through the write barrier.
    ///
    /// `size` is the effective size after the edit.
    fn write(&mut self, key: K, edit: Edit<V>, size: usize) {
        match ReferenceCounter::get_mut(&mut self.current) {
            Some(layer) => {
                layer.set_local(key, edit);
                layer.set_size(size);
            }
            None => self.fork(key, edit, size),
        }
    }

    /// Moves the handle onto a new single-edit layer above its shared one.
    fn fork(&mut self, key: K, edit: Edit<V>, size: usize) {
        let parent = ReferenceCounter::clone(&self.current);
        self.current = ReferenceCounter::new(Layer::fork(parent, std::iter::once((key, edit)), size));
        trace!("forked lazy map layer at depth {}", self.depth());
    }

    /// Walks from `layer` toward the root; the first layer mentioning the key decides.
    fn resolve<'a, Q>(layer: &'a Layer<K, V>, key: &Q) -> Option<(&'a K, &'a V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        for layer in successors(Some(layer), |layer| layer.parent()) {
            match layer.lookup_local(key) {
                Lookup::Present(key, value) => return Some((key, value)),
                Lookup::Tombstoned => return None,
                Lookup::Absent => {}
            }
        }
        None
    }

    /// Returns an iterator over key-value pairs.
    ///
    /// Each live key is produced exactly once, with the value from the
    /// nearest layer. No ordering is guaranteed. The iterator borrows the
    /// map, so the map cannot be mutated while it is alive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let original = LazyMap::from([(1, 10), (2, 20)]);
    /// let mut copy = original.clone();
    /// copy.insert_or_assign(2, 21);
    /// copy.erase(&1);
    ///
    /// let entries: Vec<_> = copy.iter().collect();
    /// assert_eq!(entries, vec![(&2, &21)]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> LazyMapIterator<'_, K, V> {
        let mut entries = Vec::with_capacity(self.len());
        if self.is_detached() {
            entries.extend(self.current.edits().filter_map(live_entry));
        } else {
            let mut seen: HashSet<&K, LayerHasher> = HashSet::with_hasher(LayerHasher::default());
            for layer in self.layers() {
                for (key, edit) in layer.edits() {
                    if seen.insert(key) {
                        entries.extend(live_entry((key, edit)));
                    }
                }
            }
        }
        LazyMapIterator {
            entries: entries.into_iter(),
        }
    }

    /// Returns an iterator over keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let map = LazyMap::from([("a", 1), ("b", 2)]);
    /// let sum: i32 = map.values().sum();
    /// assert_eq!(sum, 3);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: Clone + Hash + Eq, V> LazyMap<K, V> {
    /// Removes the key from this handle's view.
    ///
    /// Returns `true` if the key was present. Erasing an absent key is a
    /// no-op.
    ///
    /// When the handle owns its layer exclusively and the key only lives in
    /// that layer, the local edit is dropped; otherwise a tombstone hides the
    /// key from the layers below.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let original = LazyMap::from([(1, 10), (2, 20)]);
    /// let mut copy = original.clone();
    ///
    /// assert!(copy.erase(&1));
    /// assert!(!copy.erase(&1));
    /// assert!(!copy.contains_key(&1));
    /// assert!(original.contains_key(&1));
    /// ```
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some((stored_key, _)) = self.find(key) else {
            return false;
        };
        let stored_key = stored_key.clone();
        let size = self.len() - 1;
        let visible_below = self
            .current
            .parent()
            .is_some_and(|parent| Self::resolve(parent, key).is_some());

        match ReferenceCounter::get_mut(&mut self.current) {
            Some(layer) if visible_below => {
                layer.set_local(stored_key, Edit::Deleted);
                layer.set_size(size);
            }
            Some(layer) => {
                layer.remove_local(key);
                layer.set_size(size);
            }
            None => self.fork(stored_key, Edit::Deleted, size),
        }
        true
    }
}

impl<K: Clone + Hash + Eq, V: Clone> LazyMap<K, V> {
    /// Flattens the layer chain into a fresh root.
    ///
    /// Returns `false` without doing anything when the current layer is
    /// already a root. Otherwise the merged view is materialized into a new
    /// root owned by this handle, and `true` is returned. Other handles
    /// sharing the old chain are unaffected.
    ///
    /// # Complexity
    ///
    /// O(depth + size)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    ///
    /// let original = LazyMap::from([(1, 10)]);
    /// let mut copy = original.clone();
    /// copy.insert(2, 20);
    ///
    /// assert!(copy.detach());
    /// assert!(!copy.detach());
    /// assert!(copy.is_detached());
    /// assert_eq!(copy.depth(), 0);
    /// assert_eq!(copy.len(), 2);
    /// ```
    pub fn detach(&mut self) -> bool {
        if self.is_detached() {
            return false;
        }
        let depth = self.depth();
        let entries = self.cloned_entries();
        debug!(
            "detaching lazy map: {} entries collapsed from depth {}",
            entries.len(),
            depth
        );
        self.current = ReferenceCounter::new(Layer::root(entries));
        true
    }

    fn cloned_entries(&self) -> Vec<(K, V)> {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

fn live_entry<'a, K, V>((key, edit): (&'a K, &'a Edit<V>)) -> Option<(&'a K, &'a V)> {
    match edit {
        Edit::Set(value) => Some((key, value)),
        Edit::Deleted => None,
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the merged key-value view of a [`LazyMap`].
pub struct LazyMapIterator<'a, K, V> {
    entries: std::vec::IntoIter<(&'a K, &'a V)>,
}

impl<'a, K, V> Iterator for LazyMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for LazyMapIterator<'_, K, V> {}

/// An owning iterator over key-value pairs of a [`LazyMap`].
pub struct LazyMapIntoIterator<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for LazyMapIntoIterator<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for LazyMapIntoIterator<K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Clone for LazyMap<K, V> {
    /// Aliases the current layer. No entries are copied.
    #[inline]
    fn clone(&self) -> Self {
        Self {
            current: ReferenceCounter::clone(&self.current),
        }
    }
}

impl<K, V> Default for LazyMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for LazyMap<K, V> {
    /// Builds a root snapshot; duplicate keys resolve to the last value.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            current: ReferenceCounter::new(Layer::root(iter)),
        }
    }
}

impl<K: Hash + Eq, V, const N: usize> From<[(K, V); N]> for LazyMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for LazyMap<K, V> {
    /// Assigns every pair in order; later pairs overwrite earlier ones.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert_or_assign(key, value);
        }
    }
}

impl<K: Clone + Hash + Eq, V: Clone> IntoIterator for LazyMap<K, V> {
    type Item = (K, V);
    type IntoIter = LazyMapIntoIterator<K, V>;

    /// Moves the entries out of an exclusively owned root; clones them otherwise.
    fn into_iter(self) -> Self::IntoIter {
        let entries = match ReferenceCounter::try_unwrap(self.current) {
            Ok(layer) if layer.is_root() => layer.into_entries(),
            Ok(layer) => Self {
                current: ReferenceCounter::new(layer),
            }
            .cloned_entries(),
            Err(current) => Self { current }.cloned_entries(),
        };
        LazyMapIntoIterator {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a LazyMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = LazyMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for LazyMap<K, V> {
    /// Compares content; layer layout is irrelevant.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if self.ptr_eq(other) {
            return true;
        }
        self.iter()
            .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for LazyMap<K, V> {}

impl<K: Hash + Eq + fmt::Debug, V: fmt::Debug> fmt::Debug for LazyMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Rayon Support
// =============================================================================

#[cfg(feature = "rayon")]
impl<K: Hash + Eq + Sync, V: Sync> LazyMap<K, V> {
    /// Returns a parallel iterator over the merged key-value view.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazymap::LazyMap;
    /// use rayon::prelude::*;
    ///
    /// let map: LazyMap<i32, i32> = (0..100).map(|index| (index, index * 2)).collect();
    /// let sum: i32 = map.par_iter().map(|(_, value)| *value).sum();
    /// assert_eq!(sum, 9900);
    /// ```
    #[must_use]
    pub fn par_iter(&self) -> rayon::vec::IntoIter<(&K, &V)> {
        use rayon::iter::IntoParallelIterator;
        self.iter().collect::<Vec<_>>().into_par_iter()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for LazyMap<K, V>
where
    K: serde::Serialize + Hash + Eq,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct LazyMapVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<K, V> LazyMapVisitor<K, V> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for LazyMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Hash + Eq,
    V: serde::Deserialize<'de>,
{
    type Value = LazyMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry()? {
            entries.push(entry);
        }
        Ok(entries.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for LazyMap<K, V>
where
    K: serde::Deserialize<'de> + Hash + Eq,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(LazyMapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
