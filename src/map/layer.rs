//! Overlay layers backing [`LazyMap`](super::LazyMap).
//!
//! A [`Layer`] holds one level of key edits on top of an optional parent.
//! A layer without a parent is a root: its edit table is the complete
//! content of the map and never contains tombstones.
//!
//! Layers answer questions about their own edit table only. Walking the
//! parent chain is the job of the handle.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use super::{LayerHasher, ReferenceCounter};

// =============================================================================
// Edit and Lookup
// =============================================================================

/// A local override recorded by a layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Edit<V> {
    /// The key maps to this value in every view through the layer.
    Set(V),
    /// The key is absent in every view through the layer.
    Deleted,
}

/// Result of a single-layer lookup.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Lookup<'a, K, V> {
    /// The layer does not mention the key; the parent decides.
    Absent,
    /// The layer sets the key.
    Present(&'a K, &'a V),
    /// The layer deletes the key.
    Tombstoned,
}

// =============================================================================
// Layer Definition
// =============================================================================

/// One level of a lazy map's diff chain.
pub(crate) struct Layer<K, V> {
    parent: Option<ReferenceCounter<Layer<K, V>>>,
    edits: HashMap<K, Edit<V>, LayerHasher>,
    /// Number of live keys visible through this layer.
    size: usize,
}

impl<K, V> Layer<K, V> {
    /// Creates an empty root.
    pub(crate) fn empty() -> Self {
        Self {
            parent: None,
            edits: HashMap::with_hasher(LayerHasher::default()),
            size: 0,
        }
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    #[inline]
    pub(crate) const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of keys this layer mentions, tombstones included.
    #[cfg(test)]
    pub(crate) fn edit_count(&self) -> usize {
        self.edits.len()
    }

    pub(crate) fn edits(&self) -> impl Iterator<Item = (&K, &Edit<V>)> {
        self.edits.iter()
    }

    /// Moves the live entries out of the layer.
    ///
    /// Only meaningful for a root, whose edit table is the whole content.
    pub(crate) fn into_entries(mut self) -> Vec<(K, V)> {
        std::mem::take(&mut self.edits)
            .into_iter()
            .filter_map(|(key, edit)| match edit {
                Edit::Set(value) => Some((key, value)),
                Edit::Deleted => None,
            })
            .collect()
    }
}

impl<K: Hash + Eq, V> Layer<K, V> {
    /// Creates a root snapshot. Duplicate keys resolve to the last value.
    pub(crate) fn root<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let edits: HashMap<K, Edit<V>, LayerHasher> = entries
            .into_iter()
            .map(|(key, value)| (key, Edit::Set(value)))
            .collect();
        let size = edits.len();
        Self {
            parent: None,
            edits,
            size,
        }
    }

    /// Creates a layer on top of `parent`.
    ///
    /// `size` is the effective number of live keys once `edits` are applied,
    /// which the caller computes through the chain.
    pub(crate) fn fork<I>(parent: ReferenceCounter<Self>, edits: I, size: usize) -> Self
    where
        I: IntoIterator<Item = (K, Edit<V>)>,
    {
        let mut table = HashMap::with_hasher(LayerHasher::default());
        table.extend(edits);
        Self {
            parent: Some(parent),
            edits: table,
            size,
        }
    }

    /// Looks the key up in this layer only.
    pub(crate) fn lookup_local<Q>(&self, key: &Q) -> Lookup<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.edits.get_key_value(key) {
            None => Lookup::Absent,
            Some((key, Edit::Set(value))) => Lookup::Present(key, value),
            Some((_, Edit::Deleted)) => Lookup::Tombstoned,
        }
    }

    /// Records an edit in place. The caller must hold the only reference.
    pub(crate) fn set_local(&mut self, key: K, edit: Edit<V>) {
        debug_assert!(
            !(self.is_root() && matches!(edit, Edit::Deleted)),
            "a root layer never stores tombstones"
        );
        self.edits.insert(key, edit);
    }

    /// Drops any local edit for the key. The caller must hold the only reference.
    pub(crate) fn remove_local<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.edits.remove(key);
    }
}

impl<K, V> Drop for Layer<K, V> {
    // Unlink the chain iteratively; a recursive drop would overflow the
    // stack on long fork chains.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(layer) = parent {
            match ReferenceCounter::try_unwrap(layer) {
                Ok(mut layer) => parent = layer.parent.take(),
                Err(_) => break,
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
