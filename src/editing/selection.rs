// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Immutable selection set for the duration of one gesture.
//!
//! `Selection` wraps an `Arc<BTreeSet<K>>` so it can be cheaply cloned into
//! every edit behavior built for a gesture. Mutations produce a new set
//! (copy-on-write via `Arc::make_mut`). The `BTreeSet` gives deterministic
//! iteration order, which keeps per-contour fan-out stable.
//!
//! Path mode selects global point indices (`Selection<usize>`); skeleton
//! mode selects `(contour, point)` pairs.

use std::collections::BTreeSet;
use std::sync::Arc;

/// A set of selected points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K: Ord + Clone> {
    inner: Arc<BTreeSet<K>>,
}

impl<K: Ord + Clone> Selection<K> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BTreeSet::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    /// Iterate in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.inner.iter()
    }

    pub fn insert(&mut self, key: K) {
        Arc::make_mut(&mut self.inner).insert(key);
    }

    pub fn remove(&mut self, key: &K) {
        Arc::make_mut(&mut self.inner).remove(key);
    }
}

impl<K: Ord + Clone> Default for Selection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> FromIterator<K> for Selection<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            inner: Arc::new(iter.into_iter().collect()),
        }
    }
}
