// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, id-indexed point snapshots.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::types::{GeoPoint, PointId};

/// An immutable, ordered snapshot of points supplied by a point source.
///
/// Ids are unique within a store: when the source yields the same id more than
/// once, the first occurrence wins and later ones are dropped.
#[derive(Clone, Debug, Default)]
pub struct PointStore {
    points: Vec<GeoPoint>,
    index: HashMap<PointId, usize>,
}

impl PointStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from points in source order.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let iter = points.into_iter();
        let (lower, _) = iter.size_hint();
        let mut store = Self {
            points: Vec::with_capacity(lower),
            index: HashMap::with_capacity(lower),
        };
        let mut dropped = 0_usize;
        for point in iter {
            if store.index.contains_key(&point.id()) {
                dropped += 1;
                continue;
            }
            store.index.insert(point.id(), store.points.len());
            store.points.push(point);
        }
        if dropped > 0 {
            tracing::debug!(dropped, "dropped points with duplicate ids from snapshot");
        }
        store
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the store holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether a point with `id` is present.
    #[inline]
    pub fn contains(&self, id: PointId) -> bool {
        self.index.contains_key(&id)
    }

    /// Look up a point by id.
    pub fn get(&self, id: PointId) -> Option<&GeoPoint> {
        self.index.get(&id).map(|&i| &self.points[i])
    }

    /// Iterate points in source order.
    pub fn iter(&self) -> core::slice::Iter<'_, GeoPoint> {
        self.points.iter()
    }

    /// Iterate ids in source order.
    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.points.iter().map(GeoPoint::id)
    }

    /// Points as a slice, in source order.
    #[inline]
    pub fn as_slice(&self) -> &[GeoPoint] {
        &self.points
    }
}

impl FromIterator<GeoPoint> for PointStore {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

impl<'a> IntoIterator for &'a PointStore {
    type Item = &'a GeoPoint;
    type IntoIter = core::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinate;
    use alloc::vec;

    fn pt(id: u128, title: &str) -> GeoPoint {
        GeoPoint::new(PointId(id), Coordinate::new(0.0, 0.0)).with_title(title)
    }

    #[test]
    fn keeps_source_order_and_indexes_ids() {
        let store = PointStore::from_points(vec![pt(3, "c"), pt(1, "a"), pt(2, "b")]);
        let ids: Vec<_> = store.ids().collect();
        assert_eq!(ids, vec![PointId(3), PointId(1), PointId(2)]);
        assert_eq!(store.get(PointId(1)).and_then(GeoPoint::title), Some("a"));
        assert!(store.get(PointId(9)).is_none());
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let store: PointStore = vec![pt(1, "first"), pt(2, "b"), pt(1, "second")]
            .into_iter()
            .collect();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(PointId(1)).and_then(GeoPoint::title), Some("first"));
    }

    #[test]
    fn empty_store() {
        let store = PointStore::new();
        assert!(store.is_empty());
        assert!(!store.contains(PointId(0)));
        assert_eq!(store.iter().count(), 0);
    }
}
