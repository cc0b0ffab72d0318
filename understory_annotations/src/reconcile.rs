// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal add/remove diff between a live id set and a point snapshot.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::store::PointStore;
use crate::types::{GeoPoint, PointId};

/// The result of reconciling a live id set against a [`PointStore`].
///
/// `to_remove` and `to_add` never mention the same id. Applying removals first
/// and additions second leaves the live set equal to the snapshot's id set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reconciliation {
    /// Live ids that are absent from the snapshot, in live order.
    pub to_remove: Vec<PointId>,
    /// Snapshot points that are not live yet, in snapshot order.
    pub to_add: Vec<GeoPoint>,
}

impl Reconciliation {
    /// Returns true if applying this reconciliation would change nothing.
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Computes [`Reconciliation`]s, reusing its scratch set across passes.
///
/// Runs in time linear in the live set plus the snapshot. Points that are
/// already live are left untouched: points are immutable, so a shared id
/// implies a shared coordinate.
#[derive(Debug, Default)]
pub struct AnnotationReconciler {
    existing: HashSet<PointId>,
}

impl AnnotationReconciler {
    /// Create a reconciler with an empty scratch set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff the `existing` live ids against `incoming`.
    ///
    /// Duplicate ids in `existing` are reported for removal at most once.
    pub fn reconcile<I>(&mut self, existing: I, incoming: &PointStore) -> Reconciliation
    where
        I: IntoIterator<Item = PointId>,
    {
        self.existing.clear();
        let mut out = Reconciliation::default();
        for id in existing {
            if self.existing.insert(id) && !incoming.contains(id) {
                out.to_remove.push(id);
            }
        }
        out.to_add.extend(
            incoming
                .iter()
                .filter(|p| !self.existing.contains(&p.id()))
                .cloned(),
        );
        tracing::trace!(
            live = self.existing.len(),
            incoming = incoming.len(),
            remove = out.to_remove.len(),
            add = out.to_add.len(),
            "reconciled point snapshot"
        );
        out
    }
}

/// Diff `existing` live ids against `incoming` with a fresh [`AnnotationReconciler`].
pub fn reconcile<I>(existing: I, incoming: &PointStore) -> Reconciliation
where
    I: IntoIterator<Item = PointId>,
{
    AnnotationReconciler::new().reconcile(existing, incoming)
}
