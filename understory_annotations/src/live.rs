// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The live annotation collection held by a map surface.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::reconcile::Reconciliation;
use crate::types::{GeoPoint, PointId};

/// Generational handle for a live annotation.
///
/// A key stays valid until its annotation is removed; a later annotation that
/// reuses the slot gets a new generation, so stale keys resolve to `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnnotationKey(u32, u32);

impl AnnotationKey {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Annotation keys are intentionally 32-bit; slot counts stay below u32::MAX."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Entry {
    generation: u32,
    point: GeoPoint,
}

/// Counts reported by [`LiveAnnotations::apply`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    /// Annotations that were removed.
    pub removed: usize,
    /// Annotations that were added.
    pub added: usize,
}

/// A set of live annotations keyed by [`PointId`], one annotation per id.
///
/// This is the state a map surface keeps for the points currently placed on
/// it. Iteration follows slot order, which is insertion order until slots are
/// reused.
#[derive(Debug, Default)]
pub struct LiveAnnotations {
    entries: Vec<Option<Entry>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    by_id: HashMap<PointId, AnnotationKey>,
}

impl LiveAnnotations {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live annotations.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether no annotations are live.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Place an annotation for `point`.
    ///
    /// If an annotation with the same id is already live, nothing changes and
    /// its existing key is returned.
    pub fn insert(&mut self, point: GeoPoint) -> AnnotationKey {
        if let Some(&key) = self.by_id.get(&point.id()) {
            return key;
        }
        let id = point.id();
        let idx = if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            self.entries.push(None);
            self.generations.push(0);
            self.entries.len() - 1
        };
        let generation = self.generations[idx] + 1;
        self.generations[idx] = generation;
        self.entries[idx] = Some(Entry { generation, point });
        let key = AnnotationKey::new(idx, generation);
        self.by_id.insert(id, key);
        key
    }

    /// Remove the annotation for `id`, returning its point if it was live.
    pub fn remove(&mut self, id: PointId) -> Option<GeoPoint> {
        let key = self.by_id.remove(&id)?;
        let entry = self.entries.get_mut(key.idx())?.take()?;
        self.free_list.push(key.idx());
        Some(entry.point)
    }

    /// Remove every annotation.
    pub fn clear(&mut self) {
        for (idx, slot) in self.entries.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.free_list.push(idx);
            }
        }
        self.by_id.clear();
    }

    /// Whether an annotation for `id` is live.
    #[inline]
    pub fn contains(&self, id: PointId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Key of the live annotation for `id`.
    pub fn key_of(&self, id: PointId) -> Option<AnnotationKey> {
        self.by_id.get(&id).copied()
    }

    /// Resolve a key, returning `None` for stale keys.
    pub fn get(&self, key: AnnotationKey) -> Option<&GeoPoint> {
        let e = self.entries.get(key.idx())?.as_ref()?;
        (e.generation == key.1).then_some(&e.point)
    }

    /// Iterate live annotations in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (AnnotationKey, &GeoPoint)> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, e)| {
            e.as_ref()
                .map(|e| (AnnotationKey::new(i, e.generation), &e.point))
        })
    }

    /// Iterate live ids in slot order.
    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.iter().map(|(_, p)| p.id())
    }

    /// Apply a reconciliation: all removals first, then all additions.
    pub fn apply(&mut self, diff: &Reconciliation) -> Applied {
        let mut applied = Applied::default();
        for &id in &diff.to_remove {
            if self.remove(id).is_some() {
                applied.removed += 1;
            }
        }
        for point in &diff.to_add {
            if !self.contains(point.id()) {
                self.insert(point.clone());
                applied.added += 1;
            }
        }
        applied
    }
}
