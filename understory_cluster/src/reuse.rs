// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recyclable marker slots.
//!
//! A surface keeps marker slots around between draws and hands them back out
//! for new annotations. Content bound to a slot must never outlive the binding:
//! [`MarkerSlot::rebind`] drops the old content before building the new one,
//! and [`ReusePool::recycle`] drops it before the slot is parked. Content types
//! that own external resources (a hosted view, a texture) release them in
//! `Drop`.

use alloc::vec::Vec;

use crate::tag::{MarkerRole, RoleTable};

/// A reusable marker slot holding at most one piece of content.
#[derive(Debug)]
pub struct MarkerSlot<C> {
    role: MarkerRole,
    content: Option<C>,
    bindings: u64,
}

impl<C> MarkerSlot<C> {
    /// Create an empty slot for `role`.
    pub fn new(role: MarkerRole) -> Self {
        Self {
            role,
            content: None,
            bindings: 0,
        }
    }

    /// Role this slot serves.
    #[inline]
    pub fn role(&self) -> MarkerRole {
        self.role
    }

    /// Current content.
    #[inline]
    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    /// Whether the slot currently holds content.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.content.is_some()
    }

    /// How many times this slot has been bound.
    #[inline]
    pub fn bindings(&self) -> u64 {
        self.bindings
    }

    /// Release the current content, then bind the content built by `acquire`.
    pub fn rebind(&mut self, acquire: impl FnOnce() -> C) -> &C {
        drop(self.content.take());
        self.bindings += 1;
        self.content.insert(acquire())
    }

    /// Release and return the current content.
    pub fn release(&mut self) -> Option<C> {
        self.content.take()
    }
}

/// Per-role pools of parked [`MarkerSlot`]s.
///
/// Only registered roles can be dequeued.
#[derive(Debug)]
pub struct ReusePool<C> {
    parked: RoleTable<Vec<MarkerSlot<C>>>,
    created: usize,
}

impl<C> Default for ReusePool<C> {
    fn default() -> Self {
        Self {
            parked: RoleTable::new(),
            created: 0,
        }
    }
}

impl<C> ReusePool<C> {
    /// Create a pool with no registered roles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow slots of `role` to be dequeued. Registering twice is harmless.
    pub fn register(&mut self, role: MarkerRole) {
        if !self.parked.contains(role) {
            self.parked.insert(role, Vec::new());
        }
    }

    /// Whether `role` has been registered.
    pub fn is_registered(&self, role: MarkerRole) -> bool {
        self.parked.contains(role)
    }

    /// Take a parked slot for `role`, or create one.
    ///
    /// Returns `None` if `role` was never registered.
    pub fn dequeue(&mut self, role: MarkerRole) -> Option<MarkerSlot<C>> {
        let parked = self.parked.get_mut(role)?;
        Some(match parked.pop() {
            Some(slot) => slot,
            None => {
                self.created += 1;
                tracing::trace!(?role, created = self.created, "created marker slot");
                MarkerSlot::new(role)
            }
        })
    }

    /// Release the slot's content and park it for reuse.
    ///
    /// Slots whose role is not registered are dropped.
    pub fn recycle(&mut self, mut slot: MarkerSlot<C>) {
        drop(slot.release());
        if let Some(parked) = self.parked.get_mut(slot.role()) {
            parked.push(slot);
        }
    }

    /// Slots created so far, across all roles.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Slots currently parked for `role`.
    pub fn parked(&self, role: MarkerRole) -> usize {
        self.parked.get(role).map_or(0, Vec::len)
    }
}
