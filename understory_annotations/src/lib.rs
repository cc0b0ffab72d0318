// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_annotations --heading-base-level=0

//! Understory Annotations: point snapshots and live-set reconciliation for maps.
//!
//! A map that shows externally supplied points has to keep its own set of live
//! annotations in step with whatever the point source produced last. Rebuilding
//! that set on every update causes flicker and redundant work, so this crate
//! computes the minimal change instead.
//!
//! - [`GeoPoint`]: an immutable point with a stable [`PointId`], a [`Coordinate`],
//!   and an optional display title.
//! - [`PointStore`]: an ordered snapshot of points with O(1) id lookup.
//! - [`AnnotationReconciler`] / [`reconcile`]: diff the live ids against a
//!   snapshot and produce a [`Reconciliation`] (ids to remove, points to add).
//! - [`LiveAnnotations`]: a generational collection of live annotations, one per
//!   id, that can [`apply`](LiveAnnotations::apply) a reconciliation.
//!
//! Identity is always by id. Two points may share a coordinate, and a point that
//! is already live is never touched again: points are immutable, so a live id
//! implies a live coordinate.
//!
//! # Example
//!
//! ```rust
//! use understory_annotations::{
//!     Coordinate, GeoPoint, LiveAnnotations, PointId, PointStore, reconcile,
//! };
//!
//! let at = Coordinate::new(36.1147, -115.1728);
//! let mut live = LiveAnnotations::new();
//! for id in [1, 2, 3] {
//!     live.insert(GeoPoint::new(PointId(id), at));
//! }
//!
//! // The source now reports points 2, 3 and 4.
//! let snapshot: PointStore = [2, 3, 4]
//!     .into_iter()
//!     .map(|id| GeoPoint::new(PointId(id), at))
//!     .collect();
//!
//! let diff = reconcile(live.ids(), &snapshot);
//! assert_eq!(diff.to_remove, vec![PointId(1)]);
//! assert_eq!(diff.to_add.len(), 1);
//!
//! live.apply(&diff);
//! assert!(reconcile(live.ids(), &snapshot).is_empty());
//! ```
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`PointId`] and [`Coordinate`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod live;
mod reconcile;
mod store;
mod types;

pub use live::{AnnotationKey, Applied, LiveAnnotations};
pub use reconcile::{AnnotationReconciler, Reconciliation, reconcile};
pub use store::PointStore;
pub use types::{Coordinate, CoordinateError, GeoPoint, PointId};
