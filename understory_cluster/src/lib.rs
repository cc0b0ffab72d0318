// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_cluster --heading-base-level=0

//! Understory Cluster: how a clustered map presents its markers.
//!
//! The geometric grouping of annotations belongs to the map engine. This crate
//! covers what happens once the engine has decided: for every annotation it
//! asks about, decide whether it is a single pin or a cluster, and build a
//! renderer-agnostic description of what to draw.
//!
//! - [`MarkerRequest`]: what the engine asks about, either a
//!   [`Singleton`](MarkerRequest::Singleton) point or a
//!   [`Cluster`](MarkerRequest::Cluster) of points ([`ClusterGroup`]).
//! - [`ClusterPresenter`]: classifies requests and returns a
//!   [`MarkerDescriptor`] with role, [`DisplayPriority`], [`ClusterTag`], and a
//!   [`MarkerVisual`].
//! - [`ClusterSummary`]: the bubble view model, the initials of the first
//!   [`MAX_LABELS`] members plus an overflow count rendered as `+N`.
//! - [`AvatarLayout`] / [`BubbleLayout`]: marker geometry as [`kurbo`] shapes in
//!   marker-local space, with bounds and point containment for tap handling.
//! - [`MarkerSlot`] / [`ReusePool`]: recyclable marker slots whose content is
//!   always released before new content is bound.
//! - [`MarkerRole`] / [`RoleTable`]: enumerated reuse keys and a table indexed
//!   by them, in place of reuse-identifier strings.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_annotations::{Coordinate, GeoPoint, PointId};
//! use understory_cluster::{ClusterGroup, ClusterPresenter, DisplayPriority, MarkerRequest};
//!
//! let at = Coordinate::new(36.1147, -115.1728);
//! let members = ["Ann", "Bo", "", "Deb", "Ed"]
//!     .into_iter()
//!     .zip(0_u128..)
//!     .map(|(title, id)| GeoPoint::new(PointId(id), at).with_title(title))
//!     .collect();
//!
//! let presenter = ClusterPresenter::default();
//! let marker = presenter.present(&MarkerRequest::Cluster(ClusterGroup::new(members)));
//!
//! let summary = marker.summary().unwrap();
//! assert_eq!(summary.labels(), ["A", "B", ""]);
//! assert_eq!(summary.overflow_badge().as_deref(), Some("+2"));
//! assert_eq!(marker.priority, DisplayPriority::DEFAULT_LOW);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`AvatarStyle`] and [`Color`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod group;
mod layout;
mod presenter;
mod reuse;
mod style;
mod summary;
mod tag;

pub use group::{ClusterGroup, MarkerRequest};
pub use layout::{
    AvatarLayout, BADGE_DIAMETER, BUBBLE_PADDING_BOTTOM, BUBBLE_PADDING_TOP, BUBBLE_PADDING_X,
    BubbleLayout, LABEL_DIAMETER, LABEL_SPACING, TAIL_HEIGHT, TAIL_WIDTH,
};
pub use presenter::{ClusterPresenter, MarkerDescriptor, MarkerVisual};
pub use reuse::{MarkerSlot, ReusePool};
pub use style::{AvatarStyle, Color};
pub use summary::{ClusterSummary, MAX_LABELS, initial_of};
pub use tag::{ClusterTag, DisplayPriority, MarkerRole, RoleTable};
