// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_map_host --heading-base-level=0

//! Understory Map Host: drive a clustered map from a point list.
//!
//! ## Overview
//!
//! A map engine owns the live annotations, groups them into clusters at the
//! current zoom level, and draws markers. This crate abstracts that engine as
//! [`MapSurface`] and wires it to the rest of the family:
//!
//! - [`MapHost`] converges the surface's annotations to each new
//!   [`PointStore`](understory_annotations::PointStore) snapshot (remove, then
//!   add), presents markers through a
//!   [`ClusterPresenter`](understory_cluster::ClusterPresenter), and owns the
//!   current [`Viewport`].
//! - [`SelectionController`] turns cluster activation into a zoom onto the
//!   cluster with a fixed [`Span`]. Pins are ignored.
//! - [`HeadlessSurface`] is a reference surface with no windowing toolkit. It
//!   projects coordinates linearly, groups visible annotations on a screen-space
//!   grid, reuses marker slots per role, and resolves taps by hit-testing marker
//!   geometry.
//!
//! Non-essential [`Chrome`] (points of interest, compass, scale) is hidden
//! unless [`MapHostConfig::chrome`] asks for it.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use understory_annotations::{Coordinate, GeoPoint, PointId, PointStore};
//! use understory_cluster::MarkerRole;
//! use understory_map_host::{HeadlessSurface, MapHost, MapHostConfig, Span, Viewport};
//!
//! let surface = HeadlessSurface::new(Size::new(100.0, 100.0)).with_cell_size(50.0);
//! let config = MapHostConfig {
//!     initial_viewport: Viewport::new(Coordinate::new(0.0, 0.0), Span::new(1.0, 1.0)),
//!     ..MapHostConfig::default()
//! };
//! let mut host = MapHost::new(surface, config);
//!
//! let points: PointStore = [
//!     GeoPoint::new(PointId(1), Coordinate::new(0.10, 0.10)).with_title("Ann"),
//!     GeoPoint::new(PointId(2), Coordinate::new(0.12, 0.12)).with_title("Bo"),
//! ]
//! .into_iter()
//! .collect();
//! host.update(&points);
//! host.render();
//!
//! let marker = &host.surface().markers()[0];
//! assert_eq!(marker.request().role(), MarkerRole::Cluster);
//!
//! // Tap the bubble: the map zooms onto the cluster.
//! let tap = marker.anchor() + Vec2::new(0.0, -25.0);
//! assert!(host.tap(tap));
//! assert_eq!(host.viewport().span, Span::new(0.01, 0.01));
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for [`Viewport`] and [`Span`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod headless;
mod host;
mod selection;
mod surface;
mod viewport;

pub use headless::{DEFAULT_CELL_SIZE, DisplayedMarker, HeadlessSurface};
pub use host::{MapHost, MapHostConfig};
pub use selection::{DEFAULT_ZOOM_SPAN, RegionChange, SelectionController, Transition};
pub use surface::{Chrome, MapSurface, SurfaceConfig};
pub use viewport::{Span, Viewport, ViewportError};
