// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The map engine seam.

use kurbo::Point;
use understory_annotations::{GeoPoint, PointId};
use understory_cluster::{ClusterPresenter, MarkerRequest, MarkerRole};

use crate::selection::Transition;
use crate::viewport::Viewport;

bitflags::bitflags! {
    /// Optional map chrome. Flags that are set are shown.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Chrome: u8 {
        /// Built-in points of interest.
        const POINTS_OF_INTEREST = 0b0000_0001;
        /// Compass control.
        const COMPASS            = 0b0000_0010;
        /// Scale bar.
        const SCALE              = 0b0000_0100;
    }
}

impl Default for Chrome {
    fn default() -> Self {
        Self::empty()
    }
}

/// Initial surface configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SurfaceConfig {
    /// Region shown first.
    pub viewport: Viewport,
    /// Chrome to show.
    pub chrome: Chrome,
}

/// A map engine that owns live annotations, groups them, and draws markers.
///
/// The engine decides which annotations form clusters. It asks the host's
/// presenter how to show each singleton or group in
/// [`render_markers`](MapSurface::render_markers).
///
/// Markers shown for removed annotations, or laid out for a previous viewport,
/// must not outlive the call that made them stale.
pub trait MapSurface {
    /// Apply the initial configuration.
    fn configure(&mut self, config: &SurfaceConfig);

    /// Allow markers of `role` to be dequeued.
    fn register_marker(&mut self, role: MarkerRole);

    /// Call `f` with the id of every live annotation.
    fn visit_annotation_ids<F: FnMut(PointId)>(&self, f: F);

    /// Remove the live annotations with these ids, along with any marker that
    /// shows one of them. Unknown ids are ignored.
    fn remove_annotations(&mut self, ids: &[PointId]);

    /// Add annotations for these points.
    fn add_annotations(&mut self, points: &[GeoPoint]);

    /// Move to `viewport`. Markers laid out for the old region are dropped.
    fn set_viewport(&mut self, viewport: Viewport, transition: Transition);

    /// Region currently shown.
    fn viewport(&self) -> Viewport;

    /// Regroup live annotations and (re)bind a marker for each group through
    /// `presenter`.
    fn render_markers(&mut self, presenter: &ClusterPresenter);

    /// Marker under a screen-space point, if the surface can hit-test.
    fn marker_at(&self, pt: Point) -> Option<MarkerRequest> {
        let _ = pt;
        None
    }
}
