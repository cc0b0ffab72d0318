// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom-to-cluster on activation.

use understory_cluster::MarkerRequest;

use crate::viewport::{Span, Viewport};

/// Span used when zooming into an activated cluster.
pub const DEFAULT_ZOOM_SPAN: Span = Span::new(0.01, 0.01);

/// How a surface should move to a new viewport.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Jump without animation.
    Immediate,
    /// Animate to the new region.
    Animated,
}

/// A requested move of the visible region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RegionChange {
    /// Target region.
    pub viewport: Viewport,
    /// How to get there.
    pub transition: Transition,
}

/// Turns marker activations into region changes.
///
/// Activating a cluster zooms onto its representative coordinate with a fixed
/// span. Activating a pin does nothing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SelectionController {
    zoom_span: Span,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_SPAN)
    }
}

impl SelectionController {
    /// Create a controller that zooms clusters to `zoom_span`.
    pub const fn new(zoom_span: Span) -> Self {
        Self { zoom_span }
    }

    /// Span used for zoom-to-cluster.
    pub const fn zoom_span(&self) -> Span {
        self.zoom_span
    }

    /// Region change for activating `request`, or `None` for pins.
    pub fn activate(&self, request: &MarkerRequest) -> Option<RegionChange> {
        let group = request.as_cluster()?;
        Some(RegionChange {
            viewport: Viewport::new(group.coordinate(), self.zoom_span),
            transition: Transition::Animated,
        })
    }
}
