// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classification of marker requests into renderable descriptors.

use kurbo::{Point, Rect};

use crate::group::MarkerRequest;
use crate::layout::{AvatarLayout, BubbleLayout};
use crate::reuse::MarkerSlot;
use crate::style::AvatarStyle;
use crate::summary::ClusterSummary;
use crate::tag::{ClusterTag, DisplayPriority, MarkerRole};

/// Visual content of a marker.
#[derive(Clone, Debug)]
pub enum MarkerVisual {
    /// A pulsing avatar on its own.
    Pin {
        /// Avatar geometry.
        avatar: AvatarLayout,
    },
    /// A summary bubble with a tail and an avatar underneath.
    Cluster {
        /// Initials and overflow count.
        summary: ClusterSummary,
        /// Bubble geometry.
        bubble: BubbleLayout,
    },
}

/// Everything a surface needs to draw one marker.
#[derive(Clone, Debug)]
pub struct MarkerDescriptor {
    /// Reuse role of the marker.
    pub role: MarkerRole,
    /// Clustering tag, shared by pins and clusters.
    pub tag: ClusterTag,
    /// Display priority.
    pub priority: DisplayPriority,
    /// Avatar styling used by the visual.
    pub style: AvatarStyle,
    /// Geometry and content.
    pub visual: MarkerVisual,
}

impl MarkerDescriptor {
    /// Cluster summary, if this is a cluster marker.
    pub fn summary(&self) -> Option<&ClusterSummary> {
        match &self.visual {
            MarkerVisual::Cluster { summary, .. } => Some(summary),
            MarkerVisual::Pin { .. } => None,
        }
    }

    /// Marker-local bounds.
    pub fn bounds(&self) -> Rect {
        match &self.visual {
            MarkerVisual::Pin { avatar } => avatar.bounds(),
            MarkerVisual::Cluster { bubble, .. } => bubble.bounds(),
        }
    }

    /// Whether a marker-local point falls on the marker.
    pub fn contains(&self, pt: Point) -> bool {
        match &self.visual {
            MarkerVisual::Pin { avatar } => avatar.contains(pt),
            MarkerVisual::Cluster { bubble, .. } => bubble.contains(pt),
        }
    }
}

/// Decides how each annotation is presented.
///
/// Pins get [`DisplayPriority::DEFAULT_HIGH`] so they win over clusters at
/// boundary zoom levels; clusters get [`DisplayPriority::DEFAULT_LOW`]. Both
/// carry the same [`ClusterTag`] so the engine treats them as one pool.
#[derive(Clone, Debug)]
pub struct ClusterPresenter {
    style: AvatarStyle,
    tag: ClusterTag,
}

impl Default for ClusterPresenter {
    fn default() -> Self {
        Self::new(AvatarStyle::default())
    }
}

impl ClusterPresenter {
    /// Create a presenter using `style` for every avatar.
    pub fn new(style: AvatarStyle) -> Self {
        Self {
            style,
            tag: ClusterTag::POINTS,
        }
    }

    /// Use `tag` as the shared clustering tag.
    #[must_use]
    pub fn with_tag(mut self, tag: ClusterTag) -> Self {
        self.tag = tag;
        self
    }

    /// Avatar style.
    pub fn style(&self) -> &AvatarStyle {
        &self.style
    }

    /// Shared clustering tag.
    pub fn tag(&self) -> ClusterTag {
        self.tag
    }

    /// Role the request is presented with.
    pub fn classify(&self, request: &MarkerRequest) -> MarkerRole {
        request.role()
    }

    /// Display priority for a role.
    pub fn priority(&self, role: MarkerRole) -> DisplayPriority {
        match role {
            MarkerRole::Pin => DisplayPriority::DEFAULT_HIGH,
            MarkerRole::Cluster => DisplayPriority::DEFAULT_LOW,
        }
    }

    /// Build the descriptor for `request`.
    pub fn present(&self, request: &MarkerRequest) -> MarkerDescriptor {
        let role = self.classify(request);
        let visual = match request {
            MarkerRequest::Singleton(_) => MarkerVisual::Pin {
                avatar: AvatarLayout::centered(Point::ORIGIN, &self.style),
            },
            MarkerRequest::Cluster(group) => {
                let summary = ClusterSummary::from_group(group);
                let bubble = BubbleLayout::compute(&summary, &self.style);
                MarkerVisual::Cluster { summary, bubble }
            }
        };
        MarkerDescriptor {
            role,
            tag: self.tag,
            priority: self.priority(role),
            style: self.style.clone(),
            visual,
        }
    }

    /// Rebind `slot` to `request`, releasing whatever it showed before.
    pub fn present_into<'s>(
        &self,
        slot: &'s mut MarkerSlot<MarkerDescriptor>,
        request: &MarkerRequest,
    ) -> &'s MarkerDescriptor {
        if slot.role() != request.role() {
            tracing::warn!(
                slot = ?slot.role(),
                request = ?request.role(),
                "marker slot rebound across roles"
            );
        }
        slot.rebind(|| self.present(request))
    }
}
