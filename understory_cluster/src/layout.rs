// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker geometry in marker-local coordinates.
//!
//! The origin of every layout is the point where the marker is anchored on the
//! map; +y points down. Markers are centered on their anchor, like a view that
//! is centered on its annotation.

use kurbo::{BezPath, Circle, Point, Rect, RoundedRect, Shape};
use smallvec::SmallVec;

use crate::style::AvatarStyle;
use crate::summary::{ClusterSummary, MAX_LABELS};

/// Diameter of one initial disc.
pub const LABEL_DIAMETER: f64 = 32.0;
/// Gap between adjacent discs in the bubble row.
pub const LABEL_SPACING: f64 = 3.0;
/// Diameter of the overflow badge.
pub const BADGE_DIAMETER: f64 = 28.0;
/// Horizontal padding inside the capsule.
pub const BUBBLE_PADDING_X: f64 = 10.0;
/// Padding above the row.
pub const BUBBLE_PADDING_TOP: f64 = 8.0;
/// Padding below the row.
pub const BUBBLE_PADDING_BOTTOM: f64 = 4.0;
/// Width of the tail under the capsule.
pub const TAIL_WIDTH: f64 = 12.0;
/// Height of the tail under the capsule.
pub const TAIL_HEIGHT: f64 = 6.0;

/// A pulse ring around an icon disc.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AvatarLayout {
    /// The pulse ring at rest.
    pub pulse: Circle,
    /// The filled icon disc.
    pub icon: Circle,
}

impl AvatarLayout {
    /// Lay out an avatar centered on `center`.
    pub fn centered(center: Point, style: &AvatarStyle) -> Self {
        Self {
            pulse: Circle::new(center, style.pulse_diameter * 0.5),
            icon: Circle::new(center, style.icon_diameter * 0.5),
        }
    }

    /// Axis-aligned bounds of the larger of the two circles.
    pub fn bounds(&self) -> Rect {
        self.pulse.bounding_box().union(self.icon.bounding_box())
    }

    /// Whether `pt` falls on the avatar.
    pub fn contains(&self, pt: Point) -> bool {
        self.pulse.contains(pt) || self.icon.contains(pt)
    }
}

/// Cluster bubble: a capsule of initial discs and an optional badge, a tail
/// pointing down, and an avatar underneath.
#[derive(Clone, Debug)]
pub struct BubbleLayout {
    /// The capsule behind the row.
    pub capsule: RoundedRect,
    /// One disc per label, left to right.
    pub labels: SmallVec<[Circle; MAX_LABELS]>,
    /// The `+N` badge, present only when the summary overflows.
    pub badge: Option<Circle>,
    /// Downward-pointing triangle under the capsule.
    pub tail: BezPath,
    /// Avatar under the tail.
    pub avatar: AvatarLayout,
}

impl BubbleLayout {
    /// Lay out the bubble for `summary`, centered on the anchor.
    #[allow(
        clippy::cast_precision_loss,
        reason = "At most MAX_LABELS + 1 items are laid out."
    )]
    pub fn compute(summary: &ClusterSummary, style: &AvatarStyle) -> Self {
        let n_labels = summary.labels().len();
        let has_badge = summary.overflow() > 0;
        let n_items = n_labels + usize::from(has_badge);

        let mut row_width = n_labels as f64 * LABEL_DIAMETER;
        if has_badge {
            row_width += BADGE_DIAMETER;
        }
        if n_items > 1 {
            row_width += (n_items - 1) as f64 * LABEL_SPACING;
        }
        let row_height = if n_labels > 0 {
            LABEL_DIAMETER
        } else if has_badge {
            BADGE_DIAMETER
        } else {
            0.0
        };

        let bubble_height = BUBBLE_PADDING_TOP + row_height + BUBBLE_PADDING_BOTTOM;
        let bubble_width = row_width + 2.0 * BUBBLE_PADDING_X;
        let total_height = bubble_height + TAIL_HEIGHT + style.pulse_diameter;
        let top = -total_height * 0.5;

        let capsule = RoundedRect::new(
            -bubble_width * 0.5,
            top,
            bubble_width * 0.5,
            top + bubble_height,
            bubble_height * 0.5,
        );

        let row_center_y = top + BUBBLE_PADDING_TOP + row_height * 0.5;
        let mut x = -row_width * 0.5;
        let mut labels = SmallVec::new();
        for _ in 0..n_labels {
            labels.push(Circle::new(
                (x + LABEL_DIAMETER * 0.5, row_center_y),
                LABEL_DIAMETER * 0.5,
            ));
            x += LABEL_DIAMETER + LABEL_SPACING;
        }
        let badge = has_badge.then(|| {
            Circle::new((x + BADGE_DIAMETER * 0.5, row_center_y), BADGE_DIAMETER * 0.5)
        });

        let tail_top = top + bubble_height;
        let mut tail = BezPath::new();
        tail.move_to((0.0, tail_top + TAIL_HEIGHT));
        tail.line_to((TAIL_WIDTH * 0.5, tail_top));
        tail.line_to((-TAIL_WIDTH * 0.5, tail_top));
        tail.close_path();

        let avatar_center = Point::new(0.0, tail_top + TAIL_HEIGHT + style.pulse_diameter * 0.5);

        Self {
            capsule,
            labels,
            badge,
            tail,
            avatar: AvatarLayout::centered(avatar_center, style),
        }
    }

    /// Axis-aligned bounds of every part.
    pub fn bounds(&self) -> Rect {
        self.capsule
            .rect()
            .union(self.tail.bounding_box())
            .union(self.avatar.bounds())
    }

    /// Whether `pt` falls on the capsule, the tail, or the avatar.
    pub fn contains(&self, pt: Point) -> bool {
        self.capsule.contains(pt) || self.tail.contains(pt) || self.avatar.contains(pt)
    }
}
