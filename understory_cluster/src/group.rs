// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine-computed point groups and the marker request passed to the presenter.

use alloc::vec::Vec;

use understory_annotations::{Coordinate, GeoPoint};

use crate::tag::MarkerRole;

/// A transient group of annotations that are close at the current zoom level.
///
/// Groups are produced by the clustering engine on every zoom or pan and are
/// never stored. Member order is the engine's order and is preserved.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterGroup {
    members: Vec<GeoPoint>,
    coordinate: Coordinate,
}

impl ClusterGroup {
    /// Group `members` around their centroid.
    ///
    /// The centroid is the plain mean of latitudes and longitudes, which is
    /// adequate at clustering scales away from the antimeridian. An empty group
    /// sits at the origin.
    pub fn new(members: Vec<GeoPoint>) -> Self {
        let coordinate = centroid(&members);
        Self {
            members,
            coordinate,
        }
    }

    /// Group `members` around an engine-supplied representative coordinate.
    pub fn with_coordinate(members: Vec<GeoPoint>, coordinate: Coordinate) -> Self {
        Self {
            members,
            coordinate,
        }
    }

    /// Members in engine order.
    #[inline]
    pub fn members(&self) -> &[GeoPoint] {
        &self.members
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Representative coordinate of the group.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "Member counts are far below 2^52."
)]
fn centroid(members: &[GeoPoint]) -> Coordinate {
    if members.is_empty() {
        return Coordinate::default();
    }
    let (lat, lon) = members.iter().fold((0.0, 0.0), |(lat, lon), p| {
        let c = p.coordinate();
        (lat + c.latitude, lon + c.longitude)
    });
    let n = members.len() as f64;
    Coordinate::new(lat / n, lon / n)
}

/// What the map engine asks the presenter to render.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerRequest {
    /// A point that is not grouped with any other at this zoom level.
    Singleton(GeoPoint),
    /// A group of points.
    Cluster(ClusterGroup),
}

impl MarkerRequest {
    /// The marker role this request is presented with.
    pub const fn role(&self) -> MarkerRole {
        match self {
            Self::Singleton(_) => MarkerRole::Pin,
            Self::Cluster(_) => MarkerRole::Cluster,
        }
    }

    /// Where the marker is anchored on the map.
    pub fn coordinate(&self) -> Coordinate {
        match self {
            Self::Singleton(p) => p.coordinate(),
            Self::Cluster(g) => g.coordinate(),
        }
    }

    /// The group, if this is a cluster request.
    pub fn as_cluster(&self) -> Option<&ClusterGroup> {
        match self {
            Self::Cluster(g) => Some(g),
            Self::Singleton(_) => None,
        }
    }
}
