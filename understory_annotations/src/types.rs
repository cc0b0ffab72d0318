// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point identifiers, coordinates, and the immutable point record.

use alloc::sync::Arc;

/// Opaque, stable identifier of a [`GeoPoint`].
///
/// 128 bits wide so that UUIDs and similar external identifiers fit without
/// hashing. Identity is always by id, never by coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointId(pub u128);

impl From<u128> for PointId {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

/// A WGS84-style latitude/longitude pair in degrees.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without validation.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a coordinate, rejecting non-finite or out-of-range components.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let c = Self::new(latitude, longitude);
        c.validate()?;
        Ok(c)
    }

    /// Check that both components are finite and within range.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Whether [`Coordinate::validate`] succeeds.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Reasons a [`Coordinate`] can be rejected.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    /// Latitude or longitude is NaN or infinite.
    #[error("coordinate component is not finite")]
    NotFinite,
    /// Latitude is outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude is outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A geographic point with a stable identity.
///
/// Points are immutable once created: a point source that wants to "move" a
/// point must issue a new id. Two points may share a coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoPoint {
    id: PointId,
    coordinate: Coordinate,
    title: Option<Arc<str>>,
}

impl GeoPoint {
    /// Create an untitled point.
    pub const fn new(id: PointId, coordinate: Coordinate) -> Self {
        Self {
            id,
            coordinate,
            title: None,
        }
    }

    /// Attach a display title, consuming `self`.
    ///
    /// The title is only used to derive the initial shown in cluster bubbles.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<Arc<str>>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Identifier of this point.
    #[inline]
    pub const fn id(&self) -> PointId {
        self.id
    }

    /// Location of this point.
    #[inline]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Display title, if any.
    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
