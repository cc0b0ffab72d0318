// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visible map region.

use understory_annotations::{Coordinate, CoordinateError};

/// Extent of a viewport in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// North-south extent.
    pub latitude_delta: f64,
    /// East-west extent.
    pub longitude_delta: f64,
}

impl Span {
    /// Create a span without validation.
    pub const fn new(latitude_delta: f64, longitude_delta: f64) -> Self {
        Self {
            latitude_delta,
            longitude_delta,
        }
    }

    /// Whether both deltas are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.latitude_delta.is_finite()
            && self.longitude_delta.is_finite()
            && self.latitude_delta > 0.0
            && self.longitude_delta > 0.0
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0.05, 0.05)
    }
}

/// A visible map region: a center coordinate and a span.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Center of the region.
    pub center: Coordinate,
    /// Extent of the region.
    pub span: Span,
}

impl Viewport {
    /// Create a viewport without validation.
    pub const fn new(center: Coordinate, span: Span) -> Self {
        Self { center, span }
    }

    /// Create a viewport, rejecting an invalid center or span.
    pub fn try_new(center: Coordinate, span: Span) -> Result<Self, ViewportError> {
        let v = Self::new(center, span);
        v.validate()?;
        Ok(v)
    }

    /// Check the center and span.
    pub fn validate(&self) -> Result<(), ViewportError> {
        self.center.validate()?;
        if !self.span.is_valid() {
            return Err(ViewportError::InvalidSpan(self.span));
        }
        Ok(())
    }

    /// Southern latitude edge.
    pub fn south(&self) -> f64 {
        self.center.latitude - self.span.latitude_delta * 0.5
    }

    /// Northern latitude edge.
    pub fn north(&self) -> f64 {
        self.center.latitude + self.span.latitude_delta * 0.5
    }

    /// Western longitude edge.
    pub fn west(&self) -> f64 {
        self.center.longitude - self.span.longitude_delta * 0.5
    }

    /// Eastern longitude edge.
    pub fn east(&self) -> f64 {
        self.center.longitude + self.span.longitude_delta * 0.5
    }

    /// Whether `c` lies inside the region, edges included.
    pub fn contains(&self, c: Coordinate) -> bool {
        (self.south()..=self.north()).contains(&c.latitude)
            && (self.west()..=self.east()).contains(&c.longitude)
    }
}

/// Reasons a [`Viewport`] can be rejected.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ViewportError {
    /// The center is not a valid coordinate.
    #[error("invalid viewport center")]
    Center(#[from] CoordinateError),
    /// A span delta is non-finite or not strictly positive.
    #[error("span deltas must be finite and positive, got {0:?}")]
    InvalidSpan(Span),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_containment() {
        let v = Viewport::new(Coordinate::new(10.0, 20.0), Span::new(2.0, 4.0));
        assert_eq!((v.south(), v.north()), (9.0, 11.0));
        assert_eq!((v.west(), v.east()), (18.0, 22.0));
        assert!(v.contains(Coordinate::new(11.0, 18.0)));
        assert!(!v.contains(Coordinate::new(11.5, 20.0)));
    }

    #[test]
    fn try_new_validates() {
        let center = Coordinate::new(36.1147, -115.1728);
        assert!(Viewport::try_new(center, Span::new(0.05, 0.05)).is_ok());
        assert_eq!(
            Viewport::try_new(center, Span::new(0.0, 0.05)),
            Err(ViewportError::InvalidSpan(Span::new(0.0, 0.05)))
        );
        assert_eq!(
            Viewport::try_new(Coordinate::new(95.0, 0.0), Span::default()),
            Err(ViewportError::Center(CoordinateError::LatitudeOutOfRange(95.0)))
        );
    }
}
