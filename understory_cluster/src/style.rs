// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Avatar styling options.

use alloc::string::String;

/// An 8-bit RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque system-style blue.
    pub const BLUE: Self = Self::rgb(0, 122, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Styling of the pulsing avatar drawn for pins and under cluster bubbles.
///
/// Purely cosmetic. The default is a blue 24px disc inside a 44px pulse ring,
/// with no glyph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvatarStyle {
    /// Fill of the icon disc and stroke of the pulse ring.
    pub color: Color,
    /// Optional glyph (typically a single emoji) drawn on the icon disc.
    pub emoji: Option<String>,
    /// Diameter of the pulse ring at rest.
    pub pulse_diameter: f64,
    /// Diameter of the icon disc.
    pub icon_diameter: f64,
}

impl Default for AvatarStyle {
    fn default() -> Self {
        Self {
            color: Color::BLUE,
            emoji: None,
            pulse_diameter: 44.0,
            icon_diameter: 24.0,
        }
    }
}

impl AvatarStyle {
    /// Replace the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Draw `emoji` on the icon disc.
    #[must_use]
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    /// Replace both diameters.
    #[must_use]
    pub fn with_diameters(mut self, pulse: f64, icon: f64) -> Self {
        self.pulse_diameter = pulse;
        self.icon_diameter = icon;
        self
    }
}
