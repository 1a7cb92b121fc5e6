//! Default values used when an attribute is not declared.

use crate::widgets::Color;

/// Unit attached to a declared dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Physical pixels.
    Px,
    /// Density-independent pixels, scaled by [`Theme::density`].
    Dp,
    /// Scale-independent pixels; treated like `Dp`.
    Sp,
}

/// A length with its declared unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension {
    pub value: f32,
    pub unit: Unit,
}

impl Dimension {
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }

    pub const fn dp(value: f32) -> Self {
        Self {
            value,
            unit: Unit::Dp,
        }
    }

    /// Convert to pixels at the given screen density.
    pub fn to_px(&self, density: f32) -> f32 {
        match self.unit {
            Unit::Px => self.value,
            Unit::Dp | Unit::Sp => self.value * density,
        }
    }
}

/// Defaults table for shadow attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Pixels per density-independent pixel.
    pub density: f32,
    pub default_corner_radius: Dimension,
    pub default_shadow_radius: Dimension,
    pub default_shadow_color: Color,
}

impl Theme {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            density: 1.0,
            default_corner_radius: Dimension::dp(4.0),
            default_shadow_radius: Dimension::dp(4.0),
            default_shadow_color: Color::from_argb(0x44000000),
        }
    }
}
