//! Resolved shadow parameters.

use bitflags::bitflags;

use crate::attributes::Theme;
use crate::renderer::primitives::Shadow;
use crate::widgets::{Color, Padding};

/// Alpha given to a shadow color that was declared fully opaque.
///
/// The shadow-layer effect takes its strength from the color's own alpha; an
/// opaque shadow would read as a solid fill.
pub const MAX_SHADOW_ALPHA: u8 = 254;

bitflags! {
    /// Edges on which the shadow neither reserves padding nor extends.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct Edges: u8 {
        const LEFT   = 0b0001;
        const TOP    = 0b0010;
        const RIGHT  = 0b0100;
        const BOTTOM = 0b1000;
    }
}

/// Shadow parameters for a [`ShadowLayout`](crate::widgets::ShadowLayout).
///
/// Values are in pixels. A config is a plain value: once handed to a widget
/// it is never changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    shadow_color: Color,
    shadow_radius: f32,
    corner_radius: f32,
    dx: f32,
    dy: f32,
    trim: Edges,
}

impl ShadowConfig {
    pub fn new(shadow_color: Color, shadow_radius: f32, corner_radius: f32) -> Self {
        Self {
            shadow_color: clamp_opaque_alpha(shadow_color),
            shadow_radius: shadow_radius.max(0.0),
            corner_radius: corner_radius.max(0.0),
            dx: 0.0,
            dy: 0.0,
            trim: Edges::empty(),
        }
    }

    /// Defaults from a theme: its color and radii, no offset, no trims.
    pub fn from_theme(theme: &Theme) -> Self {
        Self::new(
            theme.default_shadow_color,
            theme.default_shadow_radius.to_px(theme.density),
            theme.default_corner_radius.to_px(theme.density),
        )
    }

    pub fn with_offset(mut self, dx: f32, dy: f32) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    pub fn with_trim(mut self, trim: Edges) -> Self {
        self.trim = trim;
        self
    }

    pub fn shadow_color(&self) -> Color {
        self.shadow_color
    }

    pub fn shadow_radius(&self) -> f32 {
        self.shadow_radius
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn dx(&self) -> f32 {
        self.dx
    }

    pub fn dy(&self) -> f32 {
        self.dy
    }

    pub fn trim(&self) -> Edges {
        self.trim
    }

    /// Space reserved around the content so the shadow is never clipped and
    /// never paints over children.
    pub fn padding(&self) -> Padding {
        let x = (self.shadow_radius + self.dx.abs()).floor();
        let y = (self.shadow_radius + self.dy.abs()).floor();
        let edge = |edge: Edges, value: f32| if self.trim.contains(edge) { 0.0 } else { value };
        Padding {
            top: edge(Edges::TOP, y),
            right: edge(Edges::RIGHT, x),
            bottom: edge(Edges::BOTTOM, y),
            left: edge(Edges::LEFT, x),
        }
    }

    /// The shadow-layer effect for this config.
    pub fn shadow(&self) -> Shadow {
        Shadow::new((self.dx, self.dy), self.shadow_radius, self.shadow_color)
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// Force a fully opaque color down to [`MAX_SHADOW_ALPHA`], keeping RGB.
pub fn clamp_opaque_alpha(color: Color) -> Color {
    if color.is_opaque() {
        color.with_alpha(f32::from(MAX_SHADOW_ALPHA) / 255.0)
    } else {
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_color_is_clamped() {
        let config = ShadowConfig::new(Color::from_argb(0xFF0000FF), 10.0, 8.0);
        assert_eq!(config.shadow_color().alpha_u8(), 254);
        assert_eq!(config.shadow_color().to_rgba8()[..3], [0, 0, 255]);
    }

    #[test]
    fn test_translucent_color_is_preserved() {
        for alpha in [0u8, 1, 0x44, 200, 254] {
            let color = Color::from_rgba8(10, 20, 30, alpha);
            let config = ShadowConfig::new(color, 4.0, 4.0);
            assert_eq!(config.shadow_color(), color);
        }
    }

    #[test]
    fn test_negative_radii_are_clamped() {
        let config = ShadowConfig::new(Color::BLACK, -3.0, -1.0);
        assert_eq!(config.shadow_radius(), 0.0);
        assert_eq!(config.corner_radius(), 0.0);
    }

    #[test]
    fn test_padding_uses_radius_plus_offset() {
        let config = ShadowConfig::new(Color::BLACK, 10.0, 8.0).with_offset(0.0, 4.0);
        assert_eq!(config.padding(), Padding::symmetric(10.0, 14.0));
    }

    #[test]
    fn test_padding_ignores_offset_sign() {
        let pos = ShadowConfig::new(Color::BLACK, 6.0, 0.0).with_offset(3.0, 2.0);
        let neg = ShadowConfig::new(Color::BLACK, 6.0, 0.0).with_offset(-3.0, -2.0);
        assert_eq!(pos.padding(), neg.padding());
        assert_eq!(pos.padding(), Padding::symmetric(9.0, 8.0));
    }

    #[test]
    fn test_padding_truncates_fractions() {
        let config = ShadowConfig::new(Color::BLACK, 4.6, 0.0).with_offset(0.3, -1.5);
        assert_eq!(config.padding(), Padding::symmetric(4.0, 6.0));
    }

    #[test]
    fn test_trimmed_edges_have_no_padding() {
        let config = ShadowConfig::new(Color::BLACK, 10.0, 8.0)
            .with_offset(2.0, 4.0)
            .with_trim(Edges::LEFT | Edges::BOTTOM);
        let padding = config.padding();
        assert_eq!(padding.left, 0.0);
        assert_eq!(padding.bottom, 0.0);
        assert_eq!(padding.right, 12.0);
        assert_eq!(padding.top, 14.0);

        let all = config.with_trim(Edges::all()).padding();
        assert_eq!(all, Padding::all(0.0));
    }

    #[test]
    fn test_default_follows_theme() {
        let config = ShadowConfig::default();
        assert_eq!(config.shadow_radius(), 4.0);
        assert_eq!(config.corner_radius(), 4.0);
        assert_eq!(config.shadow_color().to_rgba8(), [0x00, 0x00, 0x00, 0x44]);
        assert_eq!(config.trim(), Edges::empty());
    }
}
