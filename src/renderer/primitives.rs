//! Geometry shared by the shadow rasterizer and the compositor.

use tiny_skia::{Path, PathBuilder};

use crate::widgets::{Color, Rect};

/// Control-point distance for a quarter circle drawn as one cubic, as a
/// fraction of the radius.
const KAPPA: f32 = 0.552_284_8;

/// Shadow-layer effect: a blurred, tinted, offset copy of a shape's silhouette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Shadow offset in pixels (x, y)
    pub offset: (f32, f32),
    /// Blur radius in pixels
    pub blur: f32,
    /// Shadow color
    pub color: Color,
}

impl Shadow {
    pub fn new(offset: (f32, f32), blur: f32, color: Color) -> Self {
        Self {
            offset,
            blur,
            color,
        }
    }

    /// A zero blur radius removes the shadow layer entirely, matching how
    /// platform paint objects treat `radius == 0`.
    pub fn is_visible(&self) -> bool {
        self.blur > 0.0 && self.color.a > 0.0
    }

    /// Gaussian standard deviation for the blur radius.
    pub fn sigma(&self) -> f32 {
        blur_radius_to_sigma(self.blur)
    }
}

/// Conversion used by 2D paint libraries for shadow-layer blur radii.
pub fn blur_radius_to_sigma(radius: f32) -> f32 {
    if radius > 0.0 {
        0.57735 * radius + 0.5
    } else {
        0.0
    }
}

/// A rounded rectangle given by its edges.
///
/// Edges may cross (left > right) after aggressive insets; such a rect is
/// empty and covers nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub radius: f32,
}

impl RoundedRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32, radius: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            radius,
        }
    }

    pub fn from_rect(rect: Rect, radius: f32) -> Self {
        Self::new(rect.x, rect.y, rect.right(), rect.bottom(), radius)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        !(self.right > self.left && self.bottom > self.top)
    }

    /// Corner radius clamped to half of the smaller side.
    pub fn effective_radius(&self) -> f32 {
        let max = (self.width().min(self.height()) / 2.0).max(0.0);
        self.radius.clamp(0.0, max)
    }

    /// Outline as a fillable path, or `None` for an empty rect.
    pub fn to_path(&self) -> Option<Path> {
        if self.is_empty() {
            return None;
        }
        let r = self.effective_radius();
        if r <= 0.0 {
            let rect = tiny_skia::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)?;
            return Some(PathBuilder::from_rect(rect));
        }

        let (l, t, rt, b) = (self.left, self.top, self.right, self.bottom);
        let k = r * KAPPA;
        let mut pb = PathBuilder::new();
        pb.move_to(l + r, t);
        pb.line_to(rt - r, t);
        pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
        pb.line_to(rt, b - r);
        pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
        pb.line_to(l + r, b);
        pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
        pb.line_to(l, t + r);
        pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
        pb.close();
        pb.finish()
    }
}
