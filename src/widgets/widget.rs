use crate::error::RenderError;
use crate::layout::{Constraints, Size};
use crate::renderer::PaintContext;

/// Straight-alpha color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Build a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            r: ((argb >> 16) & 0xFF) as f32 / 255.0,
            g: ((argb >> 8) & 0xFF) as f32 / 255.0,
            b: (argb & 0xFF) as f32 / 255.0,
            a: ((argb >> 24) & 0xFF) as f32 / 255.0,
        }
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Quantize to 8-bit `[r, g, b, a]`.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    pub fn alpha_u8(&self) -> u8 {
        channel_to_u8(self.a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha_u8() == u8::MAX
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
}

fn channel_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Override the top padding value.
    pub fn top(mut self, v: f32) -> Self {
        self.top = v;
        self
    }

    /// Override the bottom padding value.
    pub fn bottom(mut self, v: f32) -> Self {
        self.bottom = v;
        self
    }

    /// Override the left padding value.
    pub fn left(mut self, v: f32) -> Self {
        self.left = v;
        self
    }

    /// Override the right padding value.
    pub fn right(mut self, v: f32) -> Self {
        self.right = v;
        self
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::all(0.0)
    }
}

/// A node in the widget tree.
///
/// Layout happens top-down: a parent hands constraints to each child, the child
/// returns its size, and the parent then tells the child where it sits.
pub trait Widget {
    fn layout(&mut self, constraints: Constraints) -> Size;
    fn set_origin(&mut self, x: f32, y: f32);
    fn paint(&self, ctx: &mut PaintContext);
    fn bounds(&self) -> Rect;

    /// Whether this widget or a descendant changed since the last paint.
    /// Static widgets never request a repaint.
    fn needs_paint(&self) -> bool {
        false
    }

    /// Called once the frame containing this widget has been painted.
    fn clear_paint_flag(&mut self) {}

    /// Take the render failure recorded during the last layout pass, if any.
    ///
    /// Containers report their own failure before their children's.
    fn take_render_error(&mut self) -> Option<RenderError> {
        None
    }
}

impl Widget for Box<dyn Widget> {
    fn layout(&mut self, constraints: Constraints) -> Size {
        (**self).layout(constraints)
    }
    fn set_origin(&mut self, x: f32, y: f32) {
        (**self).set_origin(x, y)
    }
    fn paint(&self, ctx: &mut PaintContext) {
        (**self).paint(ctx)
    }
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
    fn needs_paint(&self) -> bool {
        (**self).needs_paint()
    }
    fn clear_paint_flag(&mut self) {
        (**self).clear_paint_flag()
    }
    fn take_render_error(&mut self) -> Option<RenderError> {
        (**self).take_render_error()
    }
}
