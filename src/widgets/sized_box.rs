use crate::layout::{Constraints, Size};
use crate::renderer::PaintContext;

use super::widget::{Color, Rect, Widget};

/// A leaf widget with a preferred size and an optional rounded fill.
pub struct SizedBox {
    preferred: Size,
    color: Color,
    corner_radius: f32,
    bounds: Rect,
}

impl SizedBox {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            preferred: Size::new(width, height),
            color: Color::TRANSPARENT,
            corner_radius: 0.0,
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }
}

impl Widget for SizedBox {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let size = constraints.constrain(self.preferred);
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.color.a > 0.0 && !self.bounds.size().is_empty() {
            ctx.draw_rounded_rect(self.bounds, self.color, self.corner_radius);
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Create a fixed-size box
pub fn sized_box(width: f32, height: f32) -> SizedBox {
    SizedBox::new(width, height)
}
