pub mod bitmap;
pub mod commands;
pub mod primitives;
pub mod shadow;

use std::sync::Arc;

use self::bitmap::Bitmap;
use self::commands::DrawCommand;
use self::primitives::RoundedRect;
use crate::error::RenderError;
use crate::widgets::{Color, Rect};

pub use shadow::ShadowRenderer;

/// Whether drawing happens at runtime or inside a design-time preview, where
/// shadow-layer effects are not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Interactive,
    Preview,
}

/// How a widget's content is drawn.
///
/// A widget switches to `Software` when it draws a shadow layer, since those
/// are rasterized on the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerType {
    #[default]
    Hardware,
    Software,
}

/// What a widget paints behind its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// A pre-rendered bitmap, stretched to the widget bounds.
    Bitmap(Arc<Bitmap>),
    /// A flat fill.
    Solid(Color),
}

impl Background {
    /// Pixel dimensions of a bitmap background.
    pub fn bitmap_dimensions(&self) -> Option<(u32, u32)> {
        match self {
            Background::Bitmap(bitmap) => Some(bitmap.dimensions()),
            Background::Solid(_) => None,
        }
    }

    /// Record this background as a draw command covering `rect`.
    pub fn paint(&self, ctx: &mut PaintContext, rect: Rect) {
        match self {
            Background::Bitmap(bitmap) => ctx.draw_bitmap(rect, bitmap.clone()),
            Background::Solid(color) => ctx.draw_rect(rect, *color),
        }
    }
}

/// Draw commands collected while painting a widget tree.
#[derive(Debug, Default)]
pub struct PaintContext {
    commands: Vec<DrawCommand>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::rect(rect, color));
    }

    pub fn draw_rounded_rect(&mut self, rect: Rect, color: Color, radius: f32) {
        self.commands
            .push(DrawCommand::rounded_rect(rect, color, radius));
    }

    pub fn draw_bitmap(&mut self, rect: Rect, bitmap: Arc<Bitmap>) {
        self.commands.push(DrawCommand::bitmap(rect, bitmap));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Composites paint contexts into frames on the CPU.
pub struct Renderer {
    screen_width: u32,
    screen_height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
        }
    }

    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    pub fn create_paint_context(&self) -> PaintContext {
        PaintContext::new()
    }

    /// Composite all commands, in order, over `clear_color`.
    pub fn render(&self, ctx: &PaintContext, clear_color: Color) -> Result<Bitmap, RenderError> {
        let mut frame = Bitmap::filled(self.screen_width, self.screen_height, clear_color)?;
        for command in ctx.commands() {
            match command {
                DrawCommand::Rect { rect, color } => {
                    frame.fill_rounded_rect(&RoundedRect::from_rect(*rect, 0.0), *color);
                }
                DrawCommand::RoundedRect {
                    rect,
                    color,
                    radius,
                } => {
                    frame.fill_rounded_rect(&RoundedRect::from_rect(*rect, *radius), *color);
                }
                DrawCommand::Bitmap { rect, bitmap } => frame.draw_bitmap(bitmap, *rect),
            }
        }
        log::debug!(
            "Renderer: composited {} commands into {}x{}",
            ctx.len(),
            self.screen_width,
            self.screen_height
        );
        Ok(frame)
    }
}
