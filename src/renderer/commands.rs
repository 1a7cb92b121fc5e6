//! Draw command definitions recorded by widgets during paint.

use std::sync::Arc;

use super::bitmap::Bitmap;
use crate::widgets::{Color, Rect};

/// A single draw operation in surface coordinates.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Fill a rectangle with a solid color.
    Rect {
        /// Rectangle bounds
        rect: Rect,
        /// Fill color
        color: Color,
    },

    /// Fill a rounded rectangle with a solid color.
    RoundedRect {
        /// Rectangle bounds
        rect: Rect,
        /// Fill color
        color: Color,
        /// Corner radius in pixels
        radius: f32,
    },

    /// Draw a bitmap stretched to a rectangle.
    Bitmap {
        /// Destination bounds
        rect: Rect,
        /// Pixels to draw
        bitmap: Arc<Bitmap>,
    },
}

impl DrawCommand {
    pub fn rect(rect: Rect, color: Color) -> Self {
        Self::Rect { rect, color }
    }

    pub fn rounded_rect(rect: Rect, color: Color, radius: f32) -> Self {
        Self::RoundedRect {
            rect,
            color,
            radius,
        }
    }

    pub fn bitmap(rect: Rect, bitmap: Arc<Bitmap>) -> Self {
        Self::Bitmap { rect, bitmap }
    }

    /// Destination bounds of this command.
    pub fn bounds(&self) -> Rect {
        match self {
            DrawCommand::Rect { rect, .. }
            | DrawCommand::RoundedRect { rect, .. }
            | DrawCommand::Bitmap { rect, .. } => *rect,
        }
    }
}
