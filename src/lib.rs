//! A container widget that renders a soft drop shadow as its background.
//!
//! [`ShadowLayout`](widgets::ShadowLayout) reserves padding for the shadow on
//! every non-trimmed edge, renders a blurred silhouette of its rounded bounds
//! into a [`Bitmap`](renderer::bitmap::Bitmap) and stacks its children on top.
//! Frames are rasterized headlessly by [`App`].

pub mod attributes;
pub mod config;
pub mod error;
pub mod invalidation;
pub mod layout;
pub mod renderer;
pub mod widgets;

use std::path::Path;

use layout::Constraints;
use renderer::bitmap::Bitmap;
use renderer::Renderer;
use widgets::{Color, Widget};

pub use error::{AttributeError, RenderError};

pub mod prelude {
    pub use crate::attributes::{AttributeSet, Theme};
    pub use crate::config::{Edges, ShadowConfig};
    pub use crate::error::{AttributeError, RenderError};
    pub use crate::layout::{at_least, at_most, Constraints, Length, Size};
    pub use crate::renderer::bitmap::Bitmap;
    pub use crate::renderer::primitives::Shadow;
    pub use crate::renderer::{Background, LayerType, PaintContext, RenderMode};
    pub use crate::widgets::shadow_layout::{shadow_layout, ShadowLayout};
    pub use crate::widgets::sized_box::{sized_box, SizedBox};
    pub use crate::widgets::{Color, Padding, Rect, Widget};
    pub use crate::{App, AppConfig};
}

pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            background_color: Color::WHITE,
        }
    }
}

/// Lays out, paints and rasterizes a widget tree into a bitmap.
pub struct App {
    config: AppConfig,
    renderer: Renderer,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let renderer = Renderer::new(config.width, config.height);
        Self { config, renderer }
    }

    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self.renderer.set_screen_size(self.config.width, self.config.height);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.config.height = height;
        self.renderer.set_screen_size(self.config.width, self.config.height);
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background_color = color;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Change the frame size. The next frame lays the tree out again.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.config.width, self.config.height) {
            log::info!(
                "Resizing frame {}x{} -> {}x{}",
                self.config.width,
                self.config.height,
                width,
                height
            );
        }
        self.config.width = width;
        self.config.height = height;
        self.renderer.set_screen_size(width, height);
    }

    /// Lay out and paint `root` at the frame size and rasterize the result.
    ///
    /// A shadow that failed to render during layout fails the frame. The
    /// widget keeps its shadow dirty, so a later frame retries it.
    pub fn render_frame<W: Widget>(&mut self, root: &mut W) -> Result<Bitmap, RenderError> {
        let constraints = Constraints::new(
            0.0,
            0.0,
            self.config.width as f32,
            self.config.height as f32,
        );
        root.layout(constraints);
        root.set_origin(0.0, 0.0);
        if let Some(err) = root.take_render_error() {
            return Err(err);
        }

        let mut paint_ctx = self.renderer.create_paint_context();
        root.paint(&mut paint_ctx);
        root.clear_paint_flag();

        self.renderer.render(&paint_ctx, self.config.background_color)
    }

    /// Render a single frame of `root` and write it as a PNG.
    pub fn run<W: Widget>(mut self, mut root: W, path: impl AsRef<Path>) -> Result<(), RenderError> {
        // Embedders and tests may have installed a logger already
        let _ = env_logger::try_init();

        let path = path.as_ref();
        let frame = self.render_frame(&mut root)?;
        frame.save(path)?;
        log::info!(
            "Wrote {}x{} frame to {}",
            frame.width(),
            frame.height(),
            path.display()
        );
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
