//! Software rendering of the shadow background.
//!
//! The background is a transparent bitmap holding one rounded rectangle drawn
//! with a transparent fill and a shadow-layer effect. The shape itself is
//! invisible, so only the blurred, offset silhouette is ever drawn.

use std::sync::Arc;

use tiny_skia::{FillRule, Mask, PremultipliedColorU8, Transform};

use super::bitmap::Bitmap;
use super::primitives::{RoundedRect, Shadow};
use super::{Background, RenderMode};
use crate::config::{Edges, ShadowConfig};
use crate::error::RenderError;
use crate::widgets::Rect;

/// Kernel half-width in standard deviations.
const KERNEL_EXTENT: f32 = 3.0;

/// Renders shadow backgrounds for one [`ShadowConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowRenderer {
    config: ShadowConfig,
}

impl ShadowRenderer {
    pub fn new(config: ShadowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShadowConfig {
        &self.config
    }

    /// Shape the shadow is cast from, for a bitmap of the given size.
    ///
    /// Non-trimmed edges are inset by the shadow radius. Each pair of edges is
    /// then pulled toward the center by the signed offset on its axis, so a
    /// negative offset widens the shape instead of mirroring the positive case.
    pub fn shadow_shape(&self, width: f32, height: f32) -> RoundedRect {
        let c = &self.config;
        let radius = c.shadow_radius();
        let trim = c.trim();
        let inset = |edge: Edges| if trim.contains(edge) { 0.0 } else { radius };

        let mut shape = RoundedRect::new(
            inset(Edges::LEFT),
            inset(Edges::TOP),
            width - inset(Edges::RIGHT),
            height - inset(Edges::BOTTOM),
            c.corner_radius(),
        );
        shape.top += c.dy();
        shape.bottom -= c.dy();
        shape.left += c.dx();
        shape.right -= c.dx();
        shape
    }

    /// Render the shadow bitmap for a `width` × `height` request.
    ///
    /// Returns `Ok(None)` when either dimension is not positive.
    pub fn render(&self, width: i32, height: i32) -> Result<Option<Bitmap>, RenderError> {
        if width <= 0 || height <= 0 {
            log::debug!("skipping shadow render for {}x{}", width, height);
            return Ok(None);
        }
        let (w, h) = (width as u32, height as u32);
        let mut bitmap = Bitmap::new(w, h)?;
        let shape = self.shadow_shape(w as f32, h as f32);
        let shadow = self.config.shadow();

        if shadow.is_visible() {
            draw_shadow_layer(&mut bitmap, &shape, &shadow)?;
        }

        log::debug!(
            "rendered shadow {}x{} shape=({:.1}, {:.1}, {:.1}, {:.1}) sigma={:.2}",
            w,
            h,
            shape.left,
            shape.top,
            shape.right,
            shape.bottom,
            shadow.sigma()
        );
        Ok(Some(bitmap))
    }

    /// Produce the widget background for a request.
    ///
    /// Preview mode skips the shadow layer and returns a flat fill of the
    /// shadow color.
    pub fn render_background(
        &self,
        width: i32,
        height: i32,
        mode: RenderMode,
    ) -> Result<Option<Background>, RenderError> {
        if width <= 0 || height <= 0 {
            return Ok(None);
        }
        match mode {
            RenderMode::Preview => Ok(Some(Background::Solid(self.config.shadow_color()))),
            RenderMode::Interactive => Ok(self
                .render(width, height)?
                .map(|bitmap| Background::Bitmap(Arc::new(bitmap)))),
        }
    }
}

/// Composite the blurred, offset silhouette of `shape` tinted with the
/// shadow color.
fn draw_shadow_layer(
    bitmap: &mut Bitmap,
    shape: &RoundedRect,
    shadow: &Shadow,
) -> Result<(), RenderError> {
    let Some(path) = shape.to_path() else {
        return Ok(());
    };
    let (width, height) = bitmap.dimensions();
    let mut mask = Mask::new(width, height).ok_or(RenderError::EmptyBitmap { width, height })?;
    mask.fill_path(
        &path,
        FillRule::Winding,
        true,
        Transform::from_translate(shadow.offset.0, shadow.offset.1),
    );

    let (w, h) = (width as usize, height as usize);
    let mut coverage: Vec<f32> = mask.data().iter().map(|&a| f32::from(a) / 255.0).collect();
    gaussian_blur(&mut coverage, w, h, shadow.sigma());

    let mut layer = Bitmap::new(width, height)?;
    let [r, g, b, a] = shadow.color.to_rgba8();
    let tint = [r, g, b].map(|c| f32::from(c) / 255.0);
    for (px, cov) in layer.pixmap_mut().pixels_mut().iter_mut().zip(&coverage) {
        let alpha = (f32::from(a) * cov.clamp(0.0, 1.0)).round();
        if alpha <= 0.0 {
            continue;
        }
        let [pr, pg, pb] = tint.map(|c| (c * alpha).round() as u8);
        *px = PremultipliedColorU8::from_rgba(pr, pg, pb, alpha as u8)
            .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }

    bitmap.draw_bitmap(&layer, Rect::new(0.0, 0.0, width as f32, height as f32));
    Ok(())
}

/// Normalized 1D Gaussian kernel, at most `max_half` taps on each side.
fn gaussian_kernel(sigma: f32, max_half: usize) -> Vec<f32> {
    let half = ((sigma * KERNEL_EXTENT).ceil() as usize).clamp(1, max_half.max(1)) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-half..=half)
        .map(|i| {
            let i = i as f32;
            (-(i * i) / denom).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

/// Separable Gaussian blur of a coverage mask. Samples outside the mask are
/// treated as empty, and the kernel never reaches past the larger side.
fn gaussian_blur(mask: &mut [f32], width: usize, height: usize, sigma: f32) {
    if sigma <= 0.0 || width == 0 || height == 0 {
        return;
    }
    let kernel = gaussian_kernel(sigma, width.max(height));
    let half = (kernel.len() / 2) as isize;
    let mut scratch = vec![0.0f32; mask.len()];

    // Horizontal pass: mask -> scratch
    for y in 0..height {
        let row = &mask[y * width..(y + 1) * width];
        for x in 0..width {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = x as isize + k as isize - half;
                if sx >= 0 && (sx as usize) < width {
                    acc += row[sx as usize] * weight;
                }
            }
            scratch[y * width + x] = acc;
        }
    }

    // Vertical pass: scratch -> mask
    for x in 0..width {
        for y in 0..height {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = y as isize + k as isize - half;
                if sy >= 0 && (sy as usize) < height {
                    acc += scratch[sy as usize * width + x] * weight;
                }
            }
            mask[y * width + x] = acc;
        }
    }
}
