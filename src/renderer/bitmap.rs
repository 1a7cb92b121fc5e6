//! Owned RGBA pixel buffers.

use std::fmt;
use std::path::Path;

use image::RgbaImage;
use tiny_skia::{FillRule, FilterQuality, Paint, Pixmap, PixmapPaint, Transform};

use super::primitives::RoundedRect;
use crate::error::RenderError;
use crate::widgets::{Color, Rect};

/// Largest pixel buffer a bitmap may allocate, in bytes.
pub const MAX_BITMAP_BYTES: u64 = 256 * 1024 * 1024;

/// An RGBA8 bitmap. Pixels are stored premultiplied and read back straight.
#[derive(Clone)]
pub struct Bitmap {
    pixmap: Pixmap,
}

impl Bitmap {
    /// Allocate a fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let bytes = u64::from(width) * u64::from(height) * 4;
        if bytes > MAX_BITMAP_BYTES {
            return Err(RenderError::BitmapTooLarge {
                width,
                height,
                max_bytes: MAX_BITMAP_BYTES,
            });
        }
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::EmptyBitmap { width, height })?;
        Ok(Self { pixmap })
    }

    /// Allocate a bitmap filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, RenderError> {
        let mut bitmap = Self::new(width, height)?;
        let [r, g, b, a] = color.to_rgba8();
        bitmap.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        Ok(bitmap)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    /// Straight `[r, g, b, a]` at a pixel; transparent outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixmap
            .pixel(x, y)
            .map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .unwrap_or([0, 0, 0, 0])
    }

    /// True when every pixel equals `color` after quantization.
    pub fn is_uniform(&self, color: Color) -> bool {
        let expected = color.to_rgba8();
        self.pixmap.pixels().iter().all(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()] == expected
        })
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Composite an anti-aliased rounded rect filled with `color`.
    pub fn fill_rounded_rect(&mut self, shape: &RoundedRect, color: Color) {
        if color.a <= 0.0 {
            return;
        }
        let Some(path) = shape.to_path() else {
            return;
        };
        let [r, g, b, a] = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    /// Composite another bitmap stretched to `rect`.
    pub fn draw_bitmap(&mut self, src: &Bitmap, rect: Rect) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let (sw, sh) = src.dimensions();
        let sx = rect.width / sw as f32;
        let sy = rect.height / sh as f32;

        let aligned = sx == 1.0 && sy == 1.0 && rect.x.fract() == 0.0 && rect.y.fract() == 0.0;
        let (x, y, transform, quality) = if aligned {
            (rect.x as i32, rect.y as i32, Transform::identity(), FilterQuality::Nearest)
        } else {
            (
                0,
                0,
                Transform::from_row(sx, 0.0, 0.0, sy, rect.x, rect.y),
                FilterQuality::Bilinear,
            )
        };
        let paint = PixmapPaint {
            quality,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(x, y, src.pixmap.as_ref(), &paint, transform, None);
    }

    /// Straight-alpha copy for encoding.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            image::Rgba(self.pixel(x, y))
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.to_image().save(path)?;
        Ok(())
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.pixmap.data() == other.pixmap.data()
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let bitmap = Bitmap::new(4, 3).unwrap();
        assert_eq!(bitmap.dimensions(), (4, 3));
        assert!(bitmap.is_uniform(Color::TRANSPARENT));
    }

    #[test]
    fn test_too_large_is_rejected() {
        let err = Bitmap::new(100_000, 100_000).unwrap_err();
        assert!(matches!(err, RenderError::BitmapTooLarge { width: 100_000, .. }));
    }

    #[test]
    fn test_zero_sized_is_rejected() {
        let err = Bitmap::new(0, 10).unwrap_err();
        assert!(matches!(err, RenderError::EmptyBitmap { width: 0, height: 10 }));
    }

    #[test]
    fn test_pixel_reads_straight_alpha() {
        let bitmap = Bitmap::filled(2, 2, Color::from_rgba8(0, 0, 255, 128)).unwrap();
        assert_eq!(bitmap.pixel(1, 1), [0, 0, 255, 128]);
        assert_eq!(bitmap.pixel(5, 5), [0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_opaque_replaces() {
        let mut bitmap = Bitmap::filled(4, 4, Color::WHITE).unwrap();
        bitmap.fill_rounded_rect(&RoundedRect::new(0.0, 0.0, 4.0, 4.0, 0.0), Color::BLACK);
        assert!(bitmap.is_uniform(Color::BLACK));
    }

    #[test]
    fn test_fill_half_over_white() {
        let mut bitmap = Bitmap::filled(1, 1, Color::WHITE).unwrap();
        bitmap.fill_rounded_rect(
            &RoundedRect::new(0.0, 0.0, 1.0, 1.0, 0.0),
            Color::rgba(0.0, 0.0, 0.0, 0.5),
        );
        let [r, g, b, a] = bitmap.pixel(0, 0);
        assert!(r.abs_diff(128) <= 1, "r = {}", r);
        assert_eq!((r, r), (g, b));
        assert_eq!(a, 255);
    }

    #[test]
    fn test_fill_rounded_corner_stays_clear() {
        let mut bitmap = Bitmap::filled(20, 20, Color::WHITE).unwrap();
        bitmap.fill_rounded_rect(&RoundedRect::new(0.0, 0.0, 20.0, 20.0, 8.0), Color::BLACK);
        assert_eq!(bitmap.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(bitmap.pixel(10, 10), [0, 0, 0, 255]);
        assert_eq!(bitmap.pixel(10, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn test_fill_transparent_or_empty_is_noop() {
        let mut bitmap = Bitmap::filled(4, 4, Color::WHITE).unwrap();
        bitmap.fill_rounded_rect(&RoundedRect::new(0.0, 0.0, 4.0, 4.0, 0.0), Color::TRANSPARENT);
        bitmap.fill_rounded_rect(&RoundedRect::new(4.0, 4.0, 0.0, 0.0, 0.0), Color::BLACK);
        assert!(bitmap.is_uniform(Color::WHITE));
    }

    #[test]
    fn test_draw_bitmap_at_offset() {
        let src = Bitmap::filled(2, 2, Color::BLACK).unwrap();
        let mut dst = Bitmap::filled(4, 4, Color::WHITE).unwrap();
        dst.draw_bitmap(&src, Rect::new(1.0, 1.0, 2.0, 2.0));
        assert_eq!(dst.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(dst.pixel(1, 1), [0, 0, 0, 255]);
        assert_eq!(dst.pixel(2, 2), [0, 0, 0, 255]);
        assert_eq!(dst.pixel(3, 3), [255, 255, 255, 255]);
    }

    #[test]
    fn test_draw_bitmap_stretches() {
        let src = Bitmap::filled(2, 2, Color::BLACK).unwrap();
        let mut dst = Bitmap::filled(8, 8, Color::WHITE).unwrap();
        dst.draw_bitmap(&src, Rect::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(dst.pixel(3, 3), [0, 0, 0, 255]);
        assert_eq!(dst.pixel(4, 4), [255, 255, 255, 255]);
    }

    #[test]
    fn test_to_image_matches_pixels() {
        let bitmap = Bitmap::filled(3, 2, Color::from_rgba8(255, 0, 0, 255)).unwrap();
        let image = bitmap.to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }
}
