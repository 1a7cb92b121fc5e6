use crate::{Result, VisualTestError};
use image::{Rgba, RgbaImage};
use image_compare::Algorithm;
use std::path::Path;

/// Channel difference above which a pixel counts as changed.
///
/// Shadow gradients are shallow, so this is much lower than what a UI
/// screenshot would tolerate.
const CHANGED_THRESHOLD: u8 = 2;

/// Result of comparing a rendered frame with its reference
pub struct CompareResult {
    /// SSIM score from 0.0 to 1.0
    pub similarity: f64,
    /// Pixels whose largest channel difference exceeds the threshold
    pub changed_pixels: usize,
}

fn load_pair(reference: &Path, captured: &Path) -> Result<(RgbaImage, RgbaImage)> {
    let reference = image::open(reference)?.to_rgba8();
    let captured = image::open(captured)?.to_rgba8();
    if reference.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "frame size changed: reference {:?} vs rendered {:?}",
            reference.dimensions(),
            captured.dimensions()
        )));
    }
    Ok((reference, captured))
}

/// Compare a rendered frame against its reference using SSIM
pub fn compare_images(reference: &Path, captured: &Path) -> Result<CompareResult> {
    let (reference, captured) = load_pair(reference, captured)?;

    let changed_pixels = reference
        .pixels()
        .zip(captured.pixels())
        .filter(|(a, b)| pixel_difference(a, b) > CHANGED_THRESHOLD)
        .count();

    // Frames are composited over an opaque clear color, so RGB carries everything
    let score = image_compare::rgb_similarity_structure(
        &Algorithm::MSSIMSimple,
        &image::DynamicImage::ImageRgba8(reference).to_rgb8(),
        &image::DynamicImage::ImageRgba8(captured).to_rgb8(),
    )
    .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?
    .score;

    Ok(CompareResult {
        similarity: score,
        changed_pixels,
    })
}

/// Write an image that marks changed pixels in red over a dimmed copy of the
/// rendered frame
pub fn generate_diff_image(reference: &Path, captured: &Path, output: &Path) -> Result<()> {
    let (reference, captured) = load_pair(reference, captured)?;

    let diff = RgbaImage::from_fn(reference.width(), reference.height(), |x, y| {
        let expected = reference.get_pixel(x, y);
        let actual = captured.get_pixel(x, y);
        match pixel_difference(expected, actual) {
            d if d > CHANGED_THRESHOLD => {
                // Scale small differences up so they stay visible
                let intensity = (u16::from(d) * 4).min(200) as u8 + 55;
                Rgba([intensity, 0, 0, 255])
            }
            _ => {
                let [r, g, b, _] = actual.0;
                Rgba([r / 3, g / 3, b / 3, 255])
            }
        }
    });

    diff.save(output)?;
    Ok(())
}

/// Largest per-channel difference between two pixels, alpha included
fn pixel_difference(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}
