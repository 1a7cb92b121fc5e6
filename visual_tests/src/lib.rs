mod compare;
mod scenes;

pub use compare::{compare_images, generate_diff_image, CompareResult};
pub use scenes::{render_scene, SCENES};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Failed to render scene: {0}")]
    Render(String),
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("Reference image not found: {0}")]
    ReferenceNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Configuration for a visual test
#[derive(Clone)]
pub struct VisualTestConfig {
    /// Name of the scene to render
    pub scene_name: String,
    /// Similarity threshold (0.0 to 1.0, default 0.99)
    pub similarity_threshold: f64,
}

impl Default for VisualTestConfig {
    fn default() -> Self {
        Self {
            scene_name: String::new(),
            similarity_threshold: 0.99,
        }
    }
}

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (similarity >= threshold)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    /// Number of pixels that differ from the reference
    pub changed_pixels: usize,
    /// Path to the rendered frame
    pub captured_path: PathBuf,
    /// Path to the reference image
    pub reference_path: PathBuf,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

/// Get the path to the references directory
pub fn references_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("references")
}

/// Get the path to a reference image for a scene
pub fn reference_path(scene_name: &str) -> PathBuf {
    references_dir().join(format!("{}.png", scene_name))
}

/// Get the path to the output directory for test artifacts
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

/// Get the path to a rendered frame
pub fn captured_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_captured.png", scene_name))
}

/// Get the path to a diff image
pub fn diff_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_diff.png", scene_name))
}

/// Run a visual regression test
///
/// A missing reference is created from the current rendering, unless
/// `REQUIRE_REFERENCES` is set, in which case it is an error.
pub fn run_visual_test(config: &VisualTestConfig) -> Result<VisualTestResult> {
    let _ = env_logger::builder().is_test(true).try_init();

    // Ensure output directory exists
    std::fs::create_dir_all(output_dir())?;

    let ref_path = reference_path(&config.scene_name);
    let cap_path = captured_path(&config.scene_name);

    if !ref_path.exists() {
        if should_require_references() {
            return Err(VisualTestError::ReferenceNotFound(ref_path));
        }
        log::warn!("No reference for {}, creating one", config.scene_name);
        update_reference(&config.scene_name)?;
    }

    render_scene(&config.scene_name, &cap_path)?;

    // Compare images
    let compare_result = compare_images(&ref_path, &cap_path)?;
    let passed = compare_result.similarity >= config.similarity_threshold;

    // Generate diff if failed
    let diff = if !passed {
        let diff_file = diff_path(&config.scene_name);
        generate_diff_image(&ref_path, &cap_path, &diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: compare_result.similarity,
        changed_pixels: compare_result.changed_pixels,
        captured_path: cap_path,
        reference_path: ref_path,
        diff_path: diff,
    })
}

/// Update the reference image for a scene
pub fn update_reference(scene_name: &str) -> Result<PathBuf> {
    // Ensure references directory exists
    std::fs::create_dir_all(references_dir())?;

    let ref_path = reference_path(scene_name);
    render_scene(scene_name, &ref_path)?;

    println!("Updated reference: {}", ref_path.display());
    Ok(ref_path)
}

/// Check if we're in update references mode
pub fn should_update_references() -> bool {
    std::env::var("UPDATE_REFERENCES").is_ok()
}

/// Check if missing references must fail the run instead of being created
pub fn should_require_references() -> bool {
    std::env::var("REQUIRE_REFERENCES").is_ok()
}
