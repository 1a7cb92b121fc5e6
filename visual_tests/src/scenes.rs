use crate::{Result, VisualTestError};
use shadow_layout::prelude::*;
use std::path::Path;

/// Scenes that can be rendered by name
pub const SCENES: &[&str] = &[
    "shadow_card",
    "trimmed_edges",
    "translucent_stack",
    "preview_fill",
];

/// Render a named scene and save it as a PNG
pub fn render_scene(name: &str, output_path: &Path) -> Result<()> {
    let (mut app, mut root) = build_scene(name)?;
    let frame = app
        .render_frame(&mut root)
        .map_err(|e| VisualTestError::Render(e.to_string()))?;
    frame
        .save(output_path)
        .map_err(|e| VisualTestError::Render(e.to_string()))?;
    Ok(())
}

fn build_scene(name: &str) -> Result<(App, ShadowLayout)> {
    let scene = match name {
        "shadow_card" => (
            App::new().width(240).height(140),
            shadow_layout(
                ShadowConfig::new(Color::from_argb(0xFF0000FF), 10.0, 8.0).with_offset(0.0, 4.0),
            )
            .child(sized_box(220.0, 112.0).color(Color::WHITE).corner_radius(8.0)),
        ),
        "trimmed_edges" => (
            App::new().width(240).height(100),
            shadow_layout(
                ShadowConfig::new(Color::from_argb(0x88000000), 12.0, 0.0)
                    .with_trim(Edges::LEFT | Edges::TOP | Edges::RIGHT),
            )
            .child(sized_box(240.0, 88.0).color(Color::from_hex(0xF5F5F5))),
        ),
        "translucent_stack" => {
            let attrs: AttributeSet = "sl_shadowRadius=6dp; sl_cornerRadius=6dp; sl_dx=3dp; sl_dy=3dp"
                .parse()
                .map_err(|e: AttributeError| VisualTestError::Render(e.to_string()))?;
            let inner = ShadowLayout::from_attributes(Some(&attrs), &Theme::default().with_density(2.0))
                .map_err(|e| VisualTestError::Render(e.to_string()))?
                .child(sized_box(80.0, 40.0).color(Color::from_hex(0xFFCC00)).corner_radius(12.0));
            (
                App::new().width(200).height(160),
                shadow_layout(ShadowConfig::default()).child(inner),
            )
        }
        "preview_fill" => (
            App::new().width(120).height(80),
            shadow_layout(ShadowConfig::default())
                .preview(true)
                .child(sized_box(200.0, 200.0).color(Color::WHITE)),
        ),
        other => {
            return Err(VisualTestError::Render(format!("Unknown scene '{}'", other)));
        }
    };
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_scenes_build() {
        for name in SCENES {
            assert!(build_scene(name).is_ok(), "scene '{}' failed to build", name);
        }
    }

    #[test]
    fn test_unknown_scene() {
        assert!(build_scene("nope").is_err());
    }
}
