//! Renders a white card with a blue drop shadow to `shadow_card.png`.
//!
//! Run with `RUST_LOG=debug cargo run --example shadow_card` to see when the
//! shadow gets rendered.

use shadow_layout::prelude::*;

fn main() -> Result<(), RenderError> {
    let card = shadow_layout(
        ShadowConfig::new(Color::from_argb(0xFF3355FF), 16.0, 12.0).with_offset(0.0, 6.0),
    )
    .width(at_least(160.0).at_most(360.0))
    .height(at_least(80.0))
    .child(
        sized_box(280.0, 140.0)
            .color(Color::WHITE)
            .corner_radius(12.0),
    );

    App::new()
        .width(400)
        .height(260)
        .background_color(Color::rgb(0.95, 0.95, 0.97))
        .run(card, "shadow_card.png")
}
