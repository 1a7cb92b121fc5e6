//! A toolbar-style strip whose shadow only falls below it, declared through
//! attributes the way a layout file would.

use shadow_layout::prelude::*;

const TOOLBAR: &str = "
    sl_shadowRadius = 6dp
    sl_dy = 2dp
    sl_cornerRadius = 0dp
    sl_shadowColor = #66000000
    sl_trim_left = true
    sl_trim_top = true
    sl_trim_right = true
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let attrs: AttributeSet = TOOLBAR.parse()?;
    let theme = Theme::default().with_density(2.0);

    let mut toolbar = ShadowLayout::from_attributes(Some(&attrs), &theme)?
        .child(sized_box(10_000.0, 56.0).color(Color::from_hex(0x3F51B5)));

    let mut app = App::new().width(480).height(120);
    app.render_frame(&mut toolbar)?;
    println!(
        "toolbar {}x{}, padding {:?}",
        toolbar.size().width,
        toolbar.size().height,
        toolbar.padding()
    );

    // Freeze the shadow, grow the strip, then re-render explicitly
    toolbar.set_invalidate_shadow_on_size_changed(false);
    app.resize(640, 120);
    app.render_frame(&mut toolbar)?;
    toolbar.invalidate_shadow();
    println!("shadow after invalidation: {:?}", toolbar.shadow_state());

    app.run(toolbar, "trimmed_edges.png")?;
    Ok(())
}
