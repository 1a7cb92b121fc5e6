//! Container that paints a soft drop shadow behind its children.

use crate::attributes::{resolve_shadow_config, AttributeSet, Theme};
use crate::config::ShadowConfig;
use crate::error::{AttributeError, RenderError};
use crate::invalidation::{ShadowInvalidation, ShadowState};
use crate::layout::{Constraints, Layout, Length, Overlay, Size};
use crate::renderer::{Background, LayerType, PaintContext, RenderMode, ShadowRenderer};

use super::widget::{Padding, Rect, Widget};

/// A stacking container whose background is a rendered drop shadow.
///
/// Padding equal to the shadow's extent is reserved on every non-trimmed edge,
/// so children never sit on top of the shadow. The background is re-rendered
/// on the first layout, on size changes (unless disabled with
/// [`set_invalidate_shadow_on_size_changed`](Self::set_invalidate_shadow_on_size_changed)),
/// and after [`invalidate_shadow`](Self::invalidate_shadow).
pub struct ShadowLayout {
    renderer: ShadowRenderer,
    padding: Padding,
    layout: Overlay,
    children: Vec<Box<dyn Widget>>,
    width: Option<Length>,
    height: Option<Length>,
    bounds: Rect,

    mode: RenderMode,
    layer_type: LayerType,
    background: Option<Background>,
    invalidation: ShadowInvalidation,
    shadow_generation: u64,
    render_error: Option<RenderError>,
}

impl ShadowLayout {
    pub fn new(config: ShadowConfig) -> Self {
        Self {
            renderer: ShadowRenderer::new(config),
            padding: config.padding(),
            layout: Overlay::new(),
            children: Vec::new(),
            width: None,
            height: None,
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
            mode: RenderMode::Interactive,
            layer_type: LayerType::Hardware,
            background: None,
            invalidation: ShadowInvalidation::new(),
            shadow_generation: 0,
            render_error: None,
        }
    }

    /// Build from declared attributes, falling back to the theme defaults.
    pub fn from_attributes(
        attrs: Option<&AttributeSet>,
        theme: &Theme,
    ) -> Result<Self, AttributeError> {
        Ok(Self::new(resolve_shadow_config(attrs, theme)?))
    }

    /// Add a child. Children are stacked inside the padded area.
    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Render as a design-time preview: a flat fill instead of a shadow.
    pub fn preview(mut self, preview: bool) -> Self {
        self.mode = if preview {
            RenderMode::Preview
        } else {
            RenderMode::Interactive
        };
        self
    }

    /// Whether a size change re-renders the shadow. Enabled by default.
    pub fn set_invalidate_shadow_on_size_changed(&mut self, enabled: bool) {
        self.invalidation.set_on_size_changed(enabled);
    }

    /// Re-render the shadow on the next layout pass, even if the size is
    /// unchanged.
    pub fn invalidate_shadow(&mut self) {
        self.invalidation.request();
    }

    pub fn config(&self) -> &ShadowConfig {
        self.renderer.config()
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn layer_type(&self) -> LayerType {
        self.layer_type
    }

    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    pub fn shadow_state(&self) -> ShadowState {
        self.invalidation.state()
    }

    /// Number of times the background has been replaced.
    pub fn shadow_generation(&self) -> u64 {
        self.shadow_generation
    }

    pub fn needs_layout(&self) -> bool {
        self.invalidation.needs_layout()
    }

    /// Returns whether a render was attempted.
    fn on_size_changed(&mut self, size: Size, old: Size) -> bool {
        log::debug!(
            "ShadowLayout size {}x{} -> {}x{}",
            old.width,
            old.height,
            size.width,
            size.height
        );
        if self
            .invalidation
            .should_render_on_size_changed(size, self.background.is_some())
        {
            self.update_background(size);
            return true;
        }
        false
    }

    fn on_layout(&mut self) {
        if self.invalidation.should_render_on_layout() {
            self.update_background(self.bounds.size());
        }
    }

    fn update_background(&mut self, size: Size) {
        let (width, height) = size.to_pixels();
        match self.renderer.render_background(width, height, self.mode) {
            Ok(Some(background)) => {
                if matches!(background, Background::Bitmap(_)) {
                    self.layer_type = LayerType::Software;
                }
                self.background = Some(background);
                self.invalidation.mark_rendered();
                self.shadow_generation += 1;
                self.render_error = None;
            }
            // Non-positive size: keep any pending invalidation for later
            Ok(None) => {}
            Err(e) => {
                log::error!("Shadow render failed at {}x{}: {}", width, height, e);
                self.invalidation.mark_failed();
                self.render_error = Some(e);
            }
        }
    }

    fn place_children(&mut self) {
        let x = self.bounds.x + self.padding.left;
        let y = self.bounds.y + self.padding.top;
        for child in &mut self.children {
            child.set_origin(x, y);
        }
    }
}

impl Widget for ShadowLayout {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let padding = self.padding;
        let inner = constraints.shrink(padding.horizontal(), padding.vertical());
        let origin = (self.bounds.x + padding.left, self.bounds.y + padding.top);
        let content = self.layout.layout(&mut self.children, inner, origin);

        let natural = Size::new(
            content.width + padding.horizontal(),
            content.height + padding.vertical(),
        );
        let width = match &self.width {
            Some(len) => len.resolve(natural.width, constraints.min_width, constraints.max_width),
            None => constraints.constrain(natural).width,
        };
        let height = match &self.height {
            Some(len) => len.resolve(natural.height, constraints.min_height, constraints.max_height),
            None => constraints.constrain(natural).height,
        };
        let size = Size::new(width, height);

        let old = self.bounds.size();
        self.bounds.width = size.width;
        self.bounds.height = size.height;
        // A failed size-change render is retried on the next pass, not this one
        let attempted = size != old && self.on_size_changed(size, old);
        if !attempted {
            self.on_layout();
        }
        self.invalidation.clear_layout_flag();
        size
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        self.place_children();
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if let Some(background) = &self.background {
            background.paint(ctx, self.bounds);
        }
        for child in &self.children {
            child.paint(ctx);
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn needs_paint(&self) -> bool {
        self.invalidation.needs_paint() || self.children.iter().any(|c| c.needs_paint())
    }

    fn clear_paint_flag(&mut self) {
        self.invalidation.clear_paint_flag();
        for child in &mut self.children {
            child.clear_paint_flag();
        }
    }

    fn take_render_error(&mut self) -> Option<RenderError> {
        self.render_error
            .take()
            .or_else(|| self.children.iter_mut().find_map(|c| c.take_render_error()))
    }
}

/// Create a shadow layout
pub fn shadow_layout(config: ShadowConfig) -> ShadowLayout {
    ShadowLayout::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Edges;
    use crate::renderer::commands::DrawCommand;
    use crate::widgets::{sized_box, Color};

    fn blue_card() -> ShadowConfig {
        ShadowConfig::new(Color::from_argb(0xFF0000FF), 10.0, 8.0).with_offset(0.0, 4.0)
    }

    fn tight(w: f32, h: f32) -> Constraints {
        Constraints::tight(Size::new(w, h))
    }

    fn bitmap_dims(layout: &ShadowLayout) -> Option<(u32, u32)> {
        layout.background().and_then(|b| b.bitmap_dimensions())
    }

    #[test]
    fn test_padding_reserved_at_construction() {
        let layout = shadow_layout(blue_card());
        assert_eq!(layout.padding(), Padding::symmetric(10.0, 14.0));

        let trimmed = shadow_layout(blue_card().with_trim(Edges::TOP | Edges::RIGHT));
        assert_eq!(trimmed.padding(), Padding::symmetric(10.0, 14.0).top(0.0).right(0.0));
    }

    #[test]
    fn test_content_size_includes_padding() {
        let mut layout = shadow_layout(blue_card()).child(sized_box(100.0, 40.0));
        let size = layout.layout(Constraints::unbounded());
        assert_eq!(size, Size::new(120.0, 68.0));
    }

    #[test]
    fn test_children_placed_inside_padding() {
        let mut layout = shadow_layout(blue_card()).child(sized_box(100.0, 40.0));
        layout.layout(Constraints::unbounded());
        layout.set_origin(30.0, 50.0);
        assert_eq!(layout.children[0].bounds(), Rect::new(40.0, 64.0, 100.0, 40.0));
    }

    #[test]
    fn test_children_get_constraints_minus_padding() {
        let mut layout = shadow_layout(blue_card()).child(sized_box(500.0, 500.0));
        let size = layout.layout(Constraints::loose(Size::new(200.0, 100.0)));
        assert_eq!(size, Size::new(200.0, 100.0));
        assert_eq!(layout.children[0].bounds().size(), Size::new(180.0, 72.0));
    }

    #[test]
    fn test_explicit_size_overrides_content() {
        let mut layout = shadow_layout(blue_card()).width(200.0).height(100.0);
        assert_eq!(layout.layout(Constraints::unbounded()), Size::new(200.0, 100.0));
    }

    #[test]
    fn test_first_layout_renders_background() {
        let mut layout = shadow_layout(blue_card());
        assert!(layout.background().is_none());
        assert_eq!(layout.layer_type(), LayerType::Hardware);

        layout.layout(tight(200.0, 100.0));
        assert_eq!(bitmap_dims(&layout), Some((200, 100)));
        assert_eq!(layout.shadow_generation(), 1);
        assert_eq!(layout.layer_type(), LayerType::Software);
        assert_eq!(layout.shadow_state(), ShadowState::Clean);
    }

    #[test]
    fn test_zero_size_does_not_render() {
        let mut layout = shadow_layout(blue_card()).width(0.0).height(0.0);
        layout.layout(Constraints::unbounded());
        assert!(layout.background().is_none());
        assert_eq!(layout.shadow_generation(), 0);
    }

    #[test]
    fn test_same_size_does_not_rerender() {
        let mut layout = shadow_layout(blue_card());
        layout.layout(tight(200.0, 100.0));
        layout.layout(tight(200.0, 100.0));
        assert_eq!(layout.shadow_generation(), 1);
    }

    #[test]
    fn test_resize_rerenders_by_default() {
        let mut layout = shadow_layout(blue_card());
        layout.layout(tight(200.0, 100.0));
        layout.layout(tight(300.0, 120.0));
        assert_eq!(bitmap_dims(&layout), Some((300, 120)));
        assert_eq!(layout.shadow_generation(), 2);
    }

    #[test]
    fn test_disabled_resize_freezes_background() {
        let mut layout = shadow_layout(blue_card());
        layout.layout(tight(200.0, 100.0));
        layout.set_invalidate_shadow_on_size_changed(false);

        layout.layout(tight(300.0, 150.0));
        layout.layout(tight(400.0, 200.0));
        assert_eq!(layout.size(), Size::new(400.0, 200.0));
        assert_eq!(bitmap_dims(&layout), Some((200, 100)));
        assert_eq!(layout.shadow_generation(), 1);

        layout.invalidate_shadow();
        assert_eq!(layout.shadow_state(), ShadowState::Dirty);
        assert!(layout.needs_layout());
        layout.layout(tight(400.0, 200.0));
        assert_eq!(bitmap_dims(&layout), Some((400, 200)));
        assert_eq!(layout.shadow_generation(), 2);
        assert_eq!(layout.shadow_state(), ShadowState::Clean);
    }

    #[test]
    fn test_disabled_before_first_layout_still_renders_once() {
        let mut layout = shadow_layout(blue_card());
        layout.set_invalidate_shadow_on_size_changed(false);
        layout.layout(tight(120.0, 60.0));
        assert_eq!(bitmap_dims(&layout), Some((120, 60)));
    }

    #[test]
    fn test_invalidate_renders_exactly_once() {
        let mut layout = shadow_layout(blue_card());
        layout.layout(tight(200.0, 100.0));

        // Same size
        layout.invalidate_shadow();
        layout.layout(tight(200.0, 100.0));
        assert_eq!(layout.shadow_generation(), 2);

        // Size change and invalidation together still render once
        layout.invalidate_shadow();
        layout.layout(tight(250.0, 100.0));
        assert_eq!(layout.shadow_generation(), 3);

        layout.layout(tight(250.0, 100.0));
        assert_eq!(layout.shadow_generation(), 3);
    }

    #[test]
    fn test_invalidate_at_zero_size_waits() {
        let mut layout = shadow_layout(blue_card());
        layout.invalidate_shadow();
        layout.layout(tight(0.0, 0.0));
        assert_eq!(layout.shadow_state(), ShadowState::Dirty);
        assert_eq!(layout.shadow_generation(), 0);

        layout.layout(tight(50.0, 50.0));
        assert_eq!(layout.shadow_state(), ShadowState::Clean);
        assert_eq!(layout.shadow_generation(), 1);
    }

    #[test]
    fn test_rerender_is_identical() {
        let mut layout = shadow_layout(blue_card());
        layout.layout(tight(200.0, 100.0));
        let first = layout.background().cloned();
        layout.invalidate_shadow();
        layout.layout(tight(200.0, 100.0));
        assert_eq!(layout.background().cloned(), first);
    }

    #[test]
    fn test_preview_uses_flat_fill() {
        let mut layout = shadow_layout(blue_card()).preview(true);
        layout.layout(tight(200.0, 100.0));
        assert_eq!(
            layout.background(),
            Some(&Background::Solid(blue_card().shadow_color()))
        );
        assert_eq!(layout.layer_type(), LayerType::Hardware);
    }

    #[test]
    fn test_paint_draws_background_then_children() {
        let mut layout = shadow_layout(blue_card()).child(sized_box(100.0, 40.0).color(Color::WHITE));
        layout.layout(Constraints::unbounded());
        layout.set_origin(0.0, 0.0);

        let mut ctx = PaintContext::new();
        layout.paint(&mut ctx);
        assert_eq!(ctx.len(), 2);
        match &ctx.commands()[0] {
            DrawCommand::Bitmap { rect, bitmap } => {
                assert_eq!(*rect, Rect::new(0.0, 0.0, 120.0, 68.0));
                assert_eq!(bitmap.dimensions(), (120, 68));
            }
            other => panic!("expected the shadow bitmap first, got {:?}", other),
        }
        assert_eq!(ctx.commands()[1].bounds(), Rect::new(10.0, 14.0, 100.0, 40.0));
    }

    #[test]
    fn test_from_attributes() {
        let attrs: AttributeSet = "sl_shadowRadius=10px; sl_dy=4px; sl_cornerRadius=8px; \
                                   sl_shadowColor=#0000FF"
            .parse()
            .unwrap();
        let layout = ShadowLayout::from_attributes(Some(&attrs), &Theme::default()).unwrap();
        assert_eq!(*layout.config(), blue_card());
        assert_eq!(attrs.outstanding_reads(), 0);

        let bad = AttributeSet::new().with("sl_dx", "left");
        assert!(ShadowLayout::from_attributes(Some(&bad), &Theme::default()).is_err());
        assert_eq!(bad.outstanding_reads(), 0);
    }

    #[test]
    fn test_nested_layouts_move_with_parent() {
        let inner = shadow_layout(ShadowConfig::new(Color::BLACK, 4.0, 2.0)).child(sized_box(20.0, 20.0));
        let mut outer = shadow_layout(blue_card()).child(inner);
        let size = outer.layout(Constraints::unbounded());
        assert_eq!(size, Size::new(48.0, 56.0));
        outer.set_origin(100.0, 100.0);
        assert_eq!(outer.children[0].bounds(), Rect::new(110.0, 114.0, 28.0, 28.0));
    }

    #[test]
    fn test_huge_radius_with_all_edges_trimmed() {
        let config = ShadowConfig::new(Color::BLACK, 30_000.0, 0.0).with_trim(Edges::all());
        let mut layout = shadow_layout(config);
        layout.layout(tight(10.0, 10.0));
        assert_eq!(layout.padding(), Padding::all(0.0));
        assert_eq!(bitmap_dims(&layout), Some((10, 10)));
        assert!(layout.take_render_error().is_none());
    }

    #[test]
    fn test_failed_render_is_reported_and_retried() {
        let mut layout = shadow_layout(blue_card());
        layout.layout(tight(20_000.0, 20_000.0));
        assert!(layout.background().is_none());
        assert_eq!(layout.shadow_generation(), 0);
        assert_eq!(layout.shadow_state(), ShadowState::Dirty);
        assert!(matches!(
            layout.take_render_error(),
            Some(RenderError::BitmapTooLarge { width: 20_000, height: 20_000, .. })
        ));
        assert!(layout.take_render_error().is_none());

        // Same size again: the pending render is retried and fails again
        layout.layout(tight(20_000.0, 20_000.0));
        assert!(layout.take_render_error().is_some());

        layout.layout(tight(200.0, 100.0));
        assert_eq!(layout.shadow_state(), ShadowState::Clean);
        assert_eq!(bitmap_dims(&layout), Some((200, 100)));
        assert!(layout.take_render_error().is_none());
    }

    #[test]
    fn test_failed_render_keeps_previous_background() {
        let mut layout = shadow_layout(blue_card());
        layout.layout(tight(200.0, 100.0));
        layout.layout(tight(20_000.0, 20_000.0));
        assert_eq!(bitmap_dims(&layout), Some((200, 100)));
        assert!(layout.take_render_error().is_some());
    }

    #[test]
    fn test_nested_render_error_reaches_parent() {
        let inner = shadow_layout(ShadowConfig::new(Color::BLACK, 4.0, 2.0))
            .width(20_000.0)
            .height(20_000.0);
        let mut outer = shadow_layout(blue_card()).child(inner);
        outer.layout(Constraints::unbounded());
        assert!(matches!(
            outer.take_render_error(),
            Some(RenderError::BitmapTooLarge { .. })
        ));
    }

    #[test]
    fn test_paint_flag_cleared_after_paint() {
        let mut layout = shadow_layout(blue_card()).child(sized_box(10.0, 10.0));
        assert!(layout.needs_paint());

        layout.layout(tight(200.0, 100.0));
        layout.paint(&mut PaintContext::new());
        layout.clear_paint_flag();
        assert!(!layout.needs_paint());

        // Nothing changed: layout alone does not request a repaint
        layout.layout(tight(200.0, 100.0));
        assert!(!layout.needs_paint());

        layout.layout(tight(220.0, 100.0));
        assert!(layout.needs_paint());
        layout.clear_paint_flag();

        layout.invalidate_shadow();
        assert!(layout.needs_paint());
    }
}
