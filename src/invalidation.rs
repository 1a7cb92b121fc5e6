//! When a shadow background has to be re-rendered.

use bitflags::bitflags;

use crate::layout::Size;

bitflags! {
    /// Flags indicating what aspects of a widget need to be updated
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Widget needs layout recalculation (size/position may change)
        const NEEDS_LAYOUT = 0b001;
        /// Widget needs repainting (visual appearance changed)
        const NEEDS_PAINT  = 0b010;
        /// Shadow background must be rendered on the next layout
        const NEEDS_SHADOW = 0b100;
    }
}

/// Whether the background matches the current size and config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowState {
    Clean,
    Dirty,
}

/// Tracks shadow invalidation for one widget.
///
/// A widget reports each size change and each completed layout; this type
/// answers whether the shadow background must be rendered at that point.
#[derive(Debug, Clone)]
pub struct ShadowInvalidation {
    flags: ChangeFlags,
    on_size_changed: bool,
}

impl ShadowInvalidation {
    pub fn new() -> Self {
        Self {
            flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            on_size_changed: true,
        }
    }

    /// Enable or disable re-rendering when the size changes.
    pub fn set_on_size_changed(&mut self, enabled: bool) {
        self.on_size_changed = enabled;
    }

    pub fn on_size_changed(&self) -> bool {
        self.on_size_changed
    }

    /// Force a render on the next layout, whether or not the size changes.
    pub fn request(&mut self) {
        self.flags |= ChangeFlags::NEEDS_SHADOW | ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        log::debug!("shadow invalidated");
    }

    pub fn flags(&self) -> ChangeFlags {
        self.flags
    }

    pub fn is_forced(&self) -> bool {
        self.flags.contains(ChangeFlags::NEEDS_SHADOW)
    }

    pub fn needs_layout(&self) -> bool {
        self.flags.contains(ChangeFlags::NEEDS_LAYOUT)
    }

    pub fn needs_paint(&self) -> bool {
        self.flags.contains(ChangeFlags::NEEDS_PAINT)
    }

    pub fn state(&self) -> ShadowState {
        if self.is_forced() {
            ShadowState::Dirty
        } else {
            ShadowState::Clean
        }
    }

    /// Decide whether a size change renders.
    ///
    /// Requires a positive size, and then any of: no background yet, resize
    /// invalidation enabled, or a pending forced invalidation.
    pub fn should_render_on_size_changed(&self, size: Size, has_background: bool) -> bool {
        let (w, h) = size.to_pixels();
        w > 0 && h > 0 && (!has_background || self.on_size_changed || self.is_forced())
    }

    /// Decide whether a completed layout renders.
    pub fn should_render_on_layout(&self) -> bool {
        self.is_forced()
    }

    /// A render replaced the background.
    pub fn mark_rendered(&mut self) {
        self.flags.remove(ChangeFlags::NEEDS_SHADOW);
        self.flags |= ChangeFlags::NEEDS_PAINT;
    }

    /// A render was attempted and failed; keep the shadow dirty so the next
    /// layout retries.
    pub fn mark_failed(&mut self) {
        self.flags |= ChangeFlags::NEEDS_SHADOW;
    }

    pub fn clear_layout_flag(&mut self) {
        self.flags.remove(ChangeFlags::NEEDS_LAYOUT);
    }

    pub fn clear_paint_flag(&mut self) {
        self.flags.remove(ChangeFlags::NEEDS_PAINT);
    }
}

impl Default for ShadowInvalidation {
    fn default() -> Self {
        Self::new()
    }
}
