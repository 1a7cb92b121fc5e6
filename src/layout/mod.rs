mod constraints;
pub mod overlay;

pub use constraints::{Constraints, Size};
pub use overlay::Overlay;

use crate::widgets::Widget;

/// A unified sizing type that can specify exact, min, max, or range constraints.
///
/// # Examples
/// ```
/// use shadow_layout::prelude::*;
///
/// // Exact size
/// let card = ShadowLayout::new(ShadowConfig::default()).width(200.0);
///
/// // Range
/// let card = ShadowLayout::new(ShadowConfig::default()).height(at_least(50.0).at_most(400.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length {
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub exact: Option<f32>,
}

impl Length {
    /// Add a minimum constraint to this length.
    pub fn at_least(mut self, min: f32) -> Self {
        self.min = Some(min);
        self
    }

    /// Add a maximum constraint to this length.
    pub fn at_most(mut self, max: f32) -> Self {
        self.max = Some(max);
        self
    }

    /// Resolve a measured content extent against this length and the
    /// parent's bounds on the same axis.
    pub fn resolve(&self, content: f32, parent_min: f32, parent_max: f32) -> f32 {
        let mut value = self.exact.unwrap_or(content);
        if let Some(min) = self.min {
            value = value.max(min);
        }
        if let Some(max) = self.max {
            value = value.min(max);
        }
        value.max(parent_min).min(parent_max)
    }
}

/// Create a length with a minimum constraint.
pub fn at_least(min: f32) -> Length {
    Length {
        min: Some(min),
        max: None,
        exact: None,
    }
}

/// Create a length with a maximum constraint.
pub fn at_most(max: f32) -> Length {
    Length {
        min: None,
        max: Some(max),
        exact: None,
    }
}

/// f32 converts to exact sizing
impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Length {
            min: None,
            max: None,
            exact: Some(value),
        }
    }
}

/// Trait for layout strategies that position multiple children
pub trait Layout {
    /// Perform layout on children and return the total size
    fn layout(
        &mut self,
        children: &mut [Box<dyn Widget>],
        constraints: Constraints,
        origin: (f32, f32),
    ) -> Size;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_exact() {
        let len = Length::from(120.0);
        assert_eq!(len.resolve(40.0, 0.0, 500.0), 120.0);
        // Parent bounds still win
        assert_eq!(len.resolve(40.0, 0.0, 100.0), 100.0);
    }

    #[test]
    fn test_length_range() {
        let len = at_least(50.0).at_most(80.0);
        assert_eq!(len.resolve(10.0, 0.0, 500.0), 50.0);
        assert_eq!(len.resolve(65.0, 0.0, 500.0), 65.0);
        assert_eq!(len.resolve(200.0, 0.0, 500.0), 80.0);
    }

    #[test]
    fn test_length_default_is_content() {
        assert_eq!(Length::default().resolve(33.0, 0.0, f32::INFINITY), 33.0);
    }
}
