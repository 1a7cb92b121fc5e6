//! Declarative attributes for [`ShadowLayout`](crate::widgets::ShadowLayout).
//!
//! Attributes are plain key/value strings, typically written as
//! `sl_shadowRadius=10dp; sl_dy=4dp; sl_shadowColor=#440000FF`. They are
//! resolved once into a [`ShadowConfig`] against a [`Theme`] of defaults.

mod theme;
mod value;

pub use theme::{Dimension, Theme, Unit};
pub use value::{parse_bool, parse_color, parse_dimension};

use std::cell::Cell;
use std::str::FromStr;

use crate::config::{Edges, ShadowConfig};
use crate::error::AttributeError;
use crate::widgets::Color;

pub const CORNER_RADIUS: &str = "sl_cornerRadius";
pub const SHADOW_RADIUS: &str = "sl_shadowRadius";
pub const DX: &str = "sl_dx";
pub const DY: &str = "sl_dy";
pub const TRIM_LEFT: &str = "sl_trim_left";
pub const TRIM_TOP: &str = "sl_trim_top";
pub const TRIM_RIGHT: &str = "sl_trim_right";
pub const TRIM_BOTTOM: &str = "sl_trim_bottom";
pub const SHADOW_COLOR: &str = "sl_shadowColor";

const KNOWN_KEYS: [&str; 9] = [
    CORNER_RADIUS,
    SHADOW_RADIUS,
    DX,
    DY,
    TRIM_LEFT,
    TRIM_TOP,
    TRIM_RIGHT,
    TRIM_BOTTOM,
    SHADOW_COLOR,
];

/// An unresolved set of declared attributes.
#[derive(Debug, Default)]
pub struct AttributeSet {
    entries: Vec<(String, String)>,
    outstanding: Cell<usize>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Begin a typed read of this set.
    ///
    /// The returned guard is released when dropped, whether or not the read
    /// succeeded.
    pub fn obtain(&self) -> StyledAttributes<'_> {
        self.outstanding.set(self.outstanding.get() + 1);
        StyledAttributes { set: self }
    }

    /// Number of [`StyledAttributes`] guards currently alive.
    pub fn outstanding_reads(&self) -> usize {
        self.outstanding.get()
    }
}

impl FromStr for AttributeSet {
    type Err = AttributeError;

    /// Parse `key=value` pairs separated by `;` or newlines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = AttributeSet::new();
        for decl in s.split([';', '\n']) {
            let decl = decl.trim();
            if decl.is_empty() {
                continue;
            }
            let (key, value) = decl
                .split_once('=')
                .ok_or_else(|| AttributeError::Malformed(decl.to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(AttributeError::Malformed(decl.to_string()));
            }
            set.set(key, value.trim());
        }
        Ok(set)
    }
}

/// Typed view over an [`AttributeSet`] that exists for the duration of a read.
pub struct StyledAttributes<'a> {
    set: &'a AttributeSet,
}

impl StyledAttributes<'_> {
    /// Read a dimension in pixels, or `default` when it is not declared.
    pub fn dimension(&self, key: &str, default: f32, density: f32) -> Result<f32, AttributeError> {
        match self.set.get(key) {
            None => Ok(default),
            Some(raw) => parse_dimension(raw)
                .map(|d| d.to_px(density))
                .ok_or_else(|| AttributeError::InvalidDimension {
                    key: key.to_string(),
                    value: raw.to_string(),
                }),
        }
    }

    pub fn boolean(&self, key: &str, default: bool) -> Result<bool, AttributeError> {
        match self.set.get(key) {
            None => Ok(default),
            Some(raw) => parse_bool(raw).ok_or_else(|| AttributeError::InvalidBoolean {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    pub fn color(&self, key: &str, default: Color) -> Result<Color, AttributeError> {
        match self.set.get(key) {
            None => Ok(default),
            Some(raw) => parse_color(raw).ok_or_else(|| AttributeError::InvalidColor {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

impl Drop for StyledAttributes<'_> {
    fn drop(&mut self) {
        let outstanding = self.set.outstanding.get();
        self.set.outstanding.set(outstanding.saturating_sub(1));
        log::trace!("released styled attributes ({} entries)", self.set.len());
    }
}

/// Resolve declared attributes into a [`ShadowConfig`].
///
/// With no attribute set the theme defaults apply: theme radii and color, no
/// offset, no trims. Fully opaque shadow colors come back with alpha 254.
pub fn resolve_shadow_config(
    attrs: Option<&AttributeSet>,
    theme: &Theme,
) -> Result<ShadowConfig, AttributeError> {
    let Some(attrs) = attrs else {
        return Ok(ShadowConfig::from_theme(theme));
    };

    for (key, _) in &attrs.entries {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            log::debug!("ignoring unknown shadow attribute `{}`", key);
        }
    }

    let density = theme.density;
    let a = attrs.obtain();
    let corner_radius = a.dimension(
        CORNER_RADIUS,
        theme.default_corner_radius.to_px(density),
        density,
    )?;
    let shadow_radius = a.dimension(
        SHADOW_RADIUS,
        theme.default_shadow_radius.to_px(density),
        density,
    )?;
    let dx = a.dimension(DX, 0.0, density)?;
    let dy = a.dimension(DY, 0.0, density)?;

    let mut trim = Edges::empty();
    trim.set(Edges::LEFT, a.boolean(TRIM_LEFT, false)?);
    trim.set(Edges::TOP, a.boolean(TRIM_TOP, false)?);
    trim.set(Edges::RIGHT, a.boolean(TRIM_RIGHT, false)?);
    trim.set(Edges::BOTTOM, a.boolean(TRIM_BOTTOM, false)?);

    let shadow_color = a.color(SHADOW_COLOR, theme.default_shadow_color)?;

    let config = ShadowConfig::new(shadow_color, shadow_radius, corner_radius)
        .with_offset(dx, dy)
        .with_trim(trim);
    log::debug!("resolved shadow config: {:?}", config);
    Ok(config)
}
