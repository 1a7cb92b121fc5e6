//! Parsers for declared attribute values.

use super::theme::{Dimension, Unit};
use crate::widgets::Color;

/// Parse `12`, `12px`, `4dp`, `4dip` or `14sp`.
pub fn parse_dimension(raw: &str) -> Option<Dimension> {
    let raw = raw.trim();
    let (number, unit) = if let Some(n) = raw.strip_suffix("dip") {
        (n, Unit::Dp)
    } else if let Some(n) = raw.strip_suffix("dp") {
        (n, Unit::Dp)
    } else if let Some(n) = raw.strip_suffix("sp") {
        (n, Unit::Sp)
    } else if let Some(n) = raw.strip_suffix("px") {
        (n, Unit::Px)
    } else {
        (raw, Unit::Px)
    };
    let value: f32 = number.trim().parse().ok()?;
    value.is_finite().then_some(Dimension { value, unit })
}

/// Parse `#RGB`, `#ARGB`, `#RRGGBB` or `#AARRGGBB`. Alpha comes first.
pub fn parse_color(raw: &str) -> Option<Color> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    let argb = match hex.len() {
        3 => 0xFF00_0000 | expand_nibbles(value, 3),
        4 => expand_nibbles(value, 4),
        6 => 0xFF00_0000 | value,
        8 => value,
        _ => return None,
    };
    Some(Color::from_argb(argb))
}

/// `#F0A` style shorthand: every nibble is doubled.
fn expand_nibbles(value: u32, digits: u32) -> u32 {
    (0..digits).fold(0, |acc, i| {
        let nibble = (value >> (4 * i)) & 0xF;
        acc | ((nibble * 0x11) << (8 * i))
    })
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension_units() {
        assert_eq!(parse_dimension("8dp"), Some(Dimension::dp(8.0)));
        assert_eq!(parse_dimension("8dip"), Some(Dimension::dp(8.0)));
        assert_eq!(parse_dimension("2.5px"), Some(Dimension::px(2.5)));
        assert_eq!(parse_dimension(" -4 "), Some(Dimension::px(-4.0)));
        assert_eq!(
            parse_dimension("14sp"),
            Some(Dimension {
                value: 14.0,
                unit: Unit::Sp
            })
        );
    }

    #[test]
    fn test_parse_dimension_rejects_garbage() {
        assert_eq!(parse_dimension("dp"), None);
        assert_eq!(parse_dimension("eight"), None);
        assert_eq!(parse_dimension("8em"), None);
        assert_eq!(parse_dimension("inf"), None);
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("#0000FF").map(|c| c.to_rgba8()), Some([0x00, 0x00, 0xFF, 0xFF]));
        assert_eq!(parse_color("#44000000").map(|c| c.to_rgba8()), Some([0x00, 0x00, 0x00, 0x44]));
        assert_eq!(parse_color("#F0A").map(|c| c.to_rgba8()), Some([0xFF, 0x00, 0xAA, 0xFF]));
        assert_eq!(parse_color("#8F0A").map(|c| c.to_rgba8()), Some([0xFF, 0x00, 0xAA, 0x88]));
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert_eq!(parse_color("0000FF"), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#GG0000"), None);
        assert_eq!(parse_color("#+12345"), None);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" false"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }
}
