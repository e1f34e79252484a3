//! Shape colors and CSS-style color parsing.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Unsupported color syntax: {0}")]
    Syntax(String),
    #[error("Invalid color component in {0}")]
    Component(String),
}

/// Serializable color representation (RGBA8, straight alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ShapeColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a CSS color string: `#rgb`, `#rrggbb`, `#rrggbbaa`,
    /// `rgb(r, g, b)` or `rgba(r, g, b, a)` with `a` in `0.0..=1.0`.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::transparent());
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::Component(s.to_string()));
        }
        if let Some(body) = s.strip_prefix("rgba(").and_then(|b| b.strip_suffix(')')) {
            return parse_functional(body, true).ok_or_else(|| ColorParseError::Component(s.to_string()));
        }
        if let Some(body) = s.strip_prefix("rgb(").and_then(|b| b.strip_suffix(')')) {
            return parse_functional(body, false).ok_or_else(|| ColorParseError::Component(s.to_string()));
        }
        Err(ColorParseError::Syntax(s.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<ShapeColor> {
    let byte = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    match hex.len() {
        3 => {
            // #rgb -> #rrggbb
            let r = u8::from_str_radix(hex.get(0..1)?, 16).ok()? * 17;
            let g = u8::from_str_radix(hex.get(1..2)?, 16).ok()? * 17;
            let b = u8::from_str_radix(hex.get(2..3)?, 16).ok()? * 17;
            Some(ShapeColor::rgb(r, g, b))
        }
        6 => Some(ShapeColor::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
        8 => Some(ShapeColor::new(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
        _ => None,
    }
}

fn parse_functional(body: &str, with_alpha: bool) -> Option<ShapeColor> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    let a = if with_alpha {
        let alpha = parts[3].parse::<f64>().ok()?;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        (alpha * 255.0).round() as u8
    } else {
        255
    };
    Some(ShapeColor::new(r, g, b, a))
}

impl FromStr for ShapeColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for ShapeColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<ShapeColor> for Color {
    fn from(color: ShapeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(ShapeColor::parse("#4299e1").unwrap(), ShapeColor::rgb(0x42, 0x99, 0xe1));
        assert_eq!(ShapeColor::parse("#fff").unwrap(), ShapeColor::white());
        assert_eq!(
            ShapeColor::parse("#00000080").unwrap(),
            ShapeColor::new(0, 0, 0, 0x80)
        );
    }

    #[test]
    fn test_parse_rgba() {
        let shadow = ShapeColor::parse("rgba(0,0,0,0.3)").unwrap();
        assert_eq!(shadow, ShapeColor::new(0, 0, 0, 77));
        assert_eq!(ShapeColor::parse("rgb(1, 2, 3)").unwrap(), ShapeColor::rgb(1, 2, 3));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(ShapeColor::parse("blue"), Err(ColorParseError::Syntax(_))));
        assert!(matches!(ShapeColor::parse("#12"), Err(ColorParseError::Component(_))));
        assert!(matches!(
            ShapeColor::parse("rgba(0,0,0,2)"),
            Err(ColorParseError::Component(_))
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        let color = ShapeColor::rgb(0x2b, 0x6c, 0xb0);
        assert_eq!(color.to_string(), "#2b6cb0");
        assert_eq!(color.to_string().parse::<ShapeColor>().unwrap(), color);
    }

    #[test]
    fn test_peniko_conversion() {
        let color = ShapeColor::new(10, 20, 30, 40);
        let peniko_color: Color = color.into();
        assert_eq!(ShapeColor::from(peniko_color), color);
    }
}
