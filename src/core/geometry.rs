//! Small 2D geometry and color types shared by both visual subsystems
//!
//! Kept free of any UI crate so the particle engine and map state can be
//! tested on the host. Front-ends convert at the edge.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point (or offset) in 2D pixel or content space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (self - other).length()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Point {
    type Output = Point;
    fn div(self, rhs: f32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Opaque color, deserialized from and serialized to `#RRGGBB`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color must look like #RRGGBB, got {0:?}")]
    Format(String),
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| ColorError::Format(hex.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorError::Format(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha.clamp(0.0, 1.0),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Color with straight (unmultiplied) alpha in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// CSS `rgba(...)` form, as accepted by a 2D canvas fill/stroke style
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }

    /// Alpha as a byte for UI toolkits that want 0..=255
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, 1.0);
        assert_eq!(a - b, Point::new(2.0, 3.0));
        assert_eq!(a + b, Point::new(4.0, 5.0));
        assert_eq!(a * 2.0, Point::new(6.0, 8.0));
        assert_eq!(a / 2.0, Point::new(1.5, 2.0));
        assert_eq!(-b, Point::new(-1.0, -1.0));
        assert_eq!(a.length(), 5.0);
        assert_eq!(a.distance(Point::ZERO), 5.0);
    }

    #[test]
    fn hex_colors_parse_and_print() {
        let c = Rgb::from_hex("#3B82F6").unwrap();
        assert_eq!(c, Rgb::new(59, 130, 246));
        assert_eq!(c.to_string(), "#3B82F6");
        assert_eq!(Rgb::from_hex("#ef4444").unwrap(), Rgb::new(0xEF, 0x44, 0x44));
    }

    #[test]
    fn bad_hex_colors_are_rejected() {
        for bad in ["3B82F6", "#3B82F", "#3B82F6A", "#GG0000", "", "#"] {
            assert!(Rgb::from_hex(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn color_serde_uses_hex_strings() {
        let c: Rgb = serde_json::from_str("\"#10B981\"").unwrap();
        assert_eq!(c, Rgb::new(0x10, 0xB9, 0x81));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#10B981\"");
        assert!(serde_json::from_str::<Rgb>("\"teal\"").is_err());
    }

    #[test]
    fn rgba_css_and_alpha() {
        let c = Rgb::new(59, 130, 246).with_alpha(0.6);
        assert_eq!(c.css(), "rgba(59, 130, 246, 0.600)");
        assert_eq!(c.alpha_u8(), 153);
        // alpha is clamped on construction
        assert_eq!(Rgb::new(0, 0, 0).with_alpha(4.0).a, 1.0);
        assert_eq!(Rgb::new(0, 0, 0).with_alpha(-1.0).a, 0.0);
    }
}
