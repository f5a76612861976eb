// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// or from a css hex string, plus the translucent paint the particles use

use serde::Deserialize;
use std::convert::TryFrom;
use std::fmt;

use crate::error::ConfigError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TEAL: Color = Color::from_u32(0x34d399ff);
    pub const BLUE: Color = Color::from_u32(0x3b82f6ff);
    pub const WHITE: Color = Color::from_u32(0xffffffff);
    pub const NIGHT: Color = Color::from_u32(0x0f172aff);

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Accepts "#rrggbb" and "#rrggbbaa"
    pub fn from_hex(hex: &str) -> Result<Color, ConfigError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || ConfigError::InvalidColor(hex.to_owned());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            6 => Ok(Color::from_u32((value << 8) | 0xff)),
            8 => Ok(Color::from_u32(value)),
            _ => Err(invalid()),
        }
    }

    // The palette particles pick from
    pub fn palette() -> Vec<Color> {
        vec![Color::TEAL, Color::BLUE, Color::WHITE]
    }

    pub fn with_opacity(self, opacity: f64) -> Paint {
        Paint {
            color: self,
            alpha: opacity.max(0.0).min(1.0),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A color combined with a translucency in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub alpha: f64,
}

impl Paint {
    /// CSS `rgba(...)` form, as accepted by a 2D canvas fill style.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.color.r, self.color.g, self.color.b, self.alpha
        )
    }

    /// Source-over blend of this paint onto an RGBA destination pixel.
    pub fn blend_over(&self, dst: [u8; 4]) -> [u8; 4] {
        let src_a = self.alpha * (self.color.a as f64 / 255.0);
        let dst_a = dst[3] as f64 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return [0, 0, 0, 0];
        }
        let channel = |s: u8, d: u8| {
            let v = (s as f64 * src_a + d as f64 * dst_a * (1.0 - src_a)) / out_a;
            v.round() as u8
        };
        [
            channel(self.color.r, dst[0]),
            channel(self.color.g, dst[1]),
            channel(self.color.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]
    }
}
