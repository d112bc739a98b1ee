//! Colors and the 5-step sequential ramp.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classify::ClassIndex;
use crate::error::AtlasError;

/// sRGB 8-bit color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Accepts `#RRGGBB` and the `#RGB` shorthand
    pub fn parse_hex(s: &str) -> Result<Self, AtlasError> {
        let invalid = || AtlasError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::new(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            3 => {
                let (r, g, b) = (channel(0, 1)?, channel(1, 1)?, channel(2, 1)?);
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = AtlasError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgb::parse_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_string()
    }
}

/// Light to dark, one color per class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct Palette([Rgb; ClassIndex::COUNT]);

impl Palette {
    pub const BLUES: Palette = Palette([
        Rgb::new(0xf7, 0xfb, 0xff),
        Rgb::new(0xcc, 0xe5, 0xff),
        Rgb::new(0x66, 0xb2, 0xff),
        Rgb::new(0x1f, 0x78, 0xb4),
        Rgb::new(0x08, 0x30, 0x6b),
    ]);

    pub fn color(&self, class: ClassIndex) -> Rgb {
        self.0[class.slot()]
    }

    pub fn colors(&self) -> &[Rgb; ClassIndex::COUNT] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::BLUES
    }
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = AtlasError;

    fn try_from(colors: Vec<Rgb>) -> Result<Self, Self::Error> {
        let n = colors.len();
        let colors: [Rgb; ClassIndex::COUNT] = colors.try_into().map_err(|_| AtlasError::PaletteSize(n))?;
        Ok(Palette(colors))
    }
}

impl From<Palette> for Vec<Rgb> {
    fn from(p: Palette) -> Vec<Rgb> {
        p.0.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse_hex("#1f78b4").unwrap(), Rgb::new(0x1f, 0x78, 0xb4));
        assert_eq!(Rgb::parse_hex("#444").unwrap(), Rgb::new(0x44, 0x44, 0x44));
        assert!(Rgb::parse_hex("1f78b4").is_err());
        assert!(Rgb::parse_hex("#12345").is_err());
        assert!(Rgb::parse_hex("#gg0000").is_err());
        assert!(Rgb::parse_hex("#ééé").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(Palette::BLUES.color(ClassIndex::HIGHEST).to_string(), "#08306b");
        assert_eq!(Palette::BLUES.color(ClassIndex::LOWEST).to_string(), "#f7fbff");
    }

    #[test]
    fn test_palette_from_yaml() {
        let p: Palette = serde_yaml::from_str("['#000', '#111', '#222', '#333', '#444']").unwrap();
        assert_eq!(p.color(ClassIndex::MIDDLE), Rgb::new(0x22, 0x22, 0x22));

        let err = serde_yaml::from_str::<Palette>("['#000', '#111']").unwrap_err();
        assert!(err.to_string().contains("exactly 5"));
    }
}
