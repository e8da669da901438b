//! The HSL color value used throughout palette generation.
//!
//! Saturation and lightness are fractions in `[0, 1]` everywhere inside the
//! crate; percentages only show up when a color is printed for a person.

pub mod convert;
pub mod parse;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use parse::InvalidColorError;

/// What [`to_canonical_hex`] returns for input it cannot read.
pub const FALLBACK_HEX: &str = "#000000";

/// An opaque color stored as hue, saturation and lightness.
///
/// Equality and hashing go through the 8-bit sRGB channels, so two colors are
/// equal exactly when their canonical hex strings match.
#[derive(Debug, Clone, Copy)]
pub struct Color {
    hue: f64,
    saturation: f64,
    lightness: f64,
}

impl Color {
    /// Build a color from HSL components, normalizing out-of-range input:
    /// hue wraps into `[0, 360)`, saturation and lightness clamp into `[0, 1]`.
    /// Non-finite components become 0.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue: normalize_hue(hue),
            saturation: clamp_unit(saturation),
            lightness: clamp_unit(lightness),
        }
    }

    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let (h, s, l) = convert::rgb_to_hsl(rgb);
        Self::from_hsl(h, s, l)
    }

    /// Strict parse; see [`parse::parse_color`] for the accepted syntax.
    pub fn parse(input: &str) -> Result<Self, InvalidColorError> {
        parse::parse_color(input)
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    pub fn hsl(&self) -> (f64, f64, f64) {
        (self.hue, self.saturation, self.lightness)
    }

    pub fn rgb(&self) -> [u8; 3] {
        convert::hsl_to_rgb(self.hue, self.saturation, self.lightness)
    }

    /// Canonical `#rrggbb` form, lowercase.
    pub fn hex(&self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Perceived brightness test used to pick a readable label color on top
    /// of this one.
    pub fn is_light(&self) -> bool {
        let [r, g, b] = self.rgb();
        let brightness = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
        brightness >= 128
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.rgb() == other.rgb()
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rgb().hash(state);
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl FromStr for Color {
    type Err = InvalidColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Whether `input` parses as a color. Never panics.
pub fn is_valid_color(input: &str) -> bool {
    parse::parse_color(input).is_ok()
}

/// Lenient conversion to canonical hex: unreadable input maps to
/// [`FALLBACK_HEX`] instead of failing.
pub fn to_canonical_hex(input: &str) -> String {
    match parse::parse_color(input) {
        Ok(color) => color.hex(),
        Err(_) => FALLBACK_HEX.to_string(),
    }
}

pub(crate) fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0; also folds -0.0
    if wrapped >= 360.0 || wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v.min(1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hsl_normalizes_components() {
        let c = Color::from_hsl(-30.0, 1.4, -0.2);
        assert_eq!(c.hue(), 330.0);
        assert_eq!(c.saturation(), 1.0);
        assert_eq!(c.lightness(), 0.0);

        assert_eq!(Color::from_hsl(720.0, 0.5, 0.5).hue(), 0.0);
        assert_eq!(Color::from_hsl(-1e-20, 0.5, 0.5).hue(), 0.0);
        assert_eq!(Color::from_hsl(f64::NAN, f64::INFINITY, 0.5).hsl(), (0.0, 0.0, 0.5));
    }

    #[test]
    fn test_hex_is_lowercase_six_digits() {
        let c = Color::from_hsl(217.0, 0.91, 0.6);
        let hex = c.hex();
        assert_eq!(hex.len(), 7);
        assert!(hex.starts_with('#'));
        assert!(hex[1..].chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase()));
    }

    #[test]
    fn test_equality_follows_hex() {
        let a: Color = "#3B82F6".parse().unwrap();
        let b: Color = "#3b82f6".parse().unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Color::from_rgb([0x3b, 0x82, 0xf7]));
    }

    #[test]
    fn test_is_valid_color() {
        assert!(is_valid_color("#3b82f6"));
        assert!(is_valid_color("cornflowerblue"));
        assert!(!is_valid_color("not-a-color"));
        assert!(!is_valid_color(""));
    }

    #[test]
    fn test_to_canonical_hex() {
        assert_eq!(to_canonical_hex("#ABCDEF"), "#abcdef");
        assert_eq!(to_canonical_hex("white"), "#ffffff");
        assert_eq!(to_canonical_hex("not-a-color"), FALLBACK_HEX);
    }

    #[test]
    fn test_to_canonical_hex_is_idempotent() {
        for input in ["#ABC", "teal", "rgb(10, 20, 30)", "hsl(300, 40%, 70%)", "garbage", ""] {
            let once = to_canonical_hex(input);
            assert_eq!(to_canonical_hex(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_is_light() {
        assert!(Color::from_rgb([255, 255, 255]).is_light());
        assert!(Color::from_rgb([255, 255, 0]).is_light());
        assert!(!Color::from_rgb([0, 0, 0]).is_light());
        assert!(!Color::from_rgb([0, 0, 255]).is_light());
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let c = Color::from_rgb([0x12, 0x34, 0x56]);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#123456\"");
        let back: Color = serde_json::from_str("\"#123456\"").unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
