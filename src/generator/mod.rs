pub mod harmony;

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::color::{Color, InvalidColorError};
use crate::random::RandomSource;

pub use harmony::{HarmonyType, UnknownHarmonyError};

/// Every palette holds exactly this many colors.
pub const PALETTE_SIZE: usize = 5;

const RANDOM_SATURATION: RangeInclusive<f64> = 0.5..=1.0;
const RANDOM_LIGHTNESS: RangeInclusive<f64> = 0.3..=0.7;

/// An ordered set of five colors. For harmony palettes the first entry is the
/// seed. Duplicates are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: [Color; PALETTE_SIZE],
}

/// Why a list of strings could not become a [`Palette`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("a palette needs exactly 5 colors, got {0}")]
    WrongLength(usize),
    #[error(transparent)]
    InvalidColor(#[from] InvalidColorError),
}

impl Palette {
    pub fn new(colors: [Color; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// Parse exactly [`PALETTE_SIZE`] color strings, in order.
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self, PaletteError> {
        if codes.len() != PALETTE_SIZE {
            return Err(PaletteError::WrongLength(codes.len()));
        }
        let mut colors = [Color::from_rgb([0, 0, 0]); PALETTE_SIZE];
        for (slot, code) in colors.iter_mut().zip(codes) {
            *slot = Color::parse(code.as_ref())?;
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.colors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }

    /// The first color; the seed for harmony palettes.
    pub fn base(&self) -> Color {
        self.colors[0]
    }

    /// Canonical hex strings, in palette order.
    pub fn hex_codes(&self) -> Vec<String> {
        self.colors.iter().map(Color::hex).collect()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Five independent random colors: hue anywhere on the wheel, saturation in
/// `[0.5, 1.0]`, lightness in `[0.3, 0.7]`. Three draws per color.
pub fn generate_random_palette<R: RandomSource + ?Sized>(rng: &mut R) -> Palette {
    let colors = std::array::from_fn(|_| {
        let hue = rng.next_float() * 360.0;
        let saturation = lerp(&RANDOM_SATURATION, rng.next_float());
        let lightness = lerp(&RANDOM_LIGHTNESS, rng.next_float());
        Color::from_hsl(hue, saturation, lightness)
    });
    let palette = Palette::new(colors);
    tracing::debug!(colors = ?palette.hex_codes(), "generated random palette");
    palette
}

/// Parse `seed` and derive a palette from it under `harmony`.
///
/// Fails only when `seed` is not a readable color; nothing is generated in
/// that case.
pub fn generate_harmony_palette<R: RandomSource + ?Sized>(
    seed: &str,
    harmony: HarmonyType,
    rng: &mut R,
) -> Result<Palette, InvalidColorError> {
    let seed = Color::parse(seed)?;
    Ok(harmony_palette(seed, harmony, rng))
}

/// Derive a palette from an already parsed seed color.
pub fn harmony_palette<R: RandomSource + ?Sized>(
    seed: Color,
    harmony: HarmonyType,
    rng: &mut R,
) -> Palette {
    let palette = Palette::new(harmony.derive(seed, rng));
    tracing::debug!(
        seed = %seed,
        %harmony,
        colors = ?palette.hex_codes(),
        "generated harmony palette"
    );
    palette
}

fn lerp(range: &RangeInclusive<f64>, t: f64) -> f64 {
    range.start() + (range.end() - range.start()) * t
}
