use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::random::RandomSource;

use super::PALETTE_SIZE;

/// Color-wheel relationship used to derive a palette from a seed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HarmonyType {
    /// Neighbours within ±30° of the seed, with a little lightness jitter.
    #[default]
    Analogous,
    /// Three hues 120° apart plus two tonal variations.
    Triadic,
    /// The seed and its opposite plus three tonal variations.
    Complementary,
    /// A single hue at five saturation/lightness steps.
    Monochromatic,
    /// The seed and the two hues flanking its complement (±150°).
    SplitComplement,
}

/// Returned by the strict harmony name parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown harmony {name:?} (expected one of: analogous, triadic, complementary, monochromatic, splitComplement)")]
pub struct UnknownHarmonyError {
    pub name: String,
}

impl HarmonyType {
    pub const ALL: [HarmonyType; 5] = [
        HarmonyType::Analogous,
        HarmonyType::Triadic,
        HarmonyType::Complementary,
        HarmonyType::Monochromatic,
        HarmonyType::SplitComplement,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HarmonyType::Analogous => "analogous",
            HarmonyType::Triadic => "triadic",
            HarmonyType::Complementary => "complementary",
            HarmonyType::Monochromatic => "monochromatic",
            HarmonyType::SplitComplement => "splitComplement",
        }
    }

    /// Resolve a harmony name, falling back to analogous for anything unknown.
    pub fn from_name_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: UnknownHarmonyError| {
            tracing::warn!(name = %err.name, "unknown harmony, using analogous");
            HarmonyType::Analogous
        })
    }

    /// Whether this rule draws from the random source.
    pub fn uses_entropy(self) -> bool {
        matches!(self, HarmonyType::Analogous)
    }

    /// Derive the five palette colors for `seed`.
    pub fn derive<R: RandomSource + ?Sized>(self, seed: Color, rng: &mut R) -> [Color; PALETTE_SIZE] {
        let seed = Seed::from(seed);
        match self {
            HarmonyType::Analogous => analogous(seed, rng),
            HarmonyType::Triadic => triadic(seed),
            HarmonyType::Complementary => complementary(seed),
            HarmonyType::Monochromatic => monochromatic(seed),
            HarmonyType::SplitComplement => split_complement(seed),
        }
    }
}

impl fmt::Display for HarmonyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HarmonyType {
    type Err = UnknownHarmonyError;

    /// Case-insensitive; `-`, `_` and spaces are ignored so `split-complement`
    /// and `splitComplement` both work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "analogous" => Ok(HarmonyType::Analogous),
            "triadic" => Ok(HarmonyType::Triadic),
            "complementary" => Ok(HarmonyType::Complementary),
            "monochromatic" => Ok(HarmonyType::Monochromatic),
            "splitcomplement" | "splitcomplementary" => Ok(HarmonyType::SplitComplement),
            _ => Err(UnknownHarmonyError {
                name: s.to_string(),
            }),
        }
    }
}

// ── Rules ───────────────────────────────────────────────────────────
//
// Each rule reads the seed once and builds fresh colors. Clamps run after
// the arithmetic, on the 0–1 scale.

const ANALOGOUS_OFFSETS: [f64; PALETTE_SIZE] = [-30.0, -15.0, 0.0, 15.0, 30.0];
const ANALOGOUS_JITTER: f64 = 0.2;

#[derive(Debug, Clone, Copy)]
struct Seed {
    h: f64,
    s: f64,
    l: f64,
}

impl From<Color> for Seed {
    fn from(color: Color) -> Self {
        let (h, s, l) = color.hsl();
        Self { h, s, l }
    }
}

/// `hue + degrees`, wrapped into `[0, 360)`.
fn rotate(hue: f64, degrees: f64) -> f64 {
    (hue + degrees + 360.0) % 360.0
}

/// Lightness jitter is `(draw - 0.5) * 0.2`, so it lies in `[-0.1, 0.1)`: a draw
/// of exactly 0.0 gives -0.1. The `[0.2, 0.8]` clamp applies afterwards.
fn analogous<R: RandomSource + ?Sized>(seed: Seed, rng: &mut R) -> [Color; PALETTE_SIZE] {
    ANALOGOUS_OFFSETS.map(|offset| {
        let jitter = (rng.next_float() - 0.5) * ANALOGOUS_JITTER;
        Color::from_hsl(
            rotate(seed.h, offset),
            seed.s,
            (seed.l + jitter).clamp(0.2, 0.8),
        )
    })
}

fn triadic(Seed { h, s, l }: Seed) -> [Color; PALETTE_SIZE] {
    [
        Color::from_hsl(h, s, l),
        Color::from_hsl(rotate(h, 120.0), s, l),
        Color::from_hsl(rotate(h, 240.0), s, l),
        Color::from_hsl(h, (s - 0.2).max(0.3), (l - 0.2).max(0.2)),
        Color::from_hsl(rotate(h, 120.0), (s + 0.2).min(1.0), (l + 0.2).min(0.8)),
    ]
}

fn complementary(Seed { h, s, l }: Seed) -> [Color; PALETTE_SIZE] {
    [
        Color::from_hsl(h, s, l),
        Color::from_hsl(rotate(h, 180.0), s, l),
        Color::from_hsl(h, (s - 0.3).max(0.3), (l - 0.2).max(0.2)),
        Color::from_hsl(h, (s + 0.2).min(1.0), (l + 0.3).min(0.8)),
        Color::from_hsl(rotate(h, 180.0), (s - 0.2).max(0.4), (l - 0.1).max(0.3)),
    ]
}

fn monochromatic(Seed { h, s, l }: Seed) -> [Color; PALETTE_SIZE] {
    [
        ((s - 0.4).max(0.2), (l - 0.3).max(0.1)),
        ((s - 0.2).max(0.3), (l - 0.1).max(0.2)),
        (s, l),
        ((s + 0.1).min(1.0), (l + 0.2).min(0.8)),
        ((s + 0.2).min(1.0), (l + 0.3).min(0.9)),
    ]
    .map(|(s, l)| Color::from_hsl(h, s, l))
}

fn split_complement(Seed { h, s, l }: Seed) -> [Color; PALETTE_SIZE] {
    [
        Color::from_hsl(h, s, l),
        Color::from_hsl(rotate(h, 150.0), s, l),
        Color::from_hsl(rotate(h, 210.0), s, l),
        Color::from_hsl(h, (s - 0.2).max(0.3), (l + 0.2).min(0.8)),
        Color::from_hsl(rotate(h, 150.0), (s - 0.1).max(0.4), (l - 0.2).max(0.3)),
    ]
}
