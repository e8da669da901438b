pub mod color;
pub mod config;
pub mod export;
pub mod generator;
pub mod random;
pub mod storage;

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
mod test_helpers;

pub use color::{is_valid_color, to_canonical_hex, Color, InvalidColorError};
pub use generator::{
    generate_harmony_palette, generate_random_palette, harmony_palette, HarmonyType, Palette,
    PALETTE_SIZE,
};
pub use random::{RandomSource, RngSource, SequenceSource};
