use std::path::Path;

use color_eyre::eyre::{bail, Result, WrapErr};
use image::{ImageFormat, Rgb, RgbImage};

use crate::generator::{Palette, PALETTE_SIZE};

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 400;

/// Paint the palette as five equal vertical blocks, left to right.
/// When `width` is not a multiple of five the remainder is spread across blocks.
pub fn render(palette: &Palette, width: u32, height: u32) -> RgbImage {
    let pixels: Vec<Rgb<u8>> = palette.iter().map(|c| Rgb(c.rgb())).collect();
    RgbImage::from_fn(width, height, |x, _| {
        let index = (u64::from(x) * PALETTE_SIZE as u64 / u64::from(width.max(1))) as usize;
        pixels[index.min(PALETTE_SIZE - 1)]
    })
}

/// Render and save as PNG.
pub fn write_png(palette: &Palette, width: u32, height: u32, path: &Path) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("Image size must be non-zero, got {width}x{height}");
    }
    render(palette, width, height)
        .save_with_format(path, ImageFormat::Png)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), width, height, "wrote palette image");
    Ok(())
}
