//! Palette export formats.
//!
//! A palette leaves the program in one of three shapes: the JSON export
//! document, a block of terminal text, or a PNG image (see [`raster`]).

pub mod raster;

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use color_eyre::eyre::{Result, WrapErr};
use crossterm::style::{Color as TermColor, Stylize};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::generator::Palette;

/// The only value of the document's `format` field.
pub const HEX_FORMAT: &str = "hex";

/// Trait for rendering palettes.
/// Implement this trait to add new output formats.
pub trait PaletteFormatter {
    fn format(&self, palette: &Palette) -> Result<String>;
}

/// `{"palette": [...], "exportedAt": "...", "format": "hex"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub palette: Vec<String>,
    /// ISO 8601 in UTC with millisecond precision, e.g. `2025-01-01T00:00:00.000Z`.
    pub exported_at: String,
    pub format: String,
}

impl ExportDocument {
    pub fn new(palette: &Palette, exported_at: DateTime<Utc>) -> Self {
        Self {
            palette: palette.hex_codes(),
            exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            format: HEX_FORMAT.to_string(),
        }
    }

    /// Pretty-printed with two-space indentation.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("Failed to serialize export document")
    }
}

/// JSON export document. Uses the current time unless `exported_at` is pinned.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pub exported_at: Option<DateTime<Utc>>,
}

impl PaletteFormatter for JsonFormatter {
    fn format(&self, palette: &Palette) -> Result<String> {
        let at = self.exported_at.unwrap_or_else(Utc::now);
        ExportDocument::new(palette, at).to_json()
    }
}

/// Terminal rendering: a strip of five adjacent color blocks followed by one
/// line per color.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    /// Skip ANSI colors entirely.
    pub plain: bool,
    /// Width of each block in the swatch strip.
    pub block_width: usize,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            plain: false,
            block_width: 10,
        }
    }
}

impl TextFormatter {
    /// Five adjacent colored blocks, no trailing newline. Empty when plain.
    pub fn strip(&self, palette: &Palette) -> String {
        if self.plain {
            return String::new();
        }
        palette
            .iter()
            .map(|color| " ".repeat(self.block_width).on(term_color(color)).to_string())
            .collect()
    }
}

impl PaletteFormatter for TextFormatter {
    fn format(&self, palette: &Palette) -> Result<String> {
        let mut output = String::new();

        if !self.plain {
            output.push_str(&self.strip(palette));
            output.push('\n');
        }

        for (index, color) in palette.iter().enumerate() {
            let hex = color.hex();
            let label = if self.plain {
                hex
            } else {
                let fg = if color.is_light() {
                    TermColor::Black
                } else {
                    TermColor::White
                };
                format!(" {hex} ").with(fg).on(term_color(color)).to_string()
            };
            output.push_str(&format!("{}  {}  {}\n", index + 1, label, describe_hsl(color)));
        }

        Ok(output)
    }
}

/// `hsl(217, 91%, 60%)`, rounded for display.
pub fn describe_hsl(color: &Color) -> String {
    let (h, s, l) = color.hsl();
    format!(
        "hsl({:.0}, {:.0}%, {:.0}%)",
        h,
        s * 100.0,
        l * 100.0
    )
}

fn term_color(color: &Color) -> TermColor {
    let [r, g, b] = color.rgb();
    TermColor::Rgb { r, g, b }
}

/// `color-palette-<ms>.<ext>`, the name used for fresh exports.
pub fn default_file_name(extension: &str, at: DateTime<Utc>) -> String {
    format!("color-palette-{}.{}", at.timestamp_millis(), extension)
}

/// `palette-<id>.json`, the name used when exporting a saved palette.
pub fn saved_file_name(id: u64) -> String {
    format!("palette-{id}.json")
}

/// Write the JSON export document for `palette` to `path`.
pub fn write_json(palette: &Palette, exported_at: DateTime<Utc>, path: &Path) -> Result<()> {
    let json = ExportDocument::new(palette, exported_at).to_json()?;
    fs::write(path, json).wrap_err_with(|| format!("Failed to write {}", path.display()))
}
