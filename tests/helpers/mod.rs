use chrono::{DateTime, TimeZone, Utc};

use crate::color::Color;
use crate::generator::Palette;
use crate::random::SequenceSource;
use crate::storage::library::PaletteLibrary;
use crate::storage::MemoryStore;

/// Create a color from HSL components on the 0–1 scale.
pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> Color {
    Color::from_hsl(hue, saturation, lightness)
}

/// Create a palette from five hex strings.
pub fn palette(codes: [&str; 5]) -> Palette {
    Palette::from_codes(&codes).unwrap()
}

/// A fixed palette of five distinct blues.
pub fn blues() -> Palette {
    palette(["#1e3a8a", "#1d4ed8", "#3b82f6", "#93c5fd", "#dbeafe"])
}

/// A fixed palette of five distinct warm colors.
pub fn warms() -> Palette {
    palette(["#7c2d12", "#c2410c", "#f97316", "#fdba74", "#ffedd5"])
}

/// A random source that returns the same value for every draw.
pub fn fixed(value: f64) -> SequenceSource {
    SequenceSource::constant(value)
}

/// A UTC timestamp `ms` milliseconds after the Unix epoch.
pub fn at(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

/// A palette library backed by an in-memory store.
pub fn memory_library() -> PaletteLibrary<MemoryStore> {
    PaletteLibrary::new(MemoryStore::default())
}

/// Assert two floats agree to well within one 8-bit channel step.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
