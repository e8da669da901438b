use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::generator::{Palette, PaletteError};

use super::KeyValueStore;

/// The single record all application data lives under.
pub const STORAGE_KEY: &str = "color_palette_app_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?} (expected light or dark)")]
pub struct UnknownThemeError(pub String);

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownThemeError(s.to_string())),
        }
    }
}

/// A favorite palette as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPalette {
    /// Creation time in Unix milliseconds, bumped when needed to stay unique.
    pub id: u64,
    pub colors: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl SavedPalette {
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        Palette::from_codes(&self.colors)
    }

    /// Same length and the same strings in order, ignoring ASCII case.
    pub fn matches<T: AsRef<str>>(&self, colors: &[T]) -> bool {
        self.colors.len() == colors.len()
            && self
                .colors
                .iter()
                .zip(colors)
                .all(|(saved, other)| saved.eq_ignore_ascii_case(other.as_ref()))
    }
}

/// Everything stored under [`STORAGE_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub palettes: Vec<SavedPalette>,
}

/// Saved palettes and the theme preference, on top of any [`KeyValueStore`].
///
/// Every operation reads the record fresh; there is no cache to go stale when
/// another process writes the same store.
pub struct PaletteLibrary<S> {
    store: S,
}

impl<S: KeyValueStore> PaletteLibrary<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the record. Missing, unreadable or corrupt data all come back as
    /// the default (light theme, no palettes).
    pub fn load(&self) -> AppData {
        self.try_load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "could not read saved palettes");
            AppData::default()
        })
    }

    /// Read the record, failing when the store itself cannot be read.
    /// A missing or corrupt record still comes back as the default.
    pub fn try_load(&self) -> Result<AppData> {
        let Some(raw) = self.store.get(STORAGE_KEY)? else {
            return Ok(AppData::default());
        };

        Ok(serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "saved palette data is unreadable, starting empty");
            AppData::default()
        }))
    }

    fn persist(&self, data: &AppData) -> Result<()> {
        let raw = serde_json::to_string(data).wrap_err("Failed to serialize saved palettes")?;
        self.store.set(STORAGE_KEY, &raw)
    }

    /// Append `palette` to the saved list, stamped with the current time.
    pub fn save(&self, palette: &Palette) -> Result<SavedPalette> {
        self.save_at(palette, Utc::now())
    }

    pub fn save_at(&self, palette: &Palette, created_at: DateTime<Utc>) -> Result<SavedPalette> {
        let mut data = self.try_load()?;

        let next_free = data.palettes.iter().map(|p| p.id.saturating_add(1)).max().unwrap_or(0);
        let id = u64::try_from(created_at.timestamp_millis())
            .unwrap_or(0)
            .max(next_free);

        let saved = SavedPalette {
            id,
            colors: palette.hex_codes(),
            created_at,
        };
        data.palettes.push(saved.clone());
        self.persist(&data)?;

        tracing::info!(id, colors = ?saved.colors, "saved palette");
        Ok(saved)
    }

    /// All saved palettes, newest first.
    pub fn list(&self) -> Vec<SavedPalette> {
        let mut palettes = self.load().palettes;
        palettes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        palettes
    }

    pub fn get(&self, id: u64) -> Option<SavedPalette> {
        self.load().palettes.into_iter().find(|p| p.id == id)
    }

    /// Remove the palette with `id`. Returns whether anything was removed.
    pub fn delete(&self, id: u64) -> Result<bool> {
        let mut data = self.try_load()?;
        let before = data.palettes.len();
        data.palettes.retain(|p| p.id != id);
        if data.palettes.len() == before {
            return Ok(false);
        }
        self.persist(&data)?;
        tracing::info!(id, "deleted palette");
        Ok(true)
    }

    /// Whether an identical color list has already been saved.
    pub fn is_saved<T: AsRef<str>>(&self, colors: &[T]) -> bool {
        self.load().palettes.iter().any(|p| p.matches(colors))
    }

    pub fn theme(&self) -> Theme {
        self.load().theme
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        let mut data = self.try_load()?;
        data.theme = theme;
        self.persist(&data)
    }

    /// Drop the whole record, theme included.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(STORAGE_KEY)
    }
}
