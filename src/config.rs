use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};

use crate::generator::HarmonyType;
use crate::random::RngSource;
use crate::storage::library::PaletteLibrary;
use crate::storage::FileStore;

/// Environment variable naming the store directory.
pub const STORE_ENV: &str = "PALETTEGEN_STORE";

/// Directory under `$HOME` used when no store is configured.
const DEFAULT_STORE_DIR: &str = ".palettegen";

/// Runtime settings shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Explicit store directory (flag or [`STORE_ENV`]).
    pub store: Option<PathBuf>,
    /// Reject unknown harmony names instead of falling back to analogous.
    pub strict_harmony: bool,
    /// Fixed RNG seed for reproducible output.
    pub seed: Option<u64>,
}

impl Settings {
    /// The explicit store if set, otherwise `$HOME/.palettegen`.
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.store {
            return Ok(dir.clone());
        }
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(DEFAULT_STORE_DIR))
            .ok_or_else(|| eyre!("HOME is not set; pass --store or set {STORE_ENV}"))
    }

    pub fn random_source(&self) -> RngSource {
        match self.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        }
    }

    /// Apply the configured strictness to a harmony name.
    pub fn harmony(&self, name: &str) -> Result<HarmonyType> {
        if self.strict_harmony {
            Ok(name.parse::<HarmonyType>()?)
        } else {
            Ok(HarmonyType::from_name_lenient(name))
        }
    }

    pub fn library(&self) -> Result<PaletteLibrary<FileStore>> {
        let dir = self.store_dir()?;
        tracing::debug!(store = %dir.display(), "opening palette library");
        Ok(PaletteLibrary::new(FileStore::new(dir)))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::random::RandomSource;

    fn with_store(dir: &str) -> Settings {
        Settings {
            store: Some(PathBuf::from(dir)),
            ..Settings::default()
        }
    }

    #[test]
    fn test_explicit_store_wins() {
        let settings = with_store("/tmp/pal");
        assert_eq!(settings.store_dir().unwrap(), PathBuf::from("/tmp/pal"));
        assert_eq!(settings.library().unwrap().store().dir(), Path::new("/tmp/pal"));
    }

    #[test]
    fn test_default_store_lives_under_home() {
        if let Some(home) = std::env::var_os("HOME") {
            let dir = Settings::default().store_dir().unwrap();
            assert_eq!(dir, PathBuf::from(home).join(".palettegen"));
        }
    }

    #[test]
    fn test_lenient_and_strict_harmony() {
        let lenient = with_store("x");
        assert_eq!(lenient.harmony("bogus").unwrap(), HarmonyType::Analogous);
        assert_eq!(lenient.harmony("triadic").unwrap(), HarmonyType::Triadic);

        let strict = Settings {
            strict_harmony: true,
            ..with_store("x")
        };
        assert!(strict.harmony("bogus").is_err());
        assert_eq!(strict.harmony("splitComplement").unwrap(), HarmonyType::SplitComplement);
    }

    #[test]
    fn test_seed_makes_random_source_reproducible() {
        let settings = Settings {
            seed: Some(9),
            ..Settings::default()
        };
        let mut a = settings.random_source();
        let mut b = settings.random_source();
        assert_eq!(a.next_float(), b.next_float());
    }
}
