// ABOUTME: Theme configuration loaded from tonal.toml
// ABOUTME: Seed, mode and overrides, plus optional replacement rules and extra default tokens

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tonal_color::Argb;
use tonal_logging::debug;
use tonal_types::{ColorMode, TokenMap};

use crate::error::{Result, ThemeError};
use crate::rules::{ContrastRule, DefaultTokens};

pub const CONFIG_FILE_NAME: &str = "tonal.toml";

/// Contents of `tonal.toml`, for example:
/// ```toml
/// seed = "#0C66E4"
/// mode = "auto"
///
/// [overrides]
/// "color.text.brand" = 7
/// "color.link" = "#0055CC"
///
/// [[rules]]
/// foreground = "color.text.brand"
/// background_light = "elevation.surface"
/// background_dark = "elevation.surface"
/// desired = 7.0
/// affected = ["color.text.brand", "color.link"]
///
/// [defaults.dark]
/// "elevation.surface" = "#22272B"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub seed: Option<Argb>,
    pub mode: ColorMode,
    pub overrides: TokenMap,
    /// Replaces the built-in rule table when present
    pub rules: Option<Vec<ContrastRule>>,
    /// Added on top of the built-in default tokens
    pub defaults: DefaultTokens,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            mode: ColorMode::Auto,
            overrides: TokenMap::new(),
            rules: None,
            defaults: DefaultTokens::empty(),
        }
    }
}

impl ThemeConfig {
    /// Load from the platform config directory
    pub fn load() -> Result<Self> {
        Self::load_from_dir(&config_dir())
    }

    /// Load `tonal.toml` from `dir`, or the default configuration when it does not exist
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            debug!(path = %path.display(), "No theme config found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ThemeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|source| ThemeError::ConfigParse {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;
        debug!(path = %path.display(), "Loaded theme config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// `<platform config dir>/tonal`
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tonal")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names;
    use std::fs;
    use tempfile::tempdir;
    use tonal_types::{Appearance, TokenValue};

    const SAMPLE: &str = r##"
seed = "#0C66E4"
mode = "dark"

[overrides]
"color.text.brand" = 7
"color.link" = "#0055CC"

[[rules]]
foreground = "color.text.brand"
background_light = "elevation.surface"
background_dark = "elevation.surface"
desired = 7.0
affected = ["color.text.brand", "color.link"]

[defaults.dark]
"elevation.surface" = "#22272B"
"##;

    #[test]
    fn test_parse_full_config() {
        let config = ThemeConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.seed, Some(Argb(0xff0c66e4)));
        assert_eq!(config.mode, ColorMode::Dark);
        assert_eq!(config.overrides[names::TEXT_BRAND], TokenValue::Index(7));
        assert_eq!(config.overrides[names::LINK], TokenValue::from("#0055CC"));

        let rules = config.rules.as_ref().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].desired, 7.0);

        assert_eq!(
            config.defaults.get(names::SURFACE, Appearance::Dark),
            Some(Argb(0xff22272b))
        );
        assert!(config.defaults.light.is_empty());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ThemeConfig::from_toml("").unwrap();
        assert_eq!(config, ThemeConfig::default());
        assert_eq!(config.mode, ColorMode::Auto);
        assert!(config.rules.is_none());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempdir().unwrap();
        let missing = ThemeConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(missing, ThemeConfig::default());

        fs::write(dir.path().join(CONFIG_FILE_NAME), SAMPLE).unwrap();
        let loaded = ThemeConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(loaded.mode, ColorMode::Dark);
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "seed = \"#nothex\"").unwrap();

        let err = ThemeConfig::load_from_path(&path).unwrap_err();
        match err {
            ThemeError::ConfigParse { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_error() {
        let dir = tempdir().unwrap();
        let err = ThemeConfig::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ThemeError::ConfigRead { .. }));
    }

    #[test]
    fn test_config_drives_engine() {
        use crate::engine::ThemeEngine;

        let config = ThemeConfig::from_toml(SAMPLE).unwrap();
        let engine = ThemeEngine::from_config(&config);
        assert_eq!(engine.rules().len(), 1);
        assert_eq!(
            engine.defaults().get(names::SURFACE, Appearance::Dark),
            Some(Argb(0xff22272b))
        );
        assert_eq!(
            engine.defaults().get(names::SURFACE_SUNKEN, Appearance::Light),
            Some(Argb(0xfff7f8f9))
        );
    }
}
