// ABOUTME: Color mode selection for theme generation
// ABOUTME: Light, dark, or both ("auto") token maps

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color mode '{0}', expected light, dark or auto")]
pub struct ModeParseError(pub String);

/// Which token maps a theme computation should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ColorMode {
    pub fn includes_light(self) -> bool {
        matches!(self, Self::Light | Self::Auto)
    }

    pub fn includes_dark(self) -> bool {
        matches!(self, Self::Dark | Self::Auto)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }

    /// Concrete appearances to generate, light first.
    pub fn appearances(self) -> &'static [Appearance] {
        match self {
            Self::Light => &[Appearance::Light],
            Self::Dark => &[Appearance::Dark],
            Self::Auto => &[Appearance::Light, Appearance::Dark],
        }
    }
}

/// One concrete appearance a token map is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            _ => Err(ModeParseError(s.to_string())),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
