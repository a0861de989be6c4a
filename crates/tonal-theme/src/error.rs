// ABOUTME: Error types for theme computation inputs and theme config files
// ABOUTME: Color math itself never fails; only parsing and validation at the boundary do

use std::path::PathBuf;

use thiserror::Error;
use tonal_types::ColorParseError;

pub type Result<T> = std::result::Result<T, ThemeError>;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid seed color '{input}': {source}")]
    InvalidSeed {
        input: String,
        #[source]
        source: ColorParseError,
    },

    #[error("invalid color '{value}' for token '{token}': {source}")]
    InvalidOverride {
        token: String,
        value: String,
        #[source]
        source: ColorParseError,
    },

    #[error("ramp index {index} for token '{token}' is out of range 0..=9")]
    InvalidIndex { token: String, index: u8 },

    #[error("failed to read theme config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse theme config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
}

impl ThemeError {
    pub fn invalid_seed<S: Into<String>>(input: S, source: ColorParseError) -> Self {
        Self::InvalidSeed {
            input: input.into(),
            source,
        }
    }

    pub fn invalid_override<T, V>(token: T, value: V, source: ColorParseError) -> Self
    where
        T: Into<String>,
        V: Into<String>,
    {
        Self::InvalidOverride {
            token: token.into(),
            value: value.into(),
            source,
        }
    }

    pub fn invalid_index<S: Into<String>>(token: S, index: u8) -> Self {
        Self::InvalidIndex {
            token: token.into(),
            index,
        }
    }

    /// Whether the error comes from caller input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSeed { .. } | Self::InvalidOverride { .. } | Self::InvalidIndex { .. }
        )
    }
}
