// ABOUTME: Packed ARGB color representation used as the interchange format
// ABOUTME: Handles hex parsing/printing and channel access for 32-bit colors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex length {0}, expected 3, 4, 6 or 8 digits")]
    InvalidLength(usize),

    #[error("invalid hex digit '{0}'")]
    InvalidHex(char),
}

/// A color packed as `0xAARRGGBB`, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Argb(pub u32);

impl Argb {
    pub const BLACK: Argb = Argb(0xff00_0000);
    pub const WHITE: Argb = Argb(0xffff_ffff);

    /// Build an opaque color from 8-bit channels.
    #[inline]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(0xff00_0000 | (red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    #[must_use]
    #[inline]
    pub fn into_rgb(self) -> [u8; 3] {
        [self.red(), self.green(), self.blue()]
    }

    /// Upper-case `#RRGGBB`; alpha is dropped.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red(), self.green(), self.blue())
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.is_empty() {
            return Err(ColorParseError::Empty);
        }

        let nibbles = hex
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ColorParseError::InvalidHex(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let pair = |i: usize| nibbles[i] << 4 | nibbles[i + 1];
        let (r, g, b, a) = match nibbles.len() {
            3 => (nibbles[0] * 17, nibbles[1] * 17, nibbles[2] * 17, 255),
            4 => (
                nibbles[0] * 17,
                nibbles[1] * 17,
                nibbles[2] * 17,
                nibbles[3] * 17,
            ),
            6 => (pair(0), pair(2), pair(4), 255),
            8 => (pair(0), pair(2), pair(4), pair(6)),
            len => return Err(ColorParseError::InvalidLength(len)),
        };

        Ok(Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32))
    }
}

impl From<[u8; 3]> for Argb {
    fn from(rgb: [u8; 3]) -> Self {
        Self::from_rgb(rgb[0], rgb[1], rgb[2])
    }
}

impl FromStr for Argb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Argb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Argb {
    fn deserialize<D>(deserializer: D) -> Result<Argb, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Argb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
