// ABOUTME: Pure data types with no cross-crate dependencies
// ABOUTME: Foundation layer for all other tonal crates

pub mod color;
pub mod mode;
pub mod token;

// Re-export commonly used types
pub use color::{Argb, ColorParseError};
pub use mode::{Appearance, ColorMode, ModeParseError};
pub use token::{ThemeOutput, TokenMap, TokenValue};
