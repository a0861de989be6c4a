// ABOUTME: Derives a tonal ramp and design-token maps from a single brand color
// ABOUTME: Policy layer above the color math: ramp curves, brand step selection, contrast rules

pub mod assignment;
pub mod config;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod names;
pub mod ramp;
pub mod rules;

pub use assignment::{BrandSelection, Nudge, resolve_token_map, update_tokens_for_contrast};
pub use config::ThemeConfig;
pub use engine::{ComputedTheme, ResolvedTheme, ThemeEngine, compute_theme};
pub use error::{Result, ThemeError};
pub use interaction::interaction_states;
pub use ramp::{RampCache, RampCurve, TonalRamp};
pub use rules::{ContrastRule, DefaultTokens, default_rules};

pub use tonal_types::{Appearance, Argb, ColorMode, ThemeOutput, TokenMap, TokenValue};
