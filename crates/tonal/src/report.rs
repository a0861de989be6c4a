// ABOUTME: JSON report printed by the tonal binary
// ABOUTME: The ramp as hex colors plus either index maps or resolved color maps

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use tonal_theme::{Argb, ComputedTheme, TokenMap};

#[derive(Debug, Serialize)]
pub struct Report<M> {
    pub ramp: Vec<Argb>,
    pub replaced_index: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<M>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark: Option<M>,
}

impl Report<TokenMap> {
    pub fn indices(theme: &ComputedTheme) -> Self {
        Report {
            ramp: theme.ramp.colors().to_vec(),
            replaced_index: theme.ramp.replaced_index(),
            light: theme.output.light.clone(),
            dark: theme.output.dark.clone(),
        }
    }
}

impl Report<BTreeMap<String, Argb>> {
    pub fn resolved(theme: &ComputedTheme) -> Result<Self> {
        let resolved = theme.resolve()?;
        Ok(Report {
            ramp: theme.ramp.colors().to_vec(),
            replaced_index: theme.ramp.replaced_index(),
            light: resolved.light,
            dark: resolved.dark,
        })
    }
}

/// Pretty JSON for `theme`, resolved to colors when `resolve` is set.
pub fn render(theme: &ComputedTheme, resolve: bool) -> Result<String> {
    let json = if resolve {
        serde_json::to_string_pretty(&Report::resolved(theme)?)?
    } else {
        serde_json::to_string_pretty(&Report::indices(theme))?
    };
    Ok(json)
}
