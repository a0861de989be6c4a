// ABOUTME: Command-line arguments for the tonal binary
// ABOUTME: Flags take precedence over values from tonal.toml

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use tonal_types::{ColorMode, TokenMap, TokenValue};

#[derive(Debug, Parser)]
#[command(name = "tonal", version, about = "Generate design-token themes from a brand color")]
pub struct Args {
    /// Brand seed color, e.g. "#0C66E4"
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Token maps to produce: light, dark or auto (both)
    #[arg(short, long)]
    pub mode: Option<ColorMode>,

    /// Theme config file (default: <config dir>/tonal/tonal.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override a token with a ramp index or a hex color; repeatable
    #[arg(short = 'o', long = "override", value_name = "TOKEN=VALUE")]
    pub overrides: Vec<String>,

    /// Print resolved hex colors instead of ramp indices
    #[arg(long)]
    pub resolve: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parse `TOKEN=VALUE` pairs. Values that fit a `u8` are ramp indices,
/// anything else is kept as a literal color.
pub fn parse_overrides(pairs: &[String]) -> Result<TokenMap> {
    let mut overrides = TokenMap::new();
    for pair in pairs {
        let (token, value) = pair
            .split_once('=')
            .with_context(|| format!("override '{pair}' is not TOKEN=VALUE"))?;
        let (token, value) = (token.trim(), value.trim());
        if token.is_empty() || value.is_empty() {
            bail!("override '{pair}' has an empty token or value");
        }

        let value = match value.parse::<u8>() {
            Ok(index) => TokenValue::Index(index),
            Err(_) => TokenValue::Literal(value.to_string()),
        };
        overrides.insert(token.to_string(), value);
    }
    Ok(overrides)
}
