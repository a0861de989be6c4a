// ABOUTME: tonal command-line entry point
// ABOUTME: Loads config, computes the theme for a seed color and prints it as JSON

mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use tonal_logging::{LoggingConfig, debug, info, init_logging_with_config};
use tonal_theme::{Argb, ThemeConfig, ThemeEngine, ThemeError};

use crate::cli::{Args, parse_overrides};

fn setup_logging(verbosity: u8) -> Result<()> {
    let config = LoggingConfig::from_env()
        .context("Failed to create logging config from environment")?
        .with_verbosity(verbosity);

    init_logging_with_config(config).context("Failed to initialize tonal logging")?;
    debug!("Tonal logging system initialized");
    Ok(())
}

fn load_config(args: &Args) -> Result<ThemeConfig> {
    let config = match &args.config {
        Some(path) => ThemeConfig::load_from_path(path)?,
        None => ThemeConfig::load()?,
    };
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args).context("Failed to load theme config")?;

    let seed = match (&args.seed, config.seed) {
        (Some(hex), _) => hex
            .parse::<Argb>()
            .map_err(|source| ThemeError::invalid_seed(hex.as_str(), source))?,
        (None, Some(seed)) => seed,
        (None, None) => {
            anyhow::bail!("no seed color given; pass --seed or set `seed` in tonal.toml")
        }
    };
    let mode = args.mode.unwrap_or(config.mode);

    let mut overrides = config.overrides.clone();
    overrides.extend(parse_overrides(&args.overrides)?);

    let engine = ThemeEngine::from_config(&config);
    let theme = engine
        .compute(seed, mode, &overrides)
        .with_context(|| format!("Failed to compute theme for {seed}"))?;
    info!(
        seed = %seed,
        mode = %mode,
        replaced_index = theme.ramp.replaced_index(),
        "Theme generated"
    );

    println!("{}", report::render(&theme, args.resolve)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose)?;
    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_run_with_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tonal.toml");
        fs::write(&path, "seed = \"#0C66E4\"\nmode = \"light\"\n").unwrap();

        let args = Args::try_parse_from(["tonal", "--config", path.to_str().unwrap()]).unwrap();
        run(args).unwrap();
    }

    #[test]
    fn test_run_without_seed_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tonal.toml");
        fs::write(&path, "mode = \"dark\"\n").unwrap();

        let args = Args::try_parse_from(["tonal", "--config", path.to_str().unwrap()]).unwrap();
        let err = run(args).unwrap_err();
        assert!(err.to_string().contains("no seed color"));
    }

    #[test]
    fn test_bad_seed_flag_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tonal.toml");
        fs::write(&path, "").unwrap();

        let args = Args::try_parse_from([
            "tonal",
            "--config",
            path.to_str().unwrap(),
            "--seed",
            "#xyz",
        ])
        .unwrap();
        assert!(run(args).is_err());
    }
}
