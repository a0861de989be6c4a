// ABOUTME: Theme engine tying the gamut solver, rule table and default tokens together
// ABOUTME: Entry point for turning one seed color into light and/or dark token maps

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tonal_color::{Argb, HctSolver};
use tonal_logging::{debug, instrument, timed};
use tonal_types::{Appearance, ColorMode, ThemeOutput, TokenMap};

use crate::assignment::{build_token_map, resolve_token_map, validate_overrides};
use crate::config::ThemeConfig;
use crate::error::{Result, ThemeError};
use crate::ramp::{RampCache, TonalRamp};
use crate::rules::{ContrastRule, DefaultTokens, default_rules};

const SLOW_THEME_THRESHOLD: Duration = Duration::from_millis(50);

/// Everything a theme computation depends on besides the seed.
#[derive(Debug, Clone)]
pub struct ThemeEngine {
    solver: HctSolver,
    rules: Vec<ContrastRule>,
    defaults: DefaultTokens,
}

impl Default for ThemeEngine {
    fn default() -> Self {
        Self::new(HctSolver::default(), default_rules(), DefaultTokens::default())
    }
}

/// A computed theme together with the ramp its indices point into.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedTheme {
    pub ramp: Arc<TonalRamp>,
    pub output: ThemeOutput,
}

/// Token maps with every value turned into a color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub light: Option<BTreeMap<String, Argb>>,
    pub dark: Option<BTreeMap<String, Argb>>,
}

impl ComputedTheme {
    pub fn resolve(&self) -> Result<ResolvedTheme> {
        let resolve = |map: &Option<TokenMap>| {
            map.as_ref()
                .map(|map| resolve_token_map(map, &self.ramp))
                .transpose()
        };

        Ok(ResolvedTheme {
            light: resolve(&self.output.light)?,
            dark: resolve(&self.output.dark)?,
        })
    }
}

impl ThemeEngine {
    pub fn new(solver: HctSolver, rules: Vec<ContrastRule>, defaults: DefaultTokens) -> Self {
        Self {
            solver,
            rules,
            defaults,
        }
    }

    /// Engine using the config's rule table, if any, and its default token additions.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut defaults = DefaultTokens::default();
        defaults.extend(&config.defaults);
        let rules = config.rules.clone().unwrap_or_else(default_rules);
        Self::new(HctSolver::default(), rules, defaults)
    }

    #[must_use]
    pub fn with_rules(mut self, rules: Vec<ContrastRule>) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: DefaultTokens) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn solver(&self) -> &HctSolver {
        &self.solver
    }

    pub fn rules(&self) -> &[ContrastRule] {
        &self.rules
    }

    pub fn defaults(&self) -> &DefaultTokens {
        &self.defaults
    }

    pub fn ramp(&self, seed: Argb) -> TonalRamp {
        TonalRamp::generate(seed, &self.solver)
    }

    /// Token maps for `mode` from an already generated ramp.
    pub fn assign(
        &self,
        ramp: &TonalRamp,
        mode: ColorMode,
        overrides: &TokenMap,
    ) -> Result<ThemeOutput> {
        validate_overrides(overrides)?;

        let mut output = ThemeOutput::default();
        for &appearance in mode.appearances() {
            let map = build_token_map(ramp, appearance, overrides, &self.rules, &self.defaults);
            match appearance {
                Appearance::Light => output.light = Some(map),
                Appearance::Dark => output.dark = Some(map),
            }
        }
        Ok(output)
    }

    #[instrument(skip(self, overrides), fields(seed = %seed))]
    pub fn compute(
        &self,
        seed: Argb,
        mode: ColorMode,
        overrides: &TokenMap,
    ) -> Result<ComputedTheme> {
        let (ramp, output) = timed!("compute_theme", warn_threshold: SLOW_THEME_THRESHOLD, {
            let ramp = Arc::new(self.ramp(seed));
            let output = self.assign(&ramp, mode, overrides)?;
            (ramp, output)
        });
        debug!(replaced_index = ramp.replaced_index(), "Theme computed");
        Ok(ComputedTheme { ramp, output })
    }

    /// Like [`ThemeEngine::compute`], reusing ramps from `cache`.
    pub fn compute_cached(
        &self,
        cache: &mut RampCache,
        seed: Argb,
        mode: ColorMode,
        overrides: &TokenMap,
    ) -> Result<ComputedTheme> {
        let (ramp, output) = timed!("compute_theme_cached", {
            let ramp = cache.get_or_generate(seed, &self.solver);
            let output = self.assign(&ramp, mode, overrides)?;
            (ramp, output)
        });
        Ok(ComputedTheme { ramp, output })
    }

    /// Parse `seed_hex` and compute the token maps for `mode`.
    pub fn compute_theme(
        &self,
        seed_hex: &str,
        mode: ColorMode,
        overrides: Option<&TokenMap>,
    ) -> Result<ThemeOutput> {
        let seed: Argb = seed_hex
            .parse()
            .map_err(|source| ThemeError::invalid_seed(seed_hex, source))?;
        let empty = TokenMap::new();
        let computed = self.compute(seed, mode, overrides.unwrap_or(&empty))?;
        debug!(seed = %seed, mode = %mode, "Computed custom theme");
        Ok(computed.output)
    }
}

/// Compute a theme with the built-in solver, rules and default tokens.
pub fn compute_theme(
    seed_hex: &str,
    mode: ColorMode,
    overrides: Option<&TokenMap>,
) -> Result<ThemeOutput> {
    ThemeEngine::default().compute_theme(seed_hex, mode, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names;
    use tonal_color::{ContrastRatios, contrast_ratio};
    use tonal_types::TokenValue;

    #[test]
    fn test_compute_theme_light_only() {
        let output = compute_theme("#0C66E4", ColorMode::Light, None).unwrap();
        assert!(output.dark.is_none());
        let light = output.light.unwrap();
        for key in [
            names::TEXT_BRAND,
            names::BACKGROUND_BRAND_BOLD,
            names::BORDER_BRAND,
        ] {
            assert!(light.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn test_mode_selects_maps() {
        let dark = compute_theme("#0C66E4", ColorMode::Dark, None).unwrap();
        assert!(dark.light.is_none() && dark.dark.is_some());
        let auto = compute_theme("#0C66E4", ColorMode::Auto, None).unwrap();
        assert!(auto.light.is_some() && auto.dark.is_some());
    }

    #[test]
    fn test_brand_blue_end_to_end() {
        let engine = ThemeEngine::default();
        let computed = engine
            .compute(Argb(0xff0c66e4), ColorMode::Light, &TokenMap::new())
            .unwrap();
        let light = computed.output.light.as_ref().unwrap();
        assert_eq!(light[names::TEXT_BRAND], TokenValue::Index(6));

        let resolved = computed.resolve().unwrap();
        let colors = resolved.light.unwrap();
        assert_eq!(colors[names::TEXT_BRAND].to_hex(), "#0C66E4");
        assert!(
            contrast_ratio(colors[names::TEXT_BRAND], Argb::WHITE) >= ContrastRatios::AA_NORMAL
        );
        assert!(
            contrast_ratio(colors[names::BORDER_BRAND], Argb::WHITE) >= ContrastRatios::AA_LARGE
        );
    }

    #[test]
    fn test_deterministic_output() {
        let a = compute_theme("#0C66E4", ColorMode::Auto, None).unwrap();
        let b = compute_theme("0c66e4", ColorMode::Auto, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dark_inversion_of_bold_background() {
        let output = compute_theme("#0C66E4", ColorMode::Auto, None).unwrap();
        let light = output.light.unwrap();
        let dark = output.dark.unwrap();
        let light_index = light[names::BACKGROUND_BRAND_BOLD].as_index().unwrap();
        let dark_index = dark[names::BACKGROUND_BRAND_BOLD].as_index().unwrap();
        assert_eq!(dark_index, 9 - light_index);
    }

    #[test]
    fn test_invalid_seed() {
        let err = compute_theme("#12", ColorMode::Light, None).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidSeed { ref input, .. } if input == "#12"));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let mut overrides = TokenMap::new();
        overrides.insert(names::LINK.into(), TokenValue::Index(11));
        let err = compute_theme("#0C66E4", ColorMode::Auto, Some(&overrides)).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidIndex { index: 11, .. }));
    }

    #[test]
    fn test_overrides_flow_into_both_maps() {
        let mut overrides = TokenMap::new();
        overrides.insert(names::BACKGROUND_BRAND_BOLD.into(), TokenValue::Index(7));
        overrides.insert(names::LINK.into(), TokenValue::from("#0055CC"));

        let output = compute_theme("#0C66E4", ColorMode::Auto, Some(&overrides)).unwrap();
        let light = output.light.unwrap();
        let dark = output.dark.unwrap();
        assert_eq!(light[names::BACKGROUND_BRAND_BOLD], TokenValue::Index(7));
        assert_eq!(dark[names::BACKGROUND_BRAND_BOLD], TokenValue::Index(2));
        assert_eq!(light[names::LINK], TokenValue::from("#0055CC"));
        assert_eq!(dark[names::LINK], TokenValue::from("#0055CC"));
    }

    #[test]
    fn test_cached_matches_uncached() {
        let engine = ThemeEngine::default();
        let mut cache = RampCache::new();
        let seed = Argb(0xffe2483d);
        let overrides = TokenMap::new();

        let cached = engine
            .compute_cached(&mut cache, seed, ColorMode::Auto, &overrides)
            .unwrap();
        let again = engine
            .compute_cached(&mut cache, seed, ColorMode::Auto, &overrides)
            .unwrap();
        let fresh = engine.compute(seed, ColorMode::Auto, &overrides).unwrap();

        assert!(Arc::ptr_eq(&cached.ramp, &again.ramp));
        assert_eq!(cached, fresh);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_custom_rules_replace_builtin() {
        let engine = ThemeEngine::default().with_rules(Vec::new());
        let output = engine
            .compute(Argb(0xffe2483d), ColorMode::Light, &TokenMap::new())
            .unwrap()
            .output;
        // Without rules the red seed keeps its text on the seed step
        assert_eq!(
            output.light.unwrap()[names::TEXT_BRAND],
            TokenValue::Index(6)
        );
    }
}
