// ABOUTME: Hand-authored policy tables: contrast rules and per-appearance default token colors
// ABOUTME: Both are plain data handed to the token assignment, replaceable from theme config

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tonal_color::ContrastRatios;
use tonal_types::{Appearance, Argb};

use crate::names;

/// A foreground token that must keep `desired` contrast against a background token.
///
/// When it does not, every token in `affected` moves one ramp step away from the
/// background: darker in light mode, lighter in dark mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastRule {
    pub foreground: String,
    pub background_light: String,
    pub background_dark: String,
    pub desired: f64,
    pub affected: Vec<String>,
}

impl ContrastRule {
    pub fn new(
        foreground: &str,
        background_light: &str,
        background_dark: &str,
        desired: f64,
        affected: &[&str],
    ) -> Self {
        Self {
            foreground: foreground.to_string(),
            background_light: background_light.to_string(),
            background_dark: background_dark.to_string(),
            desired,
            affected: affected.iter().map(|token| token.to_string()).collect(),
        }
    }

    pub fn background(&self, appearance: Appearance) -> &str {
        match appearance {
            Appearance::Light => &self.background_light,
            Appearance::Dark => &self.background_dark,
        }
    }
}

/// The built-in rule table, checked in order.
pub fn default_rules() -> Vec<ContrastRule> {
    vec![
        ContrastRule::new(
            names::TEXT_BRAND,
            names::SURFACE_SUNKEN,
            names::SURFACE_OVERLAY,
            ContrastRatios::AA_NORMAL,
            &[
                names::TEXT_BRAND,
                names::ICON_BRAND,
                names::LINK,
                names::LINK_PRESSED,
            ],
        ),
        ContrastRule::new(
            names::TEXT_SELECTED,
            names::BACKGROUND_SELECTED,
            names::BACKGROUND_SELECTED,
            ContrastRatios::AA_NORMAL,
            &[names::TEXT_SELECTED, names::ICON_SELECTED],
        ),
        ContrastRule::new(
            names::BORDER_BRAND,
            names::SURFACE_SUNKEN,
            names::SURFACE_OVERLAY,
            ContrastRatios::AA_LARGE,
            &[names::BORDER_BRAND, names::BORDER_SELECTED],
        ),
        ContrastRule::new(
            names::CHART_BRAND,
            names::SURFACE_SUNKEN,
            names::SURFACE_OVERLAY,
            ContrastRatios::AA_LARGE,
            &[names::CHART_BRAND, names::CHART_BRAND_HOVERED],
        ),
    ]
}

/// Colors of tokens the theme does not assign, used when a rule refers to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultTokens {
    #[serde(default)]
    pub light: BTreeMap<String, Argb>,
    #[serde(default)]
    pub dark: BTreeMap<String, Argb>,
}

impl Default for DefaultTokens {
    fn default() -> Self {
        let light = [
            (names::SURFACE, Argb(0xffffffff)),
            (names::SURFACE_SUNKEN, Argb(0xfff7f8f9)),
            (names::SURFACE_OVERLAY, Argb(0xffffffff)),
        ];
        let dark = [
            (names::SURFACE, Argb(0xff1d2125)),
            (names::SURFACE_SUNKEN, Argb(0xff161a1d)),
            (names::SURFACE_OVERLAY, Argb(0xff282e33)),
        ];

        Self {
            light: light
                .into_iter()
                .map(|(token, color)| (token.to_string(), color))
                .collect(),
            dark: dark
                .into_iter()
                .map(|(token, color)| (token.to_string(), color))
                .collect(),
        }
    }
}

impl DefaultTokens {
    pub fn empty() -> Self {
        Self {
            light: BTreeMap::new(),
            dark: BTreeMap::new(),
        }
    }

    pub fn get(&self, token: &str, appearance: Appearance) -> Option<Argb> {
        match appearance {
            Appearance::Light => self.light.get(token).copied(),
            Appearance::Dark => self.dark.get(token).copied(),
        }
    }

    /// Add `other`'s entries, replacing colors already present.
    pub fn extend(&mut self, other: &DefaultTokens) {
        self.light
            .extend(other.light.iter().map(|(k, v)| (k.clone(), *v)));
        self.dark
            .extend(other.dark.iter().map(|(k, v)| (k.clone(), *v)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_cover_brand_tokens() {
        let rules = default_rules();
        assert_eq!(rules.len(), 4);
        assert_eq!(rules[0].foreground, names::TEXT_BRAND);
        assert!(rules[0].affected.iter().any(|t| t == names::LINK));
        assert_eq!(rules[0].desired, ContrastRatios::AA_NORMAL);
        assert_eq!(rules[2].desired, ContrastRatios::AA_LARGE);
    }

    #[test]
    fn test_rule_background_by_appearance() {
        let rule = &default_rules()[0];
        assert_eq!(rule.background(Appearance::Light), names::SURFACE_SUNKEN);
        assert_eq!(rule.background(Appearance::Dark), names::SURFACE_OVERLAY);
    }

    #[test]
    fn test_default_surfaces() {
        let defaults = DefaultTokens::default();
        assert_eq!(
            defaults.get(names::SURFACE_SUNKEN, Appearance::Light),
            Some(Argb(0xfff7f8f9))
        );
        assert_eq!(
            defaults.get(names::SURFACE_OVERLAY, Appearance::Dark),
            Some(Argb(0xff282e33))
        );
        assert_eq!(defaults.get("color.text", Appearance::Light), None);
    }

    #[test]
    fn test_extend_replaces_and_adds() {
        let mut defaults = DefaultTokens::default();
        let mut extra = DefaultTokens::empty();
        extra
            .light
            .insert(names::SURFACE_SUNKEN.to_string(), Argb(0xffeeeeee));
        extra.dark.insert("color.text".to_string(), Argb(0xffc7d1db));
        defaults.extend(&extra);

        assert_eq!(
            defaults.get(names::SURFACE_SUNKEN, Appearance::Light),
            Some(Argb(0xffeeeeee))
        );
        assert_eq!(
            defaults.get("color.text", Appearance::Dark),
            Some(Argb(0xffc7d1db))
        );
        assert_eq!(
            defaults.get(names::SURFACE_OVERLAY, Appearance::Light),
            Some(Argb::WHITE)
        );
    }

    #[test]
    fn test_rule_toml_shape() {
        let rule: ContrastRule = toml::from_str(
            r#"
            foreground = "color.text.brand"
            background_light = "elevation.surface"
            background_dark = "elevation.surface"
            desired = 7.0
            affected = ["color.text.brand"]
            "#,
        )
        .unwrap();
        assert_eq!(rule.desired, 7.0);
        assert_eq!(rule.affected, vec!["color.text.brand".to_string()]);
    }
}
