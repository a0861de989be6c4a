// ABOUTME: Contrast-driven assignment of ramp steps to design tokens, per appearance
// ABOUTME: Base selection from the seed's contrast, dark mirroring, caller overrides and the rule pass

use std::collections::BTreeMap;

use tonal_color::{Argb, ContrastRatios, contrast_ratio};
use tonal_logging::{debug, trace};
use tonal_types::{Appearance, TokenMap, TokenValue};

use crate::error::{Result, ThemeError};
use crate::interaction::interaction_states;
use crate::names;
use crate::ramp::{LAST_INDEX, TonalRamp};
use crate::rules::{ContrastRule, DefaultTokens};


/// Upper bound of the contrast band in which a seed sitting on step 6 gets its
/// interaction states moved one step further.
const MARGINAL_CONTRAST: f64 = 5.4;
const MARGINAL_INDEX: u8 = 6;
/// Bold background used when the seed itself is too light for white text.
const FALLBACK_BOLD_INDEX: u8 = 6;
const CHART_INDEX: u8 = 5;

/// Ramp steps chosen for the brand token family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandSelection {
    /// Text, icon, link and border steps.
    pub text: u8,
    pub bold: u8,
    pub bold_hovered: u8,
    pub bold_pressed: u8,
}

impl BrandSelection {
    /// Choose steps from the seed's position and its contrast against white.
    pub fn select(replaced_index: u8, contrast_with_white: f64) -> Self {
        if contrast_with_white >= ContrastRatios::AA_NORMAL {
            let state_base = if contrast_with_white < MARGINAL_CONTRAST
                && replaced_index == MARGINAL_INDEX
            {
                replaced_index + 1
            } else {
                replaced_index
            };
            let [bold_hovered, bold_pressed] = interaction_states::<2>(state_base);

            Self {
                text: replaced_index,
                bold: replaced_index,
                bold_hovered,
                bold_pressed,
            }
        } else {
            // A seed on step 6 is that step, so both cases land on the same index
            let bold = FALLBACK_BOLD_INDEX;
            let [bold_hovered, bold_pressed] = interaction_states::<2>(bold);

            Self {
                text: bold,
                bold,
                bold_hovered,
                bold_pressed,
            }
        }
    }
}

/// The light-appearance token map for `ramp`, before overrides and contrast correction.
pub fn base_token_map(ramp: &TonalRamp) -> TokenMap {
    let contrast = contrast_ratio(ramp.seed(), Argb::WHITE);
    let brand = BrandSelection::select(ramp.replaced_index(), contrast);
    let [boldest_hovered, boldest_pressed] = interaction_states::<2>(LAST_INDEX);

    debug!(
        contrast_with_white = contrast,
        replaced_index = ramp.replaced_index(),
        meets_aa = contrast >= ContrastRatios::AA_NORMAL,
        selection = ?brand,
        "Selected brand ramp steps"
    );

    let entries = [
        (names::TEXT_BRAND, brand.text),
        (names::ICON_BRAND, brand.text),
        (names::LINK, brand.text),
        (names::LINK_PRESSED, brand.bold_hovered),
        (names::BORDER_BRAND, brand.text),
        (names::BACKGROUND_BRAND_SUBTLEST, 0),
        (names::BACKGROUND_BRAND_SUBTLEST_HOVERED, 1),
        (names::BACKGROUND_BRAND_SUBTLEST_PRESSED, 2),
        (names::BACKGROUND_BRAND_BOLD, brand.bold),
        (names::BACKGROUND_BRAND_BOLD_HOVERED, brand.bold_hovered),
        (names::BACKGROUND_BRAND_BOLD_PRESSED, brand.bold_pressed),
        (names::BACKGROUND_BRAND_BOLDEST, LAST_INDEX),
        (names::BACKGROUND_BRAND_BOLDEST_HOVERED, boldest_hovered),
        (names::BACKGROUND_BRAND_BOLDEST_PRESSED, boldest_pressed),
        (names::TEXT_SELECTED, brand.text),
        (names::ICON_SELECTED, brand.text),
        (names::BORDER_SELECTED, brand.text),
        (names::BACKGROUND_SELECTED, 0),
        (names::BACKGROUND_SELECTED_HOVERED, 1),
        (names::BACKGROUND_SELECTED_PRESSED, 2),
        (names::BACKGROUND_SELECTED_BOLD, brand.bold),
        (names::BACKGROUND_SELECTED_BOLD_HOVERED, brand.bold_hovered),
        (names::BACKGROUND_SELECTED_BOLD_PRESSED, brand.bold_pressed),
        (names::CHART_BRAND, CHART_INDEX),
        (names::CHART_BRAND_HOVERED, CHART_INDEX + 1),
    ];

    entries
        .into_iter()
        .map(|(token, index)| (token.to_string(), TokenValue::Index(index)))
        .collect()
}

/// Step `index` as seen from the other end of the ramp.
pub fn mirror_index(index: u8) -> u8 {
    LAST_INDEX.saturating_sub(index)
}

/// Dark appearance of a light map: every index mirrored, literals untouched.
pub fn mirror_for_dark(map: &TokenMap) -> TokenMap {
    map.iter()
        .map(|(token, value)| {
            let value = match value {
                TokenValue::Index(index) => TokenValue::Index(mirror_index(*index)),
                TokenValue::Literal(literal) => TokenValue::Literal(literal.clone()),
            };
            (token.clone(), value)
        })
        .collect()
}

/// Reject override indices outside the ramp and literals that are not colors.
pub fn validate_overrides(overrides: &TokenMap) -> Result<()> {
    for (token, value) in overrides {
        match value {
            TokenValue::Index(index) if *index > LAST_INDEX => {
                return Err(ThemeError::invalid_index(token, *index));
            }
            TokenValue::Index(_) => {}
            TokenValue::Literal(literal) => {
                literal
                    .parse::<Argb>()
                    .map_err(|source| ThemeError::invalid_override(token, literal, source))?;
            }
        }
    }
    Ok(())
}

/// Overlay caller overrides, given in light-appearance terms. Indices are
/// mirrored for dark; literals apply to both appearances as written.
pub fn apply_overrides(map: &mut TokenMap, overrides: &TokenMap, appearance: Appearance) {
    for (token, value) in overrides {
        let value = match (appearance, value) {
            (Appearance::Dark, TokenValue::Index(index)) => TokenValue::Index(mirror_index(*index)),
            _ => value.clone(),
        };
        map.insert(token.clone(), value);
    }
}

/// Color of `token`: the map entry if there is one, else the appearance default.
fn resolve_token(
    token: &str,
    map: &TokenMap,
    ramp: &TonalRamp,
    defaults: &DefaultTokens,
    appearance: Appearance,
) -> Option<Argb> {
    match map.get(token) {
        Some(TokenValue::Index(index)) => ramp.get(*index),
        Some(TokenValue::Literal(literal)) => literal.parse().ok(),
        None => defaults.get(token, appearance),
    }
}

/// A token moved by the contrast pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nudge {
    pub token: String,
    pub from: u8,
    pub to: u8,
}

/// Walk `rules` in order and move the affected tokens one step away from the
/// background wherever the measured contrast is at or below the desired ratio.
///
/// Rules whose endpoints cannot be resolved are skipped. A single pass is made;
/// contrast still unmet afterwards is accepted.
pub fn update_tokens_for_contrast(
    map: &mut TokenMap,
    ramp: &TonalRamp,
    rules: &[ContrastRule],
    defaults: &DefaultTokens,
    appearance: Appearance,
) -> Vec<Nudge> {
    let mut nudges = Vec::new();

    for rule in rules {
        let background = rule.background(appearance);
        let (Some(fg), Some(bg)) = (
            resolve_token(&rule.foreground, map, ramp, defaults, appearance),
            resolve_token(background, map, ramp, defaults, appearance),
        ) else {
            trace!(
                foreground = %rule.foreground,
                background,
                "Skipping contrast rule with unresolved token"
            );
            continue;
        };

        let actual = contrast_ratio(fg, bg);
        if actual > rule.desired {
            continue;
        }

        debug!(
            appearance = %appearance,
            foreground = %rule.foreground,
            background,
            actual,
            desired = rule.desired,
            "Contrast rule unmet, nudging tokens"
        );

        for token in &rule.affected {
            let Some(index) = map.get(token).and_then(TokenValue::as_index) else {
                continue;
            };
            let nudged = match appearance {
                Appearance::Light => index.saturating_add(1).min(LAST_INDEX),
                Appearance::Dark => index.saturating_sub(1),
            };
            if nudged != index {
                map.insert(token.clone(), TokenValue::Index(nudged));
                nudges.push(Nudge {
                    token: token.clone(),
                    from: index,
                    to: nudged,
                });
            }
        }
    }

    nudges
}

/// Complete token map for one appearance.
pub fn build_token_map(
    ramp: &TonalRamp,
    appearance: Appearance,
    overrides: &TokenMap,
    rules: &[ContrastRule],
    defaults: &DefaultTokens,
) -> TokenMap {
    let base = base_token_map(ramp);
    let mut map = match appearance {
        Appearance::Light => base,
        Appearance::Dark => mirror_for_dark(&base),
    };
    apply_overrides(&mut map, overrides, appearance);

    let nudges = update_tokens_for_contrast(&mut map, ramp, rules, defaults, appearance);
    if !nudges.is_empty() {
        trace!(appearance = %appearance, ?nudges, "Contrast pass adjusted tokens");
    }
    map
}

/// Turn indices into ramp colors and literals into parsed colors.
pub fn resolve_token_map(map: &TokenMap, ramp: &TonalRamp) -> Result<BTreeMap<String, Argb>> {
    map.iter()
        .map(|(token, value)| -> Result<(String, Argb)> {
            let color = match value {
                TokenValue::Index(index) => ramp
                    .get(*index)
                    .ok_or_else(|| ThemeError::invalid_index(token, *index))?,
                TokenValue::Literal(literal) => literal
                    .parse::<Argb>()
                    .map_err(|source| ThemeError::invalid_override(token, literal, source))?,
            };
            Ok((token.clone(), color))
        })
        .collect()
}
