// ABOUTME: WCAG contrast measurement and tone solving for a target contrast ratio
// ABOUTME: Tone-space helpers work on L* (0..100); argb helpers use WCAG relative luminance (0..1)

use tonal_types::Argb;

use crate::colorimetry::{Y_FROM_LINRGB, linrgb_from_argb, lstar_from_y, y_from_lstar};

/// WCAG contrast ratio thresholds
pub struct ContrastRatios;

impl ContrastRatios {
    pub const AAA_NORMAL: f64 = 7.0;
    pub const AA_NORMAL: f64 = 4.5;
    pub const AA_LARGE: f64 = 3.0;
}

/// Largest disagreement tolerated between the requested and achieved ratio.
const RATIO_TOLERANCE: f64 = 0.04;
/// Pushes solved tones away from the boundary so 8-bit rounding keeps the ratio.
const TONE_MARGIN: f64 = 0.4;

/// WCAG relative luminance in 0..1.
pub fn relative_luminance(argb: Argb) -> f64 {
    let linrgb = linrgb_from_argb(argb);
    (0..3).map(|i| linrgb[i] * Y_FROM_LINRGB[i]).sum::<f64>() / 100.0
}

/// WCAG contrast ratio, 1.0 to 21.0, symmetric in its arguments.
pub fn contrast_ratio(a: Argb, b: Argb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// Contrast ratio of two luminances on the 0..100 scale.
pub fn ratio_of_ys(y1: f64, y2: f64) -> f64 {
    let lighter = y1.max(y2);
    let darker = y1.min(y2);
    (lighter + 5.0) / (darker + 5.0)
}

pub fn ratio_of_tones(tone_a: f64, tone_b: f64) -> f64 {
    let tone_a = tone_a.clamp(0.0, 100.0);
    let tone_b = tone_b.clamp(0.0, 100.0);
    ratio_of_ys(y_from_lstar(tone_a), y_from_lstar(tone_b))
}

/// Tone at least `ratio` lighter than `tone`, or `None` when even white falls short.
pub fn lighter(tone: f64, ratio: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&tone) {
        return None;
    }

    let dark_y = y_from_lstar(tone);
    let light_y = ratio * (dark_y + 5.0) - 5.0;
    let real = ratio_of_ys(light_y, dark_y);
    if real < ratio && (real - ratio).abs() > RATIO_TOLERANCE {
        return None;
    }

    let solved = lstar_from_y(light_y) + TONE_MARGIN;
    (0.0..=100.0).contains(&solved).then_some(solved)
}

/// Tone at least `ratio` darker than `tone`, or `None` when even black falls short.
pub fn darker(tone: f64, ratio: f64) -> Option<f64> {
    if !(0.0..=100.0).contains(&tone) {
        return None;
    }

    let light_y = y_from_lstar(tone);
    let dark_y = (light_y + 5.0) / ratio - 5.0;
    let real = ratio_of_ys(light_y, dark_y);
    if real < ratio && (real - ratio).abs() > RATIO_TOLERANCE {
        return None;
    }

    let solved = lstar_from_y(dark_y) - TONE_MARGIN;
    (0.0..=100.0).contains(&solved).then_some(solved)
}

/// [`lighter`], saturating at white.
pub fn lighter_unsafe(tone: f64, ratio: f64) -> f64 {
    lighter(tone, ratio).unwrap_or(100.0)
}

/// [`darker`], saturating at black.
pub fn darker_unsafe(tone: f64, ratio: f64) -> f64 {
    darker(tone, ratio).unwrap_or(0.0)
}
