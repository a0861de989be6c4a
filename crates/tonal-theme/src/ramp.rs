// ABOUTME: Ten-step tonal ramp sharing the seed's hue and chroma, spaced by contrast against white
// ABOUTME: The step perceptually closest to the seed is replaced by the exact seed color

use std::collections::HashMap;
use std::sync::Arc;

use tonal_color::colorimetry::saturated_lightness;
use tonal_color::contrast::darker_unsafe;
use tonal_color::{Argb, Cam16, Hct, HctSolver};
use tonal_logging::{debug, trace};

pub const RAMP_SIZE: usize = 10;
pub const LAST_INDEX: u8 = (RAMP_SIZE - 1) as u8;

/// Contrast against white for each step of a ramp built from a dark seed.
pub const LOW_LUMINANCE_CONTRAST_RATIOS: [f64; RAMP_SIZE] =
    [1.12, 1.33, 2.03, 2.73, 3.33, 4.27, 5.2, 6.62, 12.46, 14.25];

/// Contrast against white for each step of a ramp built from a light seed.
pub const HIGH_LUMINANCE_CONTRAST_RATIOS: [f64; RAMP_SIZE] =
    [1.08, 1.24, 1.55, 1.99, 2.45, 3.34, 4.64, 6.1, 10.19, 12.6];

/// Full-saturation HSL lightness below which a seed counts as dark.
const DARK_SEED_LIGHTNESS: f64 = 0.4;
const TONE_OFFSET: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RampCurve {
    LowLuminance,
    HighLuminance,
}

impl RampCurve {
    pub fn for_seed(seed: Argb) -> Self {
        if saturated_lightness(seed) < DARK_SEED_LIGHTNESS {
            Self::LowLuminance
        } else {
            Self::HighLuminance
        }
    }

    pub fn contrast_ratios(self) -> &'static [f64; RAMP_SIZE] {
        match self {
            Self::LowLuminance => &LOW_LUMINANCE_CONTRAST_RATIOS,
            Self::HighLuminance => &HIGH_LUMINANCE_CONTRAST_RATIOS,
        }
    }

    /// Target tone for every step, lightest first.
    pub fn tones(self) -> [f64; RAMP_SIZE] {
        self.contrast_ratios()
            .map(|ratio| darker_unsafe(100.0, ratio) + TONE_OFFSET)
    }
}

/// Lightest color at index 0, darkest at index 9.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TonalRamp {
    colors: [Argb; RAMP_SIZE],
    replaced_index: u8,
    curve: RampCurve,
}

impl TonalRamp {
    pub fn generate(seed: Argb, solver: &HctSolver) -> Self {
        let vc = solver.viewing_conditions();
        let seed = Argb::from_rgb(seed.red(), seed.green(), seed.blue());
        let seed_hct = Hct::from_argb(seed, vc);
        let curve = RampCurve::for_seed(seed);

        let mut colors = curve
            .tones()
            .map(|tone| solver.solve_to_argb(seed_hct.hue(), seed_hct.chroma(), tone));

        let replaced_index = closest_index(seed, &colors, solver);
        colors[usize::from(replaced_index)] = seed;

        debug!(
            seed = %seed,
            curve = ?curve,
            replaced_index,
            "Generated tonal ramp"
        );
        trace!(colors = ?colors.map(|c| c.to_hex()), "Ramp steps");

        Self {
            colors,
            replaced_index,
            curve,
        }
    }

    pub fn colors(&self) -> &[Argb; RAMP_SIZE] {
        &self.colors
    }

    pub fn get(&self, index: u8) -> Option<Argb> {
        self.colors.get(usize::from(index)).copied()
    }

    /// The step that holds the exact seed color.
    pub fn replaced_index(&self) -> u8 {
        self.replaced_index
    }

    pub fn seed(&self) -> Argb {
        self.colors[usize::from(self.replaced_index)]
    }

    pub fn curve(&self) -> RampCurve {
        self.curve
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }
}

/// Index of the color nearest `target` in CAM16-UCS; the first one wins ties.
pub fn closest_index(target: Argb, colors: &[Argb], solver: &HctSolver) -> u8 {
    let vc = solver.viewing_conditions();
    let target = Cam16::from_argb(target, vc);

    let mut best = 0usize;
    let mut best_distance = f64::INFINITY;
    for (i, color) in colors.iter().enumerate() {
        let distance = target.distance(&Cam16::from_argb(*color, vc));
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    u8::try_from(best).unwrap_or(LAST_INDEX)
}

/// Caller-owned memo of generated ramps keyed by seed color.
#[derive(Debug, Default)]
pub struct RampCache {
    ramps: HashMap<Argb, Arc<TonalRamp>>,
}

impl RampCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_generate(&mut self, seed: Argb, solver: &HctSolver) -> Arc<TonalRamp> {
        let key = Argb::from_rgb(seed.red(), seed.green(), seed.blue());
        if let Some(ramp) = self.ramps.get(&key) {
            trace!(seed = %key, "Ramp cache hit");
            return Arc::clone(ramp);
        }

        let ramp = Arc::new(TonalRamp::generate(key, solver));
        self.ramps.insert(key, Arc::clone(&ramp));
        ramp
    }

    pub fn len(&self) -> usize {
        self.ramps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ramps.is_empty()
    }

    pub fn clear(&mut self) {
        self.ramps.clear();
    }
}
