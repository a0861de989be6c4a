// ABOUTME: CAM16 viewing conditions: the precomputed environment every transform needs
// ABOUTME: Built once from a white point and surround, then shared read-only by value or reference

use std::f64::consts::PI;

use crate::colorimetry::{WHITE_POINT_D65, y_from_lstar};
use crate::math::{Mat3, Vec3, lerp, matrix_multiply};

/// XYZ to CAM16 cone space (M16).
pub const XYZ_TO_CAM16RGB: Mat3 = [
    [0.401288, 0.650173, -0.051461],
    [-0.250268, 1.204414, 0.045854],
    [-0.002079, 0.048952, 0.953127],
];

/// CAM16 cone space back to XYZ (M16 inverse).
pub const CAM16RGB_TO_XYZ: Mat3 = [
    [1.86206786, -1.01125463, 0.14918677],
    [0.38752654, 0.62144744, -0.00897398],
    [-0.01584150, -0.03412294, 1.04996444],
];

/// Environment a color is viewed in, with every scalar CAM16 derives from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingConditions {
    /// Background relative luminance, Yb / Yw
    pub n: f64,
    /// Achromatic response of the adapted white
    pub aw: f64,
    /// Background induction factor
    pub nbb: f64,
    /// Chromatic induction factor
    pub ncb: f64,
    /// Surround exponential nonlinearity
    pub c: f64,
    /// Chromatic induction from surround
    pub nc: f64,
    /// Per-channel chromatic adaptation discount
    pub rgb_d: Vec3,
    /// Luminance-level adaptation factor
    pub fl: f64,
    /// Fourth root of `fl`
    pub fl_root: f64,
    /// Base exponential nonlinearity
    pub z: f64,
}

impl ViewingConditions {
    /// Derive viewing conditions.
    ///
    /// * `white_point` - reference white in XYZ, Y = 100
    /// * `adapting_luminance` - luminance of the adapting field, cd/m^2
    /// * `background_lstar` - L* of the background
    /// * `surround` - 0 (dark) to 2 (average)
    /// * `discounting_illuminant` - assume full adaptation to the illuminant
    pub fn make(
        white_point: Vec3,
        adapting_luminance: f64,
        background_lstar: f64,
        surround: f64,
        discounting_illuminant: bool,
    ) -> Self {
        let background_lstar = background_lstar.max(0.1);
        let [r_w, g_w, b_w] = matrix_multiply(white_point, &XYZ_TO_CAM16RGB);

        let f = 0.8 + surround / 10.0;
        let c = if f >= 0.9 {
            lerp(0.59, 0.69, (f - 0.9) * 10.0)
        } else {
            lerp(0.525, 0.59, (f - 0.8) * 10.0)
        };
        let d = if discounting_illuminant {
            1.0
        } else {
            f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp())
        }
        .clamp(0.0, 1.0);
        let nc = f;

        let rgb_d = [
            d * (100.0 / r_w) + 1.0 - d,
            d * (100.0 / g_w) + 1.0 - d,
            d * (100.0 / b_w) + 1.0 - d,
        ];

        let k = 1.0 / (5.0 * adapting_luminance + 1.0);
        let k4 = k * k * k * k;
        let k4f = 1.0 - k4;
        let fl = k4 * adapting_luminance + 0.1 * k4f * k4f * (5.0 * adapting_luminance).cbrt();

        let n = y_from_lstar(background_lstar) / white_point[1];
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);
        let ncb = nbb;

        let compress = |channel: f64| {
            let factor = (fl * channel / 100.0).powf(0.42);
            400.0 * factor / (factor + 27.13)
        };
        let rgb_a = [
            compress(rgb_d[0] * r_w),
            compress(rgb_d[1] * g_w),
            compress(rgb_d[2] * b_w),
        ];
        let aw = (2.0 * rgb_a[0] + rgb_a[1] + 0.05 * rgb_a[2]) * nbb;

        Self {
            n,
            aw,
            nbb,
            ncb,
            c,
            nc,
            rgb_d,
            fl,
            fl_root: fl.powf(0.25),
            z,
        }
    }

    /// sRGB-like conditions: D65 white, 200 lux ambient, mid-gray (L* 50) background,
    /// average surround.
    pub fn standard() -> Self {
        Self::make(
            WHITE_POINT_D65,
            200.0 / PI * y_from_lstar(50.0) / 100.0,
            50.0,
            2.0,
            false,
        )
    }
}

impl Default for ViewingConditions {
    fn default() -> Self {
        Self::standard()
    }
}
