// ABOUTME: sRGB transfer functions and linear-RGB / XYZ / L* conversions
// ABOUTME: Linear values are scaled to 0..100; 8-bit results are rounded and clamped

use tonal_types::Argb;

use crate::math::{Mat3, Vec3, matrix_multiply};

pub const SRGB_TO_XYZ: Mat3 = [
    [0.41233895, 0.35762064, 0.18051042],
    [0.2126, 0.7152, 0.0722],
    [0.01932141, 0.11916382, 0.95034478],
];

pub const XYZ_TO_SRGB: Mat3 = [
    [
        3.2413774792388685,
        -1.5376652402851851,
        -0.49885366846268053,
    ],
    [-0.9691452513005321, 1.8758853451067872, 0.04156585616912061],
    [
        0.05562093689691305,
        -0.20395524564742123,
        1.0571799111220335,
    ],
];

/// D65 reference white, Y normalized to 100.
pub const WHITE_POINT_D65: Vec3 = [95.047, 100.0, 108.883];

/// Relative luminance weights of the linear sRGB channels.
pub const Y_FROM_LINRGB: Vec3 = [0.2126, 0.7152, 0.0722];

// sRGB piecewise transfer breakpoints
const LINEAR_SEGMENT_ENCODED: f64 = 0.040_448_236_277_108_2;
const LINEAR_SEGMENT_DECODED: f64 = 0.003_130_8;

// CIE L* constants
const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

/// Decode a normalized (0..1) sRGB value to normalized linear light.
#[inline]
pub fn decode_unit(normalized: f64) -> f64 {
    if normalized <= LINEAR_SEGMENT_ENCODED {
        normalized / 12.92
    } else {
        ((normalized + 0.055) / 1.055).powf(2.4)
    }
}

/// Encode normalized linear light to a normalized (0..1) sRGB value.
#[inline]
pub fn encode_unit(normalized: f64) -> f64 {
    if normalized <= LINEAR_SEGMENT_DECODED {
        normalized * 12.92
    } else {
        1.055 * normalized.powf(1.0 / 2.4) - 0.055
    }
}

/// 8-bit sRGB channel to linear light in 0..100.
#[inline]
pub fn linearized(component: u8) -> f64 {
    decode_unit(f64::from(component) / 255.0) * 100.0
}

/// Linear light in 0..100 to an 8-bit sRGB channel, rounded and clamped.
#[inline]
pub fn delinearized(component: f64) -> u8 {
    let encoded = encode_unit(component / 100.0) * 255.0;
    encoded.round().clamp(0.0, 255.0) as u8
}

pub fn argb_from_linrgb(linrgb: Vec3) -> Argb {
    Argb::from_rgb(
        delinearized(linrgb[0]),
        delinearized(linrgb[1]),
        delinearized(linrgb[2]),
    )
}

pub fn linrgb_from_argb(argb: Argb) -> Vec3 {
    [
        linearized(argb.red()),
        linearized(argb.green()),
        linearized(argb.blue()),
    ]
}

pub fn argb_from_xyz(xyz: Vec3) -> Argb {
    argb_from_linrgb(matrix_multiply(xyz, &XYZ_TO_SRGB))
}

pub fn xyz_from_argb(argb: Argb) -> Vec3 {
    matrix_multiply(linrgb_from_argb(argb), &SRGB_TO_XYZ)
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        (LAB_KAPPA * t + 16.0) / 116.0
    }
}

#[inline]
fn lab_invf(ft: f64) -> f64 {
    let ft3 = ft * ft * ft;
    if ft3 > LAB_EPSILON {
        ft3
    } else {
        (116.0 * ft - 16.0) / LAB_KAPPA
    }
}

/// CIE L* (tone) to relative luminance Y in 0..100.
#[inline]
pub fn y_from_lstar(lstar: f64) -> f64 {
    100.0 * lab_invf((lstar + 16.0) / 116.0)
}

/// Relative luminance Y in 0..100 to CIE L*.
#[inline]
pub fn lstar_from_y(y: f64) -> f64 {
    lab_f(y / 100.0) * 116.0 - 16.0
}

pub fn lstar_from_argb(argb: Argb) -> f64 {
    lstar_from_y(xyz_from_argb(argb)[1])
}

/// The neutral gray with the given L*.
pub fn argb_from_lstar(lstar: f64) -> Argb {
    let component = delinearized(y_from_lstar(lstar));
    Argb::from_rgb(component, component, component)
}

/// HSL lightness, in 0..1, of `argb` pushed to full saturation.
///
/// The hue and the brightest channel are kept and the weakest channel drops to
/// zero, so the result is half the brightest channel and never exceeds the
/// plain HSL lightness `(max + min) / 2`.
pub fn saturated_lightness(argb: Argb) -> f64 {
    let [r, g, b] = argb.into_rgb();
    let max = r.max(g).max(b);
    f64::from(max) / 2.0 / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linearize_extremes() {
        assert_eq!(linearized(0), 0.0);
        assert!((linearized(255) - 100.0).abs() < 1e-9);
        assert_eq!(delinearized(0.0), 0);
        assert_eq!(delinearized(100.0), 255);
    }

    #[test]
    fn test_delinearize_clamps() {
        assert_eq!(delinearized(-5.0), 0);
        assert_eq!(delinearized(250.0), 255);
    }

    #[test]
    fn test_linearize_round_trip_every_channel() {
        for component in 0..=255u8 {
            assert_eq!(delinearized(linearized(component)), component);
        }
    }

    #[test]
    fn test_xyz_round_trip() {
        for argb in [0xff0c66e4u32, 0xffff0000, 0xff00ff00, 0xff123456, 0xfffafbfc] {
            let argb = Argb(argb);
            assert_eq!(argb_from_xyz(xyz_from_argb(argb)), argb);
        }
    }

    #[test]
    fn test_white_point_luminance() {
        let xyz = xyz_from_argb(Argb::WHITE);
        assert!((xyz[1] - 100.0).abs() < 1e-6);
        assert!((xyz[0] - WHITE_POINT_D65[0]).abs() < 0.01);
        assert!((xyz[2] - WHITE_POINT_D65[2]).abs() < 0.01);
    }

    #[test]
    fn test_lstar_y_inverse() {
        for lstar in [0.0, 1.0, 8.0, 25.0, 50.0, 75.0, 99.0, 100.0] {
            assert!((lstar_from_y(y_from_lstar(lstar)) - lstar).abs() < 1e-9);
        }
        assert!((y_from_lstar(50.0) - 18.418651851244416).abs() < 1e-9);
    }

    #[test]
    fn test_gray_from_lstar() {
        assert_eq!(argb_from_lstar(0.0), Argb::BLACK);
        assert_eq!(argb_from_lstar(100.0), Argb::WHITE);
        let gray = argb_from_lstar(50.0);
        assert_eq!(gray.red(), gray.green());
        assert_eq!(gray.green(), gray.blue());
        assert_eq!(gray.red(), 119);
    }

    #[test]
    fn test_saturated_lightness() {
        assert_eq!(saturated_lightness(Argb::WHITE), 0.5);
        assert_eq!(saturated_lightness(Argb::BLACK), 0.0);
        let l = saturated_lightness(Argb(0xff0c66e4));
        assert!((l - 228.0 / 510.0).abs() < 1e-12);

        // Greys lose their lightness entirely to the missing saturation
        assert!((saturated_lightness(Argb(0xffb0b0b0)) - 176.0 / 510.0).abs() < 1e-12);
    }
}
