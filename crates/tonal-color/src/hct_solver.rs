// ABOUTME: Solves hue/chroma/tone requests to the closest displayable sRGB color
// ABOUTME: Direct Newton iteration on CAM16 J first, bisection over the gamut boundary as fallback

use std::f64::consts::PI;

use tonal_types::Argb;

use crate::cam16::Cam16;
use crate::colorimetry::{
    SRGB_TO_XYZ, Y_FROM_LINRGB, argb_from_linrgb, argb_from_lstar, decode_unit, encode_unit,
    y_from_lstar,
};
use crate::math::{
    Vec3, matrix_inverse, matrix_multiply, matrix_product, sanitize_degrees, scale_rows, signum,
};
use crate::viewing_conditions::{ViewingConditions, XYZ_TO_CAM16RGB};

const CHROMA_EPSILON: f64 = 0.0001;
const TONE_EPSILON: f64 = 0.0001;
const LUMINANCE_TOLERANCE: f64 = 0.002;
const DIRECT_ITERATIONS: usize = 5;
const BISECTION_STEPS: usize = 8;

/// Outcome of the direct solve for a hue/chroma/luminance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectSolve {
    Solved(Argb),
    /// Some channel left the sRGB cube; the caller must fall back to bisection.
    OutOfGamut,
}

/// Gamut mapper bound to one set of viewing conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HctSolver {
    vc: ViewingConditions,
    /// Linear RGB to discounted, `fl`-scaled cone responses.
    scaled_discount_from_linrgb: [[f64; 3]; 3],
    linrgb_from_scaled_discount: [[f64; 3]; 3],
}

impl Default for HctSolver {
    fn default() -> Self {
        Self::new(ViewingConditions::standard())
    }
}

#[inline]
fn sanitize_radians(angle: f64) -> f64 {
    (angle + PI * 8.0) % (PI * 2.0)
}

/// Linear 0..100 to non-quantized sRGB 0..255.
#[inline]
fn true_delinearized(component: f64) -> f64 {
    encode_unit(component / 100.0) * 255.0
}

#[inline]
fn chromatic_adaptation(component: f64) -> f64 {
    let af = component.abs().powf(0.42);
    signum(component) * 400.0 * af / (af + 27.13)
}

#[inline]
fn inverse_chromatic_adaptation(adapted: f64) -> f64 {
    let adapted_abs = adapted.abs();
    let base = (27.13 * adapted_abs / (400.0 - adapted_abs)).max(0.0);
    signum(adapted) * base.powf(1.0 / 0.42)
}

/// True when `a`, `b`, `c` are met in that order walking counter-clockwise from `a`.
#[inline]
fn are_in_cyclic_order(a: f64, b: f64, c: f64) -> bool {
    sanitize_radians(b - a) < sanitize_radians(c - a)
}

/// Where `mid` sits between `source` and `target`, as a fraction.
#[inline]
fn intercept(source: f64, mid: f64, target: f64) -> f64 {
    (mid - source) / (target - source)
}

#[inline]
fn lerp_point(source: Vec3, t: f64, target: Vec3) -> Vec3 {
    [
        source[0] + (target[0] - source[0]) * t,
        source[1] + (target[1] - source[1]) * t,
        source[2] + (target[2] - source[2]) * t,
    ]
}

/// Point on the segment whose `axis` coordinate equals `coordinate`.
#[inline]
fn set_coordinate(source: Vec3, coordinate: f64, target: Vec3, axis: usize) -> Vec3 {
    let t = intercept(source[axis], coordinate, target[axis]);
    lerp_point(source, t, target)
}

#[inline]
fn is_bounded(x: f64) -> bool {
    (0.0..=100.0).contains(&x)
}

/// The nth of the 12 RGB cube edges intersected with the plane of luminance `y`.
fn nth_vertex(y: f64, n: usize) -> Option<Vec3> {
    let [k_r, k_g, k_b] = Y_FROM_LINRGB;
    let coord_a = if n % 4 <= 1 { 0.0 } else { 100.0 };
    let coord_b = if n % 2 == 0 { 0.0 } else { 100.0 };

    let vertex = if n < 4 {
        let (g, b) = (coord_a, coord_b);
        [(y - g * k_g - b * k_b) / k_r, g, b]
    } else if n < 8 {
        let (b, r) = (coord_a, coord_b);
        [r, (y - r * k_r - b * k_b) / k_g, b]
    } else {
        let (r, g) = (coord_a, coord_b);
        [r, g, (y - r * k_r - g * k_g) / k_b]
    };

    vertex.iter().copied().all(is_bounded).then_some(vertex)
}

#[inline]
fn midpoint(a: Vec3, b: Vec3) -> Vec3 {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0, (a[2] + b[2]) / 2.0]
}

/// Linear value halfway between 8-bit sRGB codes `index` and `index + 1`.
#[inline]
fn critical_plane(index: i32) -> f64 {
    decode_unit((f64::from(index) + 0.5) / 255.0) * 100.0
}

#[inline]
fn critical_plane_below(x: f64) -> i32 {
    (x - 0.5).floor() as i32
}

#[inline]
fn critical_plane_above(x: f64) -> i32 {
    (x - 0.5).ceil() as i32
}

impl HctSolver {
    pub fn new(vc: ViewingConditions) -> Self {
        let cone_from_linrgb = matrix_product(&XYZ_TO_CAM16RGB, &SRGB_TO_XYZ);
        let scale = [
            vc.rgb_d[0] * vc.fl / 100.0,
            vc.rgb_d[1] * vc.fl / 100.0,
            vc.rgb_d[2] * vc.fl / 100.0,
        ];
        let scaled_discount_from_linrgb = scale_rows(scale, &cone_from_linrgb);
        // Only degenerate viewing conditions are singular; a zero matrix then
        // makes every direct solve fail over to bisection.
        let linrgb_from_scaled_discount =
            matrix_inverse(&scaled_discount_from_linrgb).unwrap_or([[0.0; 3]; 3]);

        Self {
            vc,
            scaled_discount_from_linrgb,
            linrgb_from_scaled_discount,
        }
    }

    pub fn viewing_conditions(&self) -> &ViewingConditions {
        &self.vc
    }

    /// Hue angle in radians of a linear RGB color.
    fn hue_of(&self, linrgb: Vec3) -> f64 {
        let scaled = matrix_multiply(linrgb, &self.scaled_discount_from_linrgb);
        let r_a = chromatic_adaptation(scaled[0]);
        let g_a = chromatic_adaptation(scaled[1]);
        let b_a = chromatic_adaptation(scaled[2]);
        let a = (11.0 * r_a - 12.0 * g_a + b_a) / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;
        b.atan2(a)
    }

    /// The two boundary vertices whose hues bracket `target_hue`.
    fn bisect_to_segment(&self, y: f64, target_hue: f64) -> Option<(Vec3, Vec3)> {
        let mut vertices = (0..12).filter_map(|n| nth_vertex(y, n));
        let mut left = vertices.next()?;
        let mut right = left;
        let mut left_hue = self.hue_of(left);
        let mut right_hue = left_hue;
        let mut uncut = true;

        for mid in vertices {
            let mid_hue = self.hue_of(mid);
            if uncut || are_in_cyclic_order(left_hue, mid_hue, right_hue) {
                uncut = false;
                if are_in_cyclic_order(left_hue, target_hue, mid_hue) {
                    right = mid;
                    right_hue = mid_hue;
                } else {
                    left = mid;
                    left_hue = mid_hue;
                }
            }
        }

        Some((left, right))
    }

    /// Closest in-gamut linear RGB at luminance `y` with hue `target_hue` (radians).
    pub fn bisect_to_limit(&self, y: f64, target_hue: f64) -> Vec3 {
        let Some((mut left, mut right)) = self.bisect_to_segment(y, target_hue) else {
            return [y, y, y];
        };
        let mut left_hue = self.hue_of(left);

        for axis in 0..3 {
            if left[axis] == right[axis] {
                continue;
            }
            let (mut l_plane, mut r_plane) = if left[axis] < right[axis] {
                (
                    critical_plane_below(true_delinearized(left[axis])),
                    critical_plane_above(true_delinearized(right[axis])),
                )
            } else {
                (
                    critical_plane_above(true_delinearized(left[axis])),
                    critical_plane_below(true_delinearized(right[axis])),
                )
            };

            for _ in 0..BISECTION_STEPS {
                if (r_plane - l_plane).abs() <= 1 {
                    break;
                }
                let m_plane = (l_plane + r_plane).div_euclid(2);
                let mid = set_coordinate(left, critical_plane(m_plane), right, axis);
                let mid_hue = self.hue_of(mid);
                if are_in_cyclic_order(left_hue, target_hue, mid_hue) {
                    right = mid;
                    r_plane = m_plane;
                } else {
                    left = mid;
                    left_hue = mid_hue;
                    l_plane = m_plane;
                }
            }
        }

        midpoint(left, right)
    }

    /// Newton iteration on J until the color's luminance matches `y`.
    pub fn find_result_by_j(&self, hue_radians: f64, chroma: f64, y: f64) -> DirectSolve {
        let vc = &self.vc;
        // Initial estimate of J from luminance
        let mut j = y.sqrt() * 11.0;

        let t_inner_coeff = 1.0 / (1.64 - 0.29f64.powf(vc.n)).powf(0.73);
        let e_hue = 0.25 * ((hue_radians + 2.0).cos() + 3.8);
        let p1 = e_hue * (50000.0 / 13.0) * vc.nc * vc.ncb;
        let h_sin = hue_radians.sin();
        let h_cos = hue_radians.cos();

        for round in 0..DIRECT_ITERATIONS {
            let j_normalized = j / 100.0;
            let alpha = if chroma == 0.0 || j == 0.0 {
                0.0
            } else {
                chroma / j_normalized.sqrt()
            };
            let t = (alpha * t_inner_coeff).powf(1.0 / 0.9);
            let ac = vc.aw * j_normalized.powf(1.0 / vc.c / vc.z);
            let p2 = ac / vc.nbb;
            let gamma =
                23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
            let a = gamma * h_cos;
            let b = gamma * h_sin;
            let r_a = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
            let g_a = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
            let b_a = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;

            let scaled = [
                inverse_chromatic_adaptation(r_a),
                inverse_chromatic_adaptation(g_a),
                inverse_chromatic_adaptation(b_a),
            ];
            let linrgb = matrix_multiply(scaled, &self.linrgb_from_scaled_discount);
            if linrgb.iter().any(|&channel| channel < 0.0) {
                return DirectSolve::OutOfGamut;
            }

            let fnj = Y_FROM_LINRGB[0] * linrgb[0]
                + Y_FROM_LINRGB[1] * linrgb[1]
                + Y_FROM_LINRGB[2] * linrgb[2];
            if fnj <= 0.0 {
                return DirectSolve::OutOfGamut;
            }

            if round == DIRECT_ITERATIONS - 1 || (fnj - y).abs() < LUMINANCE_TOLERANCE {
                if linrgb.iter().any(|&channel| channel > 100.01) {
                    return DirectSolve::OutOfGamut;
                }
                return DirectSolve::Solved(argb_from_linrgb(linrgb));
            }

            // Luminance is roughly quadratic in J
            j -= (fnj - y) * j / (2.0 * fnj);
        }

        DirectSolve::OutOfGamut
    }

    /// Closest sRGB color to the requested hue (degrees), chroma and tone (L*).
    ///
    /// Chroma is reduced as far as needed to stay in gamut; hue and tone are kept.
    /// Without any chroma, or at the tone extremes, the answer is the gray at `tone`.
    pub fn solve_to_argb(&self, hue: f64, chroma: f64, tone: f64) -> Argb {
        if chroma < CHROMA_EPSILON || tone < TONE_EPSILON || tone > 100.0 - TONE_EPSILON {
            return argb_from_lstar(tone);
        }

        let hue_radians = sanitize_degrees(hue).to_radians();
        let y = y_from_lstar(tone);

        match self.find_result_by_j(hue_radians, chroma, y) {
            DirectSolve::Solved(argb) => argb,
            DirectSolve::OutOfGamut => argb_from_linrgb(self.bisect_to_limit(y, hue_radians)),
        }
    }

    pub fn solve_to_cam(&self, hue: f64, chroma: f64, tone: f64) -> Cam16 {
        Cam16::from_argb(self.solve_to_argb(hue, chroma, tone), &self.vc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colorimetry::lstar_from_argb;

    #[test]
    fn test_gray_short_circuit() {
        let solver = HctSolver::default();
        for tone in [0.0, 12.5, 50.0, 87.0, 100.0] {
            for hue in [0.0, 120.0, 300.0] {
                assert_eq!(solver.solve_to_argb(hue, 0.0, tone), argb_from_lstar(tone));
            }
        }
        assert_eq!(solver.solve_to_argb(250.0, 60.0, 0.0), Argb::BLACK);
        assert_eq!(solver.solve_to_argb(250.0, 60.0, 100.0), Argb::WHITE);
    }

    #[test]
    fn test_tone_is_preserved_across_gamut() {
        let solver = HctSolver::default();
        for hue in (0..360).step_by(15) {
            for chroma in [2.0, 16.0, 48.0, 90.0, 200.0] {
                for tone in (5..=95).step_by(10) {
                    let argb = solver.solve_to_argb(f64::from(hue), chroma, f64::from(tone));
                    assert_eq!(argb.alpha(), 255);
                    let achieved = lstar_from_argb(argb);
                    assert!(
                        (achieved - f64::from(tone)).abs() < 1.0,
                        "h={hue} c={chroma} t={tone} gave tone {achieved}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_existing_colors_are_reproduced() {
        let solver = HctSolver::default();
        let vc = solver.viewing_conditions();
        for argb in [0xff0c66e4u32, 0xff0055cc, 0xffe9f2ff, 0xff09326c, 0xff808080, 0xffff8800] {
            let cam = Cam16::from_argb(Argb(argb), vc);
            let tone = lstar_from_argb(Argb(argb));
            let solved = solver.solve_to_argb(cam.hue, cam.chroma, tone);
            for (x, y) in Argb(argb).into_rgb().iter().zip(solved.into_rgb()) {
                assert!((i32::from(*x) - i32::from(y)).abs() <= 1, "{argb:08x} -> {solved}");
            }
        }
    }

    #[test]
    fn test_out_of_gamut_falls_back_to_bisection() {
        let solver = HctSolver::default();
        let hue = 270.0f64.to_radians();
        let y = y_from_lstar(50.0);
        assert_eq!(solver.find_result_by_j(hue, 200.0, y), DirectSolve::OutOfGamut);

        let linrgb = solver.bisect_to_limit(y, hue);
        let luminance: f64 = linrgb.iter().zip(Y_FROM_LINRGB).map(|(c, k)| c * k).sum();
        assert!((luminance - y).abs() < 0.5);
        assert!(linrgb.iter().all(|&c| (-0.01..=100.01).contains(&c)));

        let cam = solver.solve_to_cam(270.0, 200.0, 50.0);
        assert!(cam.chroma < 200.0 && cam.chroma > 30.0);
    }

    #[test]
    fn test_cyclic_order_wraps() {
        let deg = |d: f64| d.to_radians();
        assert!(are_in_cyclic_order(deg(350.0), deg(5.0), deg(20.0)));
        assert!(!are_in_cyclic_order(deg(350.0), deg(30.0), deg(20.0)));
        assert!(are_in_cyclic_order(deg(-170.0), deg(-160.0), deg(170.0)));
        let s = sanitize_radians(-0.5);
        assert!((s - (2.0 * PI - 0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_vertices_lie_on_luminance_plane() {
        let y = 40.0;
        let vertices: Vec<Vec3> = (0..12).filter_map(|n| nth_vertex(y, n)).collect();
        assert!(vertices.len() >= 3);
        for vertex in vertices {
            let luminance: f64 = vertex.iter().zip(Y_FROM_LINRGB).map(|(c, k)| c * k).sum();
            assert!((luminance - y).abs() < 1e-9);
        }
        assert!(nth_vertex(0.0, 0).is_some());
    }

    #[test]
    fn test_critical_planes() {
        assert!((critical_plane(0) - 0.015176349177441876).abs() < 1e-12);
        assert!((critical_plane(254) - 99.55452497210776).abs() < 1e-6);
        assert_eq!(critical_plane_below(10.2), 9);
        assert_eq!(critical_plane_above(10.2), 10);
    }
}
