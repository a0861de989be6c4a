// ABOUTME: CAM16 color appearance model: forward (ARGB to appearance) and inverse transforms
// ABOUTME: Includes CAM16-UCS coordinates and the perceptual distance metric built on them

use std::f64::consts::PI;

use tonal_types::Argb;

use crate::colorimetry::{argb_from_xyz, xyz_from_argb};
use crate::math::{Vec3, matrix_multiply, sanitize_degrees, signum};
use crate::viewing_conditions::{CAM16RGB_TO_XYZ, ViewingConditions, XYZ_TO_CAM16RGB};

/// A color described by the CAM16 appearance correlates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cam16 {
    /// Hue angle in degrees, [0, 360)
    pub hue: f64,
    pub chroma: f64,
    /// Lightness
    pub j: f64,
    /// Brightness
    pub q: f64,
    /// Colorfulness
    pub m: f64,
    /// Saturation
    pub s: f64,
    /// CAM16-UCS J*
    pub jstar: f64,
    /// CAM16-UCS a*
    pub astar: f64,
    /// CAM16-UCS b*
    pub bstar: f64,
}

/// Post-adaptation nonlinear response compression of one cone channel.
#[inline]
fn compress(channel: f64, fl: f64) -> f64 {
    let factor = (fl * channel.abs() / 100.0).powf(0.42);
    signum(channel) * 400.0 * factor / (factor + 27.13)
}

/// Inverse of [`compress`].
#[inline]
fn decompress(adapted: f64, fl: f64) -> f64 {
    let base = (27.13 * adapted.abs() / (400.0 - adapted.abs())).max(0.0);
    signum(adapted) * (100.0 / fl) * base.powf(1.0 / 0.42)
}

/// Eccentricity factor for a hue given in degrees.
#[inline]
fn eccentricity(hue_degrees: f64) -> f64 {
    0.25 * ((hue_degrees * PI / 180.0 + 2.0).cos() + 3.8)
}

impl Cam16 {
    pub fn from_argb(argb: Argb, vc: &ViewingConditions) -> Self {
        Self::from_xyz(xyz_from_argb(argb), vc)
    }

    pub fn from_xyz(xyz: Vec3, vc: &ViewingConditions) -> Self {
        let [r_c, g_c, b_c] = matrix_multiply(xyz, &XYZ_TO_CAM16RGB);

        let r_a = compress(vc.rgb_d[0] * r_c, vc.fl);
        let g_a = compress(vc.rgb_d[1] * g_c, vc.fl);
        let b_a = compress(vc.rgb_d[2] * b_c, vc.fl);

        // Opponent channels
        let a = (11.0 * r_a - 12.0 * g_a + b_a) / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;

        let u = (20.0 * r_a + 20.0 * g_a + 21.0 * b_a) / 20.0;
        let p2 = (40.0 * r_a + 20.0 * g_a + b_a) / 20.0;

        let hue = sanitize_degrees(b.atan2(a).to_degrees());
        let hue_radians = hue.to_radians();

        let ac = p2 * vc.nbb;
        let j = 100.0 * (ac / vc.aw).powf(vc.c * vc.z);
        let q = (4.0 / vc.c) * (j / 100.0).sqrt() * (vc.aw + 4.0) * vc.fl_root;

        let hue_prime = if hue < 20.14 { hue + 360.0 } else { hue };
        let p1 = (50000.0 / 13.0) * eccentricity(hue_prime) * vc.nc * vc.ncb;
        let t = p1 * a.hypot(b) / (u + 0.305);
        let alpha = t.powf(0.9) * (1.64 - 0.29f64.powf(vc.n)).powf(0.73);

        let chroma = alpha * (j / 100.0).sqrt();
        let m = chroma * vc.fl_root;
        let s = 50.0 * ((alpha * vc.c) / (vc.aw + 4.0)).sqrt();

        let jstar = (1.0 + 100.0 * 0.007) * j / (1.0 + 0.007 * j);
        let mstar = (1.0 / 0.0228) * (0.0228 * m).ln_1p();

        Self {
            hue,
            chroma,
            j,
            q,
            m,
            s,
            jstar,
            astar: mstar * hue_radians.cos(),
            bstar: mstar * hue_radians.sin(),
        }
    }

    /// Build from lightness J, chroma C and hue h (degrees).
    pub fn from_jch(j: f64, chroma: f64, hue: f64, vc: &ViewingConditions) -> Self {
        let hue = sanitize_degrees(hue);
        let q = (4.0 / vc.c) * (j / 100.0).sqrt() * (vc.aw + 4.0) * vc.fl_root;
        let m = chroma * vc.fl_root;
        let alpha = if j == 0.0 {
            0.0
        } else {
            chroma / (j / 100.0).sqrt()
        };
        let s = 50.0 * ((alpha * vc.c) / (vc.aw + 4.0)).sqrt();

        let hue_radians = hue.to_radians();
        let jstar = (1.0 + 100.0 * 0.007) * j / (1.0 + 0.007 * j);
        let mstar = (1.0 / 0.0228) * (0.0228 * m).ln_1p();

        Self {
            hue,
            chroma,
            j,
            q,
            m,
            s,
            jstar,
            astar: mstar * hue_radians.cos(),
            bstar: mstar * hue_radians.sin(),
        }
    }

    /// Build from CAM16-UCS coordinates.
    pub fn from_ucs(jstar: f64, astar: f64, bstar: f64, vc: &ViewingConditions) -> Self {
        let mstar = astar.hypot(bstar);
        let m = (mstar * 0.0228).exp_m1() / 0.0228;
        let chroma = m / vc.fl_root;
        let hue = sanitize_degrees(bstar.atan2(astar).to_degrees());
        let j = jstar / (1.0 - (jstar - 100.0) * 0.007);
        Self::from_jch(j, chroma, hue, vc)
    }

    /// Perceptual distance in CAM16-UCS: `1.41 * dE'^0.63`.
    pub fn distance(&self, other: &Cam16) -> f64 {
        let d_j = self.jstar - other.jstar;
        let d_a = self.astar - other.astar;
        let d_b = self.bstar - other.bstar;
        let d_e_prime = (d_j * d_j + d_a * d_a + d_b * d_b).sqrt();
        1.41 * d_e_prime.powf(0.63)
    }

    /// XYZ of this appearance under `vc`. May fall outside the sRGB gamut.
    pub fn xyz_in_viewing_conditions(&self, vc: &ViewingConditions) -> Vec3 {
        let alpha = if self.chroma == 0.0 || self.j == 0.0 {
            0.0
        } else {
            self.chroma / (self.j / 100.0).sqrt()
        };

        let t = (alpha / (1.64 - 0.29f64.powf(vc.n)).powf(0.73)).powf(1.0 / 0.9);
        let h_rad = self.hue.to_radians();

        let ac = vc.aw * (self.j / 100.0).powf(1.0 / vc.c / vc.z);
        let p1 = eccentricity(self.hue) * (50000.0 / 13.0) * vc.nc * vc.ncb;
        let p2 = ac / vc.nbb;

        let h_sin = h_rad.sin();
        let h_cos = h_rad.cos();

        let gamma = 23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
        let a = gamma * h_cos;
        let b = gamma * h_sin;

        let r_a = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
        let g_a = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
        let b_a = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;

        let r_f = decompress(r_a, vc.fl) / vc.rgb_d[0];
        let g_f = decompress(g_a, vc.fl) / vc.rgb_d[1];
        let b_f = decompress(b_a, vc.fl) / vc.rgb_d[2];

        matrix_multiply([r_f, g_f, b_f], &CAM16RGB_TO_XYZ)
    }

    /// Back to sRGB under `vc`, clamping channels that leave the gamut.
    pub fn to_argb(&self, vc: &ViewingConditions) -> Argb {
        argb_from_xyz(self.xyz_in_viewing_conditions(vc))
    }
}
