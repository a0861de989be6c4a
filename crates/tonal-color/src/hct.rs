// ABOUTME: Hue-Chroma-Tone color: CAM16 hue and chroma paired with L* tone
// ABOUTME: Construction from hue/chroma/tone goes through the gamut solver, so chroma may shrink

use tonal_types::Argb;

use crate::cam16::Cam16;
use crate::colorimetry::lstar_from_argb;
use crate::hct_solver::HctSolver;
use crate::viewing_conditions::ViewingConditions;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hct {
    hue: f64,
    chroma: f64,
    tone: f64,
    argb: Argb,
}

impl Hct {
    pub fn from_argb(argb: Argb, vc: &ViewingConditions) -> Self {
        let cam = Cam16::from_argb(argb, vc);
        Self {
            hue: cam.hue,
            chroma: cam.chroma,
            tone: lstar_from_argb(argb),
            argb,
        }
    }

    /// Closest displayable color to the request. The stored hue and chroma are the
    /// ones actually achieved, re-measured from the solved color.
    pub fn from_hct(hue: f64, chroma: f64, tone: f64, solver: &HctSolver) -> Self {
        let argb = solver.solve_to_argb(hue, chroma, tone);
        Self::from_argb(argb, solver.viewing_conditions())
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    pub fn tone(&self) -> f64 {
        self.tone
    }

    pub fn to_argb(&self) -> Argb {
        self.argb
    }

    #[must_use]
    pub fn with_hue(&self, hue: f64, solver: &HctSolver) -> Self {
        Self::from_hct(hue, self.chroma, self.tone, solver)
    }

    #[must_use]
    pub fn with_chroma(&self, chroma: f64, solver: &HctSolver) -> Self {
        Self::from_hct(self.hue, chroma, self.tone, solver)
    }

    #[must_use]
    pub fn with_tone(&self, tone: f64, solver: &HctSolver) -> Self {
        Self::from_hct(self.hue, self.chroma, tone, solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_gap(a: f64, b: f64) -> f64 {
        180.0 - ((a - b).rem_euclid(360.0) - 180.0).abs()
    }

    #[test]
    fn test_from_argb_measures_tone() {
        let vc = ViewingConditions::standard();
        let white = Hct::from_argb(Argb::WHITE, &vc);
        assert!((white.tone() - 100.0).abs() < 1e-6);
        let black = Hct::from_argb(Argb::BLACK, &vc);
        assert_eq!(black.tone(), 0.0);
        assert_eq!(black.chroma(), 0.0);
    }

    #[test]
    fn test_requested_chroma_is_reduced_out_of_gamut() {
        let solver = HctSolver::default();
        let hct = Hct::from_hct(270.0, 200.0, 50.0, &solver);
        assert!(hct.chroma() < 200.0);
        assert!((hct.tone() - 50.0).abs() < 1.0);
        assert!(hue_gap(hct.hue(), 270.0) < 5.0, "hue {}", hct.hue());
    }

    #[test]
    fn test_with_tone_keeps_hue() {
        let solver = HctSolver::default();
        let seed = Hct::from_argb(Argb(0xff0c66e4), solver.viewing_conditions());
        for tone in [20.0, 35.0, 60.0, 80.0] {
            let shifted = seed.with_tone(tone, &solver);
            assert!((shifted.tone() - tone).abs() < 1.0);
            assert!(hue_gap(shifted.hue(), seed.hue()) < 5.0, "hue {}", shifted.hue());
        }
    }

    #[test]
    fn test_with_chroma_zero_is_gray() {
        let solver = HctSolver::default();
        let seed = Hct::from_argb(Argb(0xff0c66e4), solver.viewing_conditions());
        let gray = seed.with_chroma(0.0, &solver).to_argb();
        assert_eq!(gray.red(), gray.green());
        assert_eq!(gray.green(), gray.blue());
    }

    #[test]
    fn test_with_hue_rotates() {
        let solver = HctSolver::default();
        let seed = Hct::from_argb(Argb(0xff0c66e4), solver.viewing_conditions());
        let rotated = seed.with_hue(seed.hue() + 120.0, &solver);
        assert!(hue_gap(rotated.hue(), seed.hue() + 120.0) < 5.0);
    }
}
