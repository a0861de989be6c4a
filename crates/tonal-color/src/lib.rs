// ABOUTME: Perceptual color core: sRGB colorimetry, CAM16, HCT gamut solving and contrast
// ABOUTME: Every function here is total; out-of-range inputs are clamped, never rejected

pub mod cam16;
pub mod colorimetry;
pub mod contrast;
pub mod hct;
pub mod hct_solver;
pub mod math;
pub mod viewing_conditions;

pub use cam16::Cam16;
pub use contrast::{ContrastRatios, contrast_ratio, relative_luminance};
pub use hct::Hct;
pub use hct_solver::{DirectSolve, HctSolver};
pub use viewing_conditions::ViewingConditions;

pub use tonal_types::Argb;
