//! spectral-math - Numerical primitives for emission line modelling
//!
//! This crate provides the leaf-level numerics shared by the line-shape
//! models in the `lineshape` crate:
//!
//! - **Spectrum** - Wavelength-binned sample buffer with validated geometry
//! - **Gaussian deposition** - Closed-form (erf based) addition of a Gaussian
//!   line profile into a binned spectrum
//! - **Kinematics** - Doppler shift and thermal broadening formulas
//! - **Constants** - Physical constants in the unit system used throughout
//!   (nanometres, electron-volts, Tesla, SI elsewhere)
//!
//! # Example
//!
//! ```
//! use spectral_math::{add_gaussian_line, Spectrum};
//!
//! // 100 bins covering 500-510 nm
//! let mut spectrum = Spectrum::new(500.0, 510.0, 100).unwrap();
//!
//! // Deposit a unit-radiance line at 505 nm with 0.1 nm standard deviation
//! add_gaussian_line(1.0, 505.0, 0.1, &mut spectrum);
//!
//! // The analytic integral conserves the input radiance
//! assert!((spectrum.total() - 1.0).abs() < 1e-6);
//! ```

pub mod constants;
pub mod gaussian;
pub mod kinematics;
pub mod spectrum;

// Re-export commonly used items
pub use gaussian::{add_gaussian_line, GAUSSIAN_CUTOFF_SIGMA};
pub use kinematics::{doppler_shift, thermal_broadening};
pub use spectrum::{Spectrum, SpectrumError};
