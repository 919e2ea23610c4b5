//! Analytic deposition of Gaussian line profiles into a binned spectrum.
//!
//! The definite integral of a normalised Gaussian between two bin edges has
//! the closed form `0.5 * [erf((b - mu) / (sqrt(2) sigma)) - erf((a - mu) /
//! (sqrt(2) sigma))]`, so a line can be added to a spectrum exactly, without
//! sub-bin sampling. This is the innermost primitive of every line-shape
//! model and runs once per emitting point per line per observation ray.

use scilib::math::basic::erf;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::spectrum::Spectrum;

/// Cutoff in standard deviations beyond which a Gaussian's contribution is
/// treated as negligible (the tail mass outside +/-10 sigma is below 1e-23).
pub const GAUSSIAN_CUTOFF_SIGMA: f64 = 10.0;

/// Add a Gaussian line profile to a binned spectrum.
///
/// Deposits `radiance` (wavelength-integrated) distributed as a Gaussian
/// centred at `wavelength` nm with standard deviation `sigma` nm. Each bin
/// receives the exact erf-based integral of the profile over its interval,
/// divided by the bin width so the samples stay per-nm densities.
///
/// Degenerate input is tolerated rather than reported: `sigma <= 0` is a
/// silent no-op, as is a line whose +/-10 sigma window lies entirely outside
/// the spectrum's wavelength range.
///
/// # Arguments
/// * `radiance` - Integrated line radiance to distribute
/// * `wavelength` - Line centre (nm)
/// * `sigma` - Gaussian standard deviation (nm)
/// * `spectrum` - Caller-owned output buffer, mutated in place
pub fn add_gaussian_line(radiance: f64, wavelength: f64, sigma: f64, spectrum: &mut Spectrum) {
    if sigma <= 0.0 {
        return;
    }

    // Scale factor turning a wavelength offset into an erf argument
    let scale = FRAC_1_SQRT_2 / sigma;

    let window_lower = wavelength - GAUSSIAN_CUTOFF_SIGMA * sigma;
    let window_upper = wavelength + GAUSSIAN_CUTOFF_SIGMA * sigma;
    if window_upper < spectrum.min_wavelength() || window_lower > spectrum.max_wavelength() {
        return;
    }

    let min_wavelength = spectrum.min_wavelength();
    let delta = spectrum.delta_wavelength();
    let bins = spectrum.bins();

    let start = (((window_lower - min_wavelength) / delta).floor()).max(0.0) as usize;
    let end = (((window_upper - min_wavelength) / delta).ceil()).min(bins as f64) as usize;
    if start >= end {
        return;
    }

    // Carry the lower edge erf forward so each edge is evaluated once
    let lower_edge = min_wavelength + start as f64 * delta;
    let mut lower_erf = erf((lower_edge - wavelength) * scale);

    let samples = spectrum.samples_mut();
    for i in start..end {
        let upper_edge = min_wavelength + (i as f64 + 1.0) * delta;
        let upper_erf = erf((upper_edge - wavelength) * scale);
        samples[i] += radiance * 0.5 * (upper_erf - lower_erf) / delta;
        lower_erf = upper_erf;
    }
}
