//! Stark-broadened hydrogenic line.
//!
//! Local electric microfields widen hydrogenic lines into a distinctly
//! non-Gaussian profile. The half-width follows a fitted power law in
//! electron density and temperature, `lambda_1/2 = c * ne^a / te^b`, with
//! (c, a, b) tabulated per transition for the Balmer and Paschen series.
//!
//! Unlike the Gaussian case there is no closed-form definite integral for
//! the profile kernel, so the shape is built numerically: sampled at bin
//! edges, trapezoidally integrated into a scratch spectrum, renormalised to
//! unit integral and only then scaled by the line radiance.
//!
//! The fitted model describes the profile in the emitter's rest frame. As an
//! extension, the profile centre is Doppler-shifted by the species' local
//! bulk velocity before deposition, consistent with the other line shapes in
//! this crate.

use std::collections::HashMap;
use std::sync::Arc;

use nalgebra::{Point3, Vector3};
use once_cell::sync::Lazy;
use spectral_math::{doppler_shift, Spectrum};
use tracing::debug;

use crate::atomic::Line;
use crate::models::{LineShapeModel, ModelError};
use crate::plasma::{Distribution, Plasma};

/// Cutoff in half-widths beyond which the profile is treated as negligible,
/// mirroring the Gaussian +/-10 sigma policy.
pub const LORENTZIAN_CUTOFF_WIDTHS: f64 = 10.0;

/// Fitted Stark model constants for one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarkCoefficients {
    /// Scale constant of the half-width power law
    pub c: f64,
    /// Electron density exponent
    pub a: f64,
    /// Electron temperature exponent
    pub b: f64,
}

/// Half-width power-law fits keyed by (upper, lower) principal quantum
/// numbers, covering the Balmer (n -> 2) and Paschen (n -> 3) series.
static STARK_MODEL_COEFFICIENTS: Lazy<HashMap<(u32, u32), StarkCoefficients>> = Lazy::new(|| {
    let table = [
        ((3, 2), (3.71e-18, 0.7665, 0.064)),
        ((4, 2), (8.425e-18, 0.7803, 0.050)),
        ((5, 2), (1.31e-17, 0.6796, 0.030)),
        ((6, 2), (3.954e-17, 0.7149, 0.028)),
        ((7, 2), (6.258e-17, 0.712, 0.029)),
        ((8, 2), (7.378e-17, 0.7159, 0.032)),
        ((9, 2), (8.947e-17, 0.7177, 0.033)),
        ((4, 3), (1.330e-16, 0.7449, 0.045)),
        ((5, 3), (6.64e-16, 0.7356, 0.044)),
        ((6, 3), (2.481e-16, 0.7118, 0.016)),
        ((7, 3), (3.270e-16, 0.7137, 0.029)),
        ((8, 3), (4.343e-16, 0.7133, 0.032)),
        ((9, 3), (5.588e-16, 0.7165, 0.033)),
    ];

    table
        .into_iter()
        .map(|(key, (c, a, b))| (key, StarkCoefficients { c, a, b }))
        .collect()
});

/// Stark-broadened line shape for hydrogenic transitions.
pub struct StarkBroadenedLine {
    line: Line,
    wavelength: f64,
    species: Arc<dyn Distribution>,
    plasma: Arc<dyn Plasma>,
    coefficients: StarkCoefficients,
}

impl StarkBroadenedLine {
    /// Create a Stark-broadened line model.
    ///
    /// # Errors
    /// Fails if the line's element is not hydrogenic or no fitted
    /// coefficients exist for its transition.
    pub fn new(
        line: Line,
        wavelength: f64,
        species: Arc<dyn Distribution>,
        plasma: Arc<dyn Plasma>,
    ) -> Result<Self, ModelError> {
        if !line.element.is_hydrogenic() {
            return Err(ModelError::NotHydrogenic(line.element.symbol.clone()));
        }

        let (upper, lower) = line.transition;
        let coefficients = *STARK_MODEL_COEFFICIENTS
            .get(&(upper, lower))
            .ok_or(ModelError::MissingStarkCoefficients { upper, lower })?;

        debug!(upper, lower, ?coefficients, "resolved Stark broadening fit");

        Ok(Self {
            line,
            wavelength,
            species,
            plasma,
            coefficients,
        })
    }

    /// The emitting transition.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Rest wavelength (nm).
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// The fitted (c, a, b) constants resolved for this transition.
    pub fn coefficients(&self) -> StarkCoefficients {
        self.coefficients
    }
}

impl LineShapeModel for StarkBroadenedLine {
    fn add_line(
        &self,
        radiance: f64,
        point: Point3<f64>,
        direction: Vector3<f64>,
        spectrum: &mut Spectrum,
    ) {
        let electrons = self.plasma.electron_distribution();
        let ne = electrons.density(point);
        if ne <= 0.0 {
            return;
        }
        let te = electrons.effective_temperature(point);
        if te <= 0.0 {
            return;
        }

        let StarkCoefficients { c, a, b } = self.coefficients;
        let lambda_half = c * ne.powf(a) / te.powf(b);

        // The fit gives the rest-frame shape; centre it on the bulk-motion
        // shifted wavelength like the Gaussian models do
        let velocity = self.species.bulk_velocity(point);
        let centre = doppler_shift(self.wavelength, direction, velocity);

        let window_lower = centre - LORENTZIAN_CUTOFF_WIDTHS * lambda_half;
        let window_upper = centre + LORENTZIAN_CUTOFF_WIDTHS * lambda_half;
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

        // Modified Lorentzian kernel, Lomanowski et al. model b fit
        let half_width_term = (0.5 * lambda_half).powf(2.5);
        let kernel =
            |wavelength: f64| 1.0 / ((wavelength - centre).abs().powf(2.5) + half_width_term);

        // First pass: trapezoid-integrate the kernel over each bin into a
        // scratch spectrum. No closed form exists for this kernel, so the
        // shape has to be normalised numerically before scaling.
        let mut scratch = spectrum.zeroed_like();
        {
            let samples = scratch.samples_mut();
            let mut lower_value = kernel(min_wavelength + start as f64 * delta);
            for i in start..end {
                let upper_value = kernel(min_wavelength + (i as f64 + 1.0) * delta);
                samples[i] = 0.5 * (lower_value + upper_value) * delta;
                lower_value = upper_value;
            }
        }

        // TODO(lineshape) replace with a cumulative-integral formulation so
        // the cutoff window cannot bias the normalisation
        let integral = scratch.total();
        if integral <= 0.0 {
            return;
        }

        let samples = spectrum.samples_mut();
        for i in start..end {
            samples[i] += radiance * scratch.samples()[i] / integral;
        }
    }
}
