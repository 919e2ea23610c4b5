//! Doppler-shifted, thermally broadened Gaussian line.

use std::sync::Arc;

use nalgebra::{Point3, Vector3};
use spectral_math::{add_gaussian_line, doppler_shift, thermal_broadening, Spectrum};

use crate::atomic::Line;
use crate::models::LineShapeModel;
use crate::plasma::Distribution;

/// The simplest line shape: a single Gaussian at the Doppler-shifted rest
/// wavelength, widened by the target species' thermal motion.
pub struct GaussianLine {
    line: Line,
    wavelength: f64,
    species: Arc<dyn Distribution>,
}

impl GaussianLine {
    /// Create a Gaussian line model.
    ///
    /// # Arguments
    /// * `line` - Emitting transition
    /// * `wavelength` - Rest wavelength (nm)
    /// * `species` - Distribution of the emitting species
    pub fn new(line: Line, wavelength: f64, species: Arc<dyn Distribution>) -> Self {
        Self {
            line,
            wavelength,
            species,
        }
    }

    /// The emitting transition.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Rest wavelength (nm).
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }
}

impl LineShapeModel for GaussianLine {
    fn add_line(
        &self,
        radiance: f64,
        point: Point3<f64>,
        direction: Vector3<f64>,
        spectrum: &mut Spectrum,
    ) {
        let temperature = self.species.effective_temperature(point);
        if temperature <= 0.0 {
            return;
        }

        let velocity = self.species.bulk_velocity(point);
        let centre = doppler_shift(self.wavelength, direction, velocity);
        let sigma =
            thermal_broadening(self.wavelength, temperature, self.line.element.atomic_weight);

        add_gaussian_line(radiance, centre, sigma, spectrum);
    }
}
