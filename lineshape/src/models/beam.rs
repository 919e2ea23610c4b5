//! Motional-Stark beam emission multiplet.
//!
//! A fast neutral beam crossing the plasma's magnetic field sees a motional
//! electric field `E = v x B` in its own frame. That field Stark-splits the
//! beam emission line into a sigma group (unshifted plus one pair) and a pi
//! group (three pairs further out), with the linear splitting
//! `dlambda = 2.77e-8 * |E|` nm per component step.
//!
//! The intensity partition between and within the groups is not fixed; it
//! comes from atomic-data ratio functions of the local electron density and
//! temperature, supplied by the host.

use std::sync::Arc;

use nalgebra::{Point3, Vector3};
use spectral_math::constants::{ATOMIC_MASS_UNIT, ELEMENTARY_CHARGE};
use spectral_math::{add_gaussian_line, doppler_shift, thermal_broadening, Spectrum};

use crate::atomic::Line;
use crate::functions::{Function1D, Function2D};
use crate::models::BeamLineShapeModel;
use crate::plasma::{Beam, Plasma};

/// Linear motional-Stark splitting constant (nm per V/m per component step).
pub const STARK_SPLITTING_FACTOR: f64 = 2.77e-8;

/// Motional-Stark split beam emission line.
///
/// The sigma group keeps the full line radiance times `r / (1 + r)` where
/// `r` is the sigma-to-pi ratio; the pi group takes the remaining
/// `1 / (1 + r)`. Within each group the per-component shares come from the
/// density-dependent ratio functions, normalised so the partition always
/// sums back to the input radiance.
pub struct BeamEmissionMultiplet {
    line: Line,
    wavelength: f64,
    beam: Arc<dyn Beam>,
    plasma: Arc<dyn Plasma>,
    sigma_to_pi: Arc<dyn Function2D>,
    sigma1_to_sigma0: Arc<dyn Function1D>,
    pi2_to_pi3: Arc<dyn Function1D>,
    pi4_to_pi3: Arc<dyn Function1D>,
}

impl BeamEmissionMultiplet {
    /// Create a beam emission multiplet model.
    ///
    /// # Arguments
    /// * `line` - Emitting beam transition
    /// * `wavelength` - Rest wavelength (nm)
    /// * `beam` - Beam state provider
    /// * `plasma` - Plasma state provider
    /// * `sigma_to_pi` - Sigma-to-pi intensity ratio as f(ne, te)
    /// * `sigma1_to_sigma0` - Sigma group internal ratio as f(ne)
    /// * `pi2_to_pi3` - Pi group ratio of the second to third component, f(ne)
    /// * `pi4_to_pi3` - Pi group ratio of the fourth to third component, f(ne)
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        line: Line,
        wavelength: f64,
        beam: Arc<dyn Beam>,
        plasma: Arc<dyn Plasma>,
        sigma_to_pi: Arc<dyn Function2D>,
        sigma1_to_sigma0: Arc<dyn Function1D>,
        pi2_to_pi3: Arc<dyn Function1D>,
        pi4_to_pi3: Arc<dyn Function1D>,
    ) -> Self {
        Self {
            line,
            wavelength,
            beam,
            plasma,
            sigma_to_pi,
            sigma1_to_sigma0,
            pi2_to_pi3,
            pi4_to_pi3,
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

impl BeamLineShapeModel for BeamEmissionMultiplet {
    fn add_line(
        &self,
        radiance: f64,
        _beam_point: Point3<f64>,
        plasma_point: Point3<f64>,
        beam_direction: Vector3<f64>,
        observation_direction: Vector3<f64>,
        spectrum: &mut Spectrum,
    ) {
        let electrons = self.plasma.electron_distribution();
        let te = electrons.effective_temperature(plasma_point);
        if te <= 0.0 {
            return;
        }
        let ne = electrons.density(plasma_point);
        if ne <= 0.0 {
            return;
        }

        // Beam particle speed from the per-nucleon energy
        let speed = (2.0 * self.beam.energy() * ELEMENTARY_CHARGE / ATOMIC_MASS_UNIT).sqrt();
        let beam_velocity = beam_direction.normalize() * speed;

        // Motional electric field in the beam frame
        let b_field = self.plasma.b_field(plasma_point);
        let e_field = beam_velocity.cross(&b_field);
        let stark_split = STARK_SPLITTING_FACTOR * e_field.norm();

        let centre = doppler_shift(self.wavelength, observation_direction, beam_velocity);
        let sigma = thermal_broadening(
            self.wavelength,
            self.beam.temperature(),
            self.beam.element().atomic_weight,
        );

        // Partition the radiance between the sigma and pi groups
        let ratio = self.sigma_to_pi.evaluate(ne, te);
        let group_norm = 1.0 / (1.0 + ratio);
        let sigma_radiance = ratio * group_norm * radiance;
        let pi_radiance = group_norm * radiance;

        // Sigma group: central component plus one shifted pair
        let s1 = self.sigma1_to_sigma0.evaluate(ne);
        let sigma_norm = 1.0 / (1.0 + s1);
        add_gaussian_line(sigma_norm * sigma_radiance, centre, sigma, spectrum);
        let sigma1_radiance = 0.5 * s1 * sigma_norm * sigma_radiance;
        add_gaussian_line(sigma1_radiance, centre + stark_split, sigma, spectrum);
        add_gaussian_line(sigma1_radiance, centre - stark_split, sigma, spectrum);

        // Pi group: three shifted pairs at 2, 3 and 4 component steps
        let p2 = self.pi2_to_pi3.evaluate(ne);
        let p4 = self.pi4_to_pi3.evaluate(ne);
        let pi_norm = 0.5 / (p2 + 1.0 + p4);
        for (steps, weight) in [(2.0, p2), (3.0, 1.0), (4.0, p4)] {
            let component_radiance = weight * pi_norm * pi_radiance;
            add_gaussian_line(component_radiance, centre + steps * stark_split, sigma, spectrum);
            add_gaussian_line(component_radiance, centre - steps * stark_split, sigma, spectrum);
        }
    }
}
