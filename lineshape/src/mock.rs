//! Spatially uniform analytic providers of the plasma contracts.
//!
//! Useful for unit tests, benchmarks and quick sanity checks of model
//! configurations without a full scene behind them.

use nalgebra::{Point3, Vector3};

use crate::atomic::Element;
use crate::plasma::{Beam, Distribution, Plasma};

/// A distribution with the same temperature, bulk velocity and density at
/// every point.
#[derive(Debug, Clone)]
pub struct UniformDistribution {
    temperature_ev: f64,
    velocity: Vector3<f64>,
    density: f64,
}

impl UniformDistribution {
    /// Create a uniform distribution.
    pub fn new(temperature_ev: f64, velocity: Vector3<f64>, density: f64) -> Self {
        Self {
            temperature_ev,
            velocity,
            density,
        }
    }

    /// A uniform distribution with zero bulk velocity.
    pub fn stationary(temperature_ev: f64, density: f64) -> Self {
        Self::new(temperature_ev, Vector3::zeros(), density)
    }
}

impl Distribution for UniformDistribution {
    fn effective_temperature(&self, _point: Point3<f64>) -> f64 {
        self.temperature_ev
    }

    fn bulk_velocity(&self, _point: Point3<f64>) -> Vector3<f64> {
        self.velocity
    }

    fn density(&self, _point: Point3<f64>) -> f64 {
        self.density
    }
}

/// A plasma with uniform electron population and magnetic field.
#[derive(Debug, Clone)]
pub struct UniformPlasma {
    electrons: UniformDistribution,
    b_field: Vector3<f64>,
}

impl UniformPlasma {
    /// Create a uniform plasma with the given electron temperature (eV),
    /// electron density (m^-3) and magnetic field (T).
    pub fn new(electron_temperature_ev: f64, electron_density: f64, b_field: Vector3<f64>) -> Self {
        Self {
            electrons: UniformDistribution::stationary(electron_temperature_ev, electron_density),
            b_field,
        }
    }

    /// A uniform plasma with no magnetic field.
    pub fn field_free(electron_temperature_ev: f64, electron_density: f64) -> Self {
        Self::new(electron_temperature_ev, electron_density, Vector3::zeros())
    }
}

impl Plasma for UniformPlasma {
    fn electron_distribution(&self) -> &dyn Distribution {
        &self.electrons
    }

    fn b_field(&self, _point: Point3<f64>) -> Vector3<f64> {
        self.b_field
    }
}

/// A beam with fixed energy, temperature and species.
#[derive(Debug, Clone)]
pub struct UniformBeam {
    energy: f64,
    temperature: f64,
    element: Element,
}

impl UniformBeam {
    /// Create a beam with the given energy (eV/amu), species temperature
    /// (eV) and element.
    pub fn new(energy: f64, temperature: f64, element: Element) -> Self {
        Self {
            energy,
            temperature,
            element,
        }
    }
}

impl Beam for UniformBeam {
    fn energy(&self) -> f64 {
        self.energy
    }

    fn temperature(&self) -> f64 {
        self.temperature
    }

    fn element(&self) -> &Element {
        &self.element
    }
}
