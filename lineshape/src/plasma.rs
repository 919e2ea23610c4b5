//! Trait contracts for the plasma, species and beam state providers.
//!
//! The line-shape engine is a pure numerical contributor: everything it
//! knows about the scene arrives through these narrow interfaces, supplied
//! by the host's plasma/species/beam data layer. All contracts are
//! `Send + Sync` so constructed models can be shared read-only across
//! per-ray workers.

use nalgebra::{Point3, Vector3};

use crate::atomic::Element;

/// Local state of one particle population (a target species or the plasma
/// electrons), sampled at arbitrary points.
pub trait Distribution: Send + Sync {
    /// Effective temperature (eV) at a point. Non-positive values mean the
    /// species is absent there and models skip the contribution.
    fn effective_temperature(&self, point: Point3<f64>) -> f64;

    /// Bulk flow velocity (m/s) at a point.
    fn bulk_velocity(&self, point: Point3<f64>) -> Vector3<f64>;

    /// Particle density (m^-3) at a point.
    fn density(&self, point: Point3<f64>) -> f64;
}

/// The plasma state consumed by field-dependent models.
pub trait Plasma: Send + Sync {
    /// Distribution of the plasma electrons.
    fn electron_distribution(&self) -> &dyn Distribution;

    /// Magnetic field vector (T) at a point.
    fn b_field(&self, point: Point3<f64>) -> Vector3<f64>;
}

/// A neutral beam injected into the plasma.
pub trait Beam: Send + Sync {
    /// Beam energy per nucleon (eV/amu).
    fn energy(&self) -> f64;

    /// Beam species temperature (eV).
    fn temperature(&self) -> f64;

    /// Beam species.
    fn element(&self) -> &Element;
}
