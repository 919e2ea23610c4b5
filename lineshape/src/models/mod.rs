//! Emission line-shape models.
//!
//! Each model binds a [`Line`](crate::atomic::Line), its rest wavelength and
//! the relevant state providers at construction, then deposits line radiance
//! into a caller-owned [`Spectrum`] on every `add_line` call. Construction
//! validates the configuration and can fail; evaluation never fails. Where
//! the local plasma state implies no emission (non-positive temperature or
//! density, degenerate width, line outside the spectral range) the spectrum
//! is simply left unchanged.
//!
//! Models are immutable after construction and safe to share across per-ray
//! workers; the spectrum buffer is the only mutable state and is owned by
//! the caller.

mod beam;
mod gaussian;
mod multiplet;
mod stark;
mod zeeman;

pub use beam::{BeamEmissionMultiplet, STARK_SPLITTING_FACTOR};
pub use gaussian::GaussianLine;
pub use multiplet::MultipletLineShape;
pub use stark::{StarkBroadenedLine, StarkCoefficients, LORENTZIAN_CUTOFF_WIDTHS};
pub use zeeman::{
    ParametrisedZeemanTriplet, PolarisationMode, ZeemanFineStructure, ZeemanMultiplet,
    ZeemanSplittingFunction, ZeemanTriplet,
};

use nalgebra::{Point3, Vector3};
use spectral_math::Spectrum;
use thiserror::Error;

/// Configuration errors raised when constructing a line-shape model.
///
/// These are deterministic misconfigurations: they surface immediately to
/// the constructing caller and are never retried or recovered at evaluation
/// time.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Polarisation string was not one of "pi", "sigma", "no"
    #[error("unrecognised polarisation mode '{0}', expected 'pi', 'sigma' or 'no'")]
    InvalidPolarisation(String),
    /// Multiplet table contained no components
    #[error("multiplet table must contain at least one component")]
    EmptyMultiplet,
    /// Multiplet wavelength and ratio columns differ in length
    #[error("multiplet table has {wavelengths} wavelengths but {ratios} ratios")]
    MismatchedMultiplet { wavelengths: usize, ratios: usize },
    /// Multiplet ratios must sum to one
    #[error("multiplet ratios sum to {0}, they must sum to 1")]
    UnnormalisedRatios(f64),
    /// Stark broadening is only fitted for hydrogenic emitters
    #[error("Stark broadening requires a hydrogenic line, got element '{0}'")]
    NotHydrogenic(String),
    /// No Stark model fit exists for this transition
    #[error("no Stark coefficients fitted for transition {upper} -> {lower}")]
    MissingStarkCoefficients { upper: u32, lower: u32 },
    /// No fine-structure parametrisation exists for this line
    #[error(
        "no Zeeman fine-structure parameters for '{symbol}' (charge {charge}) \
         transition {upper} -> {lower}; supply them explicitly"
    )]
    MissingZeemanParameters {
        symbol: String,
        charge: i32,
        upper: u32,
        lower: u32,
    },
    /// Explicit Zeeman splitting constant must be positive
    #[error("Zeeman splitting constant alpha must be positive, got {0}")]
    InvalidAlpha(f64),
    /// Fine-structure broadening coefficient must be non-negative
    #[error("Zeeman fine-structure coefficient beta must be non-negative, got {0}")]
    InvalidBeta(f64),
    /// Splitting function wavelength/ratio lists differ in length
    #[error(
        "splitting function has {wavelengths} wavelength functions but {ratios} \
         ratio functions in the {polarisation} set"
    )]
    MismatchedSplittingFunction {
        polarisation: &'static str,
        wavelengths: usize,
        ratios: usize,
    },
}

/// A line-shape model contributing to a spectrum at an emitting point.
///
/// `add_line` distributes `radiance` over the spectrum's bins according to
/// the local plasma state at `point`, observed along `direction`. The
/// spectrum is mutated in place; samples are only ever added to.
pub trait LineShapeModel: Send + Sync {
    /// Add one line contribution from an emitting point.
    ///
    /// # Arguments
    /// * `radiance` - Integrated line radiance to distribute
    /// * `point` - Emitting sample position
    /// * `direction` - Observation direction (emitter towards observer)
    /// * `spectrum` - Caller-owned output buffer
    fn add_line(
        &self,
        radiance: f64,
        point: Point3<f64>,
        direction: Vector3<f64>,
        spectrum: &mut Spectrum,
    );
}

/// A line-shape model resolving the line into polarised Zeeman components.
pub trait ZeemanLineShapeModel: LineShapeModel {
    /// Which polarisation channel(s) this model emits.
    fn polarisation(&self) -> PolarisationMode;
}

/// A line-shape model for beam-driven emission.
///
/// Beam emission depends on both the beam-frame and the plasma-frame sample
/// locations, so the contract differs from [`LineShapeModel`].
pub trait BeamLineShapeModel: Send + Sync {
    /// Add one beam-emission line contribution.
    ///
    /// # Arguments
    /// * `radiance` - Integrated line radiance to distribute
    /// * `beam_point` - Sample position in the beam frame
    /// * `plasma_point` - Same position in the plasma frame
    /// * `beam_direction` - Beam propagation direction
    /// * `observation_direction` - Emitter towards observer
    /// * `spectrum` - Caller-owned output buffer
    #[allow(clippy::too_many_arguments)]
    fn add_line(
        &self,
        radiance: f64,
        beam_point: Point3<f64>,
        plasma_point: Point3<f64>,
        beam_direction: Vector3<f64>,
        observation_direction: Vector3<f64>,
        spectrum: &mut Spectrum,
    );
}
