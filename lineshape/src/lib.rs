//! Plasma emission line-shape models.
//!
//! This crate turns an integrated line radiance at an emitting point into a
//! wavelength-resolved contribution to a [`Spectrum`]. A model is built once
//! from a [`Line`](atomic::Line), its rest wavelength and a set of state
//! providers (species [`Distribution`](plasma::Distribution), bulk
//! [`Plasma`](plasma::Plasma), neutral [`Beam`](plasma::Beam)), then
//! evaluated many times, typically once per ray sample:
//!
//! ```
//! use std::sync::Arc;
//! use nalgebra::{Point3, Vector3};
//! use lineshape::atomic::{Element, Line};
//! use lineshape::mock::UniformDistribution;
//! use lineshape::models::{GaussianLine, LineShapeModel};
//! use lineshape::Spectrum;
//!
//! let line = Line::new(Element::deuterium(), 0, (3, 2));
//! let species = Arc::new(UniformDistribution::stationary(2.0, 1.0e19));
//! let model = GaussianLine::new(line, 656.1, species);
//!
//! let mut spectrum = Spectrum::new(650.0, 660.0, 500)?;
//! model.add_line(1.0, Point3::origin(), Vector3::new(1.0, 0.0, 0.0), &mut spectrum);
//!
//! approx::assert_relative_eq!(spectrum.total(), 1.0, epsilon = 1e-6);
//! # Ok::<(), lineshape::SpectrumError>(())
//! ```
//!
//! The available shapes range from the plain thermally broadened Gaussian to
//! Stark-broadened hydrogenic profiles, Zeeman-split triplets and multiplets
//! and the motional-Stark beam emission multiplet; see [`models`].
//!
//! Units follow the conventions of the underlying maths crate: wavelengths
//! in nm, temperatures in eV, densities in m^-3, magnetic fields in T.

pub mod atomic;
pub mod functions;
pub mod mock;
pub mod models;
pub mod plasma;

pub use models::{
    BeamEmissionMultiplet, BeamLineShapeModel, GaussianLine, LineShapeModel, ModelError,
    MultipletLineShape, ParametrisedZeemanTriplet, PolarisationMode, StarkBroadenedLine,
    ZeemanLineShapeModel, ZeemanMultiplet, ZeemanSplittingFunction, ZeemanTriplet,
};
pub use spectral_math::{Spectrum, SpectrumError};
