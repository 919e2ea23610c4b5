//! End-to-end scenarios exercising the models through the public API.

use std::sync::Arc;

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use lineshape::atomic::{Element, Line};
use lineshape::functions::Function1D;
use lineshape::mock::{UniformDistribution, UniformPlasma};
use lineshape::models::{
    GaussianLine, LineShapeModel, ModelError, MultipletLineShape, ParametrisedZeemanTriplet,
    PolarisationMode, StarkBroadenedLine, ZeemanMultiplet, ZeemanSplittingFunction, ZeemanTriplet,
};
use lineshape::Spectrum;
use spectral_math::add_gaussian_line;

fn observe() -> (Point3<f64>, Vector3<f64>) {
    (Point3::origin(), Vector3::new(1.0, 0.0, 0.0))
}

#[test]
fn test_gaussian_deposit_stays_inside_its_window() {
    let mut spectrum = Spectrum::new(500.0, 510.0, 100).unwrap();
    add_gaussian_line(1.0, 505.0, 0.1, &mut spectrum);

    assert_relative_eq!(spectrum.total(), 1.0, epsilon = 1e-6);

    // All mass lies within 10 sigma of the centre, peaking at 505 nm
    let mut peak = 0;
    for (i, &sample) in spectrum.samples().iter().enumerate() {
        let wavelength = spectrum.wavelength(i);
        if (wavelength - 505.0).abs() > 1.0 + spectrum.delta_wavelength() {
            assert_eq!(sample, 0.0, "unexpected mass at {wavelength} nm");
        }
        if sample > spectrum.samples()[peak] {
            peak = i;
        }
    }
    assert_relative_eq!(
        spectrum.wavelength(peak),
        505.0,
        epsilon = spectrum.delta_wavelength()
    );
}

#[test]
fn test_multiplet_splits_radiance_by_its_static_ratios() {
    let line = Line::new(Element::deuterium(), 0, (6, 2));
    let species = Arc::new(UniformDistribution::stationary(0.2, 1.0e19));
    let model = MultipletLineShape::new(
        line,
        404.0,
        species,
        &[403.5, 404.1, 404.3],
        &[0.2, 0.5, 0.3],
    )
    .unwrap();

    let (point, direction) = observe();
    let mut spectrum = Spectrum::new(402.0, 406.0, 800).unwrap();
    model.add_line(2.0, point, direction, &mut spectrum);

    assert_relative_eq!(spectrum.total(), 2.0, epsilon = 1e-6);

    // Component radiances 0.4 / 1.0 / 0.6, recovered by integrating between
    // the midpoints separating the well-resolved components
    let delta = spectrum.delta_wavelength();
    let mass_between = |lo: f64, hi: f64| {
        spectrum
            .samples()
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                let centre = spectrum.wavelength(*i);
                centre >= lo && centre < hi
            })
            .map(|(_, s)| s * delta)
            .sum::<f64>()
    };
    assert_relative_eq!(mass_between(402.0, 403.8), 0.4, epsilon = 1e-6);
    assert_relative_eq!(mass_between(403.8, 404.2), 1.0, epsilon = 1e-6);
    assert_relative_eq!(mass_between(404.2, 406.0), 0.6, epsilon = 1e-6);
}

#[test]
fn test_stark_model_validates_its_line_at_construction() {
    let species = Arc::new(UniformDistribution::stationary(2.0, 1.0e19));
    let plasma = Arc::new(UniformPlasma::field_free(2.0, 1.0e20));

    let helium = Line::new(Element::helium(), 0, (3, 2));
    assert!(matches!(
        StarkBroadenedLine::new(helium, 468.6, species.clone(), plasma.clone()),
        Err(ModelError::NotHydrogenic(_))
    ));

    let balmer_alpha = Line::new(Element::hydrogen(), 0, (3, 2));
    let model = StarkBroadenedLine::new(balmer_alpha, 656.28, species, plasma).unwrap();
    let coefficients = model.coefficients();
    assert_relative_eq!(coefficients.c, 3.71e-18, epsilon = 1e-24);
    assert_relative_eq!(coefficients.a, 0.7665, epsilon = 1e-10);
    assert_relative_eq!(coefficients.b, 0.064, epsilon = 1e-10);
}

#[test]
fn test_zero_field_zeeman_models_match_the_plain_gaussian() {
    let line = Line::new(Element::deuterium(), 0, (3, 2));
    let species = Arc::new(UniformDistribution::stationary(2.0, 1.0e19));
    let plasma = Arc::new(UniformPlasma::field_free(2.0, 1.0e19));
    let (point, direction) = observe();

    let mut reference = Spectrum::new(650.0, 660.0, 1000).unwrap();
    GaussianLine::new(line.clone(), 656.1, species.clone()).add_line(
        1.0,
        point,
        direction,
        &mut reference,
    );

    // Unpolarised view reproduces the Gaussian total; a single channel
    // carries half of it
    let triplet = ZeemanTriplet::new(
        line.clone(),
        656.1,
        species.clone(),
        plasma.clone(),
        PolarisationMode::Unpolarised,
    );
    let mut unpolarised = Spectrum::new(650.0, 660.0, 1000).unwrap();
    triplet.add_line(1.0, point, direction, &mut unpolarised);
    assert_relative_eq!(unpolarised.total(), reference.total(), epsilon = 1e-9);

    let pi_only = ZeemanTriplet::new(
        line.clone(),
        656.1,
        species.clone(),
        plasma.clone(),
        PolarisationMode::Pi,
    );
    let mut pi = Spectrum::new(650.0, 660.0, 1000).unwrap();
    pi_only.add_line(1.0, point, direction, &mut pi);
    assert_relative_eq!(pi.total(), 0.5 * reference.total(), epsilon = 1e-9);

    let parametrised = ParametrisedZeemanTriplet::new(
        line.clone(),
        656.1,
        species.clone(),
        plasma.clone(),
        PolarisationMode::Sigma,
    )
    .unwrap();
    let mut sigma = Spectrum::new(650.0, 660.0, 1000).unwrap();
    parametrised.add_line(1.0, point, direction, &mut sigma);
    // Fine-structure widening changes the shape but not the channel share
    assert_relative_eq!(sigma.total(), 0.5 * reference.total(), epsilon = 1e-6);

    let constant = |value: f64| -> Arc<dyn Function1D> { Arc::new(move |_b: f64| value) };
    let sigma_plus: Arc<dyn Function1D> = Arc::new(|b: f64| 656.1 + 0.02 * b);
    let sigma_minus: Arc<dyn Function1D> = Arc::new(|b: f64| 656.1 - 0.02 * b);
    let splitting = ZeemanSplittingFunction::new(
        vec![constant(656.1)],
        vec![constant(1.0)],
        vec![sigma_plus, sigma_minus],
        vec![constant(1.0), constant(1.0)],
    )
    .unwrap();
    let multiplet = ZeemanMultiplet::new(
        line,
        656.1,
        species,
        plasma,
        PolarisationMode::Unpolarised,
        splitting,
    );
    let mut collapsed = Spectrum::new(650.0, 660.0, 1000).unwrap();
    multiplet.add_line(1.0, point, direction, &mut collapsed);
    assert_relative_eq!(collapsed.total(), reference.total(), epsilon = 1e-9);
}
