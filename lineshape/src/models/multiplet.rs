//! Static multiplet line shape.

use std::sync::Arc;

use nalgebra::{Point3, Vector3};
use spectral_math::{add_gaussian_line, doppler_shift, thermal_broadening, Spectrum};

use crate::atomic::Line;
use crate::models::{LineShapeModel, ModelError};
use crate::plasma::Distribution;

/// Tolerance for the ratio-sum check; ratios must sum to 1 up to float
/// representation error, they are never renormalised.
const RATIO_SUM_TOLERANCE: f64 = 1e-8;

/// A fixed set of multiplet components sharing one base radiance.
///
/// The component table is validated at construction: one wavelength and one
/// ratio per component, ratios summing to one. At evaluation the input
/// radiance is split across the components by their static ratios; every
/// component is Doppler-shifted independently while the thermal width is
/// computed once from the base rest wavelength (the components belong to
/// the same emitting species).
pub struct MultipletLineShape {
    line: Line,
    wavelength: f64,
    species: Arc<dyn Distribution>,
    components: Vec<(f64, f64)>,
}

impl MultipletLineShape {
    /// Create a multiplet from parallel wavelength/ratio tables.
    ///
    /// # Errors
    /// Fails if the table is empty, the columns differ in length, or the
    /// ratios do not sum to one.
    pub fn new(
        line: Line,
        wavelength: f64,
        species: Arc<dyn Distribution>,
        wavelengths: &[f64],
        ratios: &[f64],
    ) -> Result<Self, ModelError> {
        if wavelengths.is_empty() || ratios.is_empty() {
            return Err(ModelError::EmptyMultiplet);
        }
        if wavelengths.len() != ratios.len() {
            return Err(ModelError::MismatchedMultiplet {
                wavelengths: wavelengths.len(),
                ratios: ratios.len(),
            });
        }

        let total: f64 = ratios.iter().sum();
        if (total - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(ModelError::UnnormalisedRatios(total));
        }

        Ok(Self {
            line,
            wavelength,
            species,
            components: wavelengths
                .iter()
                .copied()
                .zip(ratios.iter().copied())
                .collect(),
        })
    }

    /// The emitting transition.
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Base rest wavelength (nm) used for the shared thermal width.
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// The validated (wavelength, ratio) component table.
    pub fn components(&self) -> &[(f64, f64)] {
        &self.components
    }
}

impl LineShapeModel for MultipletLineShape {
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
        let sigma =
            thermal_broadening(self.wavelength, temperature, self.line.element.atomic_weight);

        for &(component_wavelength, ratio) in &self.components {
            let centre = doppler_shift(component_wavelength, direction, velocity);
            add_gaussian_line(ratio * radiance, centre, sigma, spectrum);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomic::Element;
    use crate::mock::UniformDistribution;
    use approx::assert_relative_eq;

    fn test_line() -> Line {
        Line::new(Element::deuterium(), 0, (6, 2))
    }

    fn species(temperature_ev: f64) -> Arc<UniformDistribution> {
        Arc::new(UniformDistribution::stationary(temperature_ev, 1.0e19))
    }

    #[test]
    fn test_construction_rejects_bad_tables() {
        assert!(matches!(
            MultipletLineShape::new(test_line(), 404.0, species(1.0), &[], &[]),
            Err(ModelError::EmptyMultiplet)
        ));
        assert!(matches!(
            MultipletLineShape::new(test_line(), 404.0, species(1.0), &[403.5, 404.1], &[1.0]),
            Err(ModelError::MismatchedMultiplet { .. })
        ));
        assert!(matches!(
            MultipletLineShape::new(
                test_line(),
                404.0,
                species(1.0),
                &[403.5, 404.1],
                &[0.5, 0.4]
            ),
            Err(ModelError::UnnormalisedRatios(_))
        ));
    }

    #[test]
    fn test_construction_accepts_unit_sum() {
        let model = MultipletLineShape::new(
            test_line(),
            404.0,
            species(1.0),
            &[403.5, 404.1, 404.3],
            &[0.2, 0.5, 0.3],
        )
        .unwrap();
        assert_eq!(model.components().len(), 3);
    }

    #[test]
    fn test_radiance_partition() {
        // Cold enough that the three components are well separated
        let model = MultipletLineShape::new(
            test_line(),
            404.0,
            species(0.2),
            &[403.5, 404.1, 404.3],
            &[0.2, 0.5, 0.3],
        )
        .unwrap();

        let mut spectrum = Spectrum::new(402.0, 406.0, 400).unwrap();
        model.add_line(
            2.0,
            Point3::origin(),
            Vector3::new(1.0, 0.0, 0.0),
            &mut spectrum,
        );

        // Total conserves the input radiance
        assert_relative_eq!(spectrum.total(), 2.0, epsilon = 1e-6);

        // Partial sums around each component recover the per-component share
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
    fn test_cold_species_is_noop() {
        let model = MultipletLineShape::new(
            test_line(),
            404.0,
            species(0.0),
            &[403.5, 404.1],
            &[0.5, 0.5],
        )
        .unwrap();

        let mut spectrum = Spectrum::new(402.0, 406.0, 100).unwrap();
        model.add_line(
            2.0,
            Point3::origin(),
            Vector3::new(1.0, 0.0, 0.0),
            &mut spectrum,
        );
        assert_eq!(spectrum.samples().sum(), 0.0);
    }
}
