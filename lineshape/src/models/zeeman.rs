//! Zeeman-split line shapes.
//!
//! A magnetic field resolves a line into a pi component at the unshifted
//! wavelength and two sigma components split symmetrically around it. The
//! relative channel intensities depend on the angle between the field and
//! the observation direction: for an angle with cosine squared `cos2` and
//! sine squared `sin2`, the pi channel carries `0.5 * sin2` of the radiance
//! and each sigma component `0.25 * sin2 + 0.5 * cos2`. At zero field the
//! undifferentiated line is shared 50/50 between the two polarisation
//! channels.
//!
//! Three models cover increasing levels of detail: the ideal triplet
//! ([`ZeemanTriplet`]), a parametrised triplet with fine-structure
//! corrections ([`ParametrisedZeemanTriplet`]) and an arbitrary
//! field-dependent multiplet ([`ZeemanMultiplet`]).

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use nalgebra::{Point3, Vector3};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use spectral_math::constants::{BOHR_MAGNETON_EV, HC_EV_NM};
use spectral_math::{add_gaussian_line, doppler_shift, thermal_broadening, Spectrum};
use tracing::debug;

use crate::atomic::Line;
use crate::functions::Function1D;
use crate::models::{LineShapeModel, ModelError, ZeemanLineShapeModel};
use crate::plasma::{Distribution, Plasma};

/// Which polarisation channel(s) of a Zeeman-split line to observe.
///
/// Instruments with a polariser select a single channel; an unpolarised
/// view sees both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarisationMode {
    /// The unshifted pi component only
    Pi,
    /// The shifted sigma components only
    Sigma,
    /// Both channels
    Unpolarised,
}

impl PolarisationMode {
    /// Canonical string form, accepted by the parser.
    pub fn as_str(&self) -> &'static str {
        match self {
            PolarisationMode::Pi => "pi",
            PolarisationMode::Sigma => "sigma",
            PolarisationMode::Unpolarised => "no",
        }
    }

    fn pi_visible(&self) -> bool {
        matches!(self, PolarisationMode::Pi | PolarisationMode::Unpolarised)
    }

    fn sigma_visible(&self) -> bool {
        matches!(self, PolarisationMode::Sigma | PolarisationMode::Unpolarised)
    }
}

impl FromStr for PolarisationMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pi" => Ok(PolarisationMode::Pi),
            "sigma" => Ok(PolarisationMode::Sigma),
            "no" => Ok(PolarisationMode::Unpolarised),
            other => Err(ModelError::InvalidPolarisation(other.to_string())),
        }
    }
}

impl fmt::Display for PolarisationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ideal Zeeman triplet.
///
/// Splits the sigma components by the photon-energy shift `mu_B * |B|`,
/// converted back to wavelength via `lambda = hc / (hc / lambda_0 +/- dE)`.
pub struct ZeemanTriplet {
    line: Line,
    wavelength: f64,
    species: Arc<dyn Distribution>,
    plasma: Arc<dyn Plasma>,
    polarisation: PolarisationMode,
}

impl ZeemanTriplet {
    /// Create an ideal Zeeman triplet model.
    pub fn new(
        line: Line,
        wavelength: f64,
        species: Arc<dyn Distribution>,
        plasma: Arc<dyn Plasma>,
        polarisation: PolarisationMode,
    ) -> Self {
        Self {
            line,
            wavelength,
            species,
            plasma,
            polarisation,
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

impl LineShapeModel for ZeemanTriplet {
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

        let sigma =
            thermal_broadening(self.wavelength, temperature, self.line.element.atomic_weight);
        let velocity = self.species.bulk_velocity(point);

        let b_field = self.plasma.b_field(point);
        let b_magnitude = b_field.norm();

        if b_magnitude == 0.0 {
            add_unsplit_line(
                radiance,
                self.wavelength,
                sigma,
                velocity,
                direction,
                self.polarisation,
                spectrum,
            );
            return;
        }

        let cos2 = (b_field.dot(&direction.normalize()) / b_magnitude).powi(2);
        let sin2 = 1.0 - cos2;

        if self.polarisation.pi_visible() {
            let centre = doppler_shift(self.wavelength, direction, velocity);
            add_gaussian_line(0.5 * sin2 * radiance, centre, sigma, spectrum);
        }

        if self.polarisation.sigma_visible() {
            let photon_energy = HC_EV_NM / self.wavelength;
            let component_radiance = (0.25 * sin2 + 0.5 * cos2) * radiance;

            for energy_shift in [BOHR_MAGNETON_EV * b_magnitude, -BOHR_MAGNETON_EV * b_magnitude] {
                let split_wavelength = HC_EV_NM / (photon_energy + energy_shift);
                let centre = doppler_shift(split_wavelength, direction, velocity);
                add_gaussian_line(component_radiance, centre, sigma, spectrum);
            }
        }
    }
}

impl ZeemanLineShapeModel for ZeemanTriplet {
    fn polarisation(&self) -> PolarisationMode {
        self.polarisation
    }
}

/// Fine-structure parametrisation of a Zeeman triplet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeemanFineStructure {
    /// Wavelength splitting constant (nm/T)
    pub alpha: f64,
    /// Fine-structure broadening coefficient
    pub beta: f64,
    /// Temperature exponent of the broadening correction
    pub gamma: f64,
}

type FineStructureKey = (String, i32, (u32, u32));

/// Fine-structure parametrisations keyed by (element symbol, charge,
/// transition), for the lines commonly observed in fusion devices.
static ZEEMAN_FINE_STRUCTURE: Lazy<HashMap<FineStructureKey, ZeemanFineStructure>> =
    Lazy::new(|| {
        let table = [
            (("H", 0, (3, 2)), (0.040_226_7, 0.341_5, -0.524_7)),
            (("D", 0, (3, 2)), (0.040_206_8, 0.438_4, -0.501_5)),
            (("T", 0, (3, 2)), (0.040_200_2, 0.471_0, -0.492_6)),
            (("He3", 1, (4, 3)), (0.020_520_0, 1.441_8, -0.489_2)),
            (("He", 1, (4, 3)), (0.020_505_5, 1.441_8, -0.489_2)),
        ];

        table
            .into_iter()
            .map(|((symbol, charge, transition), (alpha, beta, gamma))| {
                (
                    (symbol.to_string(), charge, transition),
                    ZeemanFineStructure { alpha, beta, gamma },
                )
            })
            .collect()
    });

/// Zeeman triplet with parametrised fine-structure corrections.
///
/// Differs from the ideal triplet in two ways: the thermal width is widened
/// by `sqrt(1 + beta^2 * T^(2 gamma))`, and the sigma split is linear in
/// wavelength space, `lambda_0 +/- 0.5 * alpha * |B|`.
pub struct ParametrisedZeemanTriplet {
    line: Line,
    wavelength: f64,
    species: Arc<dyn Distribution>,
    plasma: Arc<dyn Plasma>,
    polarisation: PolarisationMode,
    parameters: ZeemanFineStructure,
}

impl ParametrisedZeemanTriplet {
    /// Create a parametrised triplet, resolving (alpha, beta, gamma) from
    /// the built-in table.
    ///
    /// # Errors
    /// Fails if no parametrisation exists for the line; supply one with
    /// [`ParametrisedZeemanTriplet::with_parameters`] in that case.
    pub fn new(
        line: Line,
        wavelength: f64,
        species: Arc<dyn Distribution>,
        plasma: Arc<dyn Plasma>,
        polarisation: PolarisationMode,
    ) -> Result<Self, ModelError> {
        let key = (line.element.symbol.clone(), line.charge, line.transition);
        let parameters = *ZEEMAN_FINE_STRUCTURE.get(&key).ok_or_else(|| {
            ModelError::MissingZeemanParameters {
                symbol: line.element.symbol.clone(),
                charge: line.charge,
                upper: line.transition.0,
                lower: line.transition.1,
            }
        })?;

        debug!(
            symbol = %line.element.symbol,
            charge = line.charge,
            ?parameters,
            "resolved Zeeman fine-structure parametrisation"
        );

        Ok(Self {
            line,
            wavelength,
            species,
            plasma,
            polarisation,
            parameters,
        })
    }

    /// Create a parametrised triplet with explicit parameters.
    ///
    /// When `alpha` is not given it is derived from the simple-triplet
    /// approximation `alpha = 2 lambda_0^2 mu_B / hc`; `beta` and `gamma`
    /// have no such fallback and must always be supplied.
    ///
    /// # Errors
    /// Fails for an explicit `alpha <= 0` or a negative `beta`.
    #[allow(clippy::too_many_arguments)]
    pub fn with_parameters(
        line: Line,
        wavelength: f64,
        species: Arc<dyn Distribution>,
        plasma: Arc<dyn Plasma>,
        polarisation: PolarisationMode,
        alpha: Option<f64>,
        beta: f64,
        gamma: f64,
    ) -> Result<Self, ModelError> {
        if let Some(alpha) = alpha {
            if alpha <= 0.0 {
                return Err(ModelError::InvalidAlpha(alpha));
            }
        }
        if beta < 0.0 {
            return Err(ModelError::InvalidBeta(beta));
        }

        let alpha =
            alpha.unwrap_or_else(|| 2.0 * wavelength * wavelength * BOHR_MAGNETON_EV / HC_EV_NM);

        Ok(Self {
            line,
            wavelength,
            species,
            plasma,
            polarisation,
            parameters: ZeemanFineStructure { alpha, beta, gamma },
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

    /// The resolved (alpha, beta, gamma) parametrisation.
    pub fn parameters(&self) -> ZeemanFineStructure {
        self.parameters
    }
}

impl LineShapeModel for ParametrisedZeemanTriplet {
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

        let ZeemanFineStructure { alpha, beta, gamma } = self.parameters;

        // Fine-structure components blend into an effectively wider line
        let correction = (1.0 + beta * beta * temperature.powf(2.0 * gamma)).sqrt();
        let sigma =
            thermal_broadening(self.wavelength, temperature, self.line.element.atomic_weight)
                * correction;

        let velocity = self.species.bulk_velocity(point);
        let b_field = self.plasma.b_field(point);
        let b_magnitude = b_field.norm();

        if b_magnitude == 0.0 {
            add_unsplit_line(
                radiance,
                self.wavelength,
                sigma,
                velocity,
                direction,
                self.polarisation,
                spectrum,
            );
            return;
        }

        let cos2 = (b_field.dot(&direction.normalize()) / b_magnitude).powi(2);
        let sin2 = 1.0 - cos2;

        if self.polarisation.pi_visible() {
            let centre = doppler_shift(self.wavelength, direction, velocity);
            add_gaussian_line(0.5 * sin2 * radiance, centre, sigma, spectrum);
        }

        if self.polarisation.sigma_visible() {
            let component_radiance = (0.25 * sin2 + 0.5 * cos2) * radiance;
            let half_split = 0.5 * alpha * b_magnitude;

            for split_wavelength in [self.wavelength + half_split, self.wavelength - half_split] {
                let centre = doppler_shift(split_wavelength, direction, velocity);
                add_gaussian_line(component_radiance, centre, sigma, spectrum);
            }
        }
    }
}

impl ZeemanLineShapeModel for ParametrisedZeemanTriplet {
    fn polarisation(&self) -> PolarisationMode {
        self.polarisation
    }
}

/// Field-dependent multiplet generator for [`ZeemanMultiplet`].
///
/// Holds two ordered sets of scalar functions of the field magnitude, one
/// per polarisation: component wavelengths and component ratios. The ratio
/// functions need not be pre-normalised; evaluation renormalises each
/// polarisation set to sum to one.
pub struct ZeemanSplittingFunction {
    pi: Vec<(Arc<dyn Function1D>, Arc<dyn Function1D>)>,
    sigma: Vec<(Arc<dyn Function1D>, Arc<dyn Function1D>)>,
}

impl ZeemanSplittingFunction {
    /// Create a splitting function from parallel wavelength/ratio function
    /// lists for each polarisation.
    ///
    /// # Errors
    /// Fails if a wavelength list and its ratio list differ in length.
    pub fn new(
        pi_wavelengths: Vec<Arc<dyn Function1D>>,
        pi_ratios: Vec<Arc<dyn Function1D>>,
        sigma_wavelengths: Vec<Arc<dyn Function1D>>,
        sigma_ratios: Vec<Arc<dyn Function1D>>,
    ) -> Result<Self, ModelError> {
        if pi_wavelengths.len() != pi_ratios.len() {
            return Err(ModelError::MismatchedSplittingFunction {
                polarisation: "pi",
                wavelengths: pi_wavelengths.len(),
                ratios: pi_ratios.len(),
            });
        }
        if sigma_wavelengths.len() != sigma_ratios.len() {
            return Err(ModelError::MismatchedSplittingFunction {
                polarisation: "sigma",
                wavelengths: sigma_wavelengths.len(),
                ratios: sigma_ratios.len(),
            });
        }

        Ok(Self {
            pi: pi_wavelengths.into_iter().zip(pi_ratios).collect(),
            sigma: sigma_wavelengths.into_iter().zip(sigma_ratios).collect(),
        })
    }

    /// Evaluate the pi components at field magnitude `b`, with ratios
    /// normalised to sum to one.
    pub fn evaluate_pi(&self, b: f64) -> Vec<(f64, f64)> {
        Self::evaluate_set(&self.pi, b)
    }

    /// Evaluate the sigma components at field magnitude `b`, with ratios
    /// normalised to sum to one.
    pub fn evaluate_sigma(&self, b: f64) -> Vec<(f64, f64)> {
        Self::evaluate_set(&self.sigma, b)
    }

    fn evaluate_set(
        set: &[(Arc<dyn Function1D>, Arc<dyn Function1D>)],
        b: f64,
    ) -> Vec<(f64, f64)> {
        let mut components: Vec<(f64, f64)> = set
            .iter()
            .map(|(wavelength, ratio)| (wavelength.evaluate(b), ratio.evaluate(b)))
            .collect();

        let total: f64 = components.iter().map(|(_, ratio)| ratio).sum();
        if total != 0.0 {
            for (_, ratio) in &mut components {
                *ratio /= total;
            }
        }

        components
    }
}

/// Zeeman multiplet with field-dependent component positions and strengths.
///
/// The pi channel weight (`0.5 * sin2`) is distributed over the normalised
/// pi components; the sigma channel weight (`0.5 * sin2 + cos2`, covering
/// both sigma branches) over the normalised sigma components. Zero field
/// falls back to a single unsplit Gaussian exactly as in [`ZeemanTriplet`].
pub struct ZeemanMultiplet {
    line: Line,
    wavelength: f64,
    species: Arc<dyn Distribution>,
    plasma: Arc<dyn Plasma>,
    polarisation: PolarisationMode,
    splitting: ZeemanSplittingFunction,
}

impl ZeemanMultiplet {
    /// Create a Zeeman multiplet model from a validated splitting function.
    pub fn new(
        line: Line,
        wavelength: f64,
        species: Arc<dyn Distribution>,
        plasma: Arc<dyn Plasma>,
        polarisation: PolarisationMode,
        splitting: ZeemanSplittingFunction,
    ) -> Self {
        Self {
            line,
            wavelength,
            species,
            plasma,
            polarisation,
            splitting,
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

impl LineShapeModel for ZeemanMultiplet {
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

        let sigma =
            thermal_broadening(self.wavelength, temperature, self.line.element.atomic_weight);
        let velocity = self.species.bulk_velocity(point);

        let b_field = self.plasma.b_field(point);
        let b_magnitude = b_field.norm();

        if b_magnitude == 0.0 {
            add_unsplit_line(
                radiance,
                self.wavelength,
                sigma,
                velocity,
                direction,
                self.polarisation,
                spectrum,
            );
            return;
        }

        let cos2 = (b_field.dot(&direction.normalize()) / b_magnitude).powi(2);
        let sin2 = 1.0 - cos2;

        if self.polarisation.pi_visible() {
            let channel = 0.5 * sin2 * radiance;
            for (wavelength, ratio) in self.splitting.evaluate_pi(b_magnitude) {
                let centre = doppler_shift(wavelength, direction, velocity);
                add_gaussian_line(channel * ratio, centre, sigma, spectrum);
            }
        }

        if self.polarisation.sigma_visible() {
            // Both sigma branches share this channel weight
            let channel = (0.5 * sin2 + cos2) * radiance;
            for (wavelength, ratio) in self.splitting.evaluate_sigma(b_magnitude) {
                let centre = doppler_shift(wavelength, direction, velocity);
                add_gaussian_line(channel * ratio, centre, sigma, spectrum);
            }
        }
    }
}

impl ZeemanLineShapeModel for ZeemanMultiplet {
    fn polarisation(&self) -> PolarisationMode {
        self.polarisation
    }
}

/// Zero-field fallback shared by the Zeeman models: one Gaussian carrying
/// the full radiance, or half of it when a single polarisation channel was
/// requested (the undifferentiated line is shared 50/50 between the two
/// channels).
fn add_unsplit_line(
    radiance: f64,
    wavelength: f64,
    sigma: f64,
    velocity: Vector3<f64>,
    direction: Vector3<f64>,
    polarisation: PolarisationMode,
    spectrum: &mut Spectrum,
) {
    let weight = match polarisation {
        PolarisationMode::Unpolarised => 1.0,
        PolarisationMode::Pi | PolarisationMode::Sigma => 0.5,
    };
    let centre = doppler_shift(wavelength, direction, velocity);
    add_gaussian_line(weight * radiance, centre, sigma, spectrum);
}
