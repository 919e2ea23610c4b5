//! Doppler shift and thermal broadening formulas.
//!
//! Pure functions with no state. Wavelengths are nanometres, temperatures
//! electron-volts, velocities m/s.

use nalgebra::Vector3;

use crate::constants::{ATOMIC_MASS_UNIT, ELEMENTARY_CHARGE, SPEED_OF_LIGHT};

/// Doppler-shifted wavelength of a line emitted by a moving source.
///
/// Projects `velocity` onto the normalised `observation_direction` and
/// applies the non-relativistic shift `lambda * (1 + v_proj / c)`. The
/// observation direction points from the emitter towards the observer and
/// must be non-zero.
///
/// # Arguments
/// * `wavelength` - Rest wavelength (nm)
/// * `observation_direction` - Direction of observation (any magnitude)
/// * `velocity` - Emitter bulk velocity (m/s)
pub fn doppler_shift(
    wavelength: f64,
    observation_direction: Vector3<f64>,
    velocity: Vector3<f64>,
) -> f64 {
    let projected = velocity.dot(&observation_direction.normalize());
    wavelength * (1.0 + projected / SPEED_OF_LIGHT)
}

/// Gaussian standard deviation of a thermally broadened line (nm).
///
/// The Maxwellian velocity spread of a species with atomic weight
/// `atomic_weight` (amu) at temperature `temperature_ev` (eV) widens the
/// line to `sigma = lambda * sqrt(T e / (A m_u)) / c`.
///
/// Callers are expected to treat `temperature_ev <= 0` as "no emission" and
/// skip the call; this function does not validate its input.
pub fn thermal_broadening(wavelength: f64, temperature_ev: f64, atomic_weight: f64) -> f64 {
    wavelength
        * (temperature_ev * ELEMENTARY_CHARGE / (atomic_weight * ATOMIC_MASS_UNIT)).sqrt()
        / SPEED_OF_LIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_doppler_shift_stationary() {
        let shifted = doppler_shift(656.28, Vector3::new(1.0, 0.0, 0.0), Vector3::zeros());
        assert_relative_eq!(shifted, 656.28, epsilon = 1e-12);
    }

    #[test]
    fn test_doppler_shift_along_observation() {
        // v/c = 1e-4 along the observation direction
        let v = SPEED_OF_LIGHT * 1e-4;
        let shifted = doppler_shift(
            656.28,
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(v, 0.0, 0.0),
        );
        assert_relative_eq!(shifted, 656.28 * 1.0001, epsilon = 1e-9);

        // Motion against the observation direction shifts the other way
        let shifted = doppler_shift(
            656.28,
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-v, 0.0, 0.0),
        );
        assert_relative_eq!(shifted, 656.28 * 0.9999, epsilon = 1e-9);
    }

    #[test]
    fn test_doppler_shift_perpendicular_motion() {
        let shifted = doppler_shift(
            656.28,
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 3.0e6, 0.0),
        );
        assert_relative_eq!(shifted, 656.28, epsilon = 1e-12);
    }

    #[test]
    fn test_doppler_shift_normalises_direction() {
        let v = Vector3::new(2.0e5, 0.0, 0.0);
        let unit = doppler_shift(500.0, Vector3::new(1.0, 0.0, 0.0), v);
        let scaled = doppler_shift(500.0, Vector3::new(17.0, 0.0, 0.0), v);
        assert_relative_eq!(unit, scaled, epsilon = 1e-12);
    }

    #[test]
    fn test_thermal_broadening_hydrogen_balmer_alpha() {
        // 1 eV hydrogen at 656.28 nm: sqrt(e / m_u) = 9822.7 m/s
        let sigma = thermal_broadening(656.28, 1.0, 1.0);
        assert_relative_eq!(sigma, 0.021503, epsilon = 1e-5);
    }

    #[test]
    fn test_thermal_broadening_scales() {
        let base = thermal_broadening(656.28, 1.0, 1.0);

        // Four times the temperature doubles the width
        assert_relative_eq!(
            thermal_broadening(656.28, 4.0, 1.0),
            2.0 * base,
            epsilon = 1e-12
        );
        // Four times the mass halves it
        assert_relative_eq!(
            thermal_broadening(656.28, 1.0, 4.0),
            0.5 * base,
            epsilon = 1e-12
        );
        // Width is proportional to wavelength
        assert_relative_eq!(
            thermal_broadening(328.14, 1.0, 1.0),
            0.5 * base,
            epsilon = 1e-12
        );
    }
}
