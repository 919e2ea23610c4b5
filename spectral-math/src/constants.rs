//! Physical constants for spectroscopic calculations.
//!
//! Values follow CODATA 2018. The unit conventions used across the workspace
//! are: wavelengths in nanometres, temperatures in electron-volts, particle
//! densities in m^-3, magnetic fields in Tesla, velocities in m/s.

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Elementary charge (C). Doubles as the Joule per electron-volt factor.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

/// Unified atomic mass unit (kg).
pub const ATOMIC_MASS_UNIT: f64 = 1.660_539_066_60e-27;

/// Planck constant (J s).
pub const PLANCK_CONSTANT: f64 = 6.626_070_15e-34;

/// Bohr magneton (eV/T).
pub const BOHR_MAGNETON_EV: f64 = 5.788_381_806_0e-5;

/// Planck constant times speed of light (eV nm).
///
/// Converts between photon energy and wavelength: `E = HC_EV_NM / lambda_nm`.
pub const HC_EV_NM: f64 = 1_239.841_984_332;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hc_consistent_with_primary_constants() {
        let hc_ev_nm = PLANCK_CONSTANT * SPEED_OF_LIGHT / ELEMENTARY_CHARGE * 1e9;
        assert_relative_eq!(hc_ev_nm, HC_EV_NM, epsilon = 1e-8);
    }

    #[test]
    fn test_bohr_magneton_consistent_with_si_value() {
        // 9.2740100783e-24 J/T converted to eV/T
        let bohr_ev = 9.274_010_078_3e-24 / ELEMENTARY_CHARGE;
        assert_relative_eq!(BOHR_MAGNETON_EV, bohr_ev, epsilon = 1e-9);
    }
}
