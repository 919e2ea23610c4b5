//! Wavelength-binned spectrum buffer.
//!
//! A [`Spectrum`] holds an ordered sequence of spectral radiance accumulators
//! over a regular wavelength grid. Bin `i` covers the half-open interval
//! `[min + i * delta, min + (i + 1) * delta)` nanometres. Line-shape models
//! only ever *add* into the samples; ownership of the buffer stays with the
//! caller that drives the radiance integration.

use ndarray::Array1;
use thiserror::Error;

/// Error type for spectrum construction
#[derive(Debug, Error)]
pub enum SpectrumError {
    /// The spectrum must contain at least one bin
    #[error("spectrum must have at least one bin")]
    NoBins,
    /// The wavelength range is empty or inverted
    #[error("invalid wavelength range [{min}, {max}] nm, max must exceed min")]
    InvalidRange { min: f64, max: f64 },
}

/// A regularly binned spectral radiance buffer.
///
/// Samples are spectral radiance densities (per nanometre), so the
/// wavelength-integrated radiance of the buffer is `sum(samples) * delta`,
/// returned by [`Spectrum::total`].
#[derive(Debug, Clone)]
pub struct Spectrum {
    min_wavelength: f64,
    max_wavelength: f64,
    samples: Array1<f64>,
}

impl Spectrum {
    /// Create a zeroed spectrum covering `[min_wavelength, max_wavelength]`
    /// nm with `bins` equal-width bins.
    pub fn new(
        min_wavelength: f64,
        max_wavelength: f64,
        bins: usize,
    ) -> Result<Self, SpectrumError> {
        if bins == 0 {
            return Err(SpectrumError::NoBins);
        }
        if !(max_wavelength > min_wavelength) {
            return Err(SpectrumError::InvalidRange {
                min: min_wavelength,
                max: max_wavelength,
            });
        }

        Ok(Self {
            min_wavelength,
            max_wavelength,
            samples: Array1::zeros(bins),
        })
    }

    /// Lower bound of the wavelength range (nm).
    pub fn min_wavelength(&self) -> f64 {
        self.min_wavelength
    }

    /// Upper bound of the wavelength range (nm).
    pub fn max_wavelength(&self) -> f64 {
        self.max_wavelength
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.samples.len()
    }

    /// Width of a single bin (nm).
    pub fn delta_wavelength(&self) -> f64 {
        (self.max_wavelength - self.min_wavelength) / self.samples.len() as f64
    }

    /// Centre wavelength of bin `i` (nm).
    pub fn wavelength(&self, bin: usize) -> f64 {
        self.min_wavelength + (bin as f64 + 0.5) * self.delta_wavelength()
    }

    /// Read-only view of the sample accumulators.
    pub fn samples(&self) -> &Array1<f64> {
        &self.samples
    }

    /// Mutable view of the sample accumulators.
    pub fn samples_mut(&mut self) -> &mut Array1<f64> {
        &mut self.samples
    }

    /// A fresh zeroed spectrum with the same wavelength grid.
    pub fn zeroed_like(&self) -> Self {
        Self {
            min_wavelength: self.min_wavelength,
            max_wavelength: self.max_wavelength,
            samples: Array1::zeros(self.samples.len()),
        }
    }

    /// Wavelength-integrated radiance of the buffer: `sum(samples) * delta`.
    pub fn total(&self) -> f64 {
        self.samples.sum() * self.delta_wavelength()
    }

    /// Multiply every sample by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.samples.mapv_inplace(|s| s * factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_construction_validation() {
        assert!(matches!(
            Spectrum::new(500.0, 510.0, 0),
            Err(SpectrumError::NoBins)
        ));
        assert!(matches!(
            Spectrum::new(510.0, 500.0, 100),
            Err(SpectrumError::InvalidRange { .. })
        ));
        assert!(matches!(
            Spectrum::new(500.0, 500.0, 100),
            Err(SpectrumError::InvalidRange { .. })
        ));
        assert!(Spectrum::new(500.0, 510.0, 100).is_ok());
    }

    #[test]
    fn test_bin_geometry() {
        let spectrum = Spectrum::new(500.0, 510.0, 100).unwrap();
        assert_eq!(spectrum.bins(), 100);
        assert_relative_eq!(spectrum.delta_wavelength(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(spectrum.wavelength(0), 500.05, epsilon = 1e-12);
        assert_relative_eq!(spectrum.wavelength(99), 509.95, epsilon = 1e-12);
    }

    #[test]
    fn test_total_integrates_samples() {
        let mut spectrum = Spectrum::new(0.0, 10.0, 10).unwrap();
        spectrum.samples_mut().fill(2.0);
        // 10 bins of width 1 nm, each holding 2 per-nm -> 20 integrated
        assert_relative_eq!(spectrum.total(), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zeroed_like_preserves_grid() {
        let mut spectrum = Spectrum::new(400.0, 700.0, 512).unwrap();
        spectrum.samples_mut()[7] = 3.0;

        let scratch = spectrum.zeroed_like();
        assert_eq!(scratch.bins(), spectrum.bins());
        assert_relative_eq!(scratch.min_wavelength(), 400.0, epsilon = 1e-12);
        assert_relative_eq!(scratch.max_wavelength(), 700.0, epsilon = 1e-12);
        assert_eq!(scratch.samples().sum(), 0.0);
    }

    #[test]
    fn test_scale() {
        let mut spectrum = Spectrum::new(0.0, 1.0, 4).unwrap();
        spectrum.samples_mut().fill(1.0);
        spectrum.scale(0.25);
        for &s in spectrum.samples() {
            assert_relative_eq!(s, 0.25, epsilon = 1e-12);
        }
    }
}
