use std::{
    fmt::Debug,
    sync::Arc,
};

use crate::{
    Error,
    sampling::FrequencySampling,
};

/// Spectral amplitude `A(ν)` of a pulse.
pub trait Envelope: Debug + Send + Sync + 'static {
    fn amplitude(&self, frequency: f64) -> f64;
}

impl<E: Envelope + ?Sized> Envelope for Arc<E> {
    fn amplitude(&self, frequency: f64) -> f64 {
        (**self).amplitude(frequency)
    }
}

/// `A(ν) = exp(−(ν − ν_c)² / (2σ²))`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gaussian {
    pub center: f64,
    pub width: f64,
}

impl Gaussian {
    /// Gaussian window over the samples of `sampling`, centered on the middle
    /// sample and with a standard deviation of `width_in_samples` sample
    /// spacings. A single sample gets a window of zero width, which is 1 at
    /// that sample.
    pub fn window(sampling: &FrequencySampling, width_in_samples: f64) -> Self {
        Self {
            center: 0.5 * (sampling.min + sampling.max),
            width: width_in_samples * sampling.step(),
        }
    }
}

impl Envelope for Gaussian {
    fn amplitude(&self, frequency: f64) -> f64 {
        if self.width == 0.0 {
            let amplitude = if frequency == self.center {
                1.0
            }
            else {
                0.0
            };
            return amplitude;
        }
        let x = (frequency - self.center) / self.width;
        (-0.5 * x * x).exp()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uniform {
    pub amplitude: f64,
}

impl Default for Uniform {
    fn default() -> Self {
        Self { amplitude: 1.0 }
    }
}

impl Envelope for Uniform {
    fn amplitude(&self, _frequency: f64) -> f64 {
        self.amplitude
    }
}

/// Tabulated spectrum, linearly interpolated between the samples and zero
/// outside of them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SampledTable", into = "SampledTable")
)]
pub struct Sampled {
    frequencies: Vec<f64>,
    amplitudes: Vec<f64>,
}

impl Sampled {
    pub fn new(frequencies: Vec<f64>, amplitudes: Vec<f64>) -> Result<Self, Error> {
        if frequencies.is_empty() {
            return Err(Error::invalid_sampling("spectrum table is empty"));
        }
        if frequencies.len() != amplitudes.len() {
            return Err(Error::invalid_sampling(format!(
                "spectrum table has {} frequencies but {} amplitudes",
                frequencies.len(),
                amplitudes.len()
            )));
        }
        if !frequencies.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(Error::invalid_sampling(
                "spectrum table frequencies must be strictly increasing",
            ));
        }

        Ok(Self {
            frequencies,
            amplitudes,
        })
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }
}

impl Envelope for Sampled {
    fn amplitude(&self, frequency: f64) -> f64 {
        let last = self.frequencies.len() - 1;
        if frequency < self.frequencies[0] || frequency > self.frequencies[last] {
            return 0.0;
        }

        // index of the first sample that is >= frequency
        let upper = self.frequencies.partition_point(|nu| *nu < frequency);
        if upper == 0 {
            return self.amplitudes[0];
        }

        let (nu_0, nu_1) = (self.frequencies[upper - 1], self.frequencies[upper]);
        let (a_0, a_1) = (self.amplitudes[upper - 1], self.amplitudes[upper]);
        let s = (frequency - nu_0) / (nu_1 - nu_0);
        a_0 + s * (a_1 - a_0)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct SampledTable {
    frequencies: Vec<f64>,
    amplitudes: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<SampledTable> for Sampled {
    type Error = Error;

    fn try_from(value: SampledTable) -> Result<Self, Self::Error> {
        Self::new(value.frequencies, value.amplitudes)
    }
}

#[cfg(feature = "serde")]
impl From<Sampled> for SampledTable {
    fn from(value: Sampled) -> Self {
        Self {
            frequencies: value.frequencies,
            amplitudes: value.amplitudes,
        }
    }
}

/// Another envelope multiplied by a constant factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaled<E> {
    pub factor: f64,
    pub inner: E,
}

impl<E: Envelope> Envelope for Scaled<E> {
    fn amplitude(&self, frequency: f64) -> f64 {
        self.factor * self.inner.amplitude(frequency)
    }
}

/// Closed set of envelopes that can be described in a scene file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum EnvelopeSpec {
    Gaussian(Gaussian),
    /// Gaussian window expressed in sample spacings of the frequency sampling
    /// the pulse is built with.
    GaussianWindow { width_in_samples: f64 },
    Uniform(Uniform),
    Sampled(Sampled),
}

impl EnvelopeSpec {
    /// Turns the description into an envelope. `sampling` is only needed to
    /// resolve [`EnvelopeSpec::GaussianWindow`].
    pub fn build(&self, sampling: &FrequencySampling) -> Arc<dyn Envelope> {
        match self {
            Self::Gaussian(gaussian) => Arc::new(*gaussian),
            Self::GaussianWindow { width_in_samples } => {
                Arc::new(Gaussian::window(sampling, *width_in_samples))
            }
            Self::Uniform(uniform) => Arc::new(*uniform),
            Self::Sampled(sampled) => Arc::new(sampled.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{
        Error,
        envelope::{
            Envelope,
            EnvelopeSpec,
            Gaussian,
            Sampled,
            Scaled,
            Uniform,
        },
        sampling::FrequencySampling,
    };

    #[test]
    fn gaussian_one_sigma() {
        let gaussian = Gaussian {
            center: 2.0,
            width: 0.5,
        };
        assert_eq!(gaussian.amplitude(2.0), 1.0);
        assert_relative_eq!(gaussian.amplitude(2.5), (-0.5f64).exp());
        assert_relative_eq!(gaussian.amplitude(1.5), gaussian.amplitude(2.5));
    }

    #[test]
    fn gaussian_window_in_samples() {
        let sampling = FrequencySampling::new(0.0, 2.0, 201);
        let gaussian = Gaussian::window(&sampling, 10.0);
        assert_relative_eq!(gaussian.center, 1.0);
        assert_relative_eq!(gaussian.width, 0.1, max_relative = 1e-12);
    }

    #[test]
    fn sampled_interpolates_linearly() {
        let sampled = Sampled::new(vec![1.0, 2.0, 4.0], vec![0.0, 1.0, 0.0]).unwrap();
        assert_eq!(sampled.amplitude(1.0), 0.0);
        assert_eq!(sampled.amplitude(1.5), 0.5);
        assert_eq!(sampled.amplitude(2.0), 1.0);
        assert_eq!(sampled.amplitude(3.0), 0.5);
        assert_eq!(sampled.amplitude(4.0), 0.0);
        assert_eq!(sampled.amplitude(0.5), 0.0);
        assert_eq!(sampled.amplitude(5.0), 0.0);
    }

    #[test]
    fn sampled_rejects_bad_tables() {
        assert!(matches!(
            Sampled::new(vec![], vec![]),
            Err(Error::InvalidSampling { .. })
        ));
        assert!(matches!(
            Sampled::new(vec![1.0, 2.0], vec![1.0]),
            Err(Error::InvalidSampling { .. })
        ));
        assert!(matches!(
            Sampled::new(vec![2.0, 1.0], vec![1.0, 1.0]),
            Err(Error::InvalidSampling { .. })
        ));
    }

    #[test]
    fn scaled_multiplies() {
        let scaled = Scaled {
            factor: 3.0,
            inner: Uniform { amplitude: 0.5 },
        };
        assert_eq!(scaled.amplitude(123.0), 1.5);
    }

    #[test]
    fn spec_builds_window_from_sampling() {
        let sampling = FrequencySampling::new(0.0, 1.0, 11);
        let envelope = EnvelopeSpec::GaussianWindow {
            width_in_samples: 2.0,
        }
        .build(&sampling);
        assert_eq!(envelope.amplitude(0.5), 1.0);
        assert_relative_eq!(envelope.amplitude(0.7), (-0.5f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn window_over_single_sample() {
        let sampling = FrequencySampling::new(0.3, 0.3, 1);
        let envelope = EnvelopeSpec::GaussianWindow {
            width_in_samples: 600.0,
        }
        .build(&sampling);
        assert_eq!(envelope.amplitude(0.3), 1.0);
        assert_eq!(envelope.amplitude(0.4), 0.0);
    }
}
