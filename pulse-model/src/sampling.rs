use crate::{
    Error,
    envelope::Envelope,
};

/// Generates `n` linearly spaced samples in `[start, stop]`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Evenly spaced frequencies `min..=max`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencySampling {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl FrequencySampling {
    pub fn new(min: f64, max: f64, count: usize) -> Self {
        Self { min, max, count }
    }

    /// `count` samples spread symmetrically over `center ± half_width`.
    pub fn centered(center: f64, half_width: f64, count: usize) -> Self {
        Self::new(center - half_width, center + half_width, count)
    }

    pub fn frequencies(&self) -> Vec<f64> {
        linspace(self.min, self.max, self.count)
    }

    pub fn step(&self) -> f64 {
        if self.count > 1 {
            (self.max - self.min) / (self.count - 1) as f64
        }
        else {
            0.0
        }
    }

    /// The superposition of components spaced `Δν` apart repeats every
    /// `1 / Δν`. Time windows longer than this show replicas of the pulse.
    pub fn repetition_period(&self) -> f64 {
        self.step().recip()
    }

    /// Checks that the samples are finite, increasing and bracket
    /// `center_frequency`.
    pub fn validate(&self, center_frequency: f64) -> Result<(), Error> {
        if self.count == 0 {
            return Err(Error::invalid_sampling("sample count must be positive"));
        }
        if !self.min.is_finite() || !self.max.is_finite() || !center_frequency.is_finite() {
            return Err(Error::invalid_sampling(format!(
                "frequency range {}..={} and center {} must be finite",
                self.min, self.max, center_frequency
            )));
        }
        if self.count > 1 && self.min >= self.max {
            return Err(Error::invalid_sampling(format!(
                "frequency range {}..={} is not increasing",
                self.min, self.max
            )));
        }
        if center_frequency < self.min || center_frequency > self.max {
            return Err(Error::invalid_sampling(format!(
                "frequency range {}..={} does not contain the center frequency {}",
                self.min, self.max, center_frequency
            )));
        }
        Ok(())
    }
}

/// Samples `envelope` on `sampling` and returns `(ν_i, A(ν_i))` pairs in
/// increasing frequency order.
pub fn synthesize(
    envelope: &dyn Envelope,
    sampling: &FrequencySampling,
    center_frequency: f64,
) -> Result<Vec<(f64, f64)>, Error> {
    sampling.validate(center_frequency)?;

    sampling
        .frequencies()
        .into_iter()
        .map(|frequency| {
            let amplitude = envelope.amplitude(frequency);
            if amplitude.is_finite() && amplitude >= 0.0 {
                Ok((frequency, amplitude))
            }
            else {
                Err(Error::InvalidEnvelope {
                    frequency,
                    amplitude,
                })
            }
        })
        .collect()
}
