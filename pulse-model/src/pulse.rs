use std::sync::Arc;

use crate::{
    Error,
    dispersion::DispersionRelation,
    envelope::Envelope,
    sampling::{
        FrequencySampling,
        synthesize,
    },
};

/// Fixed phase `φ_i` added to every spectral component.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PhaseOffsets {
    #[default]
    Zero,
    Constant(f64),
    /// One phase per frequency sample.
    PerComponent(Vec<f64>),
}

impl PhaseOffsets {
    fn resolve(&self, count: usize) -> Result<Vec<f64>, Error> {
        match self {
            Self::Zero => Ok(vec![0.0; count]),
            Self::Constant(phase) => Ok(vec![*phase; count]),
            Self::PerComponent(phases) => {
                if phases.len() == count {
                    Ok(phases.clone())
                }
                else {
                    Err(Error::invalid_sampling(format!(
                        "got {} phase offsets for {} frequency samples",
                        phases.len(),
                        count
                    )))
                }
            }
        }
    }
}

/// A single plane wave `A cos(2π (k z − ν t) + φ)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpectralComponent {
    pub frequency: f64,
    pub amplitude: f64,
    pub wavenumber: f64,
    pub phase: f64,
}

impl SpectralComponent {
    pub fn field(&self, z: f64, t: f64) -> f64 {
        self.amplitude * self.phase_at(z, t).cos()
    }

    #[inline]
    pub(crate) fn phase_at(&self, z: f64, t: f64) -> f64 {
        std::f64::consts::TAU * (self.wavenumber * z - self.frequency * t) + self.phase
    }
}

/// Spectral components of a pulse, together with the envelope and dispersion
/// relation that produced them.
#[derive(Clone, derive_more::Debug)]
pub struct Pulse {
    #[debug("[...]")]
    components: Vec<SpectralComponent>,
    envelope: Arc<dyn Envelope>,
    dispersion: DispersionRelation,
}

impl Pulse {
    /// Samples `envelope` on `sampling` and computes each sample's wavenumber
    /// from `dispersion`. The sampling must contain the center frequency of
    /// the dispersion relation.
    pub fn new(
        envelope: Arc<dyn Envelope>,
        sampling: &FrequencySampling,
        dispersion: DispersionRelation,
        phases: &PhaseOffsets,
    ) -> Result<Self, Error> {
        let spectrum = synthesize(&*envelope, sampling, dispersion.center_frequency)?;
        let phases = phases.resolve(spectrum.len())?;

        let components = spectrum
            .into_iter()
            .zip(phases)
            .map(|((frequency, amplitude), phase)| {
                SpectralComponent {
                    frequency,
                    amplitude,
                    wavenumber: dispersion.wavenumber(frequency),
                    phase,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            components = components.len(),
            order = dispersion.order(),
            center_frequency = dispersion.center_frequency,
            "built pulse"
        );

        Ok(Self {
            components,
            envelope,
            dispersion,
        })
    }

    /// Builds a pulse from explicit `(frequency, phase)` pairs. An empty list
    /// gives a pulse whose field is zero everywhere.
    pub fn from_frequencies(
        envelope: Arc<dyn Envelope>,
        dispersion: DispersionRelation,
        frequencies: impl IntoIterator<Item = (f64, f64)>,
    ) -> Result<Self, Error> {
        let mut components: Vec<SpectralComponent> = vec![];

        for (frequency, phase) in frequencies {
            if !frequency.is_finite() {
                return Err(Error::invalid_sampling(format!(
                    "frequency {frequency} is not finite"
                )));
            }
            if let Some(last) = components.last()
                && last.frequency >= frequency
            {
                return Err(Error::invalid_sampling(
                    "frequencies must be strictly increasing",
                ));
            }

            let amplitude = envelope.amplitude(frequency);
            if !amplitude.is_finite() || amplitude < 0.0 {
                return Err(Error::InvalidEnvelope {
                    frequency,
                    amplitude,
                });
            }

            components.push(SpectralComponent {
                frequency,
                amplitude,
                wavenumber: dispersion.wavenumber(frequency),
                phase,
            });
        }

        Ok(Self {
            components,
            envelope,
            dispersion,
        })
    }

    pub fn components(&self) -> &[SpectralComponent] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn envelope(&self) -> &dyn Envelope {
        &*self.envelope
    }

    pub fn dispersion(&self) -> &DispersionRelation {
        &self.dispersion
    }

    pub fn center_frequency(&self) -> f64 {
        self.dispersion.center_frequency
    }

    pub fn frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        self.components.iter().map(|component| component.frequency)
    }

    pub fn amplitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.components.iter().map(|component| component.amplitude)
    }

    /// `Σ A_i`, the largest value the field can reach.
    pub fn peak_amplitude(&self) -> f64 {
        self.amplitudes().sum()
    }

    /// Time after which the discrete superposition repeats itself, i.e. the
    /// inverse of the widest frequency spacing. Infinite for fewer than two
    /// components.
    pub fn repetition_period(&self) -> f64 {
        self.components
            .windows(2)
            .map(|pair| pair[1].frequency - pair[0].frequency)
            .fold(0.0, f64::max)
            .recip()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        f64::consts::FRAC_PI_2,
        sync::Arc,
    };

    use approx::assert_relative_eq;

    use crate::{
        Error,
        dispersion::DispersionRelation,
        envelope::{
            EnvelopeSpec,
            Gaussian,
            Uniform,
        },
        pulse::{
            PhaseOffsets,
            Pulse,
        },
        sampling::FrequencySampling,
    };

    fn gaussian_pulse(phases: &PhaseOffsets) -> Result<Pulse, Error> {
        Pulse::new(
            Arc::new(Gaussian {
                center: 1.0,
                width: 0.1,
            }),
            &FrequencySampling::centered(1.0, 0.5, 21),
            DispersionRelation::new(1.0, [1.0, 5.0]),
            phases,
        )
    }

    #[test]
    fn components_follow_dispersion() {
        let pulse = gaussian_pulse(&PhaseOffsets::Zero).unwrap();
        assert_eq!(pulse.len(), 21);
        for component in pulse.components() {
            assert_eq!(
                component.wavenumber,
                pulse.dispersion().wavenumber(component.frequency)
            );
            assert_eq!(component.phase, 0.0);
        }
        assert_relative_eq!(pulse.repetition_period(), 20.0, max_relative = 1e-9);
    }

    #[test]
    fn constant_phase_offset() {
        let pulse = gaussian_pulse(&PhaseOffsets::Constant(FRAC_PI_2)).unwrap();
        assert!(pulse.components().iter().all(|c| c.phase == FRAC_PI_2));
    }

    #[test]
    fn per_component_phase_needs_one_per_sample() {
        let phases = PhaseOffsets::PerComponent(vec![0.0; 20]);
        assert!(matches!(
            gaussian_pulse(&phases),
            Err(Error::InvalidSampling { .. })
        ));

        let phases = PhaseOffsets::PerComponent((0..21).map(f64::from).collect());
        let pulse = gaussian_pulse(&phases).unwrap();
        assert_eq!(pulse.components()[7].phase, 7.0);
    }

    #[test]
    fn explicit_frequencies_must_increase() {
        let result = Pulse::from_frequencies(
            Arc::new(Uniform::default()),
            DispersionRelation::constant(1.0, 1.0),
            [(1.0, 0.0), (1.0, 0.0)],
        );
        assert!(matches!(result, Err(Error::InvalidSampling { .. })));
    }

    #[test]
    fn empty_pulse() {
        let pulse = Pulse::from_frequencies(
            Arc::new(Uniform::default()),
            DispersionRelation::constant(1.0, 1.0),
            [],
        )
        .unwrap();
        assert!(pulse.is_empty());
        assert_eq!(pulse.peak_amplitude(), 0.0);
        assert!(pulse.repetition_period().is_infinite());
    }

    #[test]
    fn single_sample_window() {
        let sampling = FrequencySampling::new(1.0, 1.0, 1);
        let envelope = EnvelopeSpec::GaussianWindow {
            width_in_samples: 600.0,
        }
        .build(&sampling);
        let pulse = Pulse::new(
            envelope,
            &sampling,
            DispersionRelation::new(1.0, [2.0]),
            &PhaseOffsets::Zero,
        )
        .unwrap();

        assert_eq!(pulse.len(), 1);
        assert_eq!(pulse.peak_amplitude(), 1.0);
        assert_relative_eq!(pulse.field(0.0, 0.0), 1.0);
    }
}
