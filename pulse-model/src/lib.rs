#![warn(clippy::todo, unused_qualifications)]

//! Light pulses as sums of spectral components.
//!
//! A [`Pulse`] is built from an [`Envelope`] sampled on a
//! [`FrequencySampling`], with every component's wavenumber given by a
//! Taylor-expanded [`DispersionRelation`]. The field
//!
//! ```text
//! E(z, t) = Σ_i A(ν_i) cos(2π (k(ν_i) z − ν_i t) + φ_i)
//! ```
//!
//! can then be evaluated at arbitrary coordinates, or sampled over a grid
//! with [`PulseFrames`] to drive an animation.

pub mod analysis;
pub mod constants;
pub mod dispersion;
pub mod envelope;
pub mod field;
pub mod frames;
pub mod pulse;
pub mod resonator;
pub mod sampling;

pub use crate::{
    constants::{
        Medium,
        PhysicalConstants,
    },
    dispersion::DispersionRelation,
    envelope::{
        Envelope,
        EnvelopeSpec,
    },
    frames::{
        PulseFrames,
        TimeSpan,
    },
    pulse::{
        PhaseOffsets,
        Pulse,
        SpectralComponent,
    },
    resonator::{
        ModePhases,
        Resonator,
    },
    sampling::FrequencySampling,
};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid envelope amplitude {amplitude} at frequency {frequency}")]
    InvalidEnvelope { frequency: f64, amplitude: f64 },

    #[error("Invalid sampling: {reason}")]
    InvalidSampling { reason: String },

    #[error("Can't broadcast coordinates of length {z_len} and {t_len}")]
    DimensionMismatch { z_len: usize, t_len: usize },
}

impl Error {
    pub(crate) fn invalid_sampling(reason: impl ToString) -> Self {
        Self::InvalidSampling {
            reason: reason.to_string(),
        }
    }
}
