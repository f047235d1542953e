//! Standing-wave eigenmodes of a linear cavity, and mode locking.

use std::f64::consts::TAU;

use nalgebra::DMatrix;
use rand::{
    Rng,
    SeedableRng,
    rngs::StdRng,
};

use crate::{
    Error,
    constants::PhysicalConstants,
    frames::{
        PulseFrames,
        TimeSpan,
    },
};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ModePhases {
    /// All modes in phase. Their sum is a single pulse bouncing back and forth
    /// in the cavity.
    #[default]
    Zero,
    /// Uniformly distributed in `[0, 200)`.
    Random { seed: u64 },
    Explicit(Vec<f64>),
}

impl ModePhases {
    fn resolve(&self, modes: usize) -> Result<Vec<f64>, Error> {
        match self {
            Self::Zero => Ok(vec![0.0; modes]),
            Self::Random { seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                Ok((0..modes).map(|_| rng.random_range(0.0..200.0)).collect())
            }
            Self::Explicit(phases) => {
                if phases.len() == modes {
                    Ok(phases.clone())
                }
                else {
                    Err(Error::invalid_sampling(format!(
                        "got {} phases for {} modes",
                        phases.len(),
                        modes
                    )))
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Resonator {
    length: f64,
    speed_of_light: f64,
    phases: Vec<f64>,
}

impl Resonator {
    pub fn new(
        length: f64,
        modes: usize,
        phases: &ModePhases,
        physical_constants: &PhysicalConstants,
    ) -> Result<Self, Error> {
        if !(length.is_finite() && length > 0.0) {
            return Err(Error::invalid_sampling(format!(
                "cavity length {length} must be positive"
            )));
        }

        Ok(Self {
            length,
            speed_of_light: physical_constants.speed_of_light(),
            phases: phases.resolve(modes)?,
        })
    }

    /// Cavity filling the extent of the sample positions `z`.
    pub fn spanning(
        z: &[f64],
        modes: usize,
        phases: &ModePhases,
        physical_constants: &PhysicalConstants,
    ) -> Result<Self, Error> {
        let min = z.iter().copied().fold(f64::INFINITY, f64::min);
        let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self::new(max - min, modes, phases, physical_constants)
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn num_modes(&self) -> usize {
        self.phases.len()
    }

    pub fn phases(&self) -> &[f64] {
        &self.phases
    }

    /// Free spectral range `c / 2L`.
    pub fn mode_spacing(&self) -> f64 {
        self.speed_of_light / (2.0 * self.length)
    }

    /// Frequency of the `i`-th mode, counting from 1.
    pub fn mode_frequency(&self, mode: usize) -> f64 {
        self.mode_spacing() * mode as f64
    }

    /// Field of every mode at time `t`. Row `i` holds mode `i + 1`.
    pub fn modes(&self, z: &[f64], t: f64) -> DMatrix<f64> {
        DMatrix::from_fn(self.num_modes(), z.len(), |i, j| {
            let omega = TAU * self.mode_frequency(i + 1);
            let k = omega / self.speed_of_light;
            (2.0 * omega * t - self.phases[i]).sin() * (k * z[j]).sin()
        })
    }

    /// Sum of all modes at time `t`.
    pub fn field(&self, z: &[f64], t: f64) -> Vec<f64> {
        self.modes(z, t).row_sum().iter().copied().collect()
    }

    pub fn frames(&self, z: Vec<f64>, span: &TimeSpan) -> PulseFrames {
        let times = span.times();
        let mut field = DMatrix::zeros(times.len(), z.len());
        for (i, t) in times.iter().enumerate() {
            let snapshot = self.field(&z, *t);
            field
                .row_mut(i)
                .iter_mut()
                .zip(snapshot)
                .for_each(|(value, snapshot)| *value = snapshot);
        }
        PulseFrames { z, times, field }
    }
}

#[cfg(test)]
mod tests {
    use approx::{
        assert_abs_diff_eq,
        assert_relative_eq,
    };

    use crate::{
        Error,
        constants::PhysicalConstants,
        frames::TimeSpan,
        resonator::{
            ModePhases,
            Resonator,
        },
        sampling::linspace,
    };

    fn resonator(modes: usize, phases: &ModePhases) -> Resonator {
        Resonator::spanning(
            &linspace(0.0, 10.0, 101),
            modes,
            phases,
            &PhysicalConstants::REDUCED,
        )
        .unwrap()
    }

    #[test]
    fn mode_spacing_from_length() {
        let resonator = resonator(3, &ModePhases::Zero);
        assert_relative_eq!(resonator.length(), 10.0);
        assert_relative_eq!(resonator.mode_spacing(), 0.05);
        assert_relative_eq!(resonator.mode_frequency(3), 0.15);
    }

    #[test]
    fn modes_vanish_at_mirrors() {
        let resonator = resonator(4, &ModePhases::Zero);
        let modes = resonator.modes(&[0.0, 10.0], 1.3);
        assert_eq!(modes.shape(), (4, 2));
        for value in modes.iter() {
            assert_abs_diff_eq!(*value, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn field_is_sum_of_modes() {
        let resonator = resonator(5, &ModePhases::Random { seed: 7 });
        let z = linspace(0.0, 10.0, 33);
        let modes = resonator.modes(&z, 2.0);
        let field = resonator.field(&z, 2.0);
        for (j, value) in field.iter().enumerate() {
            assert_relative_eq!(modes.column(j).sum(), *value, epsilon = 1e-12);
        }
    }

    #[test]
    fn random_phases_are_seeded() {
        let a = resonator(6, &ModePhases::Random { seed: 1 });
        let b = resonator(6, &ModePhases::Random { seed: 1 });
        assert_eq!(a.phases(), b.phases());
        assert!(a.phases().iter().all(|phase| (0.0..200.0).contains(phase)));
    }

    #[test]
    fn explicit_phases_need_one_per_mode() {
        let result = Resonator::new(
            1.0,
            3,
            &ModePhases::Explicit(vec![0.0, 1.0]),
            &PhysicalConstants::REDUCED,
        );
        assert!(matches!(result, Err(Error::InvalidSampling { .. })));
    }

    #[test]
    fn rejects_degenerate_cavity() {
        let result = Resonator::spanning(&[1.0], 3, &ModePhases::Zero, &PhysicalConstants::REDUCED);
        assert!(matches!(result, Err(Error::InvalidSampling { .. })));
    }

    #[test]
    fn frames_over_time() {
        let resonator = resonator(3, &ModePhases::Zero);
        let z = linspace(0.0, 10.0, 11);
        let frames = resonator.frames(z.clone(), &TimeSpan::new(0.0, 5.0, 4));
        assert_eq!(frames.field.shape(), (4, 11));
        assert_eq!(frames.frame(2), resonator.field(&z, frames.times[2]));
    }
}
