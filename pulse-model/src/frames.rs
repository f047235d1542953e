use nalgebra::DMatrix;

use crate::{
    pulse::Pulse,
    sampling::linspace,
};

/// `steps` evenly spaced times in `start..=end`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSpan {
    pub start: f64,
    pub end: f64,
    pub steps: usize,
}

impl TimeSpan {
    pub fn new(start: f64, end: f64, steps: usize) -> Self {
        Self { start, end, steps }
    }

    pub fn times(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.steps)
    }

    pub fn duration(&self) -> f64 {
        (self.end - self.start).abs()
    }
}

/// The field of a pulse sampled on a `times × z` grid. Each row is one
/// animation frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PulseFrames {
    pub z: Vec<f64>,
    pub times: Vec<f64>,
    pub field: DMatrix<f64>,
}

impl PulseFrames {
    pub fn compute(pulse: &Pulse, z: Vec<f64>, span: &TimeSpan) -> Self {
        let repetition_period = pulse.repetition_period();
        if span.duration() > repetition_period {
            tracing::warn!(
                duration = span.duration(),
                repetition_period,
                "time span is longer than the repetition period of the spectrum, the pulse will show up repeatedly"
            );
        }

        Self::snapshots(pulse, z, span.times())
    }

    /// Frames at explicit times, e.g. a few snapshots of the pulse.
    pub fn snapshots(pulse: &Pulse, z: Vec<f64>, times: Vec<f64>) -> Self {
        tracing::debug!(frames = times.len(), points = z.len(), "computing frames");
        let field = pulse.field_grid(&z, &times);
        Self { z, times, field }
    }

    pub fn num_frames(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty() || self.z.is_empty()
    }

    pub fn frame(&self, index: usize) -> Vec<f64> {
        self.field.row(index).iter().copied().collect()
    }

    /// Position of the `z` sample at `z_index`, which may be negative.
    pub fn position(&self, z_index: isize) -> Option<f64> {
        resolve_index(self.z.len(), z_index).map(|column| self.z[column])
    }

    /// Field over time at a fixed position. Negative indices count from the
    /// end of the `z` axis.
    pub fn trace_at(&self, z_index: isize) -> Option<Vec<f64>> {
        let column = resolve_index(self.z.len(), z_index)?;
        Some(self.field.column(column).iter().copied().collect())
    }

    /// Frames divided by the largest field value.
    pub fn normalized(&self) -> Self {
        let max = self.field.max();
        let mut normalized = self.clone();
        if max > 0.0 {
            normalized.field /= max;
        }
        normalized
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        (!self.is_empty()).then(|| (self.field.min(), self.field.max()))
    }
}

/// Resolves a python-style index into a sequence of length `len`.
pub fn resolve_index(len: usize, index: isize) -> Option<usize> {
    let resolved = if index < 0 {
        len.checked_sub(index.unsigned_abs())?
    }
    else {
        index as usize
    };
    (resolved < len).then_some(resolved)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;

    use crate::{
        dispersion::DispersionRelation,
        envelope::Gaussian,
        frames::{
            PulseFrames,
            TimeSpan,
            resolve_index,
        },
        pulse::{
            PhaseOffsets,
            Pulse,
        },
        sampling::{
            FrequencySampling,
            linspace,
        },
    };

    fn pulse() -> Pulse {
        Pulse::new(
            Arc::new(Gaussian {
                center: 1.0,
                width: 0.05,
            }),
            &FrequencySampling::new(0.001, 2.0, 400),
            DispersionRelation::from_angular_expansion(1.0, [1.0, 5.0]),
            &PhaseOffsets::Zero,
        )
        .unwrap()
    }

    #[test]
    fn frame_shape() {
        let z = linspace(0.0, 50.0, 100);
        let frames = PulseFrames::compute(&pulse(), z, &TimeSpan::new(0.0, 10.0, 10));
        assert_eq!(frames.num_frames(), 10);
        assert_eq!(frames.field.shape(), (10, 100));
        assert_eq!(frames.frame(3).len(), 100);
    }

    #[test]
    fn first_frame_is_snapshot_at_start() {
        let pulse = pulse();
        let z = linspace(0.0, 50.0, 100);
        let frames = PulseFrames::compute(&pulse, z.clone(), &TimeSpan::new(0.0, 10.0, 5));
        let direct = pulse.field_along_z(&z, 0.0);
        assert_eq!(frames.frame(0), direct);
    }

    #[test]
    fn later_frames_differ() {
        let z = linspace(0.0, 50.0, 100);
        let frames = PulseFrames::compute(&pulse(), z, &TimeSpan::new(0.0, 10.0, 2));
        assert_ne!(frames.frame(0), frames.frame(1));
    }

    #[test]
    fn traces_and_normalization() {
        let z = linspace(0.0, 10.0, 21);
        let frames = PulseFrames::compute(&pulse(), z, &TimeSpan::new(0.0, 5.0, 7));

        let last = frames.trace_at(-1).unwrap();
        assert_eq!(last.len(), 7);
        assert_eq!(last, frames.trace_at(20).unwrap());
        assert_eq!(frames.trace_at(21), None);
        assert_eq!(frames.trace_at(-22), None);
        assert_eq!(frames.position(-1), frames.z.last().copied());
        assert_eq!(frames.position(21), None);

        let normalized = frames.normalized();
        let (_, max) = normalized.value_range().unwrap();
        assert_relative_eq!(max, 1.0);
    }

    #[test]
    fn python_style_indices() {
        assert_eq!(resolve_index(5, 0), Some(0));
        assert_eq!(resolve_index(5, -1), Some(4));
        assert_eq!(resolve_index(5, -5), Some(0));
        assert_eq!(resolve_index(5, -6), None);
        assert_eq!(resolve_index(5, 5), None);
        assert_eq!(resolve_index(0, 0), None);
    }
}
