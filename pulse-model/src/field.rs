//! Evaluation of the superposed field
//!
//! ```text
//! E(z, t) = Σ_i A_i cos(2π (k_i z − ν_i t) + φ_i)
//! ```
//!
//! The sum is exact: no windowing or normalization is applied, and a pulse
//! without components evaluates to zero everywhere.

use std::f64::consts::TAU;

use nalgebra::DMatrix;

use crate::{
    Error,
    pulse::Pulse,
};

/// Length of the result of broadcasting coordinate slices of length `z_len`
/// and `t_len` against each other. Slices broadcast if their lengths are
/// equal, or if either one has length 1.
pub fn broadcast_len(z_len: usize, t_len: usize) -> Result<usize, Error> {
    match (z_len, t_len) {
        (z_len, t_len) if z_len == t_len => Ok(z_len),
        (1, t_len) => Ok(t_len),
        (z_len, 1) => Ok(z_len),
        (z_len, t_len) => Err(Error::DimensionMismatch { z_len, t_len }),
    }
}

impl Pulse {
    pub fn field(&self, z: f64, t: f64) -> f64 {
        self.components()
            .iter()
            .map(|component| component.field(z, t))
            .sum()
    }

    /// Evaluates the field at broadcast coordinate pairs `(z[i], t[i])`.
    pub fn evaluate(&self, z: &[f64], t: &[f64]) -> Result<Vec<f64>, Error> {
        let len = broadcast_len(z.len(), t.len())?;
        let at = |values: &[f64], i: usize| {
            if values.len() == 1 {
                values[0]
            }
            else {
                values[i]
            }
        };

        Ok((0..len).map(|i| self.field(at(z, i), at(t, i))).collect())
    }

    /// Spatial snapshot at time `t`.
    pub fn field_along_z(&self, z: &[f64], t: f64) -> Vec<f64> {
        let mut field = vec![0.0; z.len()];
        for component in self.components() {
            let offset = component.phase - TAU * component.frequency * t;
            let k = TAU * component.wavenumber;
            for (value, z) in field.iter_mut().zip(z) {
                *value += component.amplitude * (k * z + offset).cos();
            }
        }
        field
    }

    /// Field as seen by an observer at position `z`.
    pub fn field_along_t(&self, z: f64, t: &[f64]) -> Vec<f64> {
        let mut field = vec![0.0; t.len()];
        for component in self.components() {
            let offset = component.phase + TAU * component.wavenumber * z;
            let omega = TAU * component.frequency;
            for (value, t) in field.iter_mut().zip(t) {
                *value += component.amplitude * (offset - omega * t).cos();
            }
        }
        field
    }

    /// Field on the grid `t × z`. Row `i` is the spatial snapshot at `t[i]`.
    pub fn field_grid(&self, z: &[f64], t: &[f64]) -> DMatrix<f64> {
        let mut grid = DMatrix::zeros(t.len(), z.len());
        for (i, t) in t.iter().enumerate() {
            let snapshot = self.field_along_z(z, *t);
            grid.row_mut(i)
                .iter_mut()
                .zip(snapshot)
                .for_each(|(value, snapshot)| *value = snapshot);
        }
        grid
    }

    /// Contribution of every component at time `t`. Row `i` belongs to the
    /// `i`-th component, so summing the rows gives [`Pulse::field_along_z`].
    pub fn component_fields(&self, z: &[f64], t: f64) -> DMatrix<f64> {
        DMatrix::from_fn(self.len(), z.len(), |i, j| {
            self.components()[i].field(z[j], t)
        })
    }
}
