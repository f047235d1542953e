use std::f64::consts::TAU;

use smallvec::SmallVec;

/// Wavenumber as a function of frequency, expanded around a center frequency
/// `ν_0`:
///
/// ```text
/// k(ν) = Σ_{n=0}^{N} k_n / n! (ν − ν_0)^n
/// ```
///
/// `k_n` is the n-th derivative of `k` at `ν_0`. Wavenumbers are in cycles
/// per unit length, i.e. a component oscillates as `cos(2π (k z − ν t))`.
/// Terms beyond the last coefficient are exactly zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispersionRelation {
    pub center_frequency: f64,
    pub coefficients: SmallVec<[f64; 4]>,
}

impl DispersionRelation {
    pub fn new(center_frequency: f64, coefficients: impl IntoIterator<Item = f64>) -> Self {
        Self {
            center_frequency,
            coefficients: coefficients.into_iter().collect(),
        }
    }

    pub fn constant(center_frequency: f64, k_0: f64) -> Self {
        Self::new(center_frequency, [k_0])
    }

    /// `k(ν) = ν / v`: every component travels at `velocity`, so the pulse
    /// keeps its shape.
    pub fn non_dispersive(center_frequency: f64, velocity: f64) -> Self {
        let k_1 = velocity.recip();
        Self::new(center_frequency, [k_1 * center_frequency, k_1])
    }

    /// Converts an expansion in angular frequency with wavenumbers in radians
    /// per unit length,
    ///
    /// ```text
    /// k(ν) = Σ a_n (2π (ν − ν_0))^n
    /// ```
    ///
    /// into Taylor coefficients `k_n = n! a_n (2π)^(n−1)`.
    pub fn from_angular_expansion(
        center_frequency: f64,
        coefficients: impl IntoIterator<Item = f64>,
    ) -> Self {
        let mut factorial = 1.0;
        let mut tau_power = 1.0 / TAU;

        let coefficients = coefficients.into_iter().enumerate().map(|(n, a_n)| {
            if n > 0 {
                factorial *= n as f64;
                tau_power *= TAU;
            }
            factorial * a_n * tau_power
        });

        Self::new(center_frequency, coefficients)
    }

    /// Truncation order `N`. An empty coefficient list is treated like `k = 0`
    /// and has order 0 as well.
    pub fn order(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn wavenumber(&self, frequency: f64) -> f64 {
        self.derivative(frequency, 0)
    }

    pub fn wavenumbers(&self, frequencies: &[f64]) -> Vec<f64> {
        frequencies
            .iter()
            .map(|frequency| self.wavenumber(*frequency))
            .collect()
    }

    /// `m`-th derivative `d^m k / dν^m` at `frequency`.
    pub fn derivative(&self, frequency: f64, m: usize) -> f64 {
        let delta = frequency - self.center_frequency;

        // Σ_{n≥m} k_n Δ^(n−m) / (n−m)!
        let mut sum = 0.0;
        let mut term = 1.0;
        for (j, k_n) in self.coefficients.iter().skip(m).enumerate() {
            if j > 0 {
                term *= delta / j as f64;
            }
            sum += k_n * term;
        }
        sum
    }

    /// `dk/dν`: propagation time per unit length of the envelope.
    pub fn group_delay(&self, frequency: f64) -> f64 {
        self.derivative(frequency, 1)
    }

    /// `d²k/dν²`
    pub fn group_velocity_dispersion(&self, frequency: f64) -> f64 {
        self.derivative(frequency, 2)
    }

    /// `ν / k(ν)`, the velocity of the carrier's phase fronts.
    pub fn phase_velocity(&self, frequency: f64) -> f64 {
        frequency / self.wavenumber(frequency)
    }

    /// `1 / k'(ν)`, the velocity of the envelope.
    pub fn group_velocity(&self, frequency: f64) -> f64 {
        self.group_delay(frequency).recip()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use approx::assert_relative_eq;

    use crate::dispersion::DispersionRelation;

    #[test]
    fn zero_order_is_constant() {
        let dispersion = DispersionRelation::constant(1.0, 5.0);
        assert_eq!(dispersion.order(), 0);
        assert_eq!(dispersion.wavenumber(1.0), 5.0);
        assert_eq!(dispersion.wavenumber(-3.0), 5.0);
        assert_eq!(dispersion.group_delay(2.0), 0.0);
    }

    #[test]
    fn only_k_0_at_center_frequency() {
        let dispersion = DispersionRelation::new(1.0, [1.0, 10.0, 5.0, 3.0]);
        assert_eq!(dispersion.order(), 3);
        assert_eq!(dispersion.wavenumber(1.0), 1.0);
    }

    #[test]
    fn taylor_terms_are_divided_by_factorial() {
        let dispersion = DispersionRelation::new(2.0, [1.0, 3.0, 4.0, 12.0]);
        let delta: f64 = 0.5;
        let expected = 1.0 + 3.0 * delta + 4.0 / 2.0 * delta.powi(2) + 12.0 / 6.0 * delta.powi(3);
        assert_relative_eq!(dispersion.wavenumber(2.5), expected, max_relative = 1e-15);
    }

    #[test]
    fn derivatives_of_expansion() {
        let dispersion = DispersionRelation::new(0.0, [1.0, 3.0, 4.0, 12.0]);
        assert_relative_eq!(dispersion.group_delay(1.0), 3.0 + 4.0 + 6.0);
        assert_relative_eq!(dispersion.group_velocity_dispersion(1.0), 4.0 + 12.0);
        assert_relative_eq!(dispersion.derivative(1.0, 3), 12.0);
        assert_eq!(dispersion.derivative(1.0, 4), 0.0);
    }

    #[test]
    fn empty_expansion_is_zero() {
        let dispersion = DispersionRelation::new(1.0, []);
        assert_eq!(dispersion.order(), 0);
        assert_eq!(dispersion.wavenumber(4.0), 0.0);
    }

    #[test]
    fn wavenumbers_keep_shape() {
        let dispersion = DispersionRelation::new(1.0, [1.0, 2.0]);
        let k = dispersion.wavenumbers(&[0.5, 1.0, 1.5]);
        assert_eq!(k, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn angular_expansion_matches_radian_wavenumber() {
        // k(ν) = 1 + 5 · 2π (ν − 1) radians per unit length
        let dispersion = DispersionRelation::from_angular_expansion(1.0, [1.0, 5.0]);
        assert_relative_eq!(
            TAU * dispersion.wavenumber(1.5),
            16.707963267948966,
            max_relative = 1e-12
        );

        let a = [0.3, 2.0, 7.0, 1.5];
        let dispersion = DispersionRelation::from_angular_expansion(0.02, a);
        let nu: f64 = 0.031;
        let delta_omega = TAU * (nu - 0.02);
        let radians = a[0]
            + a[1] * delta_omega
            + a[2] * delta_omega.powi(2)
            + a[3] * delta_omega.powi(3);
        assert_relative_eq!(TAU * dispersion.wavenumber(nu), radians, max_relative = 1e-12);
    }

    #[test]
    fn non_dispersive_velocities() {
        let dispersion = DispersionRelation::non_dispersive(2.0, 0.25);
        assert_eq!(dispersion.order(), 1);
        for nu in [1.0, 2.0, 3.5] {
            assert_relative_eq!(dispersion.phase_velocity(nu), 0.25, max_relative = 1e-12);
            assert_relative_eq!(dispersion.group_velocity(nu), 0.25, max_relative = 1e-12);
        }
        assert_eq!(dispersion.group_velocity_dispersion(2.0), 0.0);
    }
}
