//! Measurements on sampled fields.
//!
//! Moments are weighted with the intensity `E²`, so they describe the
//! envelope rather than the carrier as long as the envelope spans many
//! carrier periods.

/// Intensity-weighted mean position.
pub fn centroid(x: &[f64], field: &[f64]) -> f64 {
    let (weight, first) = x
        .iter()
        .zip(field)
        .fold((0.0, 0.0), |(weight, first), (x, e)| {
            let intensity = e * e;
            (weight + intensity, first + intensity * x)
        });
    first / weight
}

/// Intensity-weighted RMS width around the [`centroid`].
pub fn rms_width(x: &[f64], field: &[f64]) -> f64 {
    let mean = centroid(x, field);
    let (weight, second) = x
        .iter()
        .zip(field)
        .fold((0.0, 0.0), |(weight, second), (x, e)| {
            let intensity = e * e;
            (weight + intensity, second + intensity * (x - mean).powi(2))
        });
    (second / weight).sqrt()
}

/// Position and value of the largest `|E|`.
pub fn peak(x: &[f64], field: &[f64]) -> Option<(f64, f64)> {
    x.iter()
        .zip(field)
        .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
        .map(|(x, e)| (*x, *e))
}

/// Zero crossing of the field closest to `near`, linearly interpolated
/// between samples. Following a crossing over small time steps tracks a
/// phase front of the carrier.
pub fn carrier_crossing(x: &[f64], field: &[f64], near: f64) -> Option<f64> {
    x.windows(2)
        .zip(field.windows(2))
        .filter(|(_, e)| (e[0] < 0.0) != (e[1] < 0.0))
        .map(|(x, e)| x[0] + (x[1] - x[0]) * e[0] / (e[0] - e[1]))
        .min_by(|a, b| (a - near).abs().total_cmp(&(b - near).abs()))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{
        analysis::{
            carrier_crossing,
            centroid,
            peak,
            rms_width,
        },
        sampling::linspace,
    };

    #[test]
    fn moments_of_gaussian() {
        let x = linspace(-20.0, 20.0, 4001);
        let sigma: f64 = 1.5;
        // E² is a gaussian with standard deviation sigma
        let field = x
            .iter()
            .map(|x| (-(x - 2.0).powi(2) / (4.0 * sigma * sigma)).exp())
            .collect::<Vec<_>>();

        assert_relative_eq!(centroid(&x, &field), 2.0, epsilon = 1e-9);
        assert_relative_eq!(rms_width(&x, &field), sigma, epsilon = 1e-6);
    }

    #[test]
    fn peak_uses_magnitude() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let field = [0.5, -2.0, 1.0, 1.5];
        assert_eq!(peak(&x, &field), Some((1.0, -2.0)));
        assert_eq!(peak(&[], &[]), None);
    }

    #[test]
    fn nearest_crossing() {
        let x = linspace(0.0, 10.0, 1001);
        let field = x.iter().map(|x| x.sin()).collect::<Vec<_>>();

        let crossing = carrier_crossing(&x, &field, 3.0).unwrap();
        assert_relative_eq!(crossing, std::f64::consts::PI, epsilon = 1e-4);
        let crossing = carrier_crossing(&x, &field, 5.5).unwrap();
        assert_relative_eq!(crossing, 2.0 * std::f64::consts::PI, epsilon = 1e-4);
        assert_eq!(carrier_crossing(&x, &[1.0; 1001], 3.0), None);
    }
}
