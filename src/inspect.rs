use color_eyre::eyre::{
    Error,
    bail,
};
use pulse_model::{
    Pulse,
    TimeSpan,
    analysis::{
        centroid,
        peak,
        rms_width,
    },
};

use crate::args::InspectArgs;

/// Shape of the pulse along `z` at one time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub time: f64,
    pub centroid: f64,
    pub rms_width: f64,
    pub peak: Option<(f64, f64)>,
}

pub fn measure(pulse: &Pulse, z: &[f64], times: &[f64]) -> Vec<Measurement> {
    times
        .iter()
        .map(|time| {
            let field = pulse.field_along_z(z, *time);
            Measurement {
                time: *time,
                centroid: centroid(z, &field),
                rms_width: rms_width(z, &field),
                peak: peak(z, &field),
            }
        })
        .collect()
}

impl InspectArgs {
    pub fn run(self) -> Result<(), Error> {
        let (name, scene) = self.scene.load()?;
        if scene.is_resonator() {
            bail!("{name} shows resonator modes, there is no pulse to inspect");
        }

        let pulse = scene.pulse.build()?;
        let dispersion = pulse.dispersion();
        let center = pulse.center_frequency();

        println!(
            "{name}: {} components around {center}, repeating every {}",
            pulse.len(),
            pulse.repetition_period()
        );
        println!(
            "phase velocity {:.6}, group velocity {:.6}, group velocity dispersion {:.6}",
            dispersion.phase_velocity(center),
            dispersion.group_velocity(center),
            dispersion.group_velocity_dispersion(center),
        );
        println!(
            "{:>12} {:>12} {:>12} {:>12} {:>12}",
            "t", "centroid", "rms width", "peak z", "peak E"
        );

        let times = TimeSpan::new(scene.time.start, scene.time.end, self.samples).times();
        for measurement in measure(&pulse, &scene.z(), &times) {
            let (peak_z, peak_e) = measurement.peak.unwrap_or((f64::NAN, f64::NAN));
            println!(
                "{:>12.4} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
                measurement.time, measurement.centroid, measurement.rms_width, peak_z, peak_e
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use pulse_model::{
        EnvelopeSpec,
        FrequencySampling,
        PhaseOffsets,
        envelope::Gaussian,
        sampling::linspace,
    };

    use crate::{
        inspect::measure,
        scene::{
            DispersionConfig,
            PulseConfig,
            Units,
        },
    };

    #[test]
    fn centroid_moves_with_group_velocity() {
        let pulse = PulseConfig {
            units: Units::Reduced,
            envelope: EnvelopeSpec::Gaussian(Gaussian {
                center: 1.0,
                width: 0.05,
            }),
            sampling: FrequencySampling::centered(1.0, 0.5, 201),
            dispersion: DispersionConfig::Medium {
                center_frequency: 1.0,
                refractive_index: 1.5,
            },
            phases: PhaseOffsets::Zero,
        }
        .build()
        .unwrap();

        let z = linspace(-20.0, 80.0, 4001);
        let measurements = measure(&pulse, &z, &[0.0, 30.0]);

        assert_abs_diff_eq!(measurements[0].centroid, 0.0, epsilon = 1e-2);
        assert_abs_diff_eq!(measurements[1].centroid, 20.0, epsilon = 1e-2);
        assert_abs_diff_eq!(
            measurements[0].rms_width,
            measurements[1].rms_width,
            epsilon = 1e-3
        );

        let (peak_z, peak_e) = measurements[0].peak.unwrap();
        assert_abs_diff_eq!(peak_z, 0.0, epsilon = 1e-2);
        assert_abs_diff_eq!(peak_e, pulse.peak_amplitude(), epsilon = 1e-6 * pulse.peak_amplitude());
    }
}
