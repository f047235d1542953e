//! Built-in scenes, each showing one effect of dispersion.

use std::f64::consts::{
    FRAC_PI_2,
    TAU,
};

use pulse_model::{
    EnvelopeSpec,
    FrequencySampling,
    ModePhases,
    PhaseOffsets,
    TimeSpan,
};

use crate::scene::{
    AxisConfig,
    DispersionConfig,
    OutputConfig,
    PulseConfig,
    Scene,
    Units,
    ViewConfig,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum, strum::VariantArray)]
pub enum Preset {
    GroupEqualsPhase,
    FirstOrder,
    SecondOrder,
    ThirdOrder,
    OpticalFibre,
    SpatialVsTime,
    ChirpedPulses,
    SpectralComponents,
    ResonatorModes,
    ModeDecomposition,
}

impl Preset {
    pub fn iter() -> impl Iterator<Item = Self> {
        <Self as strum::VariantArray>::VARIANTS.iter().copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GroupEqualsPhase => "group-equals-phase",
            Self::FirstOrder => "first-order",
            Self::SecondOrder => "second-order",
            Self::ThirdOrder => "third-order",
            Self::OpticalFibre => "optical-fibre",
            Self::SpatialVsTime => "spatial-vs-time",
            Self::ChirpedPulses => "chirped-pulses",
            Self::SpectralComponents => "spectral-components",
            Self::ResonatorModes => "resonator-modes",
            Self::ModeDecomposition => "mode-decomposition",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::GroupEqualsPhase => "carrier and envelope travel at the same speed",
            Self::FirstOrder => "envelope travels slower than the carrier",
            Self::SecondOrder => "group velocity dispersion broadens the pulse",
            Self::ThirdOrder => "third order dispersion makes the pulse asymmetric",
            Self::OpticalFibre => "a pulse entering and leaving a dispersive fibre",
            Self::SpatialVsTime => "the pulse in space and at a fixed position over time",
            Self::ChirpedPulses => "a pulse getting chirped as it propagates",
            Self::SpectralComponents => "a pulse decomposed into its spectral components",
            Self::ResonatorModes => "standing waves in a cavity adding up to a pulse",
            Self::ModeDecomposition => "cavity modes with random phases and their sum",
        }
    }

    pub fn scene(&self) -> Scene {
        match self {
            Self::GroupEqualsPhase => {
                dispersive(
                    0.02,
                    600.0,
                    vec![10.0 * TAU * 0.02, 10.0, 0.0],
                    AxisConfig::new(0.0, 200.0, 1000),
                    TimeSpan::new(0.0, 2000.0, 200),
                )
            }
            Self::FirstOrder => {
                dispersive(
                    0.025,
                    600.0,
                    vec![4.0, 10.0, 0.0],
                    AxisConfig::new(0.0, 100.0, 1000),
                    TimeSpan::new(0.0, 1000.0, 200),
                )
            }
            Self::SecondOrder => {
                dispersive(
                    0.02,
                    600.0,
                    vec![1.0, 3.0, 7.0],
                    AxisConfig::new(-30.0, 180.0, 1000),
                    TimeSpan::new(0.0, 700.0, 200),
                )
            }
            Self::ThirdOrder => {
                dispersive(
                    0.02,
                    600.0,
                    vec![1.0, 3.0, 2.0, 6.0],
                    AxisConfig::new(-30.0, 600.0, 1000),
                    TimeSpan::new(0.0, 2500.0, 200),
                )
            }
            Self::OpticalFibre => {
                let mut scene = dispersive(
                    0.02,
                    500.0,
                    vec![10.0 * TAU * 0.02, 10.0, 20.0, 0.0],
                    AxisConfig::new(0.0, 110.0, 500),
                    TimeSpan::new(-300.0, 2000.0, 300),
                );
                scene.view = ViewConfig::WithTime {
                    observers: vec![0, -1],
                    z_padding: 5.0,
                };
                scene.output.height = Some(600);
                scene
            }
            Self::SpatialVsTime => {
                let mut scene = dispersive(
                    0.02,
                    600.0,
                    vec![1.0, 3.0, 7.0],
                    AxisConfig::new(-30.0, 180.0, 1000),
                    TimeSpan::new(0.0, 900.0, 200),
                );
                scene.view = ViewConfig::WithTime {
                    observers: vec![900],
                    z_padding: 5.0,
                };
                scene.output.fps = Some(20);
                scene.output.height = Some(600);
                scene
            }
            Self::ChirpedPulses => {
                let mut scene = dispersive(
                    0.15,
                    100.0,
                    vec![1.0, 3.0, 2.0, 5.0],
                    AxisConfig::new(-20.0, 200.0, 10000),
                    TimeSpan::new(0.0, 500.0, 3),
                );
                scene.view = ViewConfig::Snapshots;
                scene
            }
            Self::SpectralComponents => {
                let mut scene = dispersive(
                    0.15,
                    100.0,
                    vec![1.0, 3.0, 2.0],
                    AxisConfig::new(-70.0, 70.0, 1000),
                    TimeSpan::new(0.0, 0.0, 1),
                );
                scene.view = ViewConfig::Components {
                    time: 0.0,
                    stride: 10,
                };
                scene
            }
            Self::ResonatorModes => {
                Scene {
                    pulse: Default::default(),
                    z: AxisConfig::new(0.0, 100.0, 500),
                    // one round trip of the fundamental mode
                    time: TimeSpan::new(0.0, 100.0, 200),
                    view: ViewConfig::Resonator {
                        modes: 10,
                        phases: ModePhases::Zero,
                    },
                    output: OutputConfig {
                        fps: Some(15),
                        ..Default::default()
                    },
                }
            }
            Self::ModeDecomposition => {
                Scene {
                    pulse: Default::default(),
                    z: AxisConfig::new(0.0, 100.0, 500),
                    time: TimeSpan::new(0.0, 0.0, 1),
                    view: ViewConfig::ResonatorModes {
                        modes: 3,
                        phases: ModePhases::Random { seed: 42 },
                        time: 0.0,
                    },
                    output: OutputConfig {
                        height: Some(200),
                        ..Default::default()
                    },
                }
            }
        }
    }
}

/// Gaussian pulse around `center_frequency`, sampled from almost zero up to
/// twice the center frequency. The dispersion is given as an expansion in
/// angular frequency, and every component is shifted by a quarter period so
/// the carrier is a sine at the origin. Animations run at 15 frames per
/// second.
fn dispersive(
    center_frequency: f64,
    width_in_samples: f64,
    coefficients: Vec<f64>,
    z: AxisConfig,
    time: TimeSpan,
) -> Scene {
    Scene {
        pulse: PulseConfig {
            units: Units::Reduced,
            envelope: EnvelopeSpec::GaussianWindow { width_in_samples },
            sampling: FrequencySampling::new(0.001, 2.0 * center_frequency, 4000),
            dispersion: DispersionConfig::Angular {
                center_frequency,
                coefficients,
            },
            phases: PhaseOffsets::Constant(FRAC_PI_2),
        },
        z,
        time,
        view: ViewConfig::Propagation,
        output: OutputConfig {
            fps: Some(15),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use crate::{
        presets::Preset,
        scene::{
            Scene,
            ViewConfig,
        },
    };

    #[test]
    fn names_match_command_line() {
        for preset in Preset::iter() {
            let parsed = Preset::from_str(preset.name(), false).unwrap();
            assert_eq!(parsed, preset);
        }
    }

    #[test]
    fn every_preset_builds() {
        for preset in Preset::iter() {
            let scene = preset.scene();
            if !scene.is_resonator() {
                let pulse = scene.pulse.build().unwrap();
                assert_eq!(pulse.len(), 4000, "{}", preset.name());
            }
        }
    }

    #[test]
    fn presets_round_trip_through_toml() {
        for preset in [Preset::OpticalFibre, Preset::ResonatorModes] {
            let toml = preset.scene().to_string("toml").unwrap();
            let scene: Scene = toml::from_str(&toml).unwrap();
            assert_eq!(scene.z().len(), preset.scene().z().len());
        }
    }

    #[test]
    fn small_presets_compute_frames() {
        let frames = Preset::ChirpedPulses.scene().frames().unwrap();
        assert_eq!(frames.field.shape(), (3, 10000));

        let frames = Preset::ResonatorModes.scene().frames().unwrap();
        assert_eq!(frames.field.shape(), (200, 500));
    }

    #[test]
    fn animation_settings() {
        for preset in [Preset::FirstOrder, Preset::SecondOrder, Preset::OpticalFibre] {
            assert_eq!(preset.scene().output.fps, Some(15), "{}", preset.name());
        }

        let scene = Preset::SpatialVsTime.scene();
        assert_eq!(scene.output.fps, Some(20));
        assert!(matches!(
            scene.view,
            ViewConfig::WithTime { z_padding, .. } if z_padding == 5.0
        ));
    }

    #[test]
    fn mode_decomposition_uses_cavity() {
        let scene = Preset::ModeDecomposition.scene();
        let ViewConfig::ResonatorModes { modes, phases, .. } = &scene.view
        else {
            panic!("unexpected view: {:?}", scene.view);
        };
        let resonator = scene.resonator(*modes, phases).unwrap();
        assert_eq!(resonator.num_modes(), 3);
        assert_eq!(resonator.length(), 100.0);
    }
}
