//! Scene files: everything needed to compute and render one animation.

use std::path::{
    Path,
    PathBuf,
};

use color_eyre::eyre::{
    Context,
    Error,
    bail,
};
use pulse_model::{
    DispersionRelation,
    EnvelopeSpec,
    FrequencySampling,
    Medium,
    ModePhases,
    PhaseOffsets,
    PhysicalConstants,
    Pulse,
    PulseFrames,
    Resonator,
    TimeSpan,
    sampling::linspace,
};
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub pulse: PulseConfig,

    pub z: AxisConfig,

    pub time: TimeSpan,

    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Scene {
    /// Reads a scene, as JSON if the file ends in `.json` and as TOML
    /// otherwise.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        tracing::info!(path = %path.display(), "Reading scene");
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read scene file: {}", path.display()))?;

        let scene = if path.extension().is_some_and(|extension| extension == "json") {
            serde_json::from_str(&contents)
                .with_context(|| format!("Invalid scene file: {}", path.display()))?
        }
        else {
            toml::from_str(&contents)
                .with_context(|| format!("Invalid scene file: {}", path.display()))?
        };

        Ok(scene)
    }

    pub fn to_string(&self, format: &str) -> Result<String, Error> {
        Ok(match format {
            "toml" => toml::to_string_pretty(self)?,
            "json" => serde_json::to_string_pretty(self)?,
            _ => bail!("Invalid format: {format}"),
        })
    }

    pub fn z(&self) -> Vec<f64> {
        self.z.values()
    }

    /// Computes the field for every frame of the scene's view.
    pub fn frames(&self) -> Result<PulseFrames, Error> {
        let z = self.z();

        let frames = match &self.view {
            ViewConfig::Resonator { modes, phases }
            | ViewConfig::ResonatorModes { modes, phases, .. } => {
                self.resonator(*modes, phases)?.frames(z, &self.time)
            }
            ViewConfig::Snapshots => {
                PulseFrames::snapshots(&self.pulse.build()?, z, self.time.times())
            }
            _ => PulseFrames::compute(&self.pulse.build()?, z, &self.time),
        };

        Ok(frames)
    }

    /// Cavity spanning the scene's `z` axis.
    pub fn resonator(&self, modes: usize, phases: &ModePhases) -> Result<Resonator, Error> {
        Ok(Resonator::spanning(
            &self.z(),
            modes,
            phases,
            &self.pulse.units.physical_constants(),
        )?)
    }

    /// Whether the scene shows cavity modes instead of the pulse.
    pub fn is_resonator(&self) -> bool {
        matches!(
            self.view,
            ViewConfig::Resonator { .. } | ViewConfig::ResonatorModes { .. }
        )
    }
}

/// Evenly spaced positions `start..=end`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AxisConfig {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl AxisConfig {
    pub fn new(start: f64, end: f64, points: usize) -> Self {
        Self { start, end, points }
    }

    pub fn values(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.points)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Units {
    /// `c = 1`
    #[default]
    Reduced,
    Si,
}

impl Units {
    pub fn physical_constants(&self) -> PhysicalConstants {
        match self {
            Self::Reduced => PhysicalConstants::REDUCED,
            Self::Si => PhysicalConstants::SI,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PulseConfig {
    #[serde(default)]
    pub units: Units,

    pub envelope: EnvelopeSpec,

    pub sampling: FrequencySampling,

    pub dispersion: DispersionConfig,

    #[serde(default)]
    pub phases: PhaseOffsets,
}

impl Default for PulseConfig {
    fn default() -> Self {
        let center_frequency = 0.02;
        Self {
            units: Units::Reduced,
            envelope: EnvelopeSpec::GaussianWindow {
                width_in_samples: 600.0,
            },
            sampling: FrequencySampling::new(0.001, 2.0 * center_frequency, 4000),
            dispersion: DispersionConfig::Angular {
                center_frequency,
                coefficients: vec![1.0, 3.0, 7.0],
            },
            phases: PhaseOffsets::Zero,
        }
    }
}

impl PulseConfig {
    pub fn build(&self) -> Result<Pulse, pulse_model::Error> {
        let envelope = self.envelope.build(&self.sampling);
        let dispersion = self.dispersion.build(&self.units.physical_constants());
        Pulse::new(envelope, &self.sampling, dispersion, &self.phases)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DispersionConfig {
    /// `k(ν) = Σ k_n / n! (ν − ν_0)^n` in cycles per unit length.
    Taylor {
        center_frequency: f64,
        coefficients: Vec<f64>,
    },
    /// `k(ν) = Σ a_n (2π (ν − ν_0))^n` in radians per unit length.
    Angular {
        center_frequency: f64,
        coefficients: Vec<f64>,
    },
    /// Non-dispersive medium with constant refractive index.
    Medium {
        center_frequency: f64,
        refractive_index: f64,
    },
}

impl DispersionConfig {
    pub fn build(&self, physical_constants: &PhysicalConstants) -> DispersionRelation {
        match self {
            Self::Taylor {
                center_frequency,
                coefficients,
            } => DispersionRelation::new(*center_frequency, coefficients.iter().copied()),
            Self::Angular {
                center_frequency,
                coefficients,
            } => {
                DispersionRelation::from_angular_expansion(
                    *center_frequency,
                    coefficients.iter().copied(),
                )
            }
            Self::Medium {
                center_frequency,
                refractive_index,
            } => {
                Medium {
                    refractive_index: *refractive_index,
                }
                .dispersion_relation(physical_constants, *center_frequency)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatmapGradient {
    #[default]
    RdBu,
    Turbo,
    Viridis,
    Greys,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewConfig {
    /// The pulse moving along `z`.
    #[default]
    Propagation,
    /// The pulse moving along `z`, with the field over time recorded at fixed
    /// positions. Positions are indices into the `z` axis, negative ones
    /// count from the end.
    WithTime {
        observers: Vec<isize>,
        #[serde(default)]
        z_padding: f64,
    },
    /// Space-time diagram of all frames.
    Heatmap {
        #[serde(default)]
        gradient: HeatmapGradient,
    },
    /// All frames overlaid in one still image.
    Snapshots,
    /// Spectrum, individual components and their sum at one time.
    Components {
        #[serde(default)]
        time: f64,
        stride: usize,
    },
    /// Standing waves in a cavity spanning the `z` axis, instead of the pulse.
    Resonator {
        modes: usize,
        #[serde(default)]
        phases: ModePhases,
    },
    /// Each cavity mode on its own, all modes overlaid and their sum, at one
    /// time.
    ResonatorModes {
        modes: usize,
        #[serde(default)]
        phases: ModePhases,
        #[serde(default)]
        time: f64,
    },
}

impl ViewConfig {
    pub fn file_extension(&self) -> Option<&'static str> {
        match self {
            Self::Propagation | Self::WithTime { .. } | Self::Resonator { .. } => Some("gif"),
            Self::Heatmap { .. } | Self::Snapshots => Some("png"),
            // writes a directory
            Self::Components { .. } | Self::ResonatorModes { .. } => None,
        }
    }
}

/// Per-scene overrides of the app config.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}
