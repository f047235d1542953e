use std::path::PathBuf;

use color_eyre::eyre::{
    Error,
    bail,
};

use crate::{
    presets::Preset,
    scene::Scene,
};

/// Where to take the scene from.
#[derive(Clone, Debug, clap::Args)]
pub struct SceneArgs {
    /// Scene file, TOML or JSON.
    pub scene: Option<PathBuf>,

    #[clap(short, long, conflicts_with = "scene")]
    pub preset: Option<Preset>,
}

impl SceneArgs {
    /// Loads the scene together with a name used for default output paths.
    pub fn load(&self) -> Result<(String, Scene), Error> {
        match (&self.scene, self.preset) {
            (Some(path), _) => {
                let name = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "scene".to_owned());
                Ok((name, Scene::from_path(path)?))
            }
            (None, Some(preset)) => Ok((preset.name().to_owned(), preset.scene())),
            (None, None) => bail!("Either a scene file or a preset is needed"),
        }
    }
}

#[derive(Clone, Debug, clap::Args)]
pub struct RunArgs {
    #[clap(flatten)]
    pub scene: SceneArgs,

    /// Output file. Defaults to the scene name in the configured output
    /// directory.
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    #[clap(long)]
    pub ignore_config: bool,
}

#[derive(Clone, Debug, clap::Args)]
pub struct InspectArgs {
    #[clap(flatten)]
    pub scene: SceneArgs,

    /// Number of times within the scene's time span to measure at.
    #[clap(short = 'n', long, default_value = "5")]
    pub samples: usize,
}
