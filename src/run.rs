use std::{
    fs::File,
    io::BufWriter,
    path::{
        Path,
        PathBuf,
    },
};

use color_eyre::eyre::{
    Context,
    Error,
};
use nalgebra::Vector2;
use pulse_render::{
    GifOutput,
    PngOutput,
    render_components,
    render_heatmap,
    render_modes,
    render_propagation,
    render_snapshots,
    render_with_time,
};

use crate::{
    args::RunArgs,
    config::AppConfig,
    files::AppFiles,
    scene::{
        HeatmapGradient,
        Scene,
        ViewConfig,
    },
};

impl RunArgs {
    pub fn run(self) -> Result<(), Error> {
        let config: AppConfig = if self.ignore_config {
            Default::default()
        }
        else {
            AppFiles::open()?.read_config_or_create()?
        };

        let (name, scene) = self.scene.load()?;
        let path = self
            .output
            .or_else(|| scene.output.path.clone())
            .unwrap_or_else(|| default_output_path(&config, &name, &scene.view));

        render_scene(&scene, &config, &path)
    }
}

/// `<output_dir>/<name>.<ext>`, or a directory for views producing several
/// images.
pub fn default_output_path(config: &AppConfig, name: &str, view: &ViewConfig) -> PathBuf {
    let path = config.output_dir.join(name);
    match view.file_extension() {
        Some(extension) => path.with_extension(extension),
        None => path,
    }
}

pub fn render_scene(scene: &Scene, config: &AppConfig, path: &Path) -> Result<(), Error> {
    let size = Vector2::new(
        scene.output.width.unwrap_or(config.width),
        scene.output.height.unwrap_or(config.height),
    );
    let fps = scene.output.fps.unwrap_or(config.fps);
    let style = config.style.plot_style();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create directory: {}", parent.display()))?;
    }

    match &scene.view {
        ViewConfig::Components { time, stride } => {
            let pulse = scene.pulse.build()?;
            render_components(&pulse, &scene.z(), *time, *stride, &style, size)?.save(path)?;
        }
        ViewConfig::ResonatorModes {
            modes,
            phases,
            time,
        } => {
            let resonator = scene.resonator(*modes, phases)?;
            render_modes(&resonator, &scene.z(), *time, &style, size)?.save(path)?;
        }
        ViewConfig::Heatmap { gradient } => {
            let frames = scene.frames()?;
            let mut output = PngOutput::new(path, size);
            match gradient {
                HeatmapGradient::RdBu => {
                    render_heatmap(&frames, &colorgrad::preset::rd_bu(), &mut output)?
                }
                HeatmapGradient::Turbo => {
                    render_heatmap(&frames, &colorgrad::preset::turbo(), &mut output)?
                }
                HeatmapGradient::Viridis => {
                    render_heatmap(&frames, &colorgrad::preset::viridis(), &mut output)?
                }
                HeatmapGradient::Greys => {
                    render_heatmap(&frames, &colorgrad::preset::greys(), &mut output)?
                }
            }
        }
        ViewConfig::Snapshots => {
            let frames = scene.frames()?;
            render_snapshots(&frames, &style, &mut PngOutput::new(path, size))?;
        }
        ViewConfig::WithTime {
            observers,
            z_padding,
        } => {
            let frames = scene.frames()?;
            let mut output = gif_output(path, size, fps)?;
            render_with_time(&frames, observers, *z_padding, &style, &mut output)?;
        }
        ViewConfig::Propagation | ViewConfig::Resonator { .. } => {
            let frames = scene.frames()?;
            let mut output = gif_output(path, size, fps)?;
            render_propagation(&frames, &style, &mut output)?;
        }
    }

    tracing::info!(path = %path.display(), "Rendered scene");
    Ok(())
}

fn gif_output(
    path: &Path,
    size: Vector2<u32>,
    fps: u32,
) -> Result<GifOutput<BufWriter<File>>, Error> {
    let writer = BufWriter::new(
        File::create(path)
            .with_context(|| format!("Could not create output file: {}", path.display()))?,
    );
    Ok(GifOutput::new(writer, size, fps)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::{
        config::AppConfig,
        presets::Preset,
        run::default_output_path,
        scene::ViewConfig,
    };

    #[test]
    fn output_paths_follow_view() {
        let config = AppConfig {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };

        assert_eq!(
            default_output_path(&config, "fibre", &ViewConfig::Propagation),
            PathBuf::from("out/fibre.gif")
        );
        assert_eq!(
            default_output_path(&config, "chirp", &ViewConfig::Snapshots),
            PathBuf::from("out/chirp.png")
        );
        assert_eq!(
            default_output_path(
                &config,
                Preset::SpectralComponents.name(),
                &Preset::SpectralComponents.scene().view
            ),
            PathBuf::from("out/spectral-components")
        );
        assert_eq!(
            default_output_path(
                &config,
                Preset::ModeDecomposition.name(),
                &Preset::ModeDecomposition.scene().view
            ),
            PathBuf::from("out/mode-decomposition")
        );
    }
}
