#![warn(clippy::todo, unused_qualifications)]

pub mod args;
pub mod config;
pub mod files;
pub mod inspect;
pub mod presets;
pub mod run;
pub mod scene;

use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};
use color_eyre::eyre::{
    Error,
    bail,
};
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    presets::Preset,
};

fn main() -> Result<(), Error> {
    let _ = dotenv();
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .pretty()
        .init();

    let args = Args::parse();
    match args.command {
        Command::Run(args) => args.run()?,
        Command::Inspect(args) => args.run()?,
        Command::Presets => {
            for preset in Preset::iter() {
                println!("{:<20} {}", preset.name(), preset.description());
            }
        }
        Command::DumpPreset {
            preset,
            output,
            format,
        } => {
            let scene = preset.scene().to_string(&format)?;
            write_or_print(output, &scene)?;
        }
        Command::DumpDefaultConfig { output, format } => {
            let config = AppConfig::default();
            let config = match format.as_str() {
                "toml" => toml::to_string_pretty(&config)?,
                "json" => serde_json::to_string_pretty(&config)?,
                _ => bail!("Invalid format: {format}"),
            };
            write_or_print(output, &config)?;
        }
    }

    Ok(())
}

fn write_or_print(output: Option<PathBuf>, contents: &str) -> Result<(), Error> {
    if let Some(output) = &output {
        std::fs::write(output, contents)?;
    }
    else {
        println!("{contents}");
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[clap(about = "Animates light pulses travelling through dispersive media")]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Renders a scene file or a built-in preset.
    Run(args::RunArgs),
    /// Prints how the pulse of a scene moves and spreads over time.
    Inspect(args::InspectArgs),
    /// Lists the built-in presets.
    Presets,
    /// Writes a preset as a scene file, to use as a starting point.
    DumpPreset {
        preset: Preset,
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(short, long, default_value = "toml")]
        format: String,
    },
    DumpDefaultConfig {
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(short, long, default_value = "toml")]
        format: String,
    },
}
