use std::path::PathBuf;

use palette::{
    Srgba,
    WithAlpha,
    named,
};
use pulse_render::PlotStyle;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where rendered files go unless a path is given on the command line.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_fps")]
    pub fps: u32,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default)]
    pub style: StyleConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            fps: default_fps(),
            width: default_width(),
            height: default_height(),
            style: Default::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_fps() -> u32 {
    20
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    400
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_background", with = "palette::serde::as_array")]
    pub background: Srgba,

    #[serde(default = "default_axis", with = "palette::serde::as_array")]
    pub axis: Srgba,

    #[serde(default = "default_line", with = "palette::serde::as_array")]
    pub line: Srgba,

    #[serde(default = "default_line_width")]
    pub line_width: u32,

    /// in pixels
    #[serde(default = "default_margin")]
    pub margin: u32,

    #[serde(default = "default_headroom")]
    pub headroom: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            axis: default_axis(),
            line: default_line(),
            line_width: default_line_width(),
            margin: default_margin(),
            headroom: default_headroom(),
        }
    }
}

impl StyleConfig {
    pub fn plot_style(&self) -> PlotStyle {
        PlotStyle {
            background: self.background,
            axis: self.axis,
            line: self.line,
            line_width: self.line_width,
            margin: self.margin,
            headroom: self.headroom,
            ..Default::default()
        }
    }
}

fn default_background() -> Srgba {
    named::WHITE.into_format::<f32>().with_alpha(1.0)
}

fn default_axis() -> Srgba {
    named::SILVER.into_format::<f32>().with_alpha(1.0)
}

fn default_line() -> Srgba {
    PlotStyle::default().line
}

fn default_line_width() -> u32 {
    2
}

fn default_margin() -> u32 {
    8
}

fn default_headroom() -> f64 {
    1.2
}
