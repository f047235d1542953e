#![warn(clippy::todo, unused_qualifications)]

//! Rasterized plots and animations of [`pulse_model`] output.

pub mod animation;
pub mod heatmap;
pub mod output;
pub mod plot;

use std::convert::Infallible;

pub use crate::{
    animation::{
        ComponentPlots,
        ModePlots,
        render_components,
        render_modes,
        render_propagation,
        render_snapshots,
        render_with_time,
    },
    heatmap::render_heatmap,
    output::{
        FrameBuffer,
        GifOutput,
        PngOutput,
        WriteImage,
    },
    plot::PlotStyle,
};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Image error")]
    Image(#[from] image::ImageError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Nothing to render")]
    EmptyFrames,

    #[error("Invalid image size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Observation point {index} is outside of the z axis")]
    InvalidObserver { index: isize },
}

impl From<Infallible> for RenderError {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}
