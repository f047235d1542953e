use std::{
    convert::Infallible,
    io::Write,
    path::PathBuf,
};

use colorgrad::Gradient;
use image::{
    Delay,
    Frame,
    ImageFormat,
    Rgba,
    RgbaImage,
    codecs::gif::{
        GifEncoder,
        Repeat,
    },
};
use nalgebra::Vector2;

/// Sink for rendered images. Renderers ask for the size, then hand over one
/// closure per image that paints into a cleared buffer.
pub trait WriteImage {
    type Error;

    fn size(&self) -> Vector2<u32>;

    fn write_image(&mut self, f: impl FnMut(&mut RgbaImage)) -> Result<(), Self::Error>;

    /// Colors every pixel by mapping `value_at` through `gradient`.
    fn write_field_values(
        &mut self,
        mut value_at: impl FnMut(u32, u32) -> f32,
        gradient: &impl Gradient,
    ) -> Result<(), Self::Error> {
        self.write_image(|image| {
            for (x, y, pixel) in image.enumerate_pixels_mut() {
                *pixel = Rgba(gradient.at(value_at(x, y)).to_rgba8());
            }
        })
    }
}

/// Animated GIF played in a loop at a fixed frame rate.
#[derive(derive_more::Debug)]
pub struct GifOutput<W>
where
    W: Write,
{
    #[debug(skip)]
    encoder: GifEncoder<W>,
    size: Vector2<u32>,
    delay: Delay,
    frame_count: usize,
}

impl<W> GifOutput<W>
where
    W: Write,
{
    /// A frame rate of 0 is treated as 1.
    pub fn new(writer: W, size: Vector2<u32>, fps: u32) -> Result<Self, image::ImageError> {
        let mut encoder = GifEncoder::new(writer);
        encoder.set_repeat(Repeat::Infinite)?;

        Ok(Self {
            encoder,
            size,
            delay: Delay::from_numer_denom_ms(1000, fps.max(1)),
            frame_count: 0,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}

impl<W> WriteImage for GifOutput<W>
where
    W: Write,
{
    type Error = image::ImageError;

    fn size(&self) -> Vector2<u32> {
        self.size
    }

    fn write_image(&mut self, mut f: impl FnMut(&mut RgbaImage)) -> Result<(), Self::Error> {
        let mut image = RgbaImage::new(self.size.x, self.size.y);
        f(&mut image);
        self.encoder
            .encode_frame(Frame::from_parts(image, 0, 0, self.delay))?;
        self.frame_count += 1;
        tracing::trace!(frame = self.frame_count, "encoded gif frame");
        Ok(())
    }
}

/// Writes every image to the same PNG file, so the last one wins.
#[derive(Clone, Debug)]
pub struct PngOutput {
    path: PathBuf,
    size: Vector2<u32>,
}

impl PngOutput {
    pub fn new(path: impl Into<PathBuf>, size: Vector2<u32>) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

impl WriteImage for PngOutput {
    type Error = image::ImageError;

    fn size(&self) -> Vector2<u32> {
        self.size
    }

    fn write_image(&mut self, mut f: impl FnMut(&mut RgbaImage)) -> Result<(), Self::Error> {
        let mut image = RgbaImage::new(self.size.x, self.size.y);
        f(&mut image);
        tracing::debug!(path = %self.path.display(), "writing png");
        image.save_with_format(&self.path, ImageFormat::Png)
    }
}

/// Keeps all images in memory.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    size: Vector2<u32>,
    pub frames: Vec<RgbaImage>,
}

impl FrameBuffer {
    pub fn new(size: Vector2<u32>) -> Self {
        Self {
            size,
            frames: vec![],
        }
    }
}

impl WriteImage for FrameBuffer {
    type Error = Infallible;

    fn size(&self) -> Vector2<u32> {
        self.size
    }

    fn write_image(&mut self, mut f: impl FnMut(&mut RgbaImage)) -> Result<(), Self::Error> {
        let mut image = RgbaImage::new(self.size.x, self.size.y);
        f(&mut image);
        self.frames.push(image);
        Ok(())
    }
}
