use std::path::Path;

use image::{
    ImageFormat,
    RgbaImage,
};
use nalgebra::Vector2;
use pulse_model::{
    Pulse,
    PulseFrames,
    Resonator,
};

use crate::{
    RenderError,
    output::WriteImage,
    plot::{
        Panel,
        PixelRect,
        PlotStyle,
        to_rgba8,
        x_range,
        y_range,
    },
};

fn check_size(size: Vector2<u32>) -> Result<(), RenderError> {
    if size.x == 0 || size.y == 0 {
        Err(RenderError::InvalidSize {
            width: size.x,
            height: size.y,
        })
    }
    else {
        Ok(())
    }
}

fn clear(image: &mut RgbaImage, style: &PlotStyle) {
    let background = to_rgba8(style.background);
    image.pixels_mut().for_each(|pixel| *pixel = background);
}

/// One frame per time step, showing the field along `z`.
pub fn render_propagation<O>(
    frames: &PulseFrames,
    style: &PlotStyle,
    output: &mut O,
) -> Result<(), RenderError>
where
    O: WriteImage,
    RenderError: From<O::Error>,
{
    let (min, max) = frames.value_range().ok_or(RenderError::EmptyFrames)?;
    let size = output.size();
    check_size(size)?;

    let panel = Panel::new(
        PixelRect::full(size).inset(style.margin),
        x_range(&frames.z, 0.0),
        y_range(min, max, style.headroom),
    );
    tracing::debug!(frames = frames.num_frames(), ?size, "rendering propagation");

    for i in 0..frames.num_frames() {
        let frame = frames.frame(i);
        output.write_image(|image| {
            clear(image, style);
            panel.draw_hline(image, 0.0, style.axis);
            panel.draw_line(image, &frames.z, &frame, style.line, style.line_width);
        })?;
    }

    Ok(())
}

/// Spatial frames on top, with the field over time at each observation point
/// accumulating in a panel below. Observation points are indices into the
/// `z` axis; negative ones count from the end. The field is normalized to its
/// largest value.
pub fn render_with_time<O>(
    frames: &PulseFrames,
    observers: &[isize],
    z_padding: f64,
    style: &PlotStyle,
    output: &mut O,
) -> Result<(), RenderError>
where
    O: WriteImage,
    RenderError: From<O::Error>,
{
    if frames.is_empty() {
        return Err(RenderError::EmptyFrames);
    }
    let size = output.size();
    check_size(size)?;

    let normalized = frames.normalized();
    let observers = observers
        .iter()
        .map(|index| {
            normalized
                .position(*index)
                .zip(normalized.trace_at(*index))
                .ok_or(RenderError::InvalidObserver { index: *index })
        })
        .collect::<Result<Vec<_>, RenderError>>()?;

    let (min, max) = normalized.value_range().ok_or(RenderError::EmptyFrames)?;
    let y = y_range(min, max, style.headroom);

    let rects = PixelRect::full(size).stacked(observers.len() + 1);
    let spatial = Panel::new(
        rects[0].inset(style.margin),
        x_range(&normalized.z, z_padding),
        y.clone(),
    );
    let last_frame = normalized.num_frames().saturating_sub(1).max(1) as f64;
    let temporal = rects[1..]
        .iter()
        .map(|rect| Panel::new(rect.inset(style.margin), 0.0..last_frame, y.clone()))
        .collect::<Vec<_>>();
    let frame_indices = (0..normalized.num_frames())
        .map(|i| i as f64)
        .collect::<Vec<_>>();

    tracing::debug!(
        frames = normalized.num_frames(),
        observers = observers.len(),
        "rendering with time traces"
    );

    for i in 0..normalized.num_frames() {
        let frame = normalized.frame(i);
        output.write_image(|image| {
            clear(image, style);

            spatial.draw_hline(image, 0.0, style.axis);
            spatial.draw_line(image, &normalized.z, &frame, style.line, style.line_width);
            for (j, (z, _)) in observers.iter().enumerate() {
                spatial.draw_vline(image, *z, style.palette_color(j), style.line_width);
            }

            for (j, ((_, trace), panel)) in observers.iter().zip(&temporal).enumerate() {
                panel.draw_hline(image, 0.0, style.axis);
                panel.draw_line(
                    image,
                    &frame_indices[..=i],
                    &trace[..=i],
                    style.palette_color(j),
                    style.line_width,
                );
            }
        })?;
    }

    Ok(())
}

/// All frames overlaid in one image, e.g. a pulse at a few times.
pub fn render_snapshots<O>(
    frames: &PulseFrames,
    style: &PlotStyle,
    output: &mut O,
) -> Result<(), RenderError>
where
    O: WriteImage,
    RenderError: From<O::Error>,
{
    let (min, max) = frames.value_range().ok_or(RenderError::EmptyFrames)?;
    let size = output.size();
    check_size(size)?;

    let panel = Panel::new(
        PixelRect::full(size).inset(style.margin),
        x_range(&frames.z, 0.0),
        y_range(min, max, style.headroom),
    );

    output.write_image(|image| {
        clear(image, style);
        panel.draw_hline(image, 0.0, style.axis);
        for i in 0..frames.num_frames() {
            panel.draw_line(
                image,
                &frames.z,
                &frames.frame(i),
                style.palette_color(i),
                style.line_width,
            );
        }
    })?;

    Ok(())
}

/// Still images explaining how a pulse is composed of its spectral
/// components.
#[derive(Clone, Debug)]
pub struct ComponentPlots {
    /// Envelope amplitude over frequency.
    pub spectrum: RgbaImage,
    /// A selection of individual components along `z`.
    pub components: RgbaImage,
    /// Their sum.
    pub pulse: RgbaImage,
}

impl ComponentPlots {
    /// Writes `spectrum.png`, `components.png` and `pulse.png` into `dir`.
    pub fn save(&self, dir: &Path) -> Result<(), RenderError> {
        std::fs::create_dir_all(dir)?;
        for (name, image) in [
            ("spectrum.png", &self.spectrum),
            ("components.png", &self.components),
            ("pulse.png", &self.pulse),
        ] {
            let path = dir.join(name);
            tracing::info!(path = %path.display(), "writing");
            image.save_with_format(&path, ImageFormat::Png)?;
        }
        Ok(())
    }
}

/// Components whose amplitude is negligible compared to the strongest one
/// are not drawn.
const COMPONENT_THRESHOLD: f64 = 1e-3;

/// Plots the spectrum of `pulse`, every `stride`-th significant component at
/// time `t`, and the resulting field.
pub fn render_components(
    pulse: &Pulse,
    z: &[f64],
    t: f64,
    stride: usize,
    style: &PlotStyle,
    size: Vector2<u32>,
) -> Result<ComponentPlots, RenderError> {
    if pulse.is_empty() || z.is_empty() {
        return Err(RenderError::EmptyFrames);
    }
    check_size(size)?;

    let area = PixelRect::full(size).inset(style.margin);
    let new_image = || {
        let mut image = RgbaImage::new(size.x, size.y);
        clear(&mut image, style);
        image
    };

    let frequencies = pulse.frequencies().collect::<Vec<_>>();
    let amplitudes = pulse.amplitudes().collect::<Vec<_>>();
    let max_amplitude = amplitudes.iter().copied().fold(0.0, f64::max);

    let mut spectrum = new_image();
    Panel::new(
        area,
        x_range(&frequencies, 0.0),
        y_range(0.0, max_amplitude, style.headroom),
    )
    .draw_line(
        &mut spectrum,
        &frequencies,
        &amplitudes,
        style.line,
        style.line_width,
    );

    let selected = amplitudes
        .iter()
        .enumerate()
        .filter(|(_, amplitude)| **amplitude > COMPONENT_THRESHOLD * max_amplitude)
        .map(|(i, _)| i)
        .step_by(stride.max(1))
        .collect::<Vec<_>>();
    tracing::debug!(
        selected = selected.len(),
        total = pulse.len(),
        "rendering components"
    );

    let fields = pulse.component_fields(z, t);
    let mut components = new_image();
    let panel = Panel::new(
        area,
        x_range(z, 0.0),
        y_range(-max_amplitude, max_amplitude, style.headroom),
    );
    panel.draw_hline(&mut components, 0.0, style.axis);
    for (j, i) in selected.iter().enumerate() {
        let row = fields.row(*i).iter().copied().collect::<Vec<_>>();
        panel.draw_line(&mut components, z, &row, style.palette_color(j), 1);
    }

    let field = pulse.field_along_z(z, t);
    let (min, max) = field
        .iter()
        .fold((0.0, 0.0), |(min, max): (f64, f64), e| (min.min(*e), max.max(*e)));
    let mut sum = new_image();
    let panel = Panel::new(area, x_range(z, 0.0), y_range(min, max, style.headroom));
    panel.draw_hline(&mut sum, 0.0, style.axis);
    panel.draw_line(&mut sum, z, &field, style.line, style.line_width);

    Ok(ComponentPlots {
        spectrum,
        components,
        pulse: sum,
    })
}

/// Still images of the standing waves in a cavity at one time.
#[derive(Clone, Debug)]
pub struct ModePlots {
    /// One image per mode, lowest frequency first.
    pub modes: Vec<RgbaImage>,
    /// All modes drawn on top of each other.
    pub overlaid: RgbaImage,
    /// Their sum.
    pub sum: RgbaImage,
}

impl ModePlots {
    /// Writes `mode_<i>.png` for every mode, `modes_both.png` and
    /// `modes_sum.png` into `dir`.
    pub fn save(&self, dir: &Path) -> Result<(), RenderError> {
        std::fs::create_dir_all(dir)?;
        let named = self
            .modes
            .iter()
            .enumerate()
            .map(|(i, image)| (format!("mode_{i}.png"), image))
            .chain([
                ("modes_both.png".to_owned(), &self.overlaid),
                ("modes_sum.png".to_owned(), &self.sum),
            ]);
        for (name, image) in named {
            let path = dir.join(name);
            tracing::info!(path = %path.display(), "writing");
            image.save_with_format(&path, ImageFormat::Png)?;
        }
        Ok(())
    }
}

/// Plots every mode of `resonator` at time `t` on its own, all of them
/// overlaid, and their sum.
pub fn render_modes(
    resonator: &Resonator,
    z: &[f64],
    t: f64,
    style: &PlotStyle,
    size: Vector2<u32>,
) -> Result<ModePlots, RenderError> {
    if resonator.num_modes() == 0 || z.is_empty() {
        return Err(RenderError::EmptyFrames);
    }
    check_size(size)?;

    let area = PixelRect::full(size).inset(style.margin);
    let new_image = || {
        let mut image = RgbaImage::new(size.x, size.y);
        clear(&mut image, style);
        image
    };

    let fields = resonator.modes(z, t);
    tracing::debug!(modes = fields.nrows(), t, "rendering resonator modes");

    // every mode has unit amplitude
    let unit = Panel::new(area, x_range(z, 0.0), y_range(-1.0, 1.0, style.headroom));
    let mut modes = Vec::with_capacity(fields.nrows());
    let mut overlaid = new_image();
    unit.draw_hline(&mut overlaid, 0.0, style.axis);
    for (i, row) in fields.row_iter().enumerate() {
        let row = row.iter().copied().collect::<Vec<_>>();

        let mut image = new_image();
        unit.draw_hline(&mut image, 0.0, style.axis);
        unit.draw_line(&mut image, z, &row, style.line, style.line_width);
        modes.push(image);

        unit.draw_line(&mut overlaid, z, &row, style.palette_color(i), style.line_width);
    }

    let field = fields.row_sum().iter().copied().collect::<Vec<_>>();
    let amax = field.iter().fold(0.0, |max: f64, e| max.max(e.abs()));
    let mut sum = new_image();
    let panel = Panel::new(area, x_range(z, 0.0), y_range(-amax, amax, style.headroom));
    panel.draw_hline(&mut sum, 0.0, style.axis);
    panel.draw_line(&mut sum, z, &field, style.line, style.line_width);

    Ok(ModePlots {
        modes,
        overlaid,
        sum,
    })
}
