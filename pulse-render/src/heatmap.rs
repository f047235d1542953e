use colorgrad::Gradient;
use pulse_model::PulseFrames;

use crate::{
    RenderError,
    output::WriteImage,
};

/// Renders the whole `times × z` grid as a single image, time running
/// downwards. Field values are mapped symmetrically around zero into
/// `[0, 1]` before looking up the gradient, so `0.5` is zero field.
pub fn render_heatmap<O>(
    frames: &PulseFrames,
    gradient: &impl Gradient,
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
    if size.x == 0 || size.y == 0 {
        return Err(RenderError::InvalidSize {
            width: size.x,
            height: size.y,
        });
    }

    let scale = frames.field.amax();
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let columns = frames.z.len();
    let rows = frames.num_frames();
    tracing::debug!(rows, columns, scale, "rendering heatmap");

    output.write_field_values(
        |x, y| {
            let row = sample_index(y, size.y, rows);
            let column = sample_index(x, size.x, columns);
            let value = frames.field[(row, column)] / scale;
            (0.5 + 0.5 * value) as f32
        },
        gradient,
    )?;

    Ok(())
}

/// Nearest sample for pixel `pixel` of `pixels`.
fn sample_index(pixel: u32, pixels: u32, samples: usize) -> usize {
    let index = (u64::from(pixel) * samples as u64 / u64::from(pixels)) as usize;
    index.min(samples - 1)
}
