//! Minimal line plots drawn straight into an [`RgbaImage`].

use std::ops::Range;

use image::{
    Rgba,
    RgbaImage,
};
use nalgebra::{
    Point2,
    Vector2,
};
use palette::Srgba;

/// Colors and spacing shared by all plots.
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub background: Srgba,
    pub axis: Srgba,
    pub line: Srgba,
    /// Colors of observation points and their traces, and of overlaid
    /// snapshots. Cycled if there are more lines than colors.
    pub palette: Vec<Srgba>,
    /// Padding around each panel, in pixels.
    pub margin: u32,
    pub line_width: u32,
    /// Vertical headroom relative to the largest value.
    pub headroom: f64,
}

impl PlotStyle {
    pub fn palette_color(&self, index: usize) -> Srgba {
        if self.palette.is_empty() {
            self.line
        }
        else {
            self.palette[index % self.palette.len()]
        }
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: Srgba::new(1.0, 1.0, 1.0, 1.0),
            axis: Srgba::new(0.75, 0.75, 0.75, 1.0),
            // tab:blue
            line: Srgba::new(0.122, 0.467, 0.706, 1.0),
            palette: vec![
                // forestgreen
                Srgba::new(0.133, 0.545, 0.133, 1.0),
                // darkred
                Srgba::new(0.545, 0.0, 0.0, 1.0),
                // steelblue
                Srgba::new(0.275, 0.510, 0.706, 1.0),
                // orange
                Srgba::new(1.0, 0.647, 0.0, 1.0),
            ],
            margin: 8,
            line_width: 2,
            headroom: 1.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub origin: Point2<u32>,
    pub size: Vector2<u32>,
}

impl PixelRect {
    pub fn new(origin: Point2<u32>, size: Vector2<u32>) -> Self {
        Self { origin, size }
    }

    pub fn full(size: Vector2<u32>) -> Self {
        Self::new(Point2::origin(), size)
    }

    /// Shrinks the rect by `margin` on every side.
    pub fn inset(&self, margin: u32) -> Self {
        Self {
            origin: self.origin + Vector2::repeat(margin),
            size: self.size.map(|x| x.saturating_sub(2 * margin)),
        }
    }

    /// Splits the rect into `count` rows of equal height.
    pub fn stacked(&self, count: usize) -> Vec<PixelRect> {
        let count = count.max(1) as u32;
        let height = self.size.y / count;
        (0..count)
            .map(|i| {
                Self::new(
                    self.origin + Vector2::new(0, i * height),
                    Vector2::new(self.size.x, height),
                )
            })
            .collect()
    }
}

/// Maps data coordinates into a [`PixelRect`].
#[derive(Clone, Debug)]
pub struct Panel {
    pub area: PixelRect,
    pub x: Range<f64>,
    pub y: Range<f64>,
}

impl Panel {
    pub fn new(area: PixelRect, x: Range<f64>, y: Range<f64>) -> Self {
        Self { area, x, y }
    }

    /// Pixel position of a data point. May lie outside of the panel.
    pub fn to_pixel(&self, x: f64, y: f64) -> Point2<i64> {
        let u = normalize(x, &self.x);
        // images grow downwards
        let v = 1.0 - normalize(y, &self.y);
        let width = f64::from(self.area.size.x.saturating_sub(1));
        let height = f64::from(self.area.size.y.saturating_sub(1));
        Point2::new(
            i64::from(self.area.origin.x) + (u * width).round() as i64,
            i64::from(self.area.origin.y) + (v * height).round() as i64,
        )
    }

    fn contains(&self, pixel: &Point2<i64>) -> bool {
        let min = self.area.origin.map(i64::from);
        let max = min + self.area.size.map(i64::from);
        (min.x..max.x).contains(&pixel.x) && (min.y..max.y).contains(&pixel.y)
    }

    fn put(&self, image: &mut RgbaImage, pixel: Point2<i64>, color: Rgba<u8>) {
        if self.contains(&pixel)
            && let (Ok(x), Ok(y)) = (u32::try_from(pixel.x), u32::try_from(pixel.y))
            && x < image.width()
            && y < image.height()
        {
            image.put_pixel(x, y, color);
        }
    }

    /// Draws the polyline through `(xs[i], ys[i])`, clipped to the panel.
    pub fn draw_line(
        &self,
        image: &mut RgbaImage,
        xs: &[f64],
        ys: &[f64],
        color: Srgba,
        width: u32,
    ) {
        let color = to_rgba8(color);
        let points = xs
            .iter()
            .zip(ys)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(x, y)| self.to_pixel(*x, *y))
            .collect::<Vec<_>>();

        if let [single] = points.as_slice() {
            self.draw_dot(image, *single, color, width);
        }
        for segment in points.windows(2) {
            bresenham(segment[0], segment[1], |pixel| {
                self.draw_dot(image, pixel, color, width)
            });
        }
    }

    /// Horizontal line at `y = value`.
    pub fn draw_hline(&self, image: &mut RgbaImage, value: f64, color: Srgba) {
        self.draw_line(image, &[self.x.start, self.x.end], &[value, value], color, 1);
    }

    /// Vertical line at `x = value`, spanning the whole panel.
    pub fn draw_vline(&self, image: &mut RgbaImage, value: f64, color: Srgba, width: u32) {
        self.draw_line(
            image,
            &[value, value],
            &[self.y.start, self.y.end],
            color,
            width,
        );
    }

    fn draw_dot(&self, image: &mut RgbaImage, center: Point2<i64>, color: Rgba<u8>, width: u32) {
        let width = i64::from(width.max(1));
        let offset = (width - 1) / 2;
        for dy in 0..width {
            for dx in 0..width {
                self.put(
                    image,
                    Point2::new(center.x + dx - offset, center.y + dy - offset),
                    color,
                );
            }
        }
    }
}

/// Symmetric y range covering `min..max` with some headroom, like an
/// oscilloscope trace centered on zero.
pub fn y_range(min: f64, max: f64, headroom: f64) -> Range<f64> {
    let lower = headroom * min.min(0.0);
    let upper = headroom * max.max(0.0);
    if upper > lower {
        lower..upper
    }
    else {
        -1.0..1.0
    }
}

/// Range covering all values of `xs`, padded by `padding` on both sides.
pub fn x_range(xs: &[f64], padding: f64) -> Range<f64> {
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max > min {
        (min - padding)..(max + padding)
    }
    else if min.is_finite() {
        (min - 1.0)..(min + 1.0)
    }
    else {
        0.0..1.0
    }
}

pub fn to_rgba8(color: Srgba) -> Rgba<u8> {
    let color: [u8; 4] = color.into_format::<u8, u8>().into();
    color.into()
}

fn normalize(value: f64, range: &Range<f64>) -> f64 {
    let span = range.end - range.start;
    if span == 0.0 {
        0.5
    }
    else {
        (value - range.start) / span
    }
}

fn bresenham(from: Point2<i64>, to: Point2<i64>, mut plot: impl FnMut(Point2<i64>)) {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut error = dx + dy;
    let mut current = from;

    loop {
        plot(current);
        if current == to {
            break;
        }
        let e2 = 2 * error;
        if e2 >= dy {
            error += dy;
            current.x += sx;
        }
        if e2 <= dx {
            error += dx;
            current.y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;
    use nalgebra::{
        Point2,
        Vector2,
    };
    use palette::Srgba;

    use crate::plot::{
        Panel,
        PixelRect,
        bresenham,
        to_rgba8,
        x_range,
        y_range,
    };

    const RED: Srgba = Srgba::new(1.0, 0.0, 0.0, 1.0);

    #[test]
    fn maps_corners() {
        let panel = Panel::new(PixelRect::full(Vector2::new(11, 21)), 0.0..1.0, -1.0..1.0);
        assert_eq!(panel.to_pixel(0.0, 1.0), Point2::new(0, 0));
        assert_eq!(panel.to_pixel(1.0, -1.0), Point2::new(10, 20));
        assert_eq!(panel.to_pixel(0.5, 0.0), Point2::new(5, 10));
    }

    #[test]
    fn stacked_rects() {
        let rects = PixelRect::full(Vector2::new(100, 90)).stacked(3);
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[2].origin, Point2::new(0, 60));
        assert_eq!(rects[2].size, Vector2::new(100, 30));

        let inset = rects[1].inset(5);
        assert_eq!(inset.origin, Point2::new(5, 35));
        assert_eq!(inset.size, Vector2::new(90, 20));
    }

    #[test]
    fn bresenham_hits_endpoints() {
        let mut pixels = vec![];
        bresenham(Point2::new(0, 0), Point2::new(5, 2), |p| pixels.push(p));
        assert_eq!(pixels.first(), Some(&Point2::new(0, 0)));
        assert_eq!(pixels.last(), Some(&Point2::new(5, 2)));
        assert_eq!(pixels.len(), 6);
    }

    #[test]
    fn line_is_clipped_to_panel() {
        let mut image = RgbaImage::new(20, 20);
        let panel = Panel::new(
            PixelRect::new(Point2::new(5, 5), Vector2::new(10, 10)),
            0.0..1.0,
            0.0..1.0,
        );
        panel.draw_line(&mut image, &[-1.0, 2.0], &[0.5, 0.5], RED, 1);

        assert_eq!(*image.get_pixel(5, 10), to_rgba8(RED));
        assert_eq!(*image.get_pixel(14, 10), to_rgba8(RED));
        assert_eq!(image.get_pixel(4, 10).0, [0; 4]);
        assert_eq!(image.get_pixel(15, 10).0, [0; 4]);
    }

    #[test]
    fn ranges() {
        assert_eq!(y_range(-0.5, 1.0, 1.2), -0.6..1.2);
        assert_eq!(y_range(0.0, 0.0, 1.2), -1.0..1.0);
        assert_eq!(x_range(&[3.0, 1.0, 2.0], 0.5), 0.5..3.5);
        assert_eq!(x_range(&[2.0], 0.0), 1.0..3.0);
    }
}
