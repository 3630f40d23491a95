//! Software raster implementing [`Surface`].

use nocturne_core::{Color, PixelRatio, Rgb};

use crate::surface::{ColorStop, Filter, LinearGradient, PixelSize, RadialFill, Surface};

/// Radii below this many pixels are deposited onto a single pixel.
const SUBPIXEL_RADIUS: f32 = 1.0;

/// Number of box passes approximating one Gaussian.
const BOX_PASSES: usize = 3;

/// An opaque RGB pixel buffer with source-over blending.
///
/// All buffers are sized on [`resize`](Surface::resize) and reused by every
/// fill afterwards.
#[derive(Debug, Default)]
pub struct Raster {
    size: PixelSize,
    ratio: PixelRatio,
    filter: Filter,
    pixels: Vec<Rgb>,
    /// Premultiplied RGBA layer used while a blur filter is active.
    layer: Vec<[f32; 4]>,
    scratch: Vec<[f32; 4]>,
}

/// A gradient stop resolved to RGB.
#[derive(Debug, Clone, Copy)]
struct Stop {
    offset: f32,
    rgb: Rgb,
    alpha: f32,
}

/// Half-open pixel rectangle.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl Raster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(size: PixelSize) -> Self {
        let mut raster = Self::new();
        raster.resize(size);
        raster
    }

    /// Pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.size.width as usize + x as usize)
            .copied()
    }

    pub fn pixel_ratio(&self) -> PixelRatio {
        self.ratio
    }

    fn full_bounds(&self) -> Bounds {
        Bounds {
            x0: 0,
            y0: 0,
            x1: self.size.width as usize,
            y1: self.size.height as usize,
        }
    }

    /// Pixels covered by a square of half-side `radius` around `(cx, cy)`.
    fn bounds_around(&self, cx: f32, cy: f32, radius: f32) -> Bounds {
        let clamp_x = |v: f32| v.clamp(0.0, self.size.width as f32) as usize;
        let clamp_y = |v: f32| v.clamp(0.0, self.size.height as f32) as usize;
        Bounds {
            x0: clamp_x((cx - radius).floor()),
            y0: clamp_y((cy - radius).floor()),
            x1: clamp_x((cx + radius).ceil()),
            y1: clamp_y((cy + radius).ceil()),
        }
    }

    /// Blend `shade` (colour, alpha) sampled at pixel centres inside `bounds`.
    fn paint(&mut self, bounds: Bounds, shade: impl Fn(f32, f32) -> Option<(Rgb, f32)>) {
        if self.size.is_empty() {
            return;
        }
        let width = self.size.width as usize;

        match self.filter {
            Filter::None => {
                for y in bounds.y0..bounds.y1 {
                    for x in bounds.x0..bounds.x1 {
                        if let Some((rgb, alpha)) = shade(x as f32 + 0.5, y as f32 + 0.5) {
                            let i = y * width + x;
                            self.pixels[i] = self.pixels[i].blend(rgb, alpha);
                        }
                    }
                }
            }
            Filter::Blur(sigma) => {
                self.layer.fill([0.0; 4]);
                for y in bounds.y0..bounds.y1 {
                    for x in bounds.x0..bounds.x1 {
                        if let Some((rgb, alpha)) = shade(x as f32 + 0.5, y as f32 + 0.5) {
                            let a = alpha.clamp(0.0, 1.0);
                            self.layer[y * width + x] = [rgb.r * a, rgb.g * a, rgb.b * a, a];
                        }
                    }
                }

                let height = self.size.height as usize;
                let sigma_x = sigma * self.ratio.x as f32;
                let sigma_y = sigma * self.ratio.y as f32;
                blur(
                    &mut self.layer,
                    &mut self.scratch,
                    width,
                    height,
                    sigma_x,
                    sigma_y,
                );

                for (pixel, src) in self.pixels.iter_mut().zip(&self.layer) {
                    let a = src[3].clamp(0.0, 1.0);
                    *pixel = Rgb::new(
                        src[0].max(0.0) + pixel.r * (1.0 - a),
                        src[1].max(0.0) + pixel.g * (1.0 - a),
                        src[2].max(0.0) + pixel.b * (1.0 - a),
                    );
                }
            }
        }
    }
}

impl Surface for Raster {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn resize(&mut self, size: PixelSize) {
        if size == self.size {
            return;
        }
        self.size = size;
        let area = size.area();
        self.pixels = vec![Rgb::BLACK; area];
        self.layer = vec![[0.0; 4]; area];
        self.scratch = vec![[0.0; 4]; area];
    }

    fn set_pixel_ratio(&mut self, ratio: PixelRatio) {
        self.ratio = ratio;
    }

    fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    fn fill_linear(&mut self, gradient: &LinearGradient) {
        let stops = resolve(&gradient.stops);
        let span = gradient.y1 - gradient.y0;
        let y0 = gradient.y0;
        let bounds = self.full_bounds();
        self.paint(bounds, |_, y| {
            let t = if span.abs() > f32::EPSILON {
                (y - y0) / span
            } else {
                0.0
            };
            Some(sample(&stops, t))
        });
    }

    fn fill_radial(&mut self, fill: &RadialFill) {
        if fill.radius <= 0.0 || !fill.radius.is_finite() || self.size.is_empty() {
            return;
        }
        let stops = resolve(&fill.stops);
        let aspect = fill.aspect.max(1e-3);
        let center = fill.center;

        if fill.radius < SUBPIXEL_RADIUS {
            // Area-weighted deposit onto the pixel containing the centre.
            let coverage = (std::f32::consts::PI * fill.radius * fill.radius * aspect).min(1.0);
            let alpha = mean_alpha(&stops) * coverage;
            let rgb = stops[0].rgb;
            let (x, y) = (center.x.floor(), center.y.floor());
            let bounds = self.bounds_around(x + 0.5, y + 0.5, 0.5);
            self.paint(bounds, |_, _| Some((rgb, alpha)));
            return;
        }

        let (sin, cos) = fill.rotation.sin_cos();
        let radius = fill.radius;
        let bounds = self.bounds_around(center.x, center.y, radius);
        self.paint(bounds, |px, py| {
            let dx = px - center.x;
            let dy = py - center.y;
            let u = dx * cos + dy * sin;
            let v = (dy * cos - dx * sin) / aspect;
            let t = (u * u + v * v).sqrt() / radius;
            (t <= 1.0).then(|| sample(&stops, t))
        });
    }

    fn fill_all(&mut self, color: Color) {
        let rgb = color.to_rgb();
        let alpha = color.alpha;
        let bounds = self.full_bounds();
        self.paint(bounds, |_, _| Some((rgb, alpha)));
    }
}

fn resolve<const N: usize>(stops: &[ColorStop; N]) -> [Stop; N] {
    stops.map(|stop| Stop {
        offset: stop.offset,
        rgb: stop.color.to_rgb(),
        alpha: stop.color.alpha.clamp(0.0, 1.0),
    })
}

/// Colour and alpha at `t` along piecewise-linear stops.
fn sample(stops: &[Stop], t: f32) -> (Rgb, f32) {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return (Rgb::BLACK, 0.0);
    };
    if t <= first.offset {
        return (first.rgb, first.alpha);
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let u = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
            return (a.rgb.lerp(b.rgb, u), a.alpha + (b.alpha - a.alpha) * u);
        }
    }
    (last.rgb, last.alpha)
}

/// Mean alpha of a radial gradient over the area of its disc.
fn mean_alpha(stops: &[Stop]) -> f32 {
    const SAMPLES: usize = 16;
    let dt = 1.0 / SAMPLES as f32;
    (0..SAMPLES)
        .map(|i| {
            let t = (i as f32 + 0.5) * dt;
            sample(stops, t).1 * 2.0 * t * dt
        })
        .sum()
}

/// Separable Gaussian approximation (three box passes per axis). Samples
/// outside the buffer count as transparent. The result ends up in `layer`.
fn blur(
    layer: &mut [[f32; 4]],
    scratch: &mut [[f32; 4]],
    width: usize,
    height: usize,
    sigma_x: f32,
    sigma_y: f32,
) {
    for radius in box_radii(sigma_x, width) {
        box_horizontal(layer, scratch, width, height, radius);
        layer.copy_from_slice(scratch);
    }
    for radius in box_radii(sigma_y, height) {
        box_vertical(layer, scratch, width, height, radius);
        layer.copy_from_slice(scratch);
    }
}

/// Box radii whose successive application approximates a Gaussian of
/// standard deviation `sigma`, none wider than `extent`.
///
/// A radius past the extent already averages the whole axis, so larger
/// sigmas are clamped before the widths are derived.
fn box_radii(sigma: f32, extent: usize) -> [usize; BOX_PASSES] {
    if sigma <= 0.0 || sigma.is_nan() || extent == 0 {
        return [0; BOX_PASSES];
    }
    let sigma = sigma.min(extent as f32);
    let n = BOX_PASSES as f32;
    let variance = 12.0 * sigma * sigma;
    let ideal = (variance / n + 1.0).sqrt();
    let mut lower = ideal.floor() as i64;
    if lower % 2 == 0 {
        lower -= 1;
    }
    let upper = lower + 2;
    let wl = lower as f32;
    let m = ((variance - n * wl * wl - 4.0 * n * wl - 3.0 * n) / (-4.0 * wl - 4.0)).round() as i64;

    let mut radii = [0; BOX_PASSES];
    for (i, radius) in radii.iter_mut().enumerate() {
        let width = if (i as i64) < m { lower } else { upper };
        *radius = (((width - 1) / 2).max(0) as usize).min(extent);
    }
    radii
}

fn box_horizontal(
    src: &[[f32; 4]],
    dst: &mut [[f32; 4]],
    width: usize,
    height: usize,
    radius: usize,
) {
    if radius == 0 {
        dst.copy_from_slice(src);
        return;
    }
    let norm = 1.0 / (2 * radius + 1) as f32;
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        let out = &mut dst[y * width..(y + 1) * width];
        let mut acc = [0.0f32; 4];
        for px in row.iter().take(radius + 1) {
            add(&mut acc, px);
        }
        for x in 0..width {
            out[x] = scale(&acc, norm);
            if x + radius + 1 < width {
                add(&mut acc, &row[x + radius + 1]);
            }
            if x >= radius {
                sub(&mut acc, &row[x - radius]);
            }
        }
    }
}

fn box_vertical(
    src: &[[f32; 4]],
    dst: &mut [[f32; 4]],
    width: usize,
    height: usize,
    radius: usize,
) {
    if radius == 0 {
        dst.copy_from_slice(src);
        return;
    }
    let norm = 1.0 / (2 * radius + 1) as f32;
    for x in 0..width {
        let mut acc = [0.0f32; 4];
        for y in 0..(radius + 1).min(height) {
            add(&mut acc, &src[y * width + x]);
        }
        for y in 0..height {
            dst[y * width + x] = scale(&acc, norm);
            if y + radius + 1 < height {
                add(&mut acc, &src[(y + radius + 1) * width + x]);
            }
            if y >= radius {
                sub(&mut acc, &src[(y - radius) * width + x]);
            }
        }
    }
}

fn add(acc: &mut [f32; 4], px: &[f32; 4]) {
    for (a, p) in acc.iter_mut().zip(px) {
        *a += p;
    }
}

fn sub(acc: &mut [f32; 4], px: &[f32; 4]) {
    for (a, p) in acc.iter_mut().zip(px) {
        *a -= p;
    }
}

fn scale(acc: &[f32; 4], k: f32) -> [f32; 4] {
    [acc[0] * k, acc[1] * k, acc[2] * k, acc[3] * k]
}
