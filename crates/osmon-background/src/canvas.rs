//! Software canvas the sky is painted on.
//!
//! Drawing calls take logical coordinates. The canvas maps them to device
//! pixels through a uniform scale transform, samples every pixel centre and
//! blends with source-over compositing. Shape edges get half a device pixel
//! of feathering so that sub-pixel stars still leave a mark.

use std::ops::Range;

use crate::color::{Pixel, Rgba, TRANSPARENT};

const EPSILON: f32 = 1e-6;

/// Colour stops of a gradient, sorted by offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<(f32, Rgba)>,
}

impl Gradient {
    /// Build a gradient from `(offset, color)` stops.
    pub fn new(stops: &[(f32, Rgba)]) -> Self {
        let mut stops = stops.to_vec();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { stops }
    }

    /// Color at parameter `t`, padded outside `[0, 1]`.
    pub fn sample(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let Some(&(first_offset, first)) = self.stops.first() else {
            return Rgba::new(0, 0, 0, 0.0);
        };
        if t <= first_offset {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (from_offset, from) = pair[0];
            let (to_offset, to) = pair[1];
            if t <= to_offset {
                let span = to_offset - from_offset;
                if span <= EPSILON {
                    return to;
                }
                return from.lerp(to, (t - from_offset) / span);
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

/// Gradient along the line from `(x0, y0)` to `(x1, y1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub gradient: Gradient,
}

impl LinearGradient {
    fn parameter(&self, x: f32, y: f32) -> Option<f32> {
        let dx = self.x1 - self.x0;
        let dy = self.y1 - self.y0;
        let len_sq = dx * dx + dy * dy;
        if len_sq <= EPSILON {
            return None;
        }
        Some(((x - self.x0) * dx + (y - self.y0) * dy) / len_sq)
    }
}

/// Two-circle radial gradient with canvas semantics.
///
/// The color at a point comes from the largest `t` for which the point lies
/// on the circle interpolated between the start and end circles.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub x0: f32,
    pub y0: f32,
    pub r0: f32,
    pub x1: f32,
    pub y1: f32,
    pub r1: f32,
    pub gradient: Gradient,
}

impl RadialGradient {
    fn parameter(&self, x: f32, y: f32) -> Option<f32> {
        let cdx = self.x1 - self.x0;
        let cdy = self.y1 - self.y0;
        let dr = self.r1 - self.r0;
        let pdx = x - self.x0;
        let pdy = y - self.y0;

        // a·t² − 2b·t + c = 0
        let a = cdx * cdx + cdy * cdy - dr * dr;
        let b = pdx * cdx + pdy * cdy + self.r0 * dr;
        let c = pdx * pdx + pdy * pdy - self.r0 * self.r0;
        let valid = |t: f32| self.r0 + t * dr >= 0.0;

        if a.abs() <= EPSILON {
            if b.abs() <= EPSILON {
                return None;
            }
            let t = c / (2.0 * b);
            return valid(t).then_some(t);
        }

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let (t1, t2) = ((b + root) / a, (b - root) / a);
        let (high, low) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };
        if valid(high) {
            Some(high)
        } else if valid(low) {
            Some(low)
        } else {
            None
        }
    }
}

/// How a shape is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl Paint {
    /// Color at a logical point, `None` where the paint is undefined.
    fn color_at(&self, x: f32, y: f32) -> Option<Rgba> {
        match self {
            Paint::Solid(color) => Some(*color),
            Paint::Linear(linear) => linear.parameter(x, y).map(|t| linear.gradient.sample(t)),
            Paint::Radial(radial) => radial.parameter(x, y).map(|t| radial.gradient.sample(t)),
        }
    }
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

/// Axis-aligned ellipse in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub cx: f32,
    pub cy: f32,
    pub rx: f32,
    pub ry: f32,
}

impl Ellipse {
    pub fn new(cx: f32, cy: f32, rx: f32, ry: f32) -> Self {
        Self { cx, cy, rx, ry }
    }

    /// Approximate signed distance to the edge, positive inside.
    fn edge_distance(&self, x: f32, y: f32) -> f32 {
        if self.rx <= 0.0 || self.ry <= 0.0 {
            return f32::NEG_INFINITY;
        }
        let nx = (x - self.cx) / self.rx;
        let ny = (y - self.cy) / self.ry;
        (1.0 - (nx * nx + ny * ny).sqrt()) * self.rx.min(self.ry)
    }
}

/// Backing pixel buffer with a scale transform and global alpha.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
    scale: f32,
    global_alpha: f32,
}

impl Canvas {
    /// Create a transparent canvas of `width` × `height` device pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; width * height],
            scale: 1.0,
            global_alpha: 1.0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Device pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Pixel under a logical point.
    pub fn pixel_at(&self, x: f32, y: f32) -> Option<Pixel> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        self.pixel((x * self.scale) as usize, (y * self.scale) as usize)
    }

    /// Scale applied from logical units to device pixels.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Replace the drawing transform with a uniform scale.
    pub fn set_transform(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    pub fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(TRANSPARENT);
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: &Paint) {
        let (x1, y1) = (x + width, y + height);
        self.shade([x, y, x1, y1], paint, |px, py| {
            if px >= x && px < x1 && py >= y && py < y1 {
                1.0
            } else {
                0.0
            }
        });
    }

    /// Fill a circle.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        let scale = self.scale;
        self.shade(
            [cx - radius, cy - radius, cx + radius, cy + radius],
            paint,
            |px, py| {
                let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                feather(radius - d, scale)
            },
        );
    }

    /// Fill the union of several ellipses as a single path.
    pub fn fill_ellipses(&mut self, ellipses: &[Ellipse], paint: &Paint) {
        let Some(bounds) = ellipses.iter().fold(None, |acc: Option<[f32; 4]>, e| {
            let b = [e.cx - e.rx, e.cy - e.ry, e.cx + e.rx, e.cy + e.ry];
            Some(match acc {
                None => b,
                Some(a) => [a[0].min(b[0]), a[1].min(b[1]), a[2].max(b[2]), a[3].max(b[3])],
            })
        }) else {
            return;
        };
        let scale = self.scale;
        self.shade(bounds, paint, |px, py| {
            ellipses
                .iter()
                .map(|e| feather(e.edge_distance(px, py), scale))
                .fold(0.0, f32::max)
        });
    }

    /// Stroke a straight segment of the given width.
    pub fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Rgba) {
        let half = width / 2.0;
        let scale = self.scale;
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len_sq = dx * dx + dy * dy;
        let bounds = [
            x0.min(x1) - half,
            y0.min(y1) - half,
            x0.max(x1) + half,
            y0.max(y1) + half,
        ];
        self.shade(bounds, &Paint::Solid(color), |px, py| {
            let t = if len_sq <= EPSILON {
                0.0
            } else {
                (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
            };
            let d = ((px - (x0 + t * dx)).powi(2) + (py - (y0 + t * dy)).powi(2)).sqrt();
            feather(half - d, scale)
        });
    }

    /// Soft halo around a circle, fading out over `blur` logical units.
    pub fn glow(&mut self, cx: f32, cy: f32, radius: f32, blur: f32, color: Rgba) {
        let outer = radius + blur.max(0.0);
        self.shade(
            [cx - outer, cy - outer, cx + outer, cy + outer],
            &Paint::Solid(color),
            |px, py| {
                let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                if d <= radius {
                    1.0
                } else if d >= outer {
                    0.0
                } else {
                    (1.0 - (d - radius) / (outer - radius)).powi(2)
                }
            },
        );
    }

    /// Visit every device pixel inside the logical `bounds`, blending `paint`
    /// with the coverage reported for the pixel centre.
    fn shade<F>(&mut self, bounds: [f32; 4], paint: &Paint, coverage: F)
    where
        F: Fn(f32, f32) -> f32,
    {
        let Some((columns, rows)) = self.device_range(bounds) else {
            return;
        };
        let inverse = 1.0 / self.scale;
        for py in rows {
            let y = (py as f32 + 0.5) * inverse;
            for px in columns.clone() {
                let x = (px as f32 + 0.5) * inverse;
                let amount = coverage(x, y);
                if amount <= 0.0 {
                    continue;
                }
                if let Some(color) = paint.color_at(x, y) {
                    self.blend(py * self.width + px, color, amount);
                }
            }
        }
    }

    fn device_range(&self, bounds: [f32; 4]) -> Option<(Range<usize>, Range<usize>)> {
        if self.width == 0 || self.height == 0 || self.scale <= 0.0 {
            return None;
        }
        let clip = |v: f32, max: usize| (v * self.scale).clamp(0.0, max as f32);
        // Widen by one pixel so feathered edges are not cut off.
        let x0 = (clip(bounds[0], self.width).floor() as usize).saturating_sub(1);
        let y0 = (clip(bounds[1], self.height).floor() as usize).saturating_sub(1);
        let x1 = ((clip(bounds[2], self.width).ceil() as usize) + 1).min(self.width);
        let y1 = ((clip(bounds[3], self.height).ceil() as usize) + 1).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0..x1, y0..y1))
    }

    fn blend(&mut self, index: usize, color: Rgba, coverage: f32) {
        let alpha = (color.a * coverage.min(1.0) * self.global_alpha).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let [r, g, b] = color.unit_rgb();
        let keep = 1.0 - alpha;
        let pixel = &mut self.pixels[index];
        pixel[0] = r * alpha + pixel[0] * keep;
        pixel[1] = g * alpha + pixel[1] * keep;
        pixel[2] = b * alpha + pixel[2] * keep;
        pixel[3] = alpha + pixel[3] * keep;
    }
}

/// Coverage for a signed logical edge distance, half a device pixel wide.
fn feather(distance: f32, scale: f32) -> f32 {
    (distance * scale + 0.5).clamp(0.0, 1.0)
}
