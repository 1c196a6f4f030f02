//! Surface sizing and pixel density handling.

use crate::canvas::Canvas;

/// Highest pixel ratio the backing buffer is allocated at.
pub const MAX_PIXEL_RATIO: f32 = 4.0;

/// Largest backing buffer, in device pixels.
pub const MAX_BUFFER_PIXELS: usize = 2048 * 2048;

/// Size of the drawable area as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width in layout units.
    pub width: f32,
    /// Logical height in layout units.
    pub height: f32,
    /// Device pixels per layout unit.
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Viewport covering a grid of terminal cells.
    pub fn from_cells(
        columns: u16,
        rows: u16,
        cell_width: f32,
        cell_height: f32,
        device_pixel_ratio: f32,
    ) -> Self {
        Self::new(
            columns as f32 * cell_width,
            rows as f32 * cell_height,
            device_pixel_ratio,
        )
    }
}

/// The drawable surface: logical size, pixel ratio and backing buffer.
#[derive(Debug, Clone)]
pub struct Surface {
    width: f32,
    height: f32,
    pixel_ratio: f32,
    canvas: Canvas,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// Create an empty surface. Call [`Surface::resize`] before drawing.
    pub fn new() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            pixel_ratio: 1.0,
            canvas: Canvas::new(0, 0),
        }
    }

    /// Adopt a new viewport, replacing the backing buffer.
    ///
    /// The ratio is clamped to `1..=MAX_PIXEL_RATIO`. If the buffer would
    /// still exceed [`MAX_BUFFER_PIXELS`], the ratio is lowered until it fits.
    pub fn resize(&mut self, viewport: Viewport) {
        self.pixel_ratio = clamp_ratio(viewport.device_pixel_ratio);
        self.width = sanitize(viewport.width);
        self.height = sanitize(viewport.height);

        let (buffer_width, buffer_height) =
            match buffer_dims(self.width, self.height, self.pixel_ratio) {
                Some(dims) => dims,
                None => {
                    self.pixel_ratio = fitting_ratio(self.width, self.height);
                    buffer_dims(self.width, self.height, self.pixel_ratio).unwrap_or((0, 0))
                }
            };
        self.canvas = Canvas::new(buffer_width, buffer_height);
        self.canvas.set_transform(self.pixel_ratio);
    }

    /// Logical width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Logical height.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Device pixel ratio after clamping.
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Size the surface is displayed at, in layout units.
    pub fn display_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Backing buffer size in device pixels.
    pub fn buffer_size(&self) -> (usize, usize) {
        (self.canvas.width(), self.canvas.height())
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }
}

fn clamp_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() {
        ratio.clamp(1.0, MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Floored buffer size, or `None` when it exceeds [`MAX_BUFFER_PIXELS`].
fn buffer_dims(width: f32, height: f32, ratio: f32) -> Option<(usize, usize)> {
    let buffer_width = (width * ratio).floor() as usize;
    let buffer_height = (height * ratio).floor() as usize;
    if buffer_width == 0 || buffer_height == 0 {
        return Some((0, 0));
    }
    match buffer_width.checked_mul(buffer_height) {
        Some(pixels) if pixels <= MAX_BUFFER_PIXELS => Some((buffer_width, buffer_height)),
        _ => None,
    }
}

/// Ratio at which a `width` x `height` area fills at most [`MAX_BUFFER_PIXELS`].
fn fitting_ratio(width: f32, height: f32) -> f32 {
    let area = f64::from(width) * f64::from(height);
    ((MAX_BUFFER_PIXELS as f64 / area).sqrt() * 0.999) as f32
}

fn sanitize(dimension: f32) -> f32 {
    if dimension.is_finite() {
        dimension.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_matches_logical_times_ratio() {
        let mut surface = Surface::new();
        surface.resize(Viewport::new(600.0, 400.0, 2.0));
        assert_eq!(surface.buffer_size(), (1200, 800));
        assert_eq!(surface.display_size(), (600.0, 400.0));
        assert_eq!(surface.canvas().scale(), 2.0);
    }

    #[test]
    fn test_buffer_is_floored() {
        let mut surface = Surface::new();
        surface.resize(Viewport::new(101.0, 55.0, 1.5));
        assert_eq!(surface.buffer_size(), (151, 82));
    }

    #[test]
    fn test_ratio_clamped_to_one() {
        let mut surface = Surface::new();
        surface.resize(Viewport::new(300.0, 200.0, 0.5));
        assert_eq!(surface.pixel_ratio(), 1.0);
        assert_eq!(surface.buffer_size(), (300, 200));

        surface.resize(Viewport::new(300.0, 200.0, f32::NAN));
        assert_eq!(surface.pixel_ratio(), 1.0);
    }

    #[test]
    fn test_huge_ratio_is_bounded() {
        let mut surface = Surface::new();
        surface.resize(Viewport::from_cells(80, 24, 8.0, 16.0, 1.0e4));
        assert_eq!(surface.pixel_ratio(), MAX_PIXEL_RATIO);
        assert_eq!(surface.buffer_size(), (2560, 1536));
        assert_eq!(surface.display_size(), (640.0, 384.0));
    }

    #[test]
    fn test_oversized_buffer_lowers_ratio() {
        let mut surface = Surface::new();
        surface.resize(Viewport::new(1600.0, 1200.0, 3.0));
        let (width, height) = surface.buffer_size();
        assert!(width * height <= MAX_BUFFER_PIXELS);
        assert!(width > 1600 && height > 1200);
        assert!(surface.pixel_ratio() < 3.0);
        assert_eq!(surface.canvas().scale(), surface.pixel_ratio());

        surface.resize(Viewport::new(f32::MAX, 10.0, 1.0));
        let (width, height) = surface.buffer_size();
        assert!(width * height <= MAX_BUFFER_PIXELS);
        assert!(width < usize::MAX);
    }

    #[test]
    fn test_resize_follows_latest_event() {
        let mut surface = Surface::new();
        surface.resize(Viewport::new(640.0, 480.0, 1.0));
        surface.resize(Viewport::new(320.0, 240.0, 3.0));
        assert_eq!(surface.buffer_size(), (960, 720));
        assert_eq!(surface.width(), 320.0);
        assert_eq!(surface.height(), 240.0);
    }

    #[test]
    fn test_degenerate_dimensions() {
        let mut surface = Surface::new();
        surface.resize(Viewport::new(-10.0, f32::INFINITY, 1.0));
        assert_eq!(surface.display_size(), (0.0, 0.0));
        assert_eq!(surface.buffer_size(), (0, 0));
    }

    #[test]
    fn test_viewport_from_cells() {
        let viewport = Viewport::from_cells(80, 24, 8.0, 16.0, 1.0);
        assert_eq!(viewport, Viewport::new(640.0, 384.0, 1.0));
    }
}
