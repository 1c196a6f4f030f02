//! Color types for the software canvas.

use ratatui::style::Color;

/// A premultiplied RGBA pixel with channels in `0.0..=1.0`.
pub type Pixel = [f32; 4];

/// Fully transparent pixel.
pub const TRANSPARENT: Pixel = [0.0; 4];

/// A straight (non-premultiplied) color with 8-bit channels and float alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Create a color from channels and alpha.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Linear interpolation between two colors, `t` in `0.0..=1.0`.
    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// RGB channels scaled to `0.0..=1.0`.
    pub fn unit_rgb(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Composite a premultiplied pixel over an opaque backdrop.
pub fn composite_over(pixel: Pixel, backdrop: Rgba) -> Color {
    let [br, bg, bb] = backdrop.unit_rgb();
    let keep = 1.0 - pixel[3].clamp(0.0, 1.0);
    let channel = |src: f32, dst: f32| ((src + dst * keep).clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(
        channel(pixel[0], br),
        channel(pixel[1], bg),
        channel(pixel[2], bb),
    )
}
