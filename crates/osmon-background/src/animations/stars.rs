//! Starfield pool (stateful).

use crate::canvas::{Canvas, Paint};
use crate::color::Rgba;
use crate::random::Random;

/// Minimum number of stars, whatever the surface size.
pub const MIN_STARS: usize = 90;

/// Surface area (in square layout units) per star.
const AREA_PER_STAR: f64 = 12000.0;

/// Distance past the bottom edge before a star wraps to the top.
const WRAP_MARGIN: f32 = 5.0;

/// Bounds of the flickering opacity.
const MIN_OPACITY: f32 = 0.15;
const MAX_OPACITY: f32 = 1.0;

/// A single star.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
    /// Vertical drift per frame.
    pub drift: f32,
    /// Maximum opacity change per frame.
    pub twinkle: f32,
}

impl Star {
    /// Create a star at a random position on the surface.
    pub fn spawn(width: f32, height: f32, rng: &mut Random) -> Self {
        Self {
            x: rng.range(0.0, width),
            y: rng.range(0.0, height),
            radius: rng.range(0.6, 1.8),
            opacity: rng.range(0.25, 0.95),
            drift: rng.range(0.15, 0.8),
            twinkle: rng.range(0.004, 0.02),
        }
    }

    /// Advance one frame: drift down, wrap at the bottom and flicker.
    pub fn advance(&mut self, width: f32, height: f32, rng: &mut Random) {
        self.y += self.drift;
        if self.y > height + WRAP_MARGIN {
            self.y = -WRAP_MARGIN;
            self.x = rng.range(0.0, width);
        }

        self.opacity += (rng.unit() - 0.5) * self.twinkle;
        self.opacity = self.opacity.clamp(MIN_OPACITY, MAX_OPACITY);
    }
}

/// Number of stars for a surface of the given logical size.
pub fn star_count(width: f32, height: f32) -> usize {
    let by_area = (f64::from(width) * f64::from(height) / AREA_PER_STAR).floor();
    (by_area.max(0.0) as usize).max(MIN_STARS)
}

/// Create a fresh star batch for the given dimensions.
pub fn init(width: f32, height: f32, rng: &mut Random) -> Vec<Star> {
    (0..star_count(width, height))
        .map(|_| Star::spawn(width, height, rng))
        .collect()
}

/// Advance every star by one frame.
pub fn update(stars: &mut [Star], width: f32, height: f32, rng: &mut Random) {
    for star in stars {
        star.advance(width, height, rng);
    }
}

/// Draw stars as small white discs at their current opacity.
pub fn draw(stars: &[Star], canvas: &mut Canvas) {
    for star in stars {
        let paint = Paint::Solid(Rgba::new(255, 255, 255, star.opacity));
        canvas.fill_circle(star.x, star.y, star.radius, &paint);
    }
}
