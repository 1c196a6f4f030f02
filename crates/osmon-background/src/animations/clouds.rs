//! Cloud pool (stateful).

use crate::canvas::{Canvas, Ellipse, Paint};
use crate::color::Rgba;
use crate::random::Random;

/// Minimum number of clouds, whatever the surface width.
pub const MIN_CLOUDS: usize = 6;

/// Surface width (in layout units) per cloud.
const WIDTH_PER_CLOUD: f32 = 220.0;

/// Horizontal spread beyond the edges used when the pool is created.
const SPAWN_MARGIN: f32 = 240.0;

/// Distance past the right edge at which a cloud is recycled to the left.
const RECYCLE_MARGIN: f32 = 260.0;

/// Shadow opacity relative to the cloud body.
const SHADOW_RATIO: f32 = 0.45;

const BODY_COLOR: Rgba = Rgba::new(255, 255, 255, 0.95);
const SHADOW_COLOR: Rgba = Rgba::new(180, 200, 220, 0.65);

/// A single cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    /// Horizontal movement per frame.
    pub speed: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl Cloud {
    /// Create a cloud anywhere along the extended horizontal band.
    pub fn spawn(width: f32, height: f32, rng: &mut Random) -> Self {
        let x = rng.range(-SPAWN_MARGIN, width + SPAWN_MARGIN);
        let mut cloud = Self {
            x,
            y: 0.0,
            speed: 0.0,
            scale: 0.0,
            opacity: 0.0,
        };
        cloud.reshape(height, rng);
        cloud
    }

    /// Draw a fresh height, speed, scale and opacity.
    fn reshape(&mut self, height: f32, rng: &mut Random) {
        self.y = rng.range(height * 0.08, height * 0.45);
        self.speed = rng.range(0.25, 0.9);
        self.scale = rng.range(0.7, 1.6);
        self.opacity = rng.range(0.18, 0.35);
    }

    /// Drift right one frame, recycling to the left edge once past the right.
    pub fn advance(&mut self, width: f32, height: f32, rng: &mut Random) {
        self.x += self.speed;
        if self.x > width + RECYCLE_MARGIN {
            self.x = -RECYCLE_MARGIN;
            self.reshape(height, rng);
        }
    }

    /// Four overlapping body ellipses.
    fn body(&self) -> [Ellipse; 4] {
        let (x, y, s) = (self.x, self.y, self.scale);
        [
            Ellipse::new(x, y, 42.0 * s, 22.0 * s),
            Ellipse::new(x + 32.0 * s, y + 4.0 * s, 36.0 * s, 20.0 * s),
            Ellipse::new(x - 30.0 * s, y + 6.0 * s, 34.0 * s, 18.0 * s),
            Ellipse::new(x + 6.0 * s, y - 14.0 * s, 30.0 * s, 18.0 * s),
        ]
    }

    /// Flat shadow under the body.
    fn shadow(&self) -> Ellipse {
        let s = self.scale;
        Ellipse::new(self.x + 10.0 * s, self.y + 18.0 * s, 48.0 * s, 12.0 * s)
    }
}

/// Number of clouds for a surface of the given logical width.
pub fn cloud_count(width: f32) -> usize {
    ((width / WIDTH_PER_CLOUD).floor().max(0.0) as usize).max(MIN_CLOUDS)
}

/// Create a fresh cloud batch for the given dimensions.
pub fn init(width: f32, height: f32, rng: &mut Random) -> Vec<Cloud> {
    (0..cloud_count(width))
        .map(|_| Cloud::spawn(width, height, rng))
        .collect()
}

/// Advance every cloud by one frame.
pub fn update(clouds: &mut [Cloud], width: f32, height: f32, rng: &mut Random) {
    for cloud in clouds {
        cloud.advance(width, height, rng);
    }
}

/// Draw clouds as layered ellipse clusters.
pub fn draw(clouds: &[Cloud], canvas: &mut Canvas) {
    let previous = canvas.global_alpha();
    for cloud in clouds {
        canvas.set_global_alpha(cloud.opacity);
        canvas.fill_ellipses(&cloud.body(), &Paint::Solid(BODY_COLOR));

        canvas.set_global_alpha(cloud.opacity * SHADOW_RATIO);
        canvas.fill_ellipses(&[cloud.shadow()], &Paint::Solid(SHADOW_COLOR));
    }
    canvas.set_global_alpha(previous);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fresh_ranges(cloud: &Cloud, height: f32) {
        assert!((height * 0.08..=height * 0.45).contains(&cloud.y));
        assert!((0.25..=0.9).contains(&cloud.speed));
        assert!((0.7..=1.6).contains(&cloud.scale));
        assert!((0.18..=0.35).contains(&cloud.opacity));
    }

    #[test]
    fn test_cloud_count() {
        assert_eq!(cloud_count(2000.0), 9);
        assert_eq!(cloud_count(1000.0), 6);
        assert_eq!(cloud_count(0.0), 6);
    }

    #[test]
    fn test_init_ranges() {
        let mut rng = Random::seeded(21);
        let clouds = init(2000.0, 1000.0, &mut rng);
        assert_eq!(clouds.len(), 9);
        for cloud in &clouds {
            assert!((-240.0..=2240.0).contains(&cloud.x));
            assert_fresh_ranges(cloud, 1000.0);
        }
    }

    #[test]
    fn test_cloud_recycles_to_left() {
        let mut rng = Random::seeded(22);
        let mut cloud = Cloud {
            x: 1259.8,
            y: 10.0,
            speed: 0.5,
            scale: 1.0,
            opacity: 0.2,
        };
        cloud.advance(1000.0, 800.0, &mut rng);
        assert_eq!(cloud.x, -260.0);
        assert_fresh_ranges(&cloud, 800.0);
    }

    #[test]
    fn test_cloud_drifts_right() {
        let mut rng = Random::seeded(23);
        let mut cloud = Cloud {
            x: 100.0,
            y: 10.0,
            speed: 0.5,
            scale: 1.0,
            opacity: 0.2,
        };
        cloud.advance(1000.0, 800.0, &mut rng);
        assert_eq!(cloud.x, 100.5);
        assert_eq!(cloud.y, 10.0);
    }

    #[test]
    fn test_pool_never_shrinks() {
        let mut rng = Random::seeded(24);
        let mut clouds = init(400.0, 300.0, &mut rng);
        for _ in 0..5000 {
            update(&mut clouds, 400.0, 300.0, &mut rng);
        }
        assert_eq!(clouds.len(), 6);
        assert!(clouds.iter().all(|c| c.x <= 660.0 + 0.9));
    }

    #[test]
    fn test_draw_body_and_shadow_alpha() {
        let mut canvas = Canvas::new(200, 120);
        let cloud = Cloud {
            x: 100.0,
            y: 50.0,
            speed: 0.0,
            scale: 1.0,
            opacity: 0.3,
        };
        draw(&[cloud], &mut canvas);

        let body = canvas.pixel(100, 45).unwrap()[3];
        assert!((body - 0.3 * 0.95).abs() < 1e-4);

        // Below the body, only the shadow remains.
        let shadow = canvas.pixel(110, 76).unwrap()[3];
        assert!((shadow - 0.3 * 0.45 * 0.65).abs() < 1e-4);

        assert_eq!(canvas.global_alpha(), 1.0);
    }
}
