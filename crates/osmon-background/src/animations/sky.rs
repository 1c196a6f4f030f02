//! Backdrops and celestial bodies (stateless).

use crate::canvas::{Canvas, Gradient, LinearGradient, Paint, RadialGradient};
use crate::color::Rgba;

/// Horizontal position of the moon and sun, as a fraction of the width.
const BODY_X: f32 = 0.82;
/// Vertical position of the moon and sun, as a fraction of the height.
const BODY_Y: f32 = 0.18;

/// Craters as (x offset, y offset, radius), relative to the moon radius.
const CRATERS: [(f32, f32, f32); 3] = [(-0.2, -0.1, 0.18), (0.15, 0.1, 0.12), (-0.05, 0.22, 0.09)];

/// Centre of the moon or sun for a surface of the given size.
pub fn body_center(width: f32, height: f32) -> (f32, f32) {
    (width * BODY_X, height * BODY_Y)
}

pub fn moon_radius(width: f32, height: f32) -> f32 {
    width.min(height) * 0.045
}

pub fn sun_radius(width: f32, height: f32) -> f32 {
    width.min(height) * 0.06
}

/// Dark translucent wash plus a violet-teal ambient glow from the upper left.
pub fn paint_night_backdrop(canvas: &mut Canvas, width: f32, height: f32) {
    canvas.fill_rect(0.0, 0.0, width, height, &Rgba::new(0, 0, 0, 0.12).into());

    let ambient = RadialGradient {
        x0: width * 0.2,
        y0: height * 0.15,
        r0: 10.0,
        x1: width * 0.3,
        y1: height * 0.2,
        r1: width.max(height),
        gradient: Gradient::new(&[
            (0.0, Rgba::new(124, 92, 255, 0.18)),
            (0.5, Rgba::new(35, 213, 171, 0.08)),
            (1.0, Rgba::new(0, 0, 0, 0.0)),
        ]),
    };
    canvas.fill_rect(0.0, 0.0, width, height, &Paint::Radial(ambient));
}

/// Glowing moon with three craters.
pub fn paint_moon(canvas: &mut Canvas, width: f32, height: f32) {
    let (x, y) = body_center(width, height);
    let r = moon_radius(width, height);

    canvas.glow(x, y, r, r * 0.9, Rgba::new(255, 255, 255, 0.35));

    let surface = RadialGradient {
        x0: x - r * 0.3,
        y0: y - r * 0.3,
        r0: r * 0.1,
        x1: x,
        y1: y,
        r1: r,
        gradient: Gradient::new(&[
            (0.0, Rgba::new(255, 255, 255, 0.95)),
            (0.5, Rgba::new(240, 240, 240, 0.9)),
            (1.0, Rgba::new(200, 200, 210, 0.7)),
        ]),
    };
    canvas.fill_circle(x, y, r, &Paint::Radial(surface));

    let crater = Paint::Solid(Rgba::new(180, 180, 190, 0.6));
    for (dx, dy, cr) in CRATERS {
        canvas.fill_circle(x + dx * r, y + dy * r, cr * r, &crater);
    }
}

/// Vertical daylight gradient from sky blue to near white.
pub fn paint_day_sky(canvas: &mut Canvas, width: f32, height: f32) {
    let sky = LinearGradient {
        x0: 0.0,
        y0: 0.0,
        x1: 0.0,
        y1: height,
        gradient: Gradient::new(&[
            (0.0, Rgba::new(135, 206, 235, 0.65)),
            (1.0, Rgba::new(245, 245, 255, 0.55)),
        ]),
    };
    canvas.fill_rect(0.0, 0.0, width, height, &Paint::Linear(sky));
}

/// Sun: a wide faint halo and a bright gradient disc.
pub fn paint_sun(canvas: &mut Canvas, width: f32, height: f32) {
    let (x, y) = body_center(width, height);
    let r = sun_radius(width, height);

    canvas.fill_circle(x, y, r * 2.2, &Rgba::new(255, 210, 70, 0.2).into());

    let disc = RadialGradient {
        x0: x - r * 0.2,
        y0: y - r * 0.2,
        r0: r * 0.2,
        x1: x,
        y1: y,
        r1: r,
        gradient: Gradient::new(&[
            (0.0, Rgba::new(255, 245, 200, 0.98)),
            (1.0, Rgba::new(255, 180, 50, 0.92)),
        ]),
    };
    canvas.fill_circle(x, y, r, &Paint::Radial(disc));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(canvas: &Canvas, x: f32, y: f32) -> f32 {
        canvas.pixel_at(x, y).unwrap()[3]
    }

    #[test]
    fn test_body_placement() {
        let (x, y) = body_center(1000.0, 500.0);
        assert!((x - 820.0).abs() < 1e-3);
        assert!((y - 90.0).abs() < 1e-3);
        assert!((moon_radius(1000.0, 500.0) - 22.5).abs() < 1e-3);
        assert!((sun_radius(1000.0, 500.0) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_moon_is_opaque_at_center_and_absent_far_away() {
        let mut canvas = Canvas::new(400, 200);
        paint_moon(&mut canvas, 400.0, 200.0);
        let (x, y) = body_center(400.0, 200.0);
        assert!(alpha_at(&canvas, x, y) > 0.8);
        assert_eq!(alpha_at(&canvas, 20.0, 180.0), 0.0);
    }

    #[test]
    fn test_night_backdrop_is_translucent() {
        let mut canvas = Canvas::new(300, 200);
        paint_night_backdrop(&mut canvas, 300.0, 200.0);
        let near = alpha_at(&canvas, 60.0, 30.0);
        let far = alpha_at(&canvas, 299.0, 199.0);
        assert!(near > 0.12 && near < 0.5);
        assert!(far >= 0.12 - 1e-4);
        assert!(near > far);
    }

    #[test]
    fn test_day_sky_covers_surface() {
        let mut canvas = Canvas::new(100, 100);
        paint_day_sky(&mut canvas, 100.0, 100.0);
        let top = canvas.pixel(50, 0).unwrap();
        let bottom = canvas.pixel(50, 99).unwrap();
        assert!(top[3] > 0.6);
        assert!(bottom[3] > 0.5);
        // Bluer at the top: red channel lower relative to alpha.
        assert!(top[0] / top[3] < bottom[0] / bottom[3]);
    }

    #[test]
    fn test_sun_disc_brighter_than_halo() {
        let mut canvas = Canvas::new(500, 500);
        paint_sun(&mut canvas, 500.0, 500.0);
        let (x, y) = body_center(500.0, 500.0);
        let r = sun_radius(500.0, 500.0);
        let disc = alpha_at(&canvas, x, y);
        let halo = alpha_at(&canvas, x + r * 1.6, y);
        assert!(disc > 0.9);
        assert!((halo - 0.2).abs() < 1e-3);
    }
}
