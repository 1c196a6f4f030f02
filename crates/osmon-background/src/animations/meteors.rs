//! Meteor pool (stateful).
//!
//! Meteors are spawned by a real-time timer rather than by the frame loop,
//! only at night, and retired once their life runs out or they leave the
//! surface through the left or bottom edge.

use std::time::Duration;

use osmon_core::Mode;
use tracing::debug;

use crate::canvas::Canvas;
use crate::color::Rgba;
use crate::random::Random;

/// Default period of the spawn timer.
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(2200);

/// Chance that a timer tick spawns a meteor.
pub const SPAWN_PROBABILITY: f32 = 0.55;

/// How far past the left or bottom edge a meteor may travel.
const EXIT_MARGIN: f32 = 200.0;

/// Trail length as a multiple of the velocity vector.
const TRAIL_FACTOR: f32 = 4.5;

const TRAIL_WIDTH: f32 = 2.0;

/// A single meteor.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Frames left before the meteor burns out.
    pub life: f32,
    /// Frames since the meteor appeared.
    pub age: u32,
}

impl Meteor {
    /// Create a meteor entering from the upper right, heading down-left.
    pub fn spawn(width: f32, height: f32, rng: &mut Random) -> Self {
        Self {
            x: rng.range(width * 0.2, width * 1.2),
            y: rng.range(-80.0, height * 0.4),
            vx: rng.range(-10.0, -6.0),
            vy: rng.range(6.0, 10.0),
            life: rng.range(20.0, 40.0),
            age: 0,
        }
    }

    /// Move one frame along the velocity and age by one frame.
    pub fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= 1.0;
        self.age += 1;
    }

    /// Whether the meteor has burned out or left the visible area.
    pub fn is_expired(&self, height: f32) -> bool {
        self.life <= 0.0 || self.x < -EXIT_MARGIN || self.y > height + EXIT_MARGIN
    }

    /// Opacity of the trail, fading with age.
    pub fn trail_alpha(&self) -> f32 {
        (0.35 - self.age as f32 * 0.01).max(0.0)
    }
}

/// Handle one tick of the spawn timer.
///
/// Returns `true` when a meteor was added.
pub fn on_timer(
    meteors: &mut Vec<Meteor>,
    mode: Mode,
    width: f32,
    height: f32,
    rng: &mut Random,
) -> bool {
    if !mode.allows_meteors() {
        return false;
    }
    if rng.unit() >= SPAWN_PROBABILITY {
        return false;
    }
    let meteor = Meteor::spawn(width, height, rng);
    debug!(x = meteor.x, y = meteor.y, life = meteor.life, "meteor spawned");
    meteors.push(meteor);
    true
}

/// Advance every meteor by one frame.
pub fn update(meteors: &mut [Meteor]) {
    for meteor in meteors {
        meteor.advance();
    }
}

/// Remove meteors that burned out or left the surface.
pub fn retire(meteors: &mut Vec<Meteor>, height: f32) {
    meteors.retain(|meteor| !meteor.is_expired(height));
}

/// Draw each meteor as a short fading streak behind its head.
pub fn draw(meteors: &[Meteor], canvas: &mut Canvas) {
    for meteor in meteors {
        let alpha = meteor.trail_alpha();
        if alpha <= 0.0 {
            continue;
        }
        canvas.stroke_line(
            meteor.x,
            meteor.y,
            meteor.x - meteor.vx * TRAIL_FACTOR,
            meteor.y - meteor.vy * TRAIL_FACTOR,
            TRAIL_WIDTH,
            Rgba::new(255, 255, 255, alpha),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meteor(x: f32, y: f32, life: f32) -> Meteor {
        Meteor {
            x,
            y,
            vx: -8.0,
            vy: 8.0,
            life,
            age: 0,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Random::seeded(11);
        for _ in 0..500 {
            let m = Meteor::spawn(1000.0, 500.0, &mut rng);
            assert!((200.0..=1200.0).contains(&m.x));
            assert!((-80.0..=200.0).contains(&m.y));
            assert!((-10.0..=-6.0).contains(&m.vx));
            assert!((6.0..=10.0).contains(&m.vy));
            assert!((20.0..=40.0).contains(&m.life));
            assert_eq!(m.age, 0);
        }
    }

    #[test]
    fn test_timer_spawns_iff_roll_below_probability() {
        let mut rng = Random::seeded(12);
        let mut meteors = Vec::new();
        let mut spawned_any = false;
        for _ in 0..50 {
            let roll = rng.clone().unit();
            let before = meteors.len();
            let spawned = on_timer(&mut meteors, Mode::Night, 1200.0, 800.0, &mut rng);
            assert_eq!(spawned, roll < SPAWN_PROBABILITY);
            if spawned {
                spawned_any = true;
                assert_eq!(meteors.len(), before + 1);
                let life = meteors[before].life;
                assert!((20.0..=40.0).contains(&life));
            } else {
                assert_eq!(meteors.len(), before);
            }
        }
        assert!(spawned_any);
    }

    #[test]
    fn test_timer_never_spawns_by_day() {
        let mut rng = Random::seeded(13);
        let mut meteors = Vec::new();
        for _ in 0..100 {
            assert!(!on_timer(&mut meteors, Mode::Day, 1200.0, 800.0, &mut rng));
        }
        assert!(meteors.is_empty());
    }

    #[test]
    fn test_advance_moves_and_ages() {
        let mut m = meteor(500.0, 100.0, 30.0);
        m.advance();
        assert_eq!((m.x, m.y), (492.0, 108.0));
        assert_eq!(m.life, 29.0);
        assert_eq!(m.age, 1);
    }

    #[test]
    fn test_expiry_conditions() {
        let height = 800.0;
        assert!(!meteor(500.0, 100.0, 1.0).is_expired(height));
        assert!(meteor(500.0, 100.0, 0.0).is_expired(height));
        assert!(meteor(500.0, 100.0, -0.5).is_expired(height));
        assert!(meteor(-200.5, 100.0, 10.0).is_expired(height));
        assert!(!meteor(-200.0, 100.0, 10.0).is_expired(height));
        assert!(meteor(500.0, 1000.5, 10.0).is_expired(height));
        assert!(!meteor(500.0, 1000.0, 10.0).is_expired(height));
    }

    #[test]
    fn test_retire_keeps_live_meteors() {
        let mut meteors = vec![
            meteor(500.0, 100.0, 5.0),
            meteor(500.0, 100.0, 0.0),
            meteor(-300.0, 100.0, 5.0),
            meteor(100.0, 50.0, 12.0),
        ];
        retire(&mut meteors, 800.0);
        assert_eq!(meteors.len(), 2);
        assert!(meteors.iter().all(|m| m.life > 0.0));
    }

    #[test]
    fn test_meteor_burns_out_after_life_frames() {
        let mut meteors = vec![Meteor {
            vx: -0.1,
            vy: 0.1,
            ..meteor(500.0, 100.0, 20.0)
        }];
        for _ in 0..19 {
            update(&mut meteors);
            retire(&mut meteors, 800.0);
        }
        assert_eq!(meteors.len(), 1);
        update(&mut meteors);
        retire(&mut meteors, 800.0);
        assert!(meteors.is_empty());
    }

    #[test]
    fn test_trail_alpha_fades_with_age() {
        let mut m = meteor(0.0, 0.0, 40.0);
        assert!((m.trail_alpha() - 0.35).abs() < 1e-6);
        m.age = 10;
        assert!((m.trail_alpha() - 0.25).abs() < 1e-6);
        m.age = 36;
        assert_eq!(m.trail_alpha(), 0.0);
        m.age = 60;
        assert_eq!(m.trail_alpha(), 0.0);
    }

    #[test]
    fn test_draw_trail_behind_head() {
        let mut canvas = Canvas::new(100, 100);
        let m = Meteor {
            age: 1,
            ..meteor(30.0, 50.0, 10.0)
        };
        draw(&[m], &mut canvas);
        // The trail runs up-right from the head, against the velocity.
        assert!(canvas.pixel(40, 40).unwrap()[3] > 0.0);
        assert_eq!(canvas.pixel(20, 60).unwrap()[3], 0.0);
    }
}
