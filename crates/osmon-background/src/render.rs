//! Per-frame painting of the current mode.

use osmon_core::Mode;

use crate::animations::{Pools, clouds, meteors, sky, stars};
use crate::canvas::Canvas;
use crate::random::Random;
use crate::surface::Surface;

/// Paint exactly one frame, advancing the pools that are on screen.
pub fn paint_frame(surface: &mut Surface, mode: Mode, pools: &mut Pools, rng: &mut Random) {
    let (width, height) = surface.display_size();
    let canvas = surface.canvas_mut();
    canvas.clear();

    match mode {
        Mode::Night => paint_night(canvas, width, height, pools, rng),
        Mode::Day => paint_day(canvas, width, height, pools, rng),
    }
}

fn paint_night(canvas: &mut Canvas, width: f32, height: f32, pools: &mut Pools, rng: &mut Random) {
    sky::paint_night_backdrop(canvas, width, height);
    sky::paint_moon(canvas, width, height);

    stars::update(&mut pools.stars, width, height, rng);
    stars::draw(&pools.stars, canvas);

    meteors::update(&mut pools.meteors);
    meteors::draw(&pools.meteors, canvas);
    meteors::retire(&mut pools.meteors, height);
}

fn paint_day(canvas: &mut Canvas, width: f32, height: f32, pools: &mut Pools, rng: &mut Random) {
    sky::paint_day_sky(canvas, width, height);
    sky::paint_sun(canvas, width, height);

    clouds::update(&mut pools.clouds, width, height, rng);
    clouds::draw(&pools.clouds, canvas);
}
