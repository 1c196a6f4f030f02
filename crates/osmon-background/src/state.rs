//! Animation context: the single owner of all animation state.

use osmon_core::Mode;
use tracing::debug;

use crate::animations::{Pools, clouds, meteors, stars};
use crate::mode::ModeController;
use crate::random::Random;
use crate::render;
use crate::surface::{Surface, Viewport};

/// Everything the sky animation mutates between frames.
#[derive(Debug)]
pub struct AnimationContext {
    /// Drawable surface and its backing buffer.
    surface: Surface,
    /// Star, meteor and cloud pools.
    pools: Pools,
    /// Current night/day mode.
    mode: ModeController,
    /// Source of all particle randomness.
    rng: Random,
    /// Viewport of the latest resize.
    viewport: Viewport,
}

impl AnimationContext {
    /// Create the context for a viewport and the current theme flag.
    pub fn new(viewport: Viewport, light: bool, rng: Random) -> Self {
        let mut context = Self {
            surface: Surface::new(),
            pools: Pools::default(),
            mode: ModeController::new(light),
            rng,
            viewport,
        };
        context.resize(viewport);
        context.on_theme_change(light);
        context
    }

    /// Resize the surface and regenerate the size-dependent pools.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.surface.resize(viewport);

        let (width, height) = self.surface.display_size();
        self.pools.stars = stars::init(width, height, &mut self.rng);
        self.pools.clouds = clouds::init(width, height, &mut self.rng);

        debug!(
            width,
            height,
            ratio = self.surface.pixel_ratio(),
            stars = self.pools.stars.len(),
            clouds = self.pools.clouds.len(),
            "surface resized"
        );
    }

    /// React to a theme change broadcast with the current light flag.
    pub fn on_theme_change(&mut self, light: bool) -> Mode {
        self.mode.sync(light, &mut self.pools.meteors)
    }

    /// React to a tick of the meteor spawn timer.
    pub fn on_meteor_timer(&mut self) -> bool {
        let (width, height) = self.surface.display_size();
        meteors::on_timer(
            &mut self.pools.meteors,
            self.mode.mode(),
            width,
            height,
            &mut self.rng,
        )
    }

    /// Advance the visible pools and paint one frame.
    pub fn render_frame(&mut self) {
        render::paint_frame(
            &mut self.surface,
            self.mode.mode(),
            &mut self.pools,
            &mut self.rng,
        );
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
