//! Animated sky background for the osmon terminal page.
//!
//! A night scene (moon, twinkling stars, meteors) and a day scene (sun,
//! drifting clouds) are painted into a software canvas every frame, then
//! presented on terminal cells. The animation reacts to two external
//! signals only: viewport resizes and the light/dark theme flag.

pub mod animations;
mod canvas;
mod color;
mod driver;
mod mode;
mod present;
mod random;
mod render;
mod state;
mod surface;

pub use canvas::{Canvas, Ellipse, Gradient, LinearGradient, Paint, RadialGradient};
pub use color::{Pixel, Rgba, composite_over};
pub use driver::{FrameDriver, IntervalTimer};
pub use mode::ModeController;
pub use present::{backdrop, to_lines};
pub use random::Random;
pub use state::AnimationContext;
pub use surface::{Surface, Viewport};
