//! Particle pools and the sky painters.

pub mod clouds;
pub mod meteors;
pub mod sky;
pub mod stars;

use clouds::Cloud;
use meteors::Meteor;
use stars::Star;

/// The three particle pools of the animation.
#[derive(Debug, Clone, Default)]
pub struct Pools {
    pub stars: Vec<Star>,
    pub meteors: Vec<Meteor>,
    pub clouds: Vec<Cloud>,
}
