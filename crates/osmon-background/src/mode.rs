//! Night/day mode tracking.

use osmon_core::Mode;
use tracing::debug;

use crate::animations::meteors::Meteor;

/// Holds the current mode, derived from the external light-theme flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeController {
    mode: Mode,
}

impl ModeController {
    /// Start in the mode matching the current theme flag.
    pub fn new(light: bool) -> Self {
        Self {
            mode: Mode::from_light(light),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Re-derive the mode from the theme flag.
    ///
    /// Daylight never shows meteors, so entering day empties the pool.
    pub fn sync(&mut self, light: bool, meteors: &mut Vec<Meteor>) -> Mode {
        let mode = Mode::from_light(light);
        if mode != self.mode {
            debug!(from = ?self.mode, to = ?mode, "mode changed");
        }
        self.mode = mode;
        if !mode.allows_meteors() {
            meteors.clear();
        }
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meteor() -> Meteor {
        Meteor {
            x: 10.0,
            y: 10.0,
            vx: -8.0,
            vy: 8.0,
            life: 30.0,
            age: 0,
        }
    }

    #[test]
    fn test_initial_mode_from_flag() {
        assert_eq!(ModeController::new(true).mode(), Mode::Day);
        assert_eq!(ModeController::new(false).mode(), Mode::Night);
    }

    #[test]
    fn test_switch_to_day_purges_meteors() {
        let mut controller = ModeController::new(false);
        let mut meteors = vec![meteor(), meteor()];
        assert_eq!(controller.sync(true, &mut meteors), Mode::Day);
        assert!(meteors.is_empty());
    }

    #[test]
    fn test_staying_at_night_keeps_meteors() {
        let mut controller = ModeController::new(false);
        let mut meteors = vec![meteor()];
        assert_eq!(controller.sync(false, &mut meteors), Mode::Night);
        assert_eq!(meteors.len(), 1);
    }

    #[test]
    fn test_repeated_day_sync_is_safe() {
        let mut controller = ModeController::new(true);
        let mut meteors = Vec::new();
        controller.sync(true, &mut meteors);
        controller.sync(true, &mut meteors);
        assert_eq!(controller.mode(), Mode::Day);
        assert!(meteors.is_empty());
    }
}
