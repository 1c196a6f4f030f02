//! Core types shared by the osmon crates.

use serde::{Deserialize, Serialize};

/// Page colour theme, owned by the host and toggled by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Whether the light theme is active.
    pub fn is_light(self) -> bool {
        self == Theme::Light
    }

    /// Switch between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Visual mode of the sky animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Moon, stars and meteors.
    #[default]
    Night,
    /// Sun and clouds.
    Day,
}

impl Mode {
    /// Derive the mode from the light theme flag.
    pub fn from_light(light: bool) -> Self {
        if light { Mode::Day } else { Mode::Night }
    }

    /// Whether meteors may exist in this mode.
    pub fn allows_meteors(self) -> bool {
        self == Mode::Night
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_mode_from_light_flag() {
        assert_eq!(Mode::from_light(Theme::Light.is_light()), Mode::Day);
        assert_eq!(Mode::from_light(Theme::Dark.is_light()), Mode::Night);
        assert!(Mode::Night.allows_meteors());
        assert!(!Mode::Day.allows_meteors());
    }
}
