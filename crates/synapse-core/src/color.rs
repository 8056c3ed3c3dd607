//! Colors used by the particle background.

use serde::{Deserialize, Serialize};

/// RGB color; alpha is supplied per draw call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Links, grid and cyan nodes.
    pub const CYAN: Rgb = Rgb::new(76, 201, 240);
    pub const VIOLET_GLOW: Rgb = Rgb::new(123, 47, 247);
    pub const VIOLET_CORE: Rgb = Rgb::new(167, 139, 250);

    /// CSS `rgba()` string for canvas fill and stroke styles.
    pub fn css_rgba(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Node tint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Hue {
    Cyan,
    Violet,
}

impl Hue {
    pub fn glow(self) -> Rgb {
        match self {
            Hue::Cyan => Rgb::CYAN,
            Hue::Violet => Rgb::VIOLET_GLOW,
        }
    }

    pub fn core(self) -> Rgb {
        match self {
            Hue::Cyan => Rgb::CYAN,
            Hue::Violet => Rgb::VIOLET_CORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_rgba() {
        assert_eq!(Rgb::CYAN.css_rgba(0.5), "rgba(76, 201, 240, 0.5)");
        assert_eq!(Rgb::VIOLET_CORE.css_rgba(1.0), "rgba(167, 139, 250, 1)");
    }

    #[test]
    fn test_violet_glow_differs_from_core() {
        assert_ne!(Hue::Violet.glow(), Hue::Violet.core());
        assert_eq!(Hue::Cyan.glow(), Hue::Cyan.core());
    }
}
