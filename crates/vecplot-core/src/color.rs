//! Color handling for vecplot scenes
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, plus the small named palette used for primitive
//! defaults.

use std::{fmt, str::FromStr};

use color::DynamicColor;
use serde::{Deserialize, Deserializer, de};

/// A CSS color, stored as a `DynamicColor` from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses any CSS color string: hex, functional notation or a keyword.
    ///
    /// ```
    /// use vecplot_core::color::Color;
    ///
    /// assert!(Color::new("rgb(31, 119, 180)").is_ok());
    /// assert!(Color::new("mauve-ish").is_err());
    /// ```
    pub fn new(css: &str) -> Result<Self, String> {
        DynamicColor::from_str(css)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{css}`: {err}"))
    }

    /// Builds a palette color from a literal known to parse.
    fn palette(color_str: &'static str) -> Self {
        Self::new(color_str).expect("palette colors are valid CSS colors")
    }

    /// Default stroke color for polygons and segments.
    pub fn blue() -> Self {
        Self::palette("#1f77b4")
    }

    /// Default arrow color.
    pub fn red() -> Self {
        Self::palette("#d62728")
    }

    pub fn green() -> Self {
        Self::palette("#2ca02c")
    }

    pub fn purple() -> Self {
        Self::palette("#9467bd")
    }

    pub fn orange() -> Self {
        Self::palette("#ff7f0e")
    }

    /// Neutral color used for the origin marker, axes and point sets.
    pub fn black() -> Self {
        Self::default()
    }

    /// Color of the dashed box edges in 3D scenes.
    pub fn gray() -> Self {
        Self::palette("gray")
    }

    /// The same color with its opacity replaced by `alpha`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::palette("black")
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(de::Error::custom)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.color, f)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
        assert!(invalid.unwrap_err().contains("not-a-color"));
    }

    #[test]
    fn test_color_default_is_black() {
        assert_eq!(Color::default().to_string(), "black");
        assert_eq!(Color::black(), Color::default());
    }

    #[test]
    fn test_palette_colors_are_distinct() {
        let palette = [
            Color::blue(),
            Color::red(),
            Color::green(),
            Color::purple(),
            Color::orange(),
            Color::black(),
            Color::gray(),
        ];
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_palette_is_opaque() {
        assert_eq!(Color::orange().alpha(), 1.0);
        assert_eq!(Color::orange().with_alpha(0.25).alpha(), 0.25);
    }

    #[test]
    fn test_color_from_str() {
        let color: Color = "blue".parse().unwrap();
        assert_eq!(color, Color::new("blue").unwrap());
        assert!("definitely-not".parse::<Color>().is_err());
    }
}
