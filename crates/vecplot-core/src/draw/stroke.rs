//! Stroke and line-style definitions.
//!
//! Every line a scene produces (polygon edges, segments, axis lines, arrow
//! shafts, box edges) is described by a [`StrokeDefinition`].
//!
//! # Quick Start
//!
//! ```
//! use vecplot_core::draw::{StrokeDefinition, StrokeStyle};
//! use vecplot_core::color::Color;
//!
//! // Simple solid stroke
//! let stroke = StrokeDefinition::solid(Color::blue(), 1.5);
//!
//! // Dashed gray stroke, as used for box edges
//! let stroke = StrokeDefinition::dashed(Color::gray(), 1.0);
//! assert_eq!(*stroke.style(), StrokeStyle::Dashed);
//! ```
//!
//! # SVG Attribute Mapping
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#000000"`, `0.5` |
//! | `width` | `stroke-width` | `2.0` |
//! | `style` | `stroke-dasharray` | `"6,4"`, `"1.5,3"` |

use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};

use crate::color::Color;

/// Defines the dash pattern of a stroke.
///
/// Parsing accepts both the long names and the short line-style codes
/// familiar from plotting libraries:
///
/// | Variant | Names | SVG dasharray |
/// |---------|-------|---------------|
/// | `Solid` | `solid`, `-` | none |
/// | `Dashed` | `dashed`, `--` | `6,4` |
/// | `Dotted` | `dotted`, `:` | `1.5,3` |
/// | `DashDot` | `dashdot`, `dash-dot`, `-.` | `6,3,1.5,3` |
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
    /// Custom SVG dasharray pattern, e.g. `"10,5,2,3"`.
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" | "-" => Ok(Self::Solid),
            "dashed" | "--" => Ok(Self::Dashed),
            "dotted" | ":" => Ok(Self::Dotted),
            "dashdot" | "dash-dot" | "-." => Ok(Self::DashDot),
            _ => Err(format!(
                "invalid line style `{s}`, valid values: solid, dashed, dotted, dashdot"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for StrokeStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4".to_string()),
            Self::Dotted => Some("1.5,3".to_string()),
            Self::DashDot => Some("6,3,1.5,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// A stroke definition for rendering lines.
///
/// The width is in output pixels and is independent of the coordinate scale.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a solid stroke (convenience constructor).
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke (convenience constructor).
    pub fn dashed(color: Color, width: f32) -> Self {
        Self::new(color, width).with_style(StrokeStyle::Dashed)
    }

    /// Returns a copy of this stroke using `style`.
    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns a copy of this stroke using `width`.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.5)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// This macro applies color, opacity, width and the dash pattern (if not
/// solid) to any SVG element.
///
/// # Examples
///
/// ```
/// use vecplot_core::draw::StrokeDefinition;
/// use vecplot_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::dashed(Color::gray(), 1.0);
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("y1", 0)
///     .set("x2", 10)
///     .set("y2", 10);
///
/// let line = vecplot_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.5);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_stroke_constructors() {
        let solid = StrokeDefinition::solid(Color::red(), 2.0);
        assert_eq!(solid.width(), 2.0);
        assert_eq!(*solid.style(), StrokeStyle::Solid);

        let dashed = StrokeDefinition::dashed(Color::gray(), 1.0);
        assert_eq!(*dashed.style(), StrokeStyle::Dashed);
        assert_eq!(dashed.color(), Color::gray());
    }

    #[test]
    fn test_stroke_builders() {
        let stroke = StrokeDefinition::default()
            .with_width(3.0)
            .with_style(StrokeStyle::Dotted);
        assert_eq!(stroke.width(), 3.0);
        assert_eq!(*stroke.style(), StrokeStyle::Dotted);
    }

    #[test]
    fn test_stroke_style_dasharray() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dashed.to_svg_value(), Some("6,4".to_string()));
        assert_eq!(
            StrokeStyle::Custom("15,3".to_string()).to_svg_value(),
            Some("15,3".to_string())
        );
    }

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!("solid".parse::<StrokeStyle>().unwrap(), StrokeStyle::Solid);
        assert_eq!("-".parse::<StrokeStyle>().unwrap(), StrokeStyle::Solid);
        assert_eq!("dashed".parse::<StrokeStyle>().unwrap(), StrokeStyle::Dashed);
        assert_eq!("--".parse::<StrokeStyle>().unwrap(), StrokeStyle::Dashed);
        assert_eq!(":".parse::<StrokeStyle>().unwrap(), StrokeStyle::Dotted);
        assert_eq!("-.".parse::<StrokeStyle>().unwrap(), StrokeStyle::DashDot);
        assert_eq!(
            "dash-dot".parse::<StrokeStyle>().unwrap(),
            StrokeStyle::DashDot
        );

        let result = "wavy".parse::<StrokeStyle>();
        assert!(result.unwrap_err().contains("invalid line style"));
    }
}
