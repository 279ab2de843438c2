//! Point marker shapes.

use std::str::FromStr;

/// Glyph used to mark a single point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Filled disc (scatter default)
    #[default]
    Dot,
    /// Diagonal cross; marks the origin
    Cross,
}

impl MarkerShape {
    /// Marker size in output pixels.
    pub fn size(self) -> f32 {
        match self {
            Self::Dot => 6.0,
            Self::Cross => 10.0,
        }
    }
}

impl FromStr for MarkerShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" | "o" => Ok(Self::Dot),
            "cross" | "x" => Ok(Self::Cross),
            _ => Err(format!("invalid marker `{s}`, valid values: dot, cross")),
        }
    }
}
