//! TOML scene descriptions.
//!
//! A scene file names its dimension, optional render options and an array
//! of primitive tables:
//!
//! ```toml
//! dimension = 2
//!
//! [options]
//! grid = [1.0, 1.0]
//!
//! [[primitive]]
//! kind = "polygon"
//! vertices = [[0, 0], [2, 0], [1, 2]]
//! fill = "orange"
//!
//! [[primitive]]
//! kind = "arrow"
//! tip = [2, 1]
//! ```
//!
//! This is the dynamic boundary of the primitive whitelist: each entry must
//! be a table whose `kind` is one of the primitive kinds valid for the
//! scene's dimension, otherwise parsing fails with
//! [`VecplotError::UnsupportedPrimitive`]. Coordinates of the wrong length
//! fail with [`VecplotError::DimensionMismatch`]; syntax errors and missing
//! fields fail with [`VecplotError::Scene`], carrying the byte span of the
//! offending entry.

use std::{ops::Range, str::FromStr};

use log::debug;
use serde::Deserialize;
use toml::Spanned;

use vecplot_core::{
    color::Color,
    draw::StrokeStyle,
    geometry::{AxisRange, Point2, Point3},
    primitive::{
        Arrow2, Arrow3, Box3, Points2, Points3, Polygon2, Polygon3, Primitive2, Primitive3,
        Segment2, Segment3,
    },
};

use crate::{
    VecplotError,
    compose::{Render2dOptions, Render3dOptions},
    layout::GridSpacing,
};

const KINDS_2D: [&str; 4] = ["polygon", "points", "arrow", "segment"];
const KINDS_3D: [&str; 5] = ["polygon", "points", "arrow", "segment", "box"];

/// A parsed scene, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    Planar {
        primitives: Vec<Primitive2>,
        options: Render2dOptions,
    },
    Spatial {
        primitives: Vec<Primitive3>,
        options: Render3dOptions,
    },
}

impl Scene {
    /// Parses a scene from TOML source.
    ///
    /// # Errors
    ///
    /// See the [module documentation](self).
    pub fn parse(src: &str) -> Result<Self, VecplotError> {
        let raw: RawScene = toml::from_str(src)
            .map_err(|err| VecplotError::new_scene_error(err.message(), err.span(), src))?;

        let scene = match raw.dimension {
            2 => Self::Planar {
                primitives: raw
                    .primitives
                    .iter()
                    .map(|entry| convert_2d(entry, src))
                    .collect::<Result<_, _>>()?,
                options: raw.options.into_planar(src)?,
            },
            3 => Self::Spatial {
                primitives: raw
                    .primitives
                    .iter()
                    .map(|entry| convert_3d(entry, src))
                    .collect::<Result<_, _>>()?,
                options: raw.options.into_spatial()?,
            },
            other => {
                return Err(VecplotError::new_scene_error(
                    format!("dimension must be 2 or 3, found {other}"),
                    None,
                    src,
                ));
            }
        };

        debug!(dimension = scene.dimension(), primitives = scene.len(); "Scene parsed");
        Ok(scene)
    }

    /// 2 or 3.
    pub fn dimension(&self) -> usize {
        match self {
            Self::Planar { .. } => 2,
            Self::Spatial { .. } => 3,
        }
    }

    /// Number of primitives in the scene.
    pub fn len(&self) -> usize {
        match self {
            Self::Planar { primitives, .. } => primitives.len(),
            Self::Spatial { primitives, .. } => primitives.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromStr for Scene {
    type Err = VecplotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScene {
    dimension: i64,
    #[serde(default)]
    options: RawOptions,
    #[serde(default, rename = "primitive")]
    primitives: Vec<Spanned<toml::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawGrid {
    Enabled(bool),
    Spacing(Vec<f64>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOptions {
    origin: Option<bool>,
    axes: Option<bool>,
    grid: Option<RawGrid>,
    preserve_aspect: Option<bool>,
    width: Option<f64>,
    azimuth: Option<f64>,
    elevation: Option<f64>,
    limits: Option<Vec<Vec<f64>>>,
    ticks: Option<Vec<Vec<f64>>>,
}

impl RawOptions {
    fn into_planar(self, src: &str) -> Result<Render2dOptions, VecplotError> {
        let spatial_only = [
            ("azimuth", self.azimuth.is_some()),
            ("elevation", self.elevation.is_some()),
            ("limits", self.limits.is_some()),
            ("ticks", self.ticks.is_some()),
        ];
        if let Some((name, _)) = spatial_only.iter().find(|(_, set)| *set) {
            return Err(VecplotError::new_scene_error(
                format!("option `{name}` only applies to 3D scenes"),
                None,
                src,
            ));
        }

        let defaults = Render2dOptions::default();
        let grid = match self.grid {
            None => defaults.grid,
            Some(RawGrid::Enabled(true)) => Some(GridSpacing::unit()),
            Some(RawGrid::Enabled(false)) => None,
            Some(RawGrid::Spacing(spacing)) => match spacing[..] {
                [x, y] => Some(GridSpacing::new(x, y)?),
                _ => {
                    return Err(VecplotError::DimensionMismatch {
                        expected: 2,
                        found: spacing.len(),
                    });
                }
            },
        };

        Ok(Render2dOptions {
            include_origin: self.origin.unwrap_or(defaults.include_origin),
            draw_axes: self.axes.unwrap_or(defaults.draw_axes),
            grid,
            preserve_aspect: self.preserve_aspect.unwrap_or(defaults.preserve_aspect),
            width: self.width.unwrap_or(defaults.width),
            save_path: None,
        })
    }

    fn into_spatial(self) -> Result<Render3dOptions, VecplotError> {
        if self.grid.is_some() || self.preserve_aspect.is_some() {
            return Err(VecplotError::InvalidOption(
                "`grid` and `preserve_aspect` only apply to 2D scenes".to_string(),
            ));
        }

        let axis_limits = self
            .limits
            .map(|limits| {
                let ranges = per_axis(limits)?;
                let [x, y, z] = ranges.map(|range| match range[..] {
                    [min, max] => Ok(AxisRange::new(min, max)),
                    _ => Err(VecplotError::InvalidOption(format!(
                        "axis limits must be [min, max] pairs, found {} values",
                        range.len()
                    ))),
                });
                Ok::<_, VecplotError>([x?, y?, z?])
            })
            .transpose()?;
        let axis_ticks = self.ticks.map(per_axis).transpose()?;

        let defaults = Render3dOptions::default();
        Ok(Render3dOptions {
            include_origin: self.origin.unwrap_or(defaults.include_origin),
            draw_axes: self.axes.unwrap_or(defaults.draw_axes),
            width: self.width.unwrap_or(defaults.width),
            save_path: None,
            azimuth: self.azimuth,
            elevation: self.elevation,
            axis_limits,
            axis_ticks,
        })
    }
}

/// Splits one entry per axis into an x/y/z triple.
fn per_axis(values: Vec<Vec<f64>>) -> Result<[Vec<f64>; 3], VecplotError> {
    let found = values.len();
    <[Vec<f64>; 3]>::try_from(values)
        .map_err(|_| VecplotError::DimensionMismatch { expected: 3, found })
}

/// Fields of every primitive kind; which ones are required depends on `kind`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPrimitive {
    kind: String,
    vertices: Option<Vec<Vec<f64>>>,
    points: Option<Vec<Vec<f64>>>,
    #[serde(alias = "head")]
    tip: Option<Vec<f64>>,
    tail: Option<Vec<f64>>,
    start: Option<Vec<f64>>,
    end: Option<Vec<f64>>,
    corner: Option<Vec<f64>>,
    color: Option<String>,
    fill: Option<Color>,
    alpha: Option<f32>,
    linestyle: Option<StrokeStyle>,
}

/// A primitive entry being converted, with what is needed to report errors.
struct Entry<'a> {
    raw: RawPrimitive,
    span: Range<usize>,
    src: &'a str,
}

impl<'a> Entry<'a> {
    /// Checks `kind` against the kinds allowed in `dimension` before
    /// deserializing any other field.
    fn read(
        entry: &Spanned<toml::Value>,
        dimension: usize,
        src: &'a str,
    ) -> Result<Self, VecplotError> {
        let span = entry.span();
        let value = entry.get_ref();
        let Some(table) = value.as_table() else {
            return Err(VecplotError::unsupported(
                value.to_string(),
                "scene entries must be tables with a `kind` field",
            ));
        };

        let kind = match table.get("kind") {
            Some(toml::Value::String(kind)) => kind.as_str(),
            Some(other) => {
                return Err(VecplotError::unsupported(
                    other.to_string(),
                    "`kind` must be a string",
                ));
            }
            None => {
                return Err(VecplotError::new_scene_error(
                    "primitive is missing `kind`",
                    Some(span),
                    src,
                ));
            }
        };

        let allowed: &[&str] = if dimension == 2 { &KINDS_2D } else { &KINDS_3D };
        if !allowed.contains(&kind) {
            let reason = if KINDS_3D.contains(&kind) {
                format!("`{kind}` is only available in 3D scenes")
            } else {
                format!("expected one of {}", allowed.join(", "))
            };
            return Err(VecplotError::unsupported(kind, reason));
        }

        let raw = value
            .clone()
            .try_into::<RawPrimitive>()
            .map_err(|err| VecplotError::new_scene_error(err.message(), Some(span.clone()), src))?;
        Ok(Self { raw, span, src })
    }

    fn kind(&self) -> &str {
        &self.raw.kind
    }

    fn error(&self, message: impl Into<String>) -> VecplotError {
        VecplotError::new_scene_error(message, Some(self.span.clone()), self.src)
    }

    fn require<'f, T>(&self, field: &'f Option<T>, name: &str) -> Result<&'f T, VecplotError> {
        field
            .as_ref()
            .ok_or_else(|| self.error(format!("{} requires `{name}`", self.kind())))
    }

    /// The `color` field. `"none"` is accepted only where a stroke can be
    /// turned off, and yields `Some(None)`.
    fn color(&self, allow_none: bool) -> Result<Option<Option<Color>>, VecplotError> {
        match self.raw.color.as_deref() {
            None => Ok(None),
            Some("none") if allow_none => Ok(Some(None)),
            Some("none") => Err(self.error(format!("a {} must have a color", self.kind()))),
            Some(color) => Color::new(color)
                .map(|color| Some(Some(color)))
                .map_err(|err| self.error(err)),
        }
    }

    /// The `color` field of kinds that always have one.
    fn solid_color(&self) -> Result<Option<Color>, VecplotError> {
        Ok(self.color(false)?.flatten())
    }
}

fn point2(coords: &[f64]) -> Result<Point2, VecplotError> {
    match *coords {
        [x, y] => Ok(Point2::new(x, y)),
        _ => Err(VecplotError::DimensionMismatch {
            expected: 2,
            found: coords.len(),
        }),
    }
}

fn point3(coords: &[f64]) -> Result<Point3, VecplotError> {
    match *coords {
        [x, y, z] => Ok(Point3::new(x, y, z)),
        _ => Err(VecplotError::DimensionMismatch {
            expected: 3,
            found: coords.len(),
        }),
    }
}

fn convert_2d(entry: &Spanned<toml::Value>, src: &str) -> Result<Primitive2, VecplotError> {
    let entry = Entry::read(entry, 2, src)?;
    let raw = &entry.raw;
    if raw.linestyle.is_some() {
        return Err(entry.error("`linestyle` only applies to 3D segments"));
    }

    let primitive = match entry.kind() {
        "polygon" => {
            let vertices = entry
                .require(&raw.vertices, "vertices")?
                .iter()
                .map(|v| point2(v))
                .collect::<Result<Vec<_>, _>>()?;
            let mut polygon = Polygon2::new(vertices);
            if let Some(stroke) = entry.color(true)? {
                polygon = polygon.with_stroke(stroke);
            }
            if let Some(fill) = raw.fill {
                polygon = polygon.with_fill(fill);
            }
            if let Some(alpha) = raw.alpha {
                polygon = polygon.with_alpha(alpha);
            }
            polygon.into()
        }
        "points" => {
            let points = entry
                .require(&raw.points, "points")?
                .iter()
                .map(|v| point2(v))
                .collect::<Result<Vec<_>, _>>()?;
            let mut points = Points2::new(points);
            if let Some(color) = entry.solid_color()? {
                points = points.with_color(color);
            }
            points.into()
        }
        "arrow" => {
            let mut arrow = Arrow2::new(point2(entry.require(&raw.tip, "tip")?)?);
            if let Some(tail) = &raw.tail {
                arrow = arrow.with_tail(point2(tail)?);
            }
            if let Some(color) = entry.solid_color()? {
                arrow = arrow.with_color(color);
            }
            arrow.into()
        }
        "segment" => {
            let mut segment = Segment2::new(
                point2(entry.require(&raw.start, "start")?)?,
                point2(entry.require(&raw.end, "end")?)?,
            );
            if let Some(color) = entry.solid_color()? {
                segment = segment.with_color(color);
            }
            segment.into()
        }
        other => return Err(VecplotError::unsupported(other, "not a 2D primitive kind")),
    };
    Ok(primitive)
}

fn convert_3d(entry: &Spanned<toml::Value>, src: &str) -> Result<Primitive3, VecplotError> {
    let entry = Entry::read(entry, 3, src)?;
    let raw = &entry.raw;

    let primitive = match entry.kind() {
        "polygon" => {
            let vertices = entry
                .require(&raw.vertices, "vertices")?
                .iter()
                .map(|v| point3(v))
                .collect::<Result<Vec<_>, _>>()?;
            let mut polygon = Polygon3::new(vertices);
            if let Some(stroke) = entry.color(true)? {
                polygon = polygon.with_stroke(stroke);
            }
            if let Some(fill) = raw.fill {
                polygon = polygon.with_fill(fill);
            }
            if let Some(alpha) = raw.alpha {
                polygon = polygon.with_alpha(alpha);
            }
            polygon.into()
        }
        "points" => {
            let points = entry
                .require(&raw.points, "points")?
                .iter()
                .map(|v| point3(v))
                .collect::<Result<Vec<_>, _>>()?;
            let mut points = Points3::new(points);
            if let Some(color) = entry.solid_color()? {
                points = points.with_color(color);
            }
            points.into()
        }
        "arrow" => {
            let mut arrow = Arrow3::new(point3(entry.require(&raw.tip, "tip")?)?);
            if let Some(tail) = &raw.tail {
                arrow = arrow.with_tail(point3(tail)?);
            }
            if let Some(color) = entry.solid_color()? {
                arrow = arrow.with_color(color);
            }
            arrow.into()
        }
        "segment" => {
            let mut segment = Segment3::new(
                point3(entry.require(&raw.start, "start")?)?,
                point3(entry.require(&raw.end, "end")?)?,
            );
            if let Some(color) = entry.solid_color()? {
                segment = segment.with_color(color);
            }
            if let Some(style) = &raw.linestyle {
                segment = segment.with_style(style.clone());
            }
            segment.into()
        }
        "box" => Box3::new(point3(entry.require(&raw.corner, "corner")?)?).into(),
        other => return Err(VecplotError::unsupported(other, "not a 3D primitive kind")),
    };
    Ok(primitive)
}
