//! Spatial falloff: how strongly a modifier applies at a given point.
//!
//! A modifier computes its fully transformed result, asks
//! [`calculate_falloff`] for a strength in [0, 1] at the original point, and
//! blends with [`blend_point`]. With falloff disabled the strength is always 1.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::CanvasSettings;
use crate::easing::Easing;
use crate::geometry::Point;
use crate::params::{normalize_option, param_bool, param_enum, param_f64};

/// How distance from the falloff center is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FalloffShape {
    /// Euclidean distance: a disc.
    #[default]
    Radial,
    /// Horizontal distance only: a vertical band.
    Horizontal,
    /// Vertical distance only: a horizontal band.
    Vertical,
    /// Chebyshev distance: an axis-aligned square.
    Box,
}

impl FromStr for FalloffShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_option(s).as_str() {
            "radial" | "circle" => Ok(FalloffShape::Radial),
            "horizontal" | "x" => Ok(FalloffShape::Horizontal),
            "vertical" | "y" => Ok(FalloffShape::Vertical),
            "box" | "square" | "rectangle" => Ok(FalloffShape::Box),
            _ => Err(format!("unknown falloff shape: {s}")),
        }
    }
}

/// Falloff configuration.
///
/// `center_x`/`center_y` are percentages of the canvas; `radius` is a
/// percentage of the smaller canvas dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FalloffParams {
    pub enabled: bool,
    pub shape: FalloffShape,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub curve: Easing,
    pub invert: bool,
}

impl Default for FalloffParams {
    fn default() -> Self {
        Self {
            enabled: false,
            shape: FalloffShape::Radial,
            center_x: 50.0,
            center_y: 50.0,
            radius: 50.0,
            curve: Easing::Linear,
            invert: false,
        }
    }
}

impl FalloffParams {
    /// Reads the `falloff_*` keys of a unit's parameter record.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            enabled: param_bool(params, "falloff_enabled", d.enabled),
            shape: param_enum(params, "falloff_shape", d.shape),
            center_x: param_f64(params, "falloff_center_x", d.center_x),
            center_y: param_f64(params, "falloff_center_y", d.center_y),
            radius: param_f64(params, "falloff_radius", d.radius),
            curve: param_enum(params, "falloff_curve", d.curve),
            invert: param_bool(params, "falloff_invert", d.invert),
        }
    }
}

/// Strength in [0, 1] of an effect at `point`.
///
/// Strength is 1 at the center and falls to 0 at `radius`, shaped by the
/// curve and optionally inverted. A non-positive radius collapses the region
/// to the center point itself.
pub fn calculate_falloff(point: Point, falloff: &FalloffParams, canvas: &CanvasSettings) -> f64 {
    if !falloff.enabled {
        return 1.0;
    }
    let center = canvas.pct_point(falloff.center_x, falloff.center_y);
    let radius = canvas.pct_min(falloff.radius);
    let dx = (point.x - center.x).abs();
    let dy = (point.y - center.y).abs();
    let distance = match falloff.shape {
        FalloffShape::Radial => dx.hypot(dy),
        FalloffShape::Horizontal => dx,
        FalloffShape::Vertical => dy,
        FalloffShape::Box => dx.max(dy),
    };
    let t = if radius > 0.0 {
        (1.0 - distance / radius).clamp(0.0, 1.0)
    } else if distance == 0.0 {
        1.0
    } else {
        0.0
    };
    let strength = falloff.curve.apply(t);
    if falloff.invert {
        1.0 - strength
    } else {
        strength
    }
}

/// `original + (transformed - original) * strength`, exact at both ends.
pub fn lerp_with_falloff(original: f64, transformed: f64, strength: f64) -> f64 {
    if strength == 0.0 {
        original
    } else if strength == 1.0 {
        transformed
    } else {
        original + (transformed - original) * strength
    }
}

/// Component-wise [`lerp_with_falloff`].
pub fn blend_point(original: Point, transformed: Point, strength: f64) -> Point {
    Point::new(
        lerp_with_falloff(original.x, transformed.x, strength),
        lerp_with_falloff(original.y, transformed.y, strength),
    )
}

/// Applies `transform` to `point` and blends by the falloff at `point`.
pub fn apply_with_falloff(
    point: Point,
    falloff: &FalloffParams,
    canvas: &CanvasSettings,
    transform: impl FnOnce(Point) -> Point,
) -> Point {
    let strength = calculate_falloff(point, falloff, canvas);
    if strength == 0.0 {
        return point;
    }
    blend_point(point, transform(point), strength)
}
