//! Radial twist with eased angular profiles and an optional spiral ripple.

use glam::DVec2;

use crate::context::CanvasSettings;
use crate::easing::Easing;
use crate::falloff::{blend_point, calculate_falloff, FalloffParams};
use crate::geometry::{Path, Point};

/// Twist configuration. Angles are in radians, distances in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwistOptions {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub twist_amount: f64,
    pub profile: Easing,
    pub ripple_amplitude: f64,
    pub ripple_frequency: f64,
}

/// Position of radius `r` within the `[inner, outer]` band, in [0, 1].
///
/// When the band is empty or inverted (`outer <= inner`) this is a step:
/// 0 at or inside `inner`, 1 outside it.
pub fn radial_position(r: f64, inner: f64, outer: f64) -> f64 {
    if outer <= inner {
        if r <= inner {
            0.0
        } else {
            1.0
        }
    } else {
        ((r - inner) / (outer - inner)).clamp(0.0, 1.0)
    }
}

/// Fully twisted position of `point`, before any falloff blending.
///
/// The ripple is evaluated on the twisted angle, so it follows the spiral.
pub fn twist_point(point: Point, options: &TwistOptions) -> Point {
    let center = DVec2::from(options.center);
    let offset = DVec2::from(point) - center;
    let r = offset.length();
    if r == 0.0 {
        return point;
    }
    let theta = offset.y.atan2(offset.x);
    let t = radial_position(r, options.inner_radius, options.outer_radius);
    let angle = theta + options.twist_amount * options.profile.apply(t);
    let radius = if options.ripple_amplitude != 0.0 {
        r + options.ripple_amplitude * (angle * options.ripple_frequency).sin()
    } else {
        r
    };
    Point::from(center + DVec2::from_angle(angle) * radius)
}

/// Twists every point of `path`, blending toward the untwisted point by the
/// falloff strength at the original position.
pub fn twist_path(
    path: &Path,
    options: &TwistOptions,
    falloff: &FalloffParams,
    canvas: &CanvasSettings,
) -> Path {
    path.map_points(|p| {
        let strength = calculate_falloff(p, falloff, canvas);
        if strength == 0.0 {
            return p;
        }
        blend_point(p, twist_point(p, options), strength)
    })
}
