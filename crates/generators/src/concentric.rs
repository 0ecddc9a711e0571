//! Concentric circles around a common center.

use linework_core::module::{Module, ModuleRole};
use linework_core::params::{param_f64, param_usize};
use linework_core::primitives::circle_path;
use linework_core::{ExecutionContext, Layer};
use serde_json::Value;

/// Default number of rings.
const DEFAULT_COUNT: usize = 5;
/// Default innermost radius in canvas units.
const DEFAULT_MIN_RADIUS: f64 = 10.0;
/// Default outermost radius in canvas units.
const DEFAULT_MAX_RADIUS: f64 = 100.0;
/// Default segment count per ring.
const DEFAULT_SEGMENTS: usize = 64;

/// Parameters for [`ConcentricCircles`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcentricCirclesParams {
    pub count: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    pub segments: usize,
    /// Center, in percent of the canvas.
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for ConcentricCirclesParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            segments: DEFAULT_SEGMENTS,
            center_x: 50.0,
            center_y: 50.0,
        }
    }
}

impl ConcentricCirclesParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            count: param_usize(params, "count", d.count),
            min_radius: param_f64(params, "min_radius", d.min_radius),
            max_radius: param_f64(params, "max_radius", d.max_radius),
            segments: param_usize(params, "segments", d.segments),
            center_x: param_f64(params, "center_x", d.center_x),
            center_y: param_f64(params, "center_y", d.center_y),
        }
    }

    /// Radius of ring `i`: evenly spaced from `min_radius` to `max_radius`.
    pub fn radius(&self, i: usize) -> f64 {
        if self.count <= 1 {
            return self.min_radius;
        }
        let t = i as f64 / (self.count - 1) as f64;
        self.min_radius + (self.max_radius - self.min_radius) * t
    }
}

/// Emits `count` closed rings in one `circles` layer.
pub struct ConcentricCircles;

impl Module for ConcentricCircles {
    fn name(&self) -> &'static str {
        "concentric_circles"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Generator
    }

    fn execute(&self, params: &Value, _input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = ConcentricCirclesParams::from_json(params);
        let center = ctx.canvas().pct_point(p.center_x, p.center_y);
        let paths = (0..p.count)
            .map(|i| circle_path(center, p.radius(i), p.segments))
            .collect();
        vec![Layer::new("circles", paths)]
    }
}
