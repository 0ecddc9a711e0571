//! Regular polygon.

use std::f64::consts::TAU;

use linework_core::module::{Module, ModuleRole};
use linework_core::params::{param_f64, param_usize};
use linework_core::primitives::{polar, rotate_polygon};
use linework_core::{ExecutionContext, Layer, Path};
use serde_json::Value;

/// Parameters for [`Polygon`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonParams {
    pub sides: usize,
    pub radius: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for PolygonParams {
    fn default() -> Self {
        Self {
            sides: 6,
            radius: 100.0,
            rotation: 0.0,
            center_x: 50.0,
            center_y: 50.0,
        }
    }
}

impl PolygonParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            sides: param_usize(params, "sides", d.sides),
            radius: param_f64(params, "radius", d.radius),
            rotation: param_f64(params, "rotation", d.rotation),
            center_x: param_f64(params, "center_x", d.center_x),
            center_y: param_f64(params, "center_y", d.center_y),
        }
    }
}

/// One closed regular polygon.
pub struct Polygon;

impl Module for Polygon {
    fn name(&self) -> &'static str {
        "polygon"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Generator
    }

    fn execute(&self, params: &Value, _input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = PolygonParams::from_json(params);
        if p.sides < 3 {
            return vec![Layer::new("polygon", Vec::new())];
        }
        let center = ctx.canvas().pct_point(p.center_x, p.center_y);
        let vertices: Vec<_> = (0..p.sides)
            .map(|i| polar(center, p.radius, TAU * i as f64 / p.sides as f64))
            .collect();
        let ring = rotate_polygon(&vertices, center, p.rotation.to_radians());
        vec![Layer::new("polygon", vec![Path::from_ring(ring, true, true)])]
    }
}
