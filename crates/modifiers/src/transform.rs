//! Affine transform about a pivot: scale, then rotate, then translate.

use glam::DVec2;
use linework_core::falloff::{apply_with_falloff, FalloffParams};
use linework_core::module::{Module, ModuleRole};
use linework_core::params::param_f64;
use linework_core::{ExecutionContext, Layer, Point};
use serde_json::Value;

/// Parameters for [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    /// Offset in canvas units.
    pub translate_x: f64,
    pub translate_y: f64,
    /// Degrees, clockwise on screen.
    pub rotate: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Pivot in percent of the canvas.
    pub center_x: f64,
    pub center_y: f64,
    pub falloff: FalloffParams,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            rotate: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            center_x: 50.0,
            center_y: 50.0,
            falloff: FalloffParams::default(),
        }
    }
}

impl TransformParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// A plain `scale` sets both axes; `scale_x`/`scale_y` override it.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        let uniform = param_f64(params, "scale", d.scale_x);
        Self {
            translate_x: param_f64(params, "translate_x", d.translate_x),
            translate_y: param_f64(params, "translate_y", d.translate_y),
            rotate: param_f64(params, "rotate", d.rotate),
            scale_x: param_f64(params, "scale_x", uniform),
            scale_y: param_f64(params, "scale_y", uniform),
            center_x: param_f64(params, "center_x", d.center_x),
            center_y: param_f64(params, "center_y", d.center_y),
            falloff: FalloffParams::from_json(params),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translate_x == 0.0
            && self.translate_y == 0.0
            && self.rotate == 0.0
            && self.scale_x == 1.0
            && self.scale_y == 1.0
    }
}

/// Moves, rotates and scales geometry about a pivot.
pub struct Transform;

impl Module for Transform {
    fn name(&self) -> &'static str {
        "transform"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Modifier
    }

    fn execute(&self, params: &Value, input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = TransformParams::from_json(params);
        if p.is_identity() {
            return input.to_vec();
        }
        let canvas = *ctx.canvas();
        let pivot = DVec2::from(canvas.pct_point(p.center_x, p.center_y));
        let scale = DVec2::new(p.scale_x, p.scale_y);
        let rotor = DVec2::from_angle(p.rotate.to_radians());
        let offset = DVec2::new(p.translate_x, p.translate_y);
        let apply = |q: Point| {
            let local = (DVec2::from(q) - pivot) * scale;
            let local = if p.rotate == 0.0 { local } else { rotor.rotate(local) };
            Point::from(pivot + local + offset)
        };
        linework_core::geometry::map_layers(input, |path| {
            path.map_points(|point| apply_with_falloff(point, &p.falloff, &canvas, apply))
        })
    }
}
