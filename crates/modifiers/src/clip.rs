//! Clip every path to a rectangle.

use linework_core::module::{Module, ModuleRole};
use linework_core::params::param_f64;
use linework_core::primitives::clip_path_to_rect;
use linework_core::{Bounds, CanvasSettings, ExecutionContext, Layer};
use serde_json::Value;

/// Parameters for [`ClipRectangle`], all in percent of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRectangleParams {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ClipRectangleParams {
    fn default() -> Self {
        Self {
            x: 10.0,
            y: 10.0,
            width: 80.0,
            height: 80.0,
        }
    }
}

impl ClipRectangleParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            x: param_f64(params, "x", d.x),
            y: param_f64(params, "y", d.y),
            width: param_f64(params, "width", d.width),
            height: param_f64(params, "height", d.height),
        }
    }

    /// The clip rectangle in canvas units.
    pub fn bounds(&self, canvas: &CanvasSettings) -> Bounds {
        Bounds::from_rect(
            canvas.pct_x(self.x),
            canvas.pct_y(self.y),
            canvas.pct_x(self.width),
            canvas.pct_y(self.height),
        )
    }
}

/// Keeps only the parts of each path inside the rectangle.
///
/// Layers are preserved even when every path is clipped away.
pub struct ClipRectangle;

impl Module for ClipRectangle {
    fn name(&self) -> &'static str {
        "clip_rectangle"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Modifier
    }

    fn execute(&self, params: &Value, input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let rect = ClipRectangleParams::from_json(params).bounds(ctx.canvas());
        input
            .iter()
            .map(|layer| layer.flat_map_paths(|path| clip_path_to_rect(path, &rect)))
            .collect()
    }
}
