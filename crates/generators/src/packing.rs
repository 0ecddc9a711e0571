//! Circle packing generator.

use linework_core::module::{Module, ModuleRole};
use linework_core::packing::{pack_circles, PackingOptions};
use linework_core::params::{param_f64, param_u64, param_usize};
use linework_core::primitives::circle_path;
use linework_core::{ExecutionContext, Layer, Xorshift64};
use serde_json::Value;

/// Parameters for [`CirclePacking`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePackingParams {
    pub count: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    pub padding: f64,
    pub max_attempts: usize,
    pub segments: usize,
    /// Margin on every side, in percent of the smaller canvas dimension.
    pub margin: f64,
    pub seed: u64,
}

impl Default for CirclePackingParams {
    fn default() -> Self {
        Self {
            count: 100,
            min_radius: 5.0,
            max_radius: 40.0,
            padding: 2.0,
            max_attempts: 5000,
            segments: 48,
            margin: 5.0,
            seed: 1,
        }
    }
}

impl CirclePackingParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            count: param_usize(params, "count", d.count),
            min_radius: param_f64(params, "min_radius", d.min_radius),
            max_radius: param_f64(params, "max_radius", d.max_radius),
            padding: param_f64(params, "padding", d.padding),
            max_attempts: param_usize(params, "max_attempts", d.max_attempts),
            segments: param_usize(params, "segments", d.segments),
            margin: param_f64(params, "margin", d.margin),
            seed: param_u64(params, "seed", d.seed),
        }
    }
}

/// Packs non-overlapping circles into the canvas.
///
/// Uses a private rng seeded from the `seed` parameter, so changing this
/// unit's seed leaves every other unit's randomness alone.
pub struct CirclePacking;

impl Module for CirclePacking {
    fn name(&self) -> &'static str {
        "circle_packing"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Generator
    }

    fn execute(&self, params: &Value, _input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = CirclePackingParams::from_json(params);
        let canvas = ctx.canvas();
        let options = PackingOptions {
            count: p.count,
            min_radius: p.min_radius,
            max_radius: p.max_radius,
            padding: p.padding,
            max_attempts: p.max_attempts,
            bounds: canvas.bounds().inset(canvas.pct_min(p.margin)),
        };
        let mut rng = Xorshift64::new(p.seed);
        let packing = pack_circles(&mut rng, &options);
        let paths = packing
            .circles
            .iter()
            .map(|c| circle_path(c.center, c.radius, p.segments))
            .collect();
        vec![Layer::new("circles", paths)]
    }
}
