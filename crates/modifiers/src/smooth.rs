//! Chaikin smoothing modifier.

use linework_core::falloff::FalloffParams;
use linework_core::module::{Module, ModuleRole};
use linework_core::params::{param_bool, param_usize};
use linework_core::smooth::{chaikin_with_falloff, ChaikinOptions};
use linework_core::{ExecutionContext, Layer};
use serde_json::Value;

/// Parameters for [`Smooth`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothParams {
    pub chaikin: ChaikinOptions,
    pub falloff: FalloffParams,
}

impl SmoothParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = ChaikinOptions::default();
        Self {
            chaikin: ChaikinOptions {
                iterations: param_usize(params, "iterations", d.iterations),
                preserve_end_segments: param_bool(
                    params,
                    "preserve_end_segments",
                    d.preserve_end_segments,
                ),
            },
            falloff: FalloffParams::from_json(params),
        }
    }
}

/// Rounds corners by repeated corner cutting.
pub struct Smooth;

impl Module for Smooth {
    fn name(&self) -> &'static str {
        "smooth"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Modifier
    }

    fn execute(&self, params: &Value, input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = SmoothParams::from_json(params);
        let canvas = *ctx.canvas();
        linework_core::geometry::map_layers(input, |path| {
            chaikin_with_falloff(path, p.chaikin, &p.falloff, &canvas)
        })
    }
}
