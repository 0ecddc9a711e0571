//! Spray-can dots scattered inside a disc.

use std::f64::consts::TAU;

use linework_core::module::{Module, ModuleRole};
use linework_core::params::{param_bool, param_f64, param_usize};
use linework_core::primitives::{circle_path, polar};
use linework_core::{ExecutionContext, Layer};
use serde_json::Value;

/// Draws consumed per dot: angle, distance, size variation.
pub const DRAWS_PER_DOT: usize = 3;

/// Segments of each dot outline.
const DOT_SEGMENTS: usize = 6;

/// Parameters for [`Spray`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SprayParams {
    pub count: usize,
    pub center_x: f64,
    pub center_y: f64,
    /// Spray radius, in percent of the smaller canvas dimension.
    pub radius: f64,
    pub dot_size: f64,
    /// Randomize each dot's size between half and full `dot_size`.
    pub vary_size: bool,
}

impl Default for SprayParams {
    fn default() -> Self {
        Self {
            count: 200,
            center_x: 50.0,
            center_y: 50.0,
            radius: 30.0,
            dot_size: 2.0,
            vary_size: false,
        }
    }
}

impl SprayParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            count: param_usize(params, "count", d.count),
            center_x: param_f64(params, "center_x", d.center_x),
            center_y: param_f64(params, "center_y", d.center_y),
            radius: param_f64(params, "radius", d.radius),
            dot_size: param_f64(params, "dot_size", d.dot_size),
            vary_size: param_bool(params, "vary_size", d.vary_size),
        }
    }
}

/// Scatters small closed dots uniformly over a disc.
///
/// Draws from the shared pipeline rng. Every dot consumes exactly
/// [`DRAWS_PER_DOT`] values whether or not size variation is on, so toggling
/// `vary_size` does not shift the positions of later dots or later units.
pub struct Spray;

impl Module for Spray {
    fn name(&self) -> &'static str {
        "spray"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Generator
    }

    fn execute(&self, params: &Value, _input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = SprayParams::from_json(params);
        let center = ctx.canvas().pct_point(p.center_x, p.center_y);
        let radius = ctx.canvas().pct_min(p.radius);
        let rng = ctx.rng();
        let paths = (0..p.count)
            .map(|_| {
                let angle = rng.next_f64() * TAU;
                let distance = radius * rng.next_f64().sqrt();
                let variation = rng.next_f64();
                let size = if p.vary_size {
                    p.dot_size * (0.5 + 0.5 * variation)
                } else {
                    p.dot_size
                };
                circle_path(polar(center, distance, angle), size * 0.5, DOT_SEGMENTS)
            })
            .collect();
        vec![Layer::new("spray", paths)]
    }
}
