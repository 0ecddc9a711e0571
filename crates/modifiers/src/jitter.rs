//! Random per-point displacement.

use linework_core::falloff::{blend_point, calculate_falloff, FalloffParams};
use linework_core::module::{Module, ModuleRole};
use linework_core::params::param_f64;
use linework_core::{ExecutionContext, Layer, Path, Point, Xorshift64};
use serde_json::Value;

/// Draws consumed per input point: x offset, y offset.
pub const DRAWS_PER_POINT: usize = 2;

/// Parameters for [`Jitter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterParams {
    /// Maximum offset along each axis, in canvas units.
    pub amount: f64,
    /// Private seed. Without one the shared pipeline rng is used.
    pub seed: Option<u64>,
    pub falloff: FalloffParams,
}

impl Default for JitterParams {
    fn default() -> Self {
        Self {
            amount: 2.0,
            seed: None,
            falloff: FalloffParams::default(),
        }
    }
}

impl JitterParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            amount: param_f64(params, "amount", d.amount),
            seed: params.get("seed").and_then(Value::as_u64),
            falloff: FalloffParams::from_json(params),
        }
    }
}

/// Offsets every point by a uniform random vector in `[-amount, amount)^2`.
///
/// [`DRAWS_PER_POINT`] values are taken per input point whether or not the
/// falloff lets the offset through, so the stream position depends only on
/// the point count. A closed path's closing point moves with its first
/// vertex.
pub struct Jitter;

impl Module for Jitter {
    fn name(&self) -> &'static str {
        "jitter"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Modifier
    }

    fn execute(&self, params: &Value, input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = JitterParams::from_json(params);
        let canvas = *ctx.canvas();
        let mut private = p.seed.map(Xorshift64::new);
        let rng = match private.as_mut() {
            Some(rng) => rng,
            None => ctx.rng(),
        };
        linework_core::geometry::map_layers(input, |path| {
            let mut jitter = |point: Point| {
                let dx = rng.next_range(-p.amount, p.amount);
                let dy = rng.next_range(-p.amount, p.amount);
                let moved = Point::new(point.x + dx, point.y + dy);
                blend_point(point, moved, calculate_falloff(point, &p.falloff, &canvas))
            };
            if !path.has_closing_point() {
                return path.map_points(jitter);
            }
            // the closing point follows the first vertex; its two draws are skipped
            let ring: Vec<Point> = path.ring().iter().map(|&q| jitter(q)).collect();
            rng.discard(DRAWS_PER_POINT);
            Path::from_ring(ring, true, true)
        })
    }
}
