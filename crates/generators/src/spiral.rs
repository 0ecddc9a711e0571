//! Archimedean spiral.

use std::f64::consts::TAU;

use linework_core::module::{Module, ModuleRole};
use linework_core::params::{param_f64, param_usize};
use linework_core::primitives::polar;
use linework_core::{ExecutionContext, Layer, Path};
use serde_json::Value;

/// Parameters for [`Spiral`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralParams {
    pub turns: f64,
    pub points_per_turn: usize,
    pub start_radius: f64,
    pub end_radius: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            turns: 5.0,
            points_per_turn: 72,
            start_radius: 0.0,
            end_radius: 200.0,
            center_x: 50.0,
            center_y: 50.0,
        }
    }
}

impl SpiralParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            turns: param_f64(params, "turns", d.turns),
            points_per_turn: param_usize(params, "points_per_turn", d.points_per_turn),
            start_radius: param_f64(params, "start_radius", d.start_radius),
            end_radius: param_f64(params, "end_radius", d.end_radius),
            center_x: param_f64(params, "center_x", d.center_x),
            center_y: param_f64(params, "center_y", d.center_y),
        }
    }
}

/// One open spiral whose radius grows linearly with angle.
pub struct Spiral;

impl Module for Spiral {
    fn name(&self) -> &'static str {
        "spiral"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Generator
    }

    fn execute(&self, params: &Value, _input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = SpiralParams::from_json(params);
        let center = ctx.canvas().pct_point(p.center_x, p.center_y);
        let steps = (p.turns.max(0.0) * p.points_per_turn as f64).round() as usize;
        if steps == 0 {
            return vec![Layer::new("spiral", Vec::new())];
        }
        let points = (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                let radius = p.start_radius + (p.end_radius - p.start_radius) * t;
                polar(center, radius, TAU * p.turns * t)
            })
            .collect();
        vec![Layer::new("spiral", vec![Path::open(points)])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linework_core::{CanvasSettings, Point};
    use serde_json::json;

    fn run(params: Value) -> Vec<Layer> {
        let mut ctx = ExecutionContext::new(CanvasSettings::new(400.0, 400.0), 1);
        Spiral.execute(&params, &[], &mut ctx)
    }

    #[test]
    fn radius_grows_from_start_to_end() {
        let layers = run(json!({"turns": 2, "points_per_turn": 10, "start_radius": 10, "end_radius": 50}));
        let path = &layers[0].paths[0];
        let center = Point::new(200.0, 200.0);
        assert_eq!(path.len(), 21);
        assert!((path.points[0].distance(center) - 10.0).abs() < 1e-9);
        assert!((path.points[20].distance(center) - 50.0).abs() < 1e-9);
        let radii: Vec<f64> = path.points.iter().map(|p| p.distance(center)).collect();
        assert!(radii.windows(2).all(|w| w[1] >= w[0] - 1e-9));
    }

    #[test]
    fn zero_turns_is_empty() {
        let layers = run(json!({"turns": 0}));
        assert!(layers[0].paths.is_empty());
    }
}
