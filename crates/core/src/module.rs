//! The `Module` trait every generator and modifier implements.
//!
//! Generators and modifiers share one trait and differ only by the
//! [`ModuleRole`] discriminant they report. The trait is object-safe so the
//! registry can hold units as `dyn Module`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ExecutionContext;
use crate::geometry::Layer;

/// Whether a unit synthesizes geometry or transforms its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleRole {
    /// Ignores input layers and returns new ones.
    Generator,
    /// Returns a transformation of its input layers.
    Modifier,
}

/// A named auxiliary input a unit reads from the context (e.g. `stamp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSlot {
    pub name: &'static str,
    pub required: bool,
}

/// A pipeline unit: `(params, input layers, context) -> output layers`.
///
/// `execute` must be deterministic for fixed params, input and rng state, and
/// must not fail: degenerate input passes through and a unit with nothing to
/// produce returns empty layers. The only side effect allowed is advancing
/// the context's rng.
pub trait Module {
    /// Registry name, e.g. `"concentric_circles"`.
    fn name(&self) -> &'static str;

    fn role(&self) -> ModuleRole;

    /// Auxiliary inputs this unit reads. None by default.
    fn inputs(&self) -> &'static [InputSlot] {
        &[]
    }

    /// Runs the unit. `params` is a resolved JSON object.
    fn execute(&self, params: &Value, input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CanvasSettings;
    use crate::geometry::{Path, Point};
    use serde_json::json;

    /// Emits one dot per call at a random position.
    struct RandomDot;

    impl Module for RandomDot {
        fn name(&self) -> &'static str {
            "random_dot"
        }

        fn role(&self) -> ModuleRole {
            ModuleRole::Generator
        }

        fn execute(&self, _: &Value, _: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
            let x = ctx.rng().next_f64() * ctx.canvas().width;
            let y = ctx.rng().next_f64() * ctx.canvas().height;
            let p = Point::new(x, y);
            vec![Layer::new("dots", vec![Path::open(vec![p, p])])]
        }
    }

    /// Shifts every point right by `dx`.
    struct Shift;

    impl Module for Shift {
        fn name(&self) -> &'static str {
            "shift"
        }

        fn role(&self) -> ModuleRole {
            ModuleRole::Modifier
        }

        fn inputs(&self) -> &'static [InputSlot] {
            &[InputSlot {
                name: "unused",
                required: false,
            }]
        }

        fn execute(&self, params: &Value, input: &[Layer], _: &mut ExecutionContext) -> Vec<Layer> {
            let dx = params["dx"].as_f64().unwrap_or(0.0);
            crate::geometry::map_layers(input, |p| p.map_points(|q| Point::new(q.x + dx, q.y)))
        }
    }

    #[test]
    fn module_trait_is_object_safe() {
        let units: Vec<Box<dyn Module>> = vec![Box::new(RandomDot), Box::new(Shift)];
        let roles: Vec<ModuleRole> = units.iter().map(|u| u.role()).collect();
        assert_eq!(roles, [ModuleRole::Generator, ModuleRole::Modifier]);
    }

    #[test]
    fn default_inputs_is_empty() {
        assert!(RandomDot.inputs().is_empty());
        assert_eq!(Shift.inputs()[0].name, "unused");
    }

    #[test]
    fn same_seed_same_output() {
        let canvas = CanvasSettings::new(100.0, 100.0);
        let mut a = ExecutionContext::new(canvas, 4);
        let mut b = ExecutionContext::new(canvas, 4);
        assert_eq!(
            RandomDot.execute(&json!({}), &[], &mut a),
            RandomDot.execute(&json!({}), &[], &mut b)
        );
    }

    #[test]
    fn modifier_does_not_touch_its_input() {
        let mut ctx = ExecutionContext::new(CanvasSettings::new(100.0, 100.0), 4);
        let input = RandomDot.execute(&json!({}), &[], &mut ctx);
        let snapshot = input.clone();
        let out = Shift.execute(&json!({"dx": 5.0}), &input, &mut ctx);
        assert_eq!(input, snapshot);
        assert_eq!(out[0].id, "dots");
        assert_eq!(out[0].paths[0].points[0].x, input[0].paths[0].points[0].x + 5.0);
    }

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(serde_json::to_value(ModuleRole::Generator).unwrap(), json!("generator"));
    }
}
