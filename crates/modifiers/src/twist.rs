//! Radial twist modifier.

use linework_core::falloff::FalloffParams;
use linework_core::module::{Module, ModuleRole};
use linework_core::params::{param_enum, param_f64};
use linework_core::twist::{twist_path, TwistOptions};
use linework_core::{CanvasSettings, Easing, ExecutionContext, Layer};
use serde_json::Value;

/// Parameters for [`Twist`].
///
/// The center is in percent of the canvas; radii are in canvas units and
/// the twist amount is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwistParams {
    pub center_x: f64,
    pub center_y: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub twist_amount: f64,
    pub profile: Easing,
    pub ripple_amplitude: f64,
    pub ripple_frequency: f64,
    pub falloff: FalloffParams,
}

impl Default for TwistParams {
    fn default() -> Self {
        Self {
            center_x: 50.0,
            center_y: 50.0,
            inner_radius: 0.0,
            outer_radius: 300.0,
            twist_amount: 90.0,
            profile: Easing::Linear,
            ripple_amplitude: 0.0,
            ripple_frequency: 6.0,
            falloff: FalloffParams::default(),
        }
    }
}

impl TwistParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            center_x: param_f64(params, "center_x", d.center_x),
            center_y: param_f64(params, "center_y", d.center_y),
            inner_radius: param_f64(params, "inner_radius", d.inner_radius),
            outer_radius: param_f64(params, "outer_radius", d.outer_radius),
            twist_amount: param_f64(params, "twist_amount", d.twist_amount),
            profile: param_enum(params, "profile", d.profile),
            ripple_amplitude: param_f64(params, "ripple_amplitude", d.ripple_amplitude),
            ripple_frequency: param_f64(params, "ripple_frequency", d.ripple_frequency),
            falloff: FalloffParams::from_json(params),
        }
    }

    /// Resolves percentages and degrees into a [`TwistOptions`].
    pub fn options(&self, canvas: &CanvasSettings) -> TwistOptions {
        TwistOptions {
            center: canvas.pct_point(self.center_x, self.center_y),
            inner_radius: self.inner_radius,
            outer_radius: self.outer_radius,
            twist_amount: self.twist_amount.to_radians(),
            profile: self.profile,
            ripple_amplitude: self.ripple_amplitude,
            ripple_frequency: self.ripple_frequency,
        }
    }
}

/// Rotates points about a center by an angle that grows with radius.
pub struct Twist;

impl Module for Twist {
    fn name(&self) -> &'static str {
        "twist"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Modifier
    }

    fn execute(&self, params: &Value, input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = TwistParams::from_json(params);
        let canvas = *ctx.canvas();
        let options = p.options(&canvas);
        linework_core::geometry::map_layers(input, |path| {
            twist_path(path, &options, &p.falloff, &canvas)
        })
    }
}
