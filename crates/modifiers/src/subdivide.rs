//! Edge subdivision modifier.

use std::str::FromStr;

use linework_core::module::{Module, ModuleRole};
use linework_core::params::{normalize_option, param_enum, param_f64, param_usize};
use linework_core::subdivide::{subdivide, SubdivisionMode};
use linework_core::{ExecutionContext, Layer};
use serde_json::Value;

/// Which subdivision rule to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Uniform,
    Adaptive,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_option(s).as_str() {
            "uniform" | "fixed" => Ok(Mode::Uniform),
            "adaptive" | "length" => Ok(Mode::Adaptive),
            _ => Err(format!("unknown subdivision mode: {s}")),
        }
    }
}

/// Parameters for [`Subdivide`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubdivideParams {
    pub mode: Mode,
    pub divisions: usize,
    pub min_segment_length: f64,
    pub max_divisions: usize,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            mode: Mode::Uniform,
            divisions: 2,
            min_segment_length: 5.0,
            max_divisions: 16,
        }
    }
}

impl SubdivideParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            mode: param_enum(params, "mode", d.mode),
            divisions: param_usize(params, "divisions", d.divisions),
            min_segment_length: param_f64(params, "min_segment_length", d.min_segment_length),
            max_divisions: param_usize(params, "max_divisions", d.max_divisions),
        }
    }

    pub fn subdivision_mode(&self) -> SubdivisionMode {
        match self.mode {
            Mode::Uniform => SubdivisionMode::Uniform {
                divisions: self.divisions,
            },
            Mode::Adaptive => SubdivisionMode::Adaptive {
                min_segment_length: self.min_segment_length,
                max_divisions: self.max_divisions,
            },
        }
    }
}

/// Inserts evenly spaced points along every edge.
pub struct Subdivide;

impl Module for Subdivide {
    fn name(&self) -> &'static str {
        "subdivide"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Modifier
    }

    fn execute(&self, params: &Value, input: &[Layer], _ctx: &mut ExecutionContext) -> Vec<Layer> {
        let mode = SubdivideParams::from_json(params).subdivision_mode();
        linework_core::geometry::map_layers(input, |path| subdivide(path, mode))
    }
}
