//! Reproducible description of a line-art piece.
//!
//! A [`PipelineSpec`] captures everything needed to recreate a drawing:
//! canvas, pipeline seed, and the ordered steps with their parameters and
//! auxiliary-input wiring.

use std::collections::BTreeMap;

use linework_core::CanvasSettings;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A whole pipeline. Two identical specs produce identical layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineSpec {
    #[serde(default)]
    pub canvas: CanvasSettings,
    #[serde(default)]
    pub seed: u64,
    pub steps: Vec<StepSpec>,
}

/// One unit invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepSpec {
    /// Registry name of the unit.
    pub module: String,
    #[serde(default = "empty_params")]
    pub params: Value,
    /// Auxiliary slot name to the index of the earlier step feeding it.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub inputs: BTreeMap<String, usize>,
    /// Output only feeds other steps and never reaches the drawing.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

fn empty_params() -> Value {
    Value::Object(serde_json::Map::new())
}

impl PipelineSpec {
    /// An empty pipeline on `canvas`.
    pub fn new(canvas: CanvasSettings, seed: u64) -> Self {
        Self {
            canvas,
            seed,
            steps: Vec::new(),
        }
    }

    /// Appends a step.
    pub fn step(mut self, step: StepSpec) -> Self {
        self.steps.push(step);
        self
    }
}

impl StepSpec {
    /// A step with empty params and no wiring.
    pub fn new(module: &str) -> Self {
        Self {
            module: module.to_string(),
            params: empty_params(),
            inputs: BTreeMap::new(),
            hidden: false,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }

    /// Feeds auxiliary slot `slot` from the output of step `source`.
    pub fn with_input(mut self, slot: &str, source: usize) -> Self {
        self.inputs.insert(slot.to_string(), source);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}
