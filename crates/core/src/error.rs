//! Error types for linework.
//!
//! Units never fail: degenerate geometry and out-of-range numbers are handled
//! inside the algorithms. These errors belong to the orchestration boundary
//! (resolving module names, wiring inputs, exporting).

use thiserror::Error;

/// Errors produced while building, running, or exporting a pipeline.
#[derive(Debug, Error)]
pub enum LineworkError {
    /// Canvas width or height was zero, negative, or not finite.
    #[error("invalid canvas dimensions: width and height must be positive and finite, got {width} x {height}")]
    InvalidCanvas { width: f64, height: f64 },

    /// No module is registered under the given name.
    #[error("unknown module: {0}")]
    UnknownModule(String),

    /// A pipeline has no steps.
    #[error("pipeline has no steps")]
    EmptyPipeline,

    /// The first step of a pipeline must be a generator.
    #[error("first pipeline step must be a generator, got modifier '{0}'")]
    FirstStepNotGenerator(String),

    /// A step wired an auxiliary input slot the module does not declare.
    #[error("module '{module}' has no input slot named '{slot}'")]
    UnknownInputSlot { module: String, slot: String },

    /// A step referenced the output of a step that has not run before it.
    #[error("step {step} input '{slot}' refers to step {source_step}, which does not run before it")]
    InvalidInputSource {
        step: usize,
        slot: String,
        source_step: usize,
    },

    /// A required auxiliary input slot was left unwired.
    #[error("module '{module}' requires input '{slot}'")]
    MissingInput { module: String, slot: String },

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// Writing an export failed.
    #[error("i/o error: {0}")]
    Io(String),
}
