//! Canvas settings and the per-run execution context handed to every unit.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LineworkError;
use crate::geometry::{Bounds, Layer, Point};
use crate::prng::Xorshift64;

/// Canvas dimensions, in the same units as [`Point`] coordinates.
///
/// Percentage parameters resolve against these dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
}

impl CanvasSettings {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Rejects zero, negative or non-finite dimensions.
    pub fn validate(&self) -> Result<(), LineworkError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(LineworkError::InvalidCanvas {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Resolves a horizontal percentage to an x coordinate.
    pub fn pct_x(&self, pct: f64) -> f64 {
        self.width * pct / 100.0
    }

    /// Resolves a vertical percentage to a y coordinate.
    pub fn pct_y(&self, pct: f64) -> f64 {
        self.height * pct / 100.0
    }

    /// Resolves a point given in percent of the canvas.
    pub fn pct_point(&self, x_pct: f64, y_pct: f64) -> Point {
        Point::new(self.pct_x(x_pct), self.pct_y(y_pct))
    }

    /// Resolves a length given in percent of the smaller dimension.
    pub fn pct_min(&self, pct: f64) -> f64 {
        self.min_dimension() * pct / 100.0
    }

    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_rect(0.0, 0.0, self.width, self.height)
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Everything a unit may read besides its parameters and input layers.
///
/// The only mutable part is the shared random stream. Independent runs must
/// use independent contexts.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    canvas: CanvasSettings,
    rng: Xorshift64,
    inputs: HashMap<String, Vec<Layer>>,
}

impl ExecutionContext {
    /// Creates a context with a pipeline-wide rng seeded from `seed`.
    pub fn new(canvas: CanvasSettings, seed: u64) -> Self {
        Self {
            canvas,
            rng: Xorshift64::new(seed),
            inputs: HashMap::new(),
        }
    }

    /// Returns the context with `layers` bound to the auxiliary slot `name`.
    pub fn with_input(mut self, name: impl Into<String>, layers: Vec<Layer>) -> Self {
        self.inputs.insert(name.into(), layers);
        self
    }

    pub fn canvas(&self) -> &CanvasSettings {
        &self.canvas
    }

    /// The shared random stream.
    pub fn rng(&mut self) -> &mut Xorshift64 {
        &mut self.rng
    }

    /// Layers bound to auxiliary slot `name`, if the orchestrator wired one.
    pub fn input(&self, name: &str) -> Option<&[Layer]> {
        self.inputs.get(name).map(Vec::as_slice)
    }

    /// Replaces the auxiliary bindings. Called by the orchestrator between units.
    pub fn set_inputs(&mut self, inputs: HashMap<String, Vec<Layer>>) {
        self.inputs = inputs;
    }
}
