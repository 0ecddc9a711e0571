#![deny(unsafe_code)]
//! Module registry, pipeline orchestration and SVG export.
//!
//! This crate sits between `linework-core` (which defines the `Module` trait)
//! and the generator and modifier crates. The CLI depends on it so name
//! resolution and input wiring live in one place.

pub mod pipeline;
pub mod spec;

#[cfg(feature = "svg")]
pub mod svg;

use linework_core::module::{InputSlot, Module, ModuleRole};
use linework_core::{ExecutionContext, Layer, LineworkError};
use linework_generators::{CirclePacking, ConcentricCircles, Grid, Lines, Polygon, Spiral, Spray};
use linework_modifiers::{ClipRectangle, Jitter, NoiseDisplace, Smooth, Subdivide, Transform, Twist};
use serde_json::Value;

pub use pipeline::Pipeline;
pub use spec::{PipelineSpec, StepSpec};

/// Every registered unit, generators first.
const MODULES: &[ModuleKind] = &[
    ModuleKind::ConcentricCircles,
    ModuleKind::Lines,
    ModuleKind::CirclePacking,
    ModuleKind::Spray,
    ModuleKind::Grid,
    ModuleKind::Spiral,
    ModuleKind::Polygon,
    ModuleKind::ClipRectangle,
    ModuleKind::Smooth,
    ModuleKind::Subdivide,
    ModuleKind::Twist,
    ModuleKind::Jitter,
    ModuleKind::NoiseDisplace,
    ModuleKind::Transform,
];

/// Enumeration of all available units.
///
/// Delegates the `Module` trait to the wrapped unit. Use
/// [`ModuleKind::from_name`] for string-based construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    ConcentricCircles,
    Lines,
    CirclePacking,
    Spray,
    Grid,
    Spiral,
    Polygon,
    ClipRectangle,
    Smooth,
    Subdivide,
    Twist,
    Jitter,
    NoiseDisplace,
    Transform,
}

impl ModuleKind {
    /// Looks a unit up by its registry name.
    ///
    /// Returns `LineworkError::UnknownModule` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, LineworkError> {
        MODULES
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| LineworkError::UnknownModule(name.to_string()))
    }

    /// All registered units.
    pub fn all() -> &'static [ModuleKind] {
        MODULES
    }

    /// Names and roles of all registered units.
    pub fn list_modules() -> Vec<(&'static str, ModuleRole)> {
        MODULES.iter().map(|kind| (kind.name(), kind.role())).collect()
    }

    /// The wrapped unit.
    pub fn module(&self) -> &'static dyn Module {
        match self {
            ModuleKind::ConcentricCircles => &ConcentricCircles,
            ModuleKind::Lines => &Lines,
            ModuleKind::CirclePacking => &CirclePacking,
            ModuleKind::Spray => &Spray,
            ModuleKind::Grid => &Grid,
            ModuleKind::Spiral => &Spiral,
            ModuleKind::Polygon => &Polygon,
            ModuleKind::ClipRectangle => &ClipRectangle,
            ModuleKind::Smooth => &Smooth,
            ModuleKind::Subdivide => &Subdivide,
            ModuleKind::Twist => &Twist,
            ModuleKind::Jitter => &Jitter,
            ModuleKind::NoiseDisplace => &NoiseDisplace,
            ModuleKind::Transform => &Transform,
        }
    }
}

impl Module for ModuleKind {
    fn name(&self) -> &'static str {
        self.module().name()
    }

    fn role(&self) -> ModuleRole {
        self.module().role()
    }

    fn inputs(&self) -> &'static [InputSlot] {
        self.module().inputs()
    }

    fn execute(&self, params: &Value, input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        self.module().execute(params, input, ctx)
    }
}
