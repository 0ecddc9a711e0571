#![deny(unsafe_code)]
//! Core types and algorithms for the linework procedural line-art engine.
//!
//! Provides the `Module` trait, the `Point`/`Path`/`Layer` data model,
//! `CanvasSettings` and `ExecutionContext`, the `Xorshift64` PRNG, the
//! falloff engine, geometry primitives, and the reusable algorithms
//! (Chaikin smoothing, subdivision, twist, circle packing, stamp placement).

pub mod context;
pub mod easing;
pub mod error;
pub mod falloff;
pub mod geometry;
pub mod module;
pub mod packing;
pub mod params;
pub mod primitives;
pub mod prng;
pub mod smooth;
pub mod stamp;
pub mod subdivide;
pub mod twist;

pub use context::{CanvasSettings, ExecutionContext};
pub use easing::Easing;
pub use error::LineworkError;
pub use falloff::{calculate_falloff, lerp_with_falloff, FalloffParams, FalloffShape};
pub use geometry::{Bounds, Layer, Path, Point};
pub use module::{InputSlot, Module, ModuleRole};
pub use prng::Xorshift64;
pub use stamp::Stamp;
