#![deny(unsafe_code)]
//! Modifier units: clip, smooth, subdivide, twist, jitter, noise displacement
//! and affine transform.
//!
//! Every modifier preserves layer ids and order. Falloff-aware modifiers read
//! the shared `falloff_*` parameter keys.

pub mod clip;
pub mod jitter;
pub mod noise;
pub mod smooth;
pub mod subdivide;
pub mod transform;
pub mod twist;

pub use clip::ClipRectangle;
pub use jitter::Jitter;
pub use noise::NoiseDisplace;
pub use smooth::Smooth;
pub use subdivide::Subdivide;
pub use transform::Transform;
pub use twist::Twist;
