#![deny(unsafe_code)]
//! Generator units for linework.
//!
//! Every generator ignores its input layers and builds new ones from its
//! parameters and the execution context.

pub mod concentric;
pub mod grid;
pub mod lines;
pub mod packing;
pub mod polygon;
pub mod spiral;
pub mod spray;

pub use concentric::ConcentricCircles;
pub use grid::Grid;
pub use lines::Lines;
pub use packing::CirclePacking;
pub use polygon::Polygon;
pub use spiral::Spiral;
pub use spray::Spray;
