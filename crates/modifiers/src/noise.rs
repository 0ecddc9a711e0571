//! Coherent-noise displacement.
//!
//! Each point is pushed by a 2D vector read from a seeded noise field. The
//! two components come from the same field sampled at offset coordinates,
//! except for curl noise, which differentiates a single scalar field and so
//! produces swirling, roughly divergence-free flow.

use std::str::FromStr;

use linework_core::falloff::{apply_with_falloff, FalloffParams};
use linework_core::module::{Module, ModuleRole};
use linework_core::params::{normalize_option, param_enum, param_f64, param_u64};
use linework_core::{ExecutionContext, Layer, Point};
use noise::{NoiseFn, OpenSimplex, Perlin};
use serde_json::Value;

/// Sample-space offset between the x and y components.
const COMPONENT_OFFSET: f64 = 100.0;

/// Finite-difference step for curl noise, in sample space.
const CURL_EPS: f64 = 1e-3;

/// Which noise function drives the displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoiseKind {
    #[default]
    Perlin,
    Simplex,
    Curl,
}

impl FromStr for NoiseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_option(s).as_str() {
            "perlin" => Ok(NoiseKind::Perlin),
            "simplex" | "opensimplex" => Ok(NoiseKind::Simplex),
            "curl" => Ok(NoiseKind::Curl),
            _ => Err(format!("unknown noise kind: {s}")),
        }
    }
}

/// A deterministic 2D displacement field.
pub trait DisplacementField {
    /// Displacement `(dx, dy)` at canvas position `(x, y)`.
    fn sample(&self, x: f64, y: f64) -> (f64, f64);
}

/// Two offset samples of one gradient-noise function.
pub struct OffsetNoiseField<N> {
    noise: N,
    scale: f64,
    strength: f64,
}

impl<N: NoiseFn<f64, 2>> DisplacementField for OffsetNoiseField<N> {
    fn sample(&self, x: f64, y: f64) -> (f64, f64) {
        let sx = x * self.scale;
        let sy = y * self.scale;
        let dx = self.noise.get([sx, sy]) * self.strength;
        let dy = self.noise.get([sx + COMPONENT_OFFSET, sy + COMPONENT_OFFSET]) * self.strength;
        (dx, dy)
    }
}

/// Curl of a scalar Perlin field.
pub struct CurlNoiseField {
    noise: Perlin,
    scale: f64,
    strength: f64,
}

impl DisplacementField for CurlNoiseField {
    fn sample(&self, x: f64, y: f64) -> (f64, f64) {
        let sx = x * self.scale;
        let sy = y * self.scale;
        let e = CURL_EPS;
        // curl of F: (dF/dy, -dF/dx)
        let df_dy = (self.noise.get([sx, sy + e]) - self.noise.get([sx, sy - e])) / (2.0 * e);
        let df_dx = (self.noise.get([sx + e, sy]) - self.noise.get([sx - e, sy])) / (2.0 * e);
        (df_dy * self.strength, -df_dx * self.strength)
    }
}

/// Parameters for [`NoiseDisplace`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseDisplaceParams {
    pub kind: NoiseKind,
    /// Frequency: canvas units are multiplied by this before sampling.
    pub scale: f64,
    /// Maximum displacement in canvas units (for the offset kinds).
    pub strength: f64,
    pub seed: u64,
    pub falloff: FalloffParams,
}

impl Default for NoiseDisplaceParams {
    fn default() -> Self {
        Self {
            kind: NoiseKind::Perlin,
            scale: 0.01,
            strength: 10.0,
            seed: 0,
            falloff: FalloffParams::default(),
        }
    }
}

impl NoiseDisplaceParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            kind: param_enum(params, "kind", d.kind),
            scale: param_f64(params, "scale", d.scale),
            strength: param_f64(params, "strength", d.strength),
            seed: param_u64(params, "seed", d.seed),
            falloff: FalloffParams::from_json(params),
        }
    }

    /// Builds the configured field. Noise seeds are 32-bit; higher bits are
    /// dropped.
    pub fn field(&self) -> Box<dyn DisplacementField> {
        let seed = self.seed as u32;
        match self.kind {
            NoiseKind::Perlin => Box::new(OffsetNoiseField {
                noise: Perlin::new(seed),
                scale: self.scale,
                strength: self.strength,
            }),
            NoiseKind::Simplex => Box::new(OffsetNoiseField {
                noise: OpenSimplex::new(seed),
                scale: self.scale,
                strength: self.strength,
            }),
            NoiseKind::Curl => Box::new(CurlNoiseField {
                noise: Perlin::new(seed),
                scale: self.scale,
                strength: self.strength,
            }),
        }
    }
}

/// Displaces points along a seeded noise field. Does not touch the pipeline
/// rng.
pub struct NoiseDisplace;

impl Module for NoiseDisplace {
    fn name(&self) -> &'static str {
        "noise_displace"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Modifier
    }

    fn execute(&self, params: &Value, input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = NoiseDisplaceParams::from_json(params);
        let canvas = *ctx.canvas();
        let field = p.field();
        linework_core::geometry::map_layers(input, |path| {
            path.map_points(|point| {
                apply_with_falloff(point, &p.falloff, &canvas, |q| {
                    let (dx, dy) = field.sample(q.x, q.y);
                    Point::new(q.x + dx, q.y + dy)
                })
            })
        })
    }
}
