//! Easing curves shared by falloff and twist profiles.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::params::normalize_option;

/// A monotone remapping of [0, 1].
///
/// Every curve except [`Easing::Center`] maps 0 to 0 and 1 to 1 exactly.
/// `Center` is the inverse profile, strongest at t = 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Smooth,
    Center,
}

impl Easing {
    /// Evaluates the curve at `t`, clamped to [0, 1] first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Smooth => t * t * (3.0 - 2.0 * t),
            Easing::Center => 1.0 - t,
        }
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_option(s).as_str() {
            "linear" => Ok(Easing::Linear),
            "easein" | "in" | "quadratic" => Ok(Easing::EaseIn),
            "easeout" | "out" => Ok(Easing::EaseOut),
            "easeinout" | "inout" => Ok(Easing::EaseInOut),
            "smooth" | "smoothstep" => Ok(Easing::Smooth),
            "center" | "centerweighted" | "inverse" => Ok(Easing::Center),
            _ => Err(format!("unknown easing: {s}")),
        }
    }
}
