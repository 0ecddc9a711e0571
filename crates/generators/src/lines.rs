//! Parallel straight lines across the canvas.

use std::str::FromStr;

use linework_core::module::{Module, ModuleRole};
use linework_core::params::{normalize_option, param_bool, param_enum, param_f64, param_usize};
use linework_core::primitives::line_path;
use linework_core::{CanvasSettings, ExecutionContext, Layer, Path, Point};
use serde_json::Value;

/// Direction the lines run in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_option(s).as_str() {
            "horizontal" | "h" | "rows" => Ok(Orientation::Horizontal),
            "vertical" | "v" | "columns" => Ok(Orientation::Vertical),
            _ => Err(format!("unknown orientation: {s}")),
        }
    }
}

/// Parameters for [`Lines`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinesParams {
    pub count: usize,
    /// Margin on every side, in percent of the canvas dimension.
    pub margin: f64,
    pub orientation: Orientation,
    /// Edges per line; more edges give later modifiers points to work with.
    pub segments: usize,
    /// One `line` layer per line instead of a single `lines` layer.
    pub multi_layer: bool,
}

impl Default for LinesParams {
    fn default() -> Self {
        Self {
            count: 10,
            margin: 10.0,
            orientation: Orientation::Horizontal,
            segments: 1,
            multi_layer: false,
        }
    }
}

impl LinesParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            count: param_usize(params, "count", d.count),
            margin: param_f64(params, "margin", d.margin),
            orientation: param_enum(params, "orientation", d.orientation),
            segments: param_usize(params, "segments", d.segments),
            multi_layer: param_bool(params, "multi_layer", d.multi_layer),
        }
    }

    fn paths(&self, canvas: &CanvasSettings) -> Vec<Path> {
        let (x0, x1) = (canvas.pct_x(self.margin), canvas.pct_x(100.0 - self.margin));
        let (y0, y1) = (canvas.pct_y(self.margin), canvas.pct_y(100.0 - self.margin));
        (0..self.count)
            .map(|i| {
                let t = if self.count > 1 {
                    i as f64 / (self.count - 1) as f64
                } else {
                    0.5
                };
                match self.orientation {
                    Orientation::Horizontal => {
                        let y = y0 + (y1 - y0) * t;
                        line_path(Point::new(x0, y), Point::new(x1, y), self.segments)
                    }
                    Orientation::Vertical => {
                        let x = x0 + (x1 - x0) * t;
                        line_path(Point::new(x, y0), Point::new(x, y1), self.segments)
                    }
                }
            })
            .collect()
    }
}

/// Emits evenly spaced parallel lines inside a margin.
pub struct Lines;

impl Module for Lines {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Generator
    }

    fn execute(&self, params: &Value, _input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = LinesParams::from_json(params);
        let paths = p.paths(ctx.canvas());
        if p.multi_layer {
            paths
                .into_iter()
                .map(|path| Layer::new("line", vec![path]))
                .collect()
        } else {
            vec![Layer::new("lines", paths)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(params: Value) -> Vec<Layer> {
        let mut ctx = ExecutionContext::new(CanvasSettings::new(200.0, 100.0), 1);
        Lines.execute(&params, &[], &mut ctx)
    }

    #[test]
    fn horizontal_lines_span_margins() {
        let layers = run(json!({"count": 3, "margin": 10}));
        let paths = &layers[0].paths;
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0].points, vec![Point::new(20.0, 10.0), Point::new(180.0, 10.0)]);
        assert_eq!(paths[2].points[0].y, 90.0);
        assert!(paths.iter().all(|p| !p.closed));
    }

    #[test]
    fn vertical_lines_run_top_to_bottom() {
        let layers = run(json!({"count": 2, "margin": 0, "orientation": "vertical", "segments": 4}));
        let path = &layers[0].paths[1];
        assert_eq!(path.len(), 5);
        assert_eq!(path.points[0], Point::new(200.0, 0.0));
        assert_eq!(path.points[4], Point::new(200.0, 100.0));
    }

    #[test]
    fn single_line_is_centered() {
        let layers = run(json!({"count": 1, "margin": 0}));
        assert_eq!(layers[0].paths[0].points[0].y, 50.0);
    }

    #[test]
    fn multi_layer_emits_one_layer_per_line() {
        let layers = run(json!({"count": 4, "multi_layer": true}));
        assert_eq!(layers.len(), 4);
        assert!(layers.iter().all(|l| l.id == "line" && l.paths.len() == 1));
    }

    #[test]
    fn orientation_parses() {
        assert_eq!("Vertical".parse::<Orientation>(), Ok(Orientation::Vertical));
        assert!("diagonal".parse::<Orientation>().is_err());
    }
}
