//! Rectangular grid, optionally stamping a motif at every intersection.

use std::f64::consts::TAU;

use linework_core::module::{InputSlot, Module, ModuleRole};
use linework_core::params::{param_bool, param_f64, param_usize};
use linework_core::primitives::line_path;
use linework_core::{CanvasSettings, ExecutionContext, Layer, Path, Point, Stamp};
use serde_json::Value;

/// Auxiliary input holding the motif to stamp.
pub const STAMP_SLOT: &str = "stamp";

const INPUTS: &[InputSlot] = &[InputSlot {
    name: STAMP_SLOT,
    required: false,
}];

/// Parameters for [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    /// Number of cells across; there are `columns + 1` vertical lines.
    pub columns: usize,
    /// Number of cells down; there are `rows + 1` horizontal lines.
    pub rows: usize,
    /// Margin on every side, in percent of the canvas dimension.
    pub margin: f64,
    pub draw_lines: bool,
    pub stamp_scale: f64,
    /// Fixed stamp rotation in degrees.
    pub stamp_rotation: f64,
    /// Rotate every stamp by a random angle instead of `stamp_rotation`.
    pub random_rotation: bool,
    /// Emit one `column` layer of stamps per grid column.
    pub multi_layer: bool,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            columns: 8,
            rows: 8,
            margin: 10.0,
            draw_lines: true,
            stamp_scale: 1.0,
            stamp_rotation: 0.0,
            random_rotation: false,
            multi_layer: false,
        }
    }
}

impl GridParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            columns: param_usize(params, "columns", d.columns),
            rows: param_usize(params, "rows", d.rows),
            margin: param_f64(params, "margin", d.margin),
            draw_lines: param_bool(params, "draw_lines", d.draw_lines),
            stamp_scale: param_f64(params, "stamp_scale", d.stamp_scale),
            stamp_rotation: param_f64(params, "stamp_rotation", d.stamp_rotation),
            random_rotation: param_bool(params, "random_rotation", d.random_rotation),
            multi_layer: param_bool(params, "multi_layer", d.multi_layer),
        }
    }

    /// Intersection positions, column by column.
    pub fn intersections(&self, canvas: &CanvasSettings) -> Vec<Vec<Point>> {
        let (x0, x1) = (canvas.pct_x(self.margin), canvas.pct_x(100.0 - self.margin));
        let (y0, y1) = (canvas.pct_y(self.margin), canvas.pct_y(100.0 - self.margin));
        let cols = self.columns.max(1);
        let rows = self.rows.max(1);
        (0..=cols)
            .map(|c| {
                let x = x0 + (x1 - x0) * c as f64 / cols as f64;
                (0..=rows)
                    .map(|r| Point::new(x, y0 + (y1 - y0) * r as f64 / rows as f64))
                    .collect()
            })
            .collect()
    }
}

/// Grid lines plus a stamped motif at each intersection.
///
/// When stamping, every placement draws one value from the shared rng for its
/// rotation, used only if `random_rotation` is set.
pub struct Grid;

impl Module for Grid {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn role(&self) -> ModuleRole {
        ModuleRole::Generator
    }

    fn inputs(&self) -> &'static [InputSlot] {
        INPUTS
    }

    fn execute(&self, params: &Value, _input: &[Layer], ctx: &mut ExecutionContext) -> Vec<Layer> {
        let p = GridParams::from_json(params);
        let columns = p.intersections(ctx.canvas());
        let mut layers = Vec::new();

        if p.draw_lines {
            layers.push(Layer::new("grid", grid_lines(&columns)));
        }

        let stamp = ctx.input(STAMP_SLOT).and_then(Stamp::from_layers);
        let Some(stamp) = stamp else {
            if ctx.input(STAMP_SLOT).is_some() {
                tracing::debug!("grid stamp input holds no points, skipping placement");
            }
            return layers;
        };

        let fixed = p.stamp_rotation.to_radians();
        let mut stamped: Vec<Layer> = Vec::new();
        for column in &columns {
            let mut paths = Vec::new();
            for &target in column {
                let draw = ctx.rng().next_f64();
                let rotation = if p.random_rotation { draw * TAU } else { fixed };
                paths.extend(stamp.place(target, p.stamp_scale, rotation));
            }
            if p.multi_layer {
                stamped.push(Layer::new("column", paths));
            } else if let Some(layer) = stamped.last_mut() {
                layer.paths.extend(paths);
            } else {
                stamped.push(Layer::new("stamps", paths));
            }
        }
        layers.extend(stamped);
        layers
    }
}

/// Vertical lines through each column and horizontal lines through each row.
fn grid_lines(columns: &[Vec<Point>]) -> Vec<Path> {
    let (Some(first), Some(last)) = (columns.first(), columns.last()) else {
        return Vec::new();
    };
    let verticals = columns.iter().filter_map(|col| match (col.first(), col.last()) {
        (Some(&top), Some(&bottom)) => Some(line_path(top, bottom, 1)),
        _ => None,
    });
    let horizontals = first
        .iter()
        .zip(last.iter())
        .map(|(&left, &right)| line_path(left, right, 1));
    verticals.chain(horizontals).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn motif() -> Vec<Layer> {
        vec![Layer::new(
            "motif",
            vec![Path::open(vec![Point::new(-1.0, 0.0), Point::new(1.0, 0.0)])],
        )]
    }

    fn ctx() -> ExecutionContext {
        ExecutionContext::new(CanvasSettings::new(100.0, 100.0), 3)
    }

    #[test]
    fn lines_only_without_stamp() {
        let layers = Grid.execute(&json!({"columns": 2, "rows": 3}), &[], &mut ctx());
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].id, "grid");
        assert_eq!(layers[0].paths.len(), 3 + 4);
    }

    #[test]
    fn stamps_land_on_every_intersection() {
        let mut ctx = ctx().with_input(STAMP_SLOT, motif());
        let params = json!({"columns": 2, "rows": 2, "margin": 0, "draw_lines": false});
        let layers = Grid.execute(&params, &[], &mut ctx);
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].id, "stamps");
        assert_eq!(layers[0].paths.len(), 9);
        // the motif's anchor is its midpoint, so each copy is centered on an intersection
        let first = &layers[0].paths[0];
        assert_eq!(first.points, vec![Point::new(-1.0, 0.0), Point::new(1.0, 0.0)]);
        let last = &layers[0].paths[8];
        assert_eq!(last.points, vec![Point::new(99.0, 100.0), Point::new(101.0, 100.0)]);
    }

    #[test]
    fn multi_layer_groups_stamps_by_column() {
        let mut ctx = ctx().with_input(STAMP_SLOT, motif());
        let params = json!({"columns": 3, "rows": 1, "draw_lines": false, "multi_layer": true});
        let layers = Grid.execute(&params, &[], &mut ctx);
        assert_eq!(layers.len(), 4);
        assert!(layers.iter().all(|l| l.id == "column" && l.paths.len() == 2));
    }

    #[test]
    fn random_rotation_does_not_shift_the_stream() {
        let params = json!({"columns": 2, "rows": 2});
        let mut fixed = ctx().with_input(STAMP_SLOT, motif());
        let mut random = ctx().with_input(STAMP_SLOT, motif());
        Grid.execute(&params, &[], &mut fixed);
        let mut params_random = params.clone();
        params_random["random_rotation"] = json!(true);
        Grid.execute(&params_random, &[], &mut random);
        assert_eq!(fixed.rng().next_u64(), random.rng().next_u64());
    }

    #[test]
    fn random_rotation_keeps_anchor_on_intersection() {
        let mut ctx = ctx().with_input(STAMP_SLOT, motif());
        let params = json!({"columns": 1, "rows": 1, "margin": 0, "draw_lines": false, "random_rotation": true});
        let layers = Grid.execute(&params, &[], &mut ctx);
        for path in &layers[0].paths {
            let mid = path.points[0].lerp(path.points[1], 0.5);
            let on_corner = [0.0, 100.0].contains(&mid.x.round()) && [0.0, 100.0].contains(&mid.y.round());
            assert!(on_corner, "{mid:?}");
        }
    }

    #[test]
    fn empty_stamp_input_is_ignored() {
        let mut ctx = ctx().with_input(STAMP_SLOT, vec![Layer::new("empty", vec![])]);
        let layers = Grid.execute(&json!({}), &[], &mut ctx);
        assert_eq!(layers.len(), 1);
    }
}
