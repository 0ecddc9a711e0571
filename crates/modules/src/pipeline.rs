//! Validated, runnable pipelines.
//!
//! The orchestrator owns the execution context. Steps run in order against
//! one shared rng. A generator's output is appended to the accumulated
//! drawing and a modifier's output replaces it. A step's own output is kept
//! only while some later step still reads it through an auxiliary slot.

use std::collections::{BTreeMap, HashMap};

use linework_core::module::{Module, ModuleRole};
use linework_core::{CanvasSettings, ExecutionContext, Layer, LineworkError};
use serde_json::Value;

use crate::spec::PipelineSpec;
use crate::ModuleKind;

#[derive(Debug, Clone)]
struct Step {
    kind: ModuleKind,
    params: Value,
    inputs: Vec<(String, usize)>,
    hidden: bool,
}

/// A pipeline whose names and wiring have been checked.
#[derive(Debug, Clone)]
pub struct Pipeline {
    canvas: CanvasSettings,
    seed: u64,
    steps: Vec<Step>,
    /// Steps whose output feeds an input slot, mapped to the last step
    /// reading it. Other outputs are not retained.
    last_reader: BTreeMap<usize, usize>,
}

impl Pipeline {
    /// Resolves and validates `spec`.
    ///
    /// Fails on an invalid canvas, an empty pipeline, an unknown module name,
    /// a first step that is not a generator, params that are not an object,
    /// an undeclared input slot, a slot fed by a step that does not run
    /// earlier, or a required slot left unwired.
    pub fn from_spec(spec: &PipelineSpec) -> Result<Self, LineworkError> {
        spec.canvas.validate()?;
        if spec.steps.is_empty() {
            return Err(LineworkError::EmptyPipeline);
        }

        let mut steps = Vec::with_capacity(spec.steps.len());
        for (index, step) in spec.steps.iter().enumerate() {
            let kind = ModuleKind::from_name(&step.module)?;
            if index == 0 && kind.role() != ModuleRole::Generator {
                return Err(LineworkError::FirstStepNotGenerator(step.module.clone()));
            }

            let params = match &step.params {
                Value::Null => Value::Object(serde_json::Map::new()),
                Value::Object(_) => step.params.clone(),
                other => {
                    return Err(LineworkError::ParamTypeMismatch {
                        name: format!("steps[{index}].params"),
                        expected: "object".into(),
                        got: json_type_name(other).into(),
                    })
                }
            };

            for (slot, &source_step) in &step.inputs {
                if !kind.inputs().iter().any(|s| s.name == slot.as_str()) {
                    return Err(LineworkError::UnknownInputSlot {
                        module: step.module.clone(),
                        slot: slot.clone(),
                    });
                }
                if source_step >= index {
                    return Err(LineworkError::InvalidInputSource {
                        step: index,
                        slot: slot.clone(),
                        source_step,
                    });
                }
            }
            if let Some(slot) = kind
                .inputs()
                .iter()
                .find(|s| s.required && !step.inputs.contains_key(s.name))
            {
                return Err(LineworkError::MissingInput {
                    module: step.module.clone(),
                    slot: slot.name.to_string(),
                });
            }

            steps.push(Step {
                kind,
                params,
                inputs: step
                    .inputs
                    .iter()
                    .map(|(slot, &source)| (slot.clone(), source))
                    .collect(),
                hidden: step.hidden,
            });
        }

        let mut last_reader = BTreeMap::new();
        for (index, step) in steps.iter().enumerate() {
            for &(_, source) in &step.inputs {
                last_reader.insert(source, index);
            }
        }

        Ok(Self {
            canvas: spec.canvas,
            seed: spec.seed,
            steps,
            last_reader,
        })
    }

    pub fn canvas(&self) -> &CanvasSettings {
        &self.canvas
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a validated pipeline.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step and returns the final drawing.
    pub fn run(&self) -> Vec<Layer> {
        let mut ctx = ExecutionContext::new(self.canvas, self.seed);
        let mut retained: HashMap<usize, Vec<Layer>> = HashMap::new();
        let mut drawing: Vec<Layer> = Vec::new();

        for (index, step) in self.steps.iter().enumerate() {
            let inputs: HashMap<String, Vec<Layer>> = step
                .inputs
                .iter()
                .filter_map(|(slot, source)| {
                    retained.get(source).map(|layers| (slot.clone(), layers.clone()))
                })
                .collect();
            ctx.set_inputs(inputs);
            retained.retain(|source, _| {
                self.last_reader.get(source).is_some_and(|&last| last > index)
            });

            let output = step.kind.execute(&step.params, &drawing, &mut ctx);
            tracing::debug!(
                step = index,
                module = step.kind.name(),
                layers = output.len(),
                points = output.iter().map(Layer::point_count).sum::<usize>(),
                "step executed"
            );

            if self.last_reader.contains_key(&index) {
                retained.insert(index, output.clone());
            }
            if !step.hidden {
                match step.kind.role() {
                    ModuleRole::Generator => drawing.extend(output),
                    ModuleRole::Modifier => drawing = output,
                }
            }
        }

        tracing::debug!(
            steps = self.steps.len(),
            layers = drawing.len(),
            paths = drawing.iter().map(|l| l.paths.len()).sum::<usize>(),
            "pipeline finished"
        );
        drawing
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::StepSpec;
    use linework_core::Point;
    use serde_json::json;

    fn canvas() -> CanvasSettings {
        CanvasSettings::new(200.0, 200.0)
    }

    fn circles() -> StepSpec {
        StepSpec::new("concentric_circles").with_params(json!({
            "count": 3,
            "min_radius": 10,
            "max_radius": 30,
            "segments": 4,
        }))
    }

    #[test]
    fn concentric_circles_end_to_end() {
        let spec = PipelineSpec::new(canvas(), 42).step(circles());
        let layers = Pipeline::from_spec(&spec).unwrap().run();
        assert_eq!(layers.len(), 1);
        let paths = &layers[0].paths;
        assert_eq!(paths.len(), 3);
        let center = Point::new(100.0, 100.0);
        for (path, radius) in paths.iter().zip([10.0, 20.0, 30.0]) {
            assert!(path.closed);
            assert_eq!(path.len(), 5);
            for p in &path.points {
                assert!((p.distance(center) - radius).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn clip_removes_line_fully_outside() {
        // lines at y = 4 and y = 196, rectangle spans 50..150
        let spec = PipelineSpec::new(canvas(), 1)
            .step(StepSpec::new("lines").with_params(json!({"count": 2, "margin": 2})))
            .step(StepSpec::new("clip_rectangle").with_params(json!({
                "x": 25, "y": 25, "width": 50, "height": 50,
            })));
        let layers = Pipeline::from_spec(&spec).unwrap().run();
        assert_eq!(layers.len(), 1);
        assert!(layers[0].paths.is_empty());
    }

    #[test]
    fn generators_append_and_modifiers_replace() {
        let spec = PipelineSpec::new(canvas(), 1)
            .step(circles())
            .step(StepSpec::new("spiral"))
            .step(StepSpec::new("subdivide").with_params(json!({"divisions": 2})));
        let layers = Pipeline::from_spec(&spec).unwrap().run();
        let ids: Vec<&str> = layers.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["circles", "spiral"]);
        // 4 edges per ring, each split in two: 9 points
        assert_eq!(layers[0].paths[0].len(), 9);
    }

    #[test]
    fn hidden_step_feeds_a_stamp_without_drawing() {
        let spec = PipelineSpec::new(canvas(), 1)
            .step(StepSpec::new("polygon").with_params(json!({"sides": 3, "radius": 4})).hidden())
            .step(
                StepSpec::new("grid")
                    .with_params(json!({"columns": 2, "rows": 2, "draw_lines": false}))
                    .with_input("stamp", 0),
            );
        let layers = Pipeline::from_spec(&spec).unwrap().run();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].id, "stamps");
        assert_eq!(layers[0].paths.len(), 9);
    }

    #[test]
    fn same_spec_same_drawing() {
        let spec = PipelineSpec::new(canvas(), 7)
            .step(StepSpec::new("spray").with_params(json!({"count": 50})))
            .step(StepSpec::new("jitter").with_params(json!({"amount": 2})));
        let pipeline = Pipeline::from_spec(&spec).unwrap();
        assert_eq!(pipeline.run(), pipeline.run());
    }

    #[test]
    fn seed_changes_the_drawing() {
        let build = |seed| {
            let spec = PipelineSpec::new(canvas(), seed)
                .step(StepSpec::new("spray").with_params(json!({"count": 20})));
            Pipeline::from_spec(&spec).unwrap().run()
        };
        assert_ne!(build(1), build(2));
    }

    #[test]
    fn rejects_invalid_canvas() {
        let spec = PipelineSpec::new(CanvasSettings::new(0.0, 100.0), 1).step(circles());
        assert!(matches!(
            Pipeline::from_spec(&spec),
            Err(LineworkError::InvalidCanvas { .. })
        ));
    }

    #[test]
    fn rejects_empty_pipeline() {
        let spec = PipelineSpec::new(canvas(), 1);
        assert!(matches!(Pipeline::from_spec(&spec), Err(LineworkError::EmptyPipeline)));
    }

    #[test]
    fn rejects_unknown_module() {
        let spec = PipelineSpec::new(canvas(), 1).step(StepSpec::new("wobble"));
        assert!(matches!(
            Pipeline::from_spec(&spec),
            Err(LineworkError::UnknownModule(name)) if name == "wobble"
        ));
    }

    #[test]
    fn rejects_modifier_first() {
        let spec = PipelineSpec::new(canvas(), 1).step(StepSpec::new("smooth"));
        assert!(matches!(
            Pipeline::from_spec(&spec),
            Err(LineworkError::FirstStepNotGenerator(_))
        ));
    }

    #[test]
    fn rejects_non_object_params() {
        let spec = PipelineSpec::new(canvas(), 1)
            .step(StepSpec::new("spiral").with_params(json!([1, 2])));
        assert!(matches!(
            Pipeline::from_spec(&spec),
            Err(LineworkError::ParamTypeMismatch { got, .. }) if got == "array"
        ));
    }

    #[test]
    fn null_params_mean_defaults() {
        let spec = PipelineSpec::new(canvas(), 1)
            .step(StepSpec::new("spiral").with_params(Value::Null));
        assert!(Pipeline::from_spec(&spec).is_ok());
    }

    #[test]
    fn rejects_undeclared_slot() {
        let spec = PipelineSpec::new(canvas(), 1)
            .step(circles())
            .step(StepSpec::new("smooth").with_input("stamp", 0));
        assert!(matches!(
            Pipeline::from_spec(&spec),
            Err(LineworkError::UnknownInputSlot { .. })
        ));
    }

    #[test]
    fn rejects_forward_and_self_references() {
        for source in [1, 2] {
            let spec = PipelineSpec::new(canvas(), 1)
                .step(circles())
                .step(StepSpec::new("grid").with_input("stamp", source))
                .step(circles());
            assert!(matches!(
                Pipeline::from_spec(&spec),
                Err(LineworkError::InvalidInputSource { step: 1, .. })
            ));
        }
    }

    #[test]
    fn demo_pipeline_runs() {
        let spec: PipelineSpec =
            serde_json::from_str(include_str!("../../../demos/stamped_grid.json")).unwrap();
        let layers = Pipeline::from_spec(&spec).unwrap().run();
        let ids: Vec<&str> = layers.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["grid", "stamps", "circles"]);
        assert!(layers.iter().all(|l| !l.paths.is_empty()));
    }

    #[test]
    fn only_wired_outputs_are_retained() {
        let spec = PipelineSpec::new(canvas(), 1)
            .step(circles())
            .step(StepSpec::new("polygon").hidden())
            .step(StepSpec::new("grid").with_input("stamp", 1))
            .step(StepSpec::new("grid").with_input("stamp", 1))
            .step(StepSpec::new("smooth"));
        let pipeline = Pipeline::from_spec(&spec).unwrap();
        assert_eq!(pipeline.last_reader, BTreeMap::from([(1, 3)]));
        let layers = pipeline.run();
        // the second grid still sees the stamp after the first one read it
        let stamps = layers.iter().filter(|l| l.id == "stamps").count();
        assert_eq!(stamps, 2);
        assert!(layers.iter().filter(|l| l.id == "stamps").all(|l| !l.paths.is_empty()));
    }

    #[test]
    fn accessors_reflect_spec() {
        let spec = PipelineSpec::new(canvas(), 5).step(circles()).step(StepSpec::new("smooth"));
        let pipeline = Pipeline::from_spec(&spec).unwrap();
        assert_eq!(pipeline.len(), 2);
        assert!(!pipeline.is_empty());
        assert_eq!(pipeline.seed(), 5);
        assert_eq!(pipeline.canvas(), &canvas());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn any_seed_is_reproducible(seed: u64) {
                let spec = PipelineSpec::new(canvas(), seed)
                    .step(StepSpec::new("spray").with_params(json!({"count": 15})))
                    .step(StepSpec::new("smooth").with_params(json!({"iterations": 1})))
                    .step(StepSpec::new("jitter").with_params(json!({"amount": 1})));
                let pipeline = Pipeline::from_spec(&spec).unwrap();
                prop_assert_eq!(pipeline.run(), pipeline.run());
            }
        }
    }
}
