use tracing::debug;

use crate::engine::engine::Engine;
use crate::engine::keyboard::KeyEvent;
use crate::error::PickerError;
use crate::gesture::events::PointerEvent;
use crate::page::paths::query_css_path;
use crate::script::context::ScriptContext;
use crate::script::script_model::{
    AssertionResult, AssertionSpec, GestureScript, ScriptResult, ScriptStep,
};

/// Replays a GestureScript step-by-step against an engine.
pub struct ScriptRunner;

impl ScriptRunner {
    /// Run a complete script. The engine should be freshly built for it.
    pub fn run(script: &GestureScript, engine: &mut Engine) -> ScriptResult {
        let mut ctx = ScriptContext::new();

        if let Some(mode) = script.mode {
            engine.set_mode(mode);
        }

        for (i, step) in script.steps.iter().enumerate() {
            ctx.current_step = i;
            debug!(step = i, ?step, "replaying step");

            if let Err(e) = Self::execute_step(step, i, engine, &mut ctx) {
                return ScriptResult {
                    script_name: script.name.clone(),
                    passed: false,
                    steps_run: i + 1,
                    assertion_results: ctx.assertion_results,
                    error: Some(format!("Step {} failed: {}", i, e)),
                    final_selection: engine.selection().identities(),
                };
            }
        }

        ScriptResult {
            script_name: script.name.clone(),
            passed: ctx.all_passed(),
            steps_run: script.steps.len(),
            assertion_results: ctx.assertion_results,
            error: None,
            final_selection: engine.selection().identities(),
        }
    }

    fn execute_step(
        step: &ScriptStep,
        step_index: usize,
        engine: &mut Engine,
        ctx: &mut ScriptContext,
    ) -> Result<(), PickerError> {
        match step {
            ScriptStep::Activate => engine.activate(),
            ScriptStep::Deactivate => engine.deactivate(),
            ScriptStep::Toggle => engine.toggle(),
            ScriptStep::SetMode { mode } => engine.set_mode(*mode),

            ScriptStep::Move { x, y } => {
                engine.dispatch(PointerEvent::moved(*x, *y));
            }
            ScriptStep::Click { x, y } => {
                engine.dispatch(PointerEvent::click(*x, *y));
            }
            ScriptStep::Down { x, y } => {
                engine.dispatch(PointerEvent::down(*x, *y));
            }
            ScriptStep::Up { x, y } => {
                engine.dispatch(PointerEvent::up(*x, *y));
            }
            ScriptStep::Drag { from, to } => {
                engine.dispatch(PointerEvent::down(from[0], from[1]));
                engine.dispatch(PointerEvent::moved(to[0], to[1]));
                engine.dispatch(PointerEvent::up(to[0], to[1]));
            }

            ScriptStep::Key { key, ctrl, shift } => {
                engine.handle_key(&KeyEvent {
                    key: key.clone(),
                    ctrl: *ctrl,
                    shift: *shift,
                });
            }

            ScriptStep::Remove { identity } => {
                engine.remove_element(identity);
            }
            ScriptStep::RemoveLast => {
                engine.remove_last();
            }
            ScriptStep::Clear => engine.clear_selection(),
            ScriptStep::SelectAllSimilar => {
                engine.select_all_similar();
            }
            ScriptStep::Tick => {
                engine.tick();
            }
            ScriptStep::Scroll { dx, dy } => engine.page_mut().scroll_by(*dx, *dy),

            ScriptStep::Detach { selector } => {
                let node = query_css_path(engine.page(), selector).ok_or_else(|| {
                    PickerError::NodeNotFound {
                        selector: selector.clone(),
                        context: "detach step".into(),
                    }
                })?;
                engine.page_mut().detach(node);
            }

            ScriptStep::Assert { assertions } => {
                let results = assertions
                    .iter()
                    .map(|spec| Self::evaluate_one(spec, step_index, engine))
                    .collect();
                ctx.record_assertions(results);
            }
        }
        Ok(())
    }

    fn evaluate_one(spec: &AssertionSpec, step_index: usize, engine: &Engine) -> AssertionResult {
        let (passed, actual) = match spec {
            AssertionSpec::Active { expected } => {
                let actual = engine.is_active();
                (actual == *expected, actual.to_string())
            }
            AssertionSpec::Mode { expected } => {
                let actual = engine.mode();
                (actual == *expected, actual.to_string())
            }
            AssertionSpec::SelectedCount { expected } => {
                let actual = engine.selection().len();
                (actual == *expected, actual.to_string())
            }
            AssertionSpec::SelectedTags { expected } => {
                let actual: Vec<String> = engine
                    .selection()
                    .iter()
                    .map(|e| e.selected.descriptor.tag_name.clone())
                    .collect();
                (actual == *expected, format!("{:?}", actual))
            }
            AssertionSpec::SelectedIds { expected } => {
                let actual: Vec<String> = engine
                    .selection()
                    .iter()
                    .map(|e| e.selected.descriptor.id_attribute.clone())
                    .collect();
                (actual == *expected, format!("{:?}", actual))
            }
            AssertionSpec::OverlayCount { expected } => {
                let actual = engine.overlay().len();
                (actual == *expected, actual.to_string())
            }
            AssertionSpec::ListenerCount { expected } => {
                let actual = engine.page().listener_count();
                (actual == *expected, actual.to_string())
            }
            AssertionSpec::LabelText { ordinal, expected } => {
                let actual = engine
                    .overlay()
                    .entries()
                    .find(|e| e.ordinal == *ordinal)
                    .and_then(|e| engine.page().node(e.label_node))
                    .and_then(|n| n.text.clone())
                    .unwrap_or_default();
                (actual == *expected, actual)
            }
        };

        AssertionResult {
            step_index,
            spec: spec.clone(),
            passed,
            message: if passed {
                None
            } else {
                Some(format!("expected {}, got {}", expected_text(spec), actual))
            },
            actual: Some(actual),
        }
    }
}

fn expected_text(spec: &AssertionSpec) -> String {
    match spec {
        AssertionSpec::Active { expected } => expected.to_string(),
        AssertionSpec::Mode { expected } => expected.to_string(),
        AssertionSpec::SelectedCount { expected }
        | AssertionSpec::OverlayCount { expected }
        | AssertionSpec::ListenerCount { expected } => expected.to_string(),
        AssertionSpec::SelectedTags { expected } | AssertionSpec::SelectedIds { expected } => {
            format!("{:?}", expected)
        }
        AssertionSpec::LabelText { expected, .. } => expected.clone(),
    }
}
