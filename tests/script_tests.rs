mod common;

use element_picker::engine::engine_config::EngineConfig;
use element_picker::script::context::ScriptContext;
use element_picker::script::runner::ScriptRunner;
use element_picker::script::script_model::{
    AssertionResult, AssertionSpec, GestureScript, ScriptResult, ScriptStep,
};
use element_picker::selection::selection_model::SelectionMode;

use crate::common::utils::{engine_with, fixture};

fn run(script: &GestureScript) -> ScriptResult {
    let mut engine = engine_with(EngineConfig::default());
    ScriptRunner::run(script, &mut engine)
}

fn load(name: &str) -> GestureScript {
    let content = std::fs::read_to_string(fixture(&format!("scripts/{}", name))).unwrap();
    serde_yaml::from_str(&content).expect("fixture script must parse")
}

// ============================================================================
// YAML model
// ============================================================================

#[test]
fn script_deserializes_from_yaml() {
    let yaml = r##"
name: quick
mode: single
steps:
  - action: activate
  - action: click
    x: 10
    y: 20
  - action: drag
    from: [0, 0]
    to: [50, 60]
  - action: key
    key: a
    ctrl: true
  - action: remove_last
  - action: assert
    assertions:
      - type: selected_count
        expected: 0
      - type: label_text
        ordinal: 1
        expected: "#1"
"##;
    let script: GestureScript = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(script.mode, Some(SelectionMode::Single));
    assert_eq!(script.steps.len(), 6);
    assert_eq!(script.steps[1], ScriptStep::Click { x: 10.0, y: 20.0 });
    assert_eq!(
        script.steps[2],
        ScriptStep::Drag {
            from: [0.0, 0.0],
            to: [50.0, 60.0]
        }
    );
    assert_eq!(
        script.steps[3],
        ScriptStep::Key {
            key: "a".into(),
            ctrl: true,
            shift: false
        }
    );
}

#[test]
fn unknown_mode_is_rejected() {
    let yaml = "name: bad\nmode: lasso\nsteps: []\n";
    assert!(serde_yaml::from_str::<GestureScript>(yaml).is_err());
}

// ============================================================================
// Replay
// ============================================================================

#[test]
fn fixture_scripts_pass() {
    for name in ["multiple_toggle.yaml", "area_drag.yaml", "smart_expand.yaml"] {
        let result = run(&load(name));
        assert!(
            result.passed,
            "{} failed: {:?} {:?}",
            name,
            result.error,
            result
                .assertion_results
                .iter()
                .filter(|a| !a.passed)
                .collect::<Vec<_>>()
        );
    }
}

#[test]
fn failing_assertion_is_reported_with_actual_value() {
    let script = GestureScript {
        name: "wrong count".into(),
        mode: None,
        steps: vec![
            ScriptStep::Activate,
            ScriptStep::Click { x: 200.0, y: 130.0 },
            ScriptStep::Assert {
                assertions: vec![
                    AssertionSpec::SelectedCount { expected: 2 },
                    AssertionSpec::Active { expected: true },
                ],
            },
        ],
    };

    let result = run(&script);

    assert!(!result.passed);
    assert!(result.error.is_none());
    assert_eq!(result.steps_run, 3);
    let failed = &result.assertion_results[0];
    assert!(!failed.passed);
    assert_eq!(failed.step_index, 2);
    assert_eq!(failed.actual.as_deref(), Some("1"));
    assert_eq!(failed.message.as_deref(), Some("expected 2, got 1"));
    assert!(result.assertion_results[1].passed);
    assert_eq!(result.final_selection.len(), 1);
    assert!(result.final_selection[0].starts_with("li_"));
}

#[test]
fn detach_of_missing_node_stops_the_script() {
    let script = GestureScript {
        name: "missing".into(),
        mode: Some(SelectionMode::Multiple),
        steps: vec![
            ScriptStep::Activate,
            ScriptStep::Detach {
                selector: "#nope".into(),
            },
            ScriptStep::Deactivate,
        ],
    };

    let result = run(&script);

    assert!(!result.passed);
    assert_eq!(result.steps_run, 2);
    assert!(result.error.unwrap().contains("#nope"));
}

#[test]
fn script_mode_overrides_engine_default() {
    let script = GestureScript {
        name: "mode".into(),
        mode: Some(SelectionMode::Area),
        steps: vec![ScriptStep::Assert {
            assertions: vec![AssertionSpec::Mode {
                expected: SelectionMode::Area,
            }],
        }],
    };
    assert!(run(&script).passed);
}

#[test]
fn scroll_then_tick_keeps_selection() {
    let script = GestureScript {
        name: "scroll".into(),
        mode: None,
        steps: vec![
            ScriptStep::Activate,
            ScriptStep::Click { x: 200.0, y: 180.0 },
            ScriptStep::Scroll { dx: 0.0, dy: 20.0 },
            ScriptStep::Tick,
            ScriptStep::Assert {
                assertions: vec![
                    AssertionSpec::SelectedCount { expected: 1 },
                    AssertionSpec::OverlayCount { expected: 1 },
                    AssertionSpec::ListenerCount { expected: 5 },
                ],
            },
        ],
    };
    assert!(run(&script).passed);
}

#[test]
fn context_counts_failures() {
    let mut ctx = ScriptContext::new();
    let result = |passed| AssertionResult {
        step_index: 0,
        spec: AssertionSpec::Active { expected: true },
        passed,
        actual: None,
        message: None,
    };
    ctx.record_assertions(vec![result(true), result(false), result(false)]);

    assert!(!ctx.all_passed());
    assert_eq!(ctx.fail_count(), 2);
}
