use serde::{Deserialize, Serialize};

use crate::selection::selection_model::SelectionMode;

/// A headless gesture script, deserialized from YAML and replayed against
/// a fresh engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureScript {
    /// Human-readable name for this script
    pub name: String,

    /// Mode to start in; the engine default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SelectionMode>,

    /// Ordered list of steps to replay
    pub steps: Vec<ScriptStep>,
}

/// A single step in a gesture script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    Activate,
    Deactivate,
    Toggle,

    SetMode { mode: SelectionMode },

    Move { x: f64, y: f64 },
    Click { x: f64, y: f64 },
    Down { x: f64, y: f64 },
    Up { x: f64, y: f64 },

    /// Pointer down at `from`, one move, release at `to`
    Drag { from: [f64; 2], to: [f64; 2] },

    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },

    /// Deselect by identity
    Remove { identity: String },

    RemoveLast,
    Clear,
    SelectAllSimilar,

    /// Periodic overlay re-measurement
    Tick,

    /// Scroll the viewport
    Scroll { dx: f64, dy: f64 },

    /// Page script removes the node at a CSS path
    Detach { selector: String },

    /// Run assertions against the current engine state
    Assert { assertions: Vec<AssertionSpec> },
}

/// A single assertion against the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssertionSpec {
    Active { expected: bool },

    Mode { expected: SelectionMode },

    /// Number of selected elements
    SelectedCount { expected: usize },

    /// Tag names of the selection, in insertion order
    SelectedTags { expected: Vec<String> },

    /// `id` attributes of the selection, in insertion order
    SelectedIds { expected: Vec<String> },

    /// Number of rendered overlay entries
    OverlayCount { expected: usize },

    /// Number of listeners registered on the page
    ListenerCount { expected: usize },

    /// Text of the overlay label with the given ordinal
    LabelText { ordinal: usize, expected: String },
}

/// Result of evaluating a single assertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// Which step this assertion belongs to (0-indexed)
    pub step_index: usize,

    pub spec: AssertionSpec,

    pub passed: bool,

    /// Actual value found (for debugging failed assertions)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

/// Result of replaying a complete script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResult {
    pub script_name: String,

    /// Whether all steps ran and every assertion passed
    pub passed: bool,

    pub steps_run: usize,

    pub assertion_results: Vec<AssertionResult>,

    /// Error message if a step could not be executed
    pub error: Option<String>,

    /// Identities still selected when the script stopped, in order.
    #[serde(default)]
    pub final_selection: Vec<String>,
}
