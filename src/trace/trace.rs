use serde::Serialize;

use crate::engine::notify::Notification;

/// One JSONL line per engine notification.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: i64,
    /// Script the engine was replaying; steps restart per script.
    pub script: String,
    pub step: u64,

    pub kind: String,

    pub active: Option<bool>,
    pub mode: Option<String>,
    pub selected_count: Option<usize>,

    /// Identity of the element a selection event refers to.
    pub identity: Option<String>,
}

impl TraceEvent {
    pub fn now(script: &str, step: u64, kind: impl ToString) -> Self {
        Self {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            script: script.to_string(),
            step,
            kind: kind.to_string(),
            active: None,
            mode: None,
            selected_count: None,
            identity: None,
        }
    }

    pub fn from_notification(script: &str, step: u64, notification: &Notification) -> Self {
        match notification {
            Notification::StateChanged(state) => Self::now(script, step, "state_changed")
                .with_state(state.active, &state.mode.to_string(), state.selected_elements.len()),
            Notification::ElementSelected { selected_element } => {
                Self::now(script, step, "element_selected").with_identity(&selected_element.id)
            }
        }
    }

    pub fn with_state(mut self, active: bool, mode: &str, selected_count: usize) -> Self {
        self.active = Some(active);
        self.mode = Some(mode.to_string());
        self.selected_count = Some(selected_count);
        self
    }

    pub fn with_identity(mut self, identity: impl ToString) -> Self {
        self.identity = Some(identity.to_string());
        self
    }
}
