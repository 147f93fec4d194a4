use serde::{Deserialize, Serialize};

/// Key press routed in by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyEvent {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: true,
            shift: false,
        }
    }

    pub fn ctrl_shift(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: true,
            shift: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    ToggleActive,
    ClearAndExit,
    SelectAllSimilar,
    RemoveLast,
}

impl KeyCommand {
    /// Map a key press to a command. Only the toggle works while inactive.
    pub fn from_event(event: &KeyEvent, active: bool) -> Option<Self> {
        if event.ctrl && event.shift && event.key.eq_ignore_ascii_case("e") {
            return Some(KeyCommand::ToggleActive);
        }
        if !active {
            return None;
        }
        match event.key.as_str() {
            "Escape" => Some(KeyCommand::ClearAndExit),
            "a" | "A" if event.ctrl && !event.shift => Some(KeyCommand::SelectAllSimilar),
            "Delete" | "Backspace" => Some(KeyCommand::RemoveLast),
            _ => None,
        }
    }
}
