use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Move,
    Down,
    Up,
    Click,
}

/// Pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn moved(x: f64, y: f64) -> Self {
        Self { kind: PointerKind::Move, x, y }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self { kind: PointerKind::Down, x, y }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self { kind: PointerKind::Up, x, y }
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self { kind: PointerKind::Click, x, y }
    }
}

/// Whether the engine swallowed an event before page handlers saw it
/// (capture-phase `preventDefault` + `stopPropagation`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    Consumed,
}

impl EventOutcome {
    pub fn is_consumed(self) -> bool {
        self == EventOutcome::Consumed
    }
}
