use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PickerError;
use crate::page::geometry::Rect;

// ============================================================================
// Selection data model shared with the host
// ============================================================================

/// Active selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Single,
    #[default]
    Multiple,
    Area,
    Smart,
}

impl FromStr for SelectionMode {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(SelectionMode::Single),
            "multiple" => Ok(SelectionMode::Multiple),
            "area" => Ok(SelectionMode::Area),
            "smart" => Ok(SelectionMode::Smart),
            other => Err(PickerError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionMode::Single => "single",
            SelectionMode::Multiple => "multiple",
            SelectionMode::Area => "area",
            SelectionMode::Smart => "smart",
        };
        f.write_str(name)
    }
}

/// Point-in-time snapshot of one page element.
///
/// Geometry is viewport-relative and only valid for the moment of capture;
/// attributes and styles are open key-value maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDescriptor {
    pub tag_name: String,
    pub class_name: String,
    pub id_attribute: String,
    pub text: String,
    pub html: String,
    pub attributes: BTreeMap<String, String>,
    pub computed_styles: BTreeMap<String, String>,
    pub bounding_box: Rect,
    pub css_selector: String,
    pub xpath: String,
    /// Ancestor descriptors, nearest first.
    pub parent_chain: Vec<String>,
    pub children: usize,
}

/// A descriptor admitted to the selection set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedElement {
    pub id: String,
    pub descriptor: ElementDescriptor,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Synchronous view of the engine, as returned by `get_state` and carried
/// by every state-changed notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub active: bool,
    pub mode: SelectionMode,
    pub selected_elements: Vec<SelectedElement>,
}

/// Activation flag and mode, threaded into state mutations so notifications
/// carry the full header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus {
    pub active: bool,
    pub mode: SelectionMode,
}
