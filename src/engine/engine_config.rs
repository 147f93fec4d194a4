use serde::{Deserialize, Serialize};

use crate::overlay::markers::OverlayMarkers;
use crate::page::geometry::Rect;
use crate::selection::descriptor::DEFAULT_CAPTURED_STYLES;
use crate::selection::selection_model::SelectionMode;

/// Engine settings. Every field has a default, so a partial YAML section
/// is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub default_mode: SelectionMode,

    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,

    #[serde(default = "default_selected_color")]
    pub selected_color: String,

    #[serde(default = "default_opacity")]
    pub opacity: f64,

    #[serde(default = "default_true")]
    pub show_labels: bool,

    /// Distance of an ordinal label above its highlight box.
    #[serde(default = "default_label_offset")]
    pub label_offset: f64,

    /// Descriptor text is cut to this many chars.
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,

    /// Inserts beyond this size are refused.
    #[serde(default = "default_max_elements")]
    pub max_elements: usize,

    #[serde(default = "default_captured_styles")]
    pub captured_styles: Vec<String>,

    /// Where the floating control surface sits; `None` mounts none.
    #[serde(default)]
    pub control_surface: Option<Rect>,

    /// Host-side period for calling `Engine::tick`.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    #[serde(default)]
    pub markers: OverlayMarkers,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_mode: SelectionMode::default(),
            highlight_color: default_highlight_color(),
            selected_color: default_selected_color(),
            opacity: default_opacity(),
            show_labels: true,
            label_offset: default_label_offset(),
            max_text_len: default_max_text_len(),
            max_elements: default_max_elements(),
            captured_styles: default_captured_styles(),
            control_surface: None,
            refresh_interval_ms: default_refresh_interval_ms(),
            markers: OverlayMarkers::default(),
        }
    }
}

// Serde default helpers
fn default_highlight_color() -> String { "rgba(59, 130, 246, 0.2)".to_string() }
fn default_selected_color() -> String { "rgba(239, 68, 68, 0.9)".to_string() }
fn default_opacity() -> f64 { 0.2 }
fn default_true() -> bool { true }
fn default_label_offset() -> f64 { 28.0 }
fn default_max_text_len() -> usize { 200 }
fn default_max_elements() -> usize { 100 }
fn default_refresh_interval_ms() -> u64 { 100 }
fn default_captured_styles() -> Vec<String> {
    DEFAULT_CAPTURED_STYLES.iter().map(|s| s.to_string()).collect()
}
