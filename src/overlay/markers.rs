use serde::{Deserialize, Serialize};

use crate::page::page_model::{Layer, NodeId, Page};

/// Ids and class names stamped on every node the engine renders.
///
/// Besides identifying engine nodes for the hit resolver, these are what the
/// deactivation sweep uses to find artifacts state tracking lost hold of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayMarkers {
    #[serde(default = "default_container_id")]
    pub container_id: String,
    #[serde(default = "default_selected_class")]
    pub selected_class: String,
    #[serde(default = "default_label_class")]
    pub label_class: String,
    #[serde(default = "default_highlight_class")]
    pub highlight_class: String,
    #[serde(default = "default_highlight_label_class")]
    pub highlight_label_class: String,
    #[serde(default = "default_selection_box_class")]
    pub selection_box_class: String,
    #[serde(default = "default_control_surface_id")]
    pub control_surface_id: String,
}

impl Default for OverlayMarkers {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            selected_class: default_selected_class(),
            label_class: default_label_class(),
            highlight_class: default_highlight_class(),
            highlight_label_class: default_highlight_label_class(),
            selection_box_class: default_selection_box_class(),
            control_surface_id: default_control_surface_id(),
        }
    }
}

fn default_container_id() -> String { "picker-overlay-container".to_string() }
fn default_selected_class() -> String { "picker-selected".to_string() }
fn default_label_class() -> String { "picker-label".to_string() }
fn default_highlight_class() -> String { "picker-highlight".to_string() }
fn default_highlight_label_class() -> String { "picker-highlight-label".to_string() }
fn default_selection_box_class() -> String { "picker-selection-box".to_string() }
fn default_control_surface_id() -> String { "picker-control-surface".to_string() }

impl OverlayMarkers {
    fn overlay_classes(&self) -> [&str; 5] {
        [
            self.selected_class.as_str(),
            self.label_class.as_str(),
            self.highlight_class.as_str(),
            self.highlight_label_class.as_str(),
            self.selection_box_class.as_str(),
        ]
    }

    /// Node itself carries an overlay marker.
    pub fn is_marked_overlay(&self, page: &Page, id: NodeId) -> bool {
        let Some(node) = page.node(id) else {
            return false;
        };
        node.id_attr() == self.container_id
            || self.overlay_classes().iter().any(|c| node.has_class(c))
    }

    /// Node or an ancestor belongs to the overlay layer.
    pub fn is_overlay_node(&self, page: &Page, id: NodeId) -> bool {
        std::iter::once(id)
            .chain(page.ancestors(id))
            .any(|n| self.is_marked_overlay(page, n))
    }

    /// Node or an ancestor is the floating control surface.
    pub fn is_control_surface(&self, page: &Page, id: NodeId) -> bool {
        std::iter::once(id)
            .chain(page.ancestors(id))
            .any(|n| page.node(n).is_some_and(|node| node.id_attr() == self.control_surface_id))
    }

    /// Anything the engine rendered, by marker or by layer.
    pub fn is_engine_node(&self, page: &Page, id: NodeId) -> bool {
        page.node(id).is_some_and(|n| n.layer == Layer::Engine)
            || self.is_overlay_node(page, id)
            || self.is_control_surface(page, id)
    }

    /// Attached nodes carrying any overlay marker, outermost first.
    pub fn find_artifacts(&self, page: &Page) -> Vec<NodeId> {
        page.all_elements()
            .into_iter()
            .filter(|id| self.is_marked_overlay(page, *id))
            .collect()
    }
}
