use hashlink::LinkedHashMap;
use tracing::{debug, warn};

use crate::engine::engine_config::EngineConfig;
use crate::overlay::markers::OverlayMarkers;
use crate::page::geometry::Rect;
use crate::page::listeners::{EventKind, ListenerId};
use crate::page::page_model::{Layer, Node, NodeId, Page};
use crate::page::paths::short_label;

pub const OVERLAY_LISTENER_OWNER: &str = "picker.overlay";

const CONTAINER_Z: i32 = 999_997;
const LABEL_Z: i32 = 999_998;
const LABEL_HEIGHT: f64 = 20.0;

/// Rendered highlight box + ordinal label for one selected element.
#[derive(Debug, Clone)]
pub struct OverlayEntry {
    pub identity: String,
    pub target: NodeId,
    pub box_node: NodeId,
    pub label_node: NodeId,
    pub ordinal: usize,
    /// `tag#id` / `tag.class` shown next to the ordinal while hovered.
    pub descriptor_label: String,
    pub hovered: bool,
    hover_listener: ListenerId,
}

impl OverlayEntry {
    pub fn label_text(&self) -> String {
        if self.hovered {
            format!("#{} {}", self.ordinal, self.descriptor_label)
        } else {
            format!("#{}", self.ordinal)
        }
    }
}

/// Keeps highlight boxes and labels glued to the live layout of their
/// targets. Entries are keyed by the same identity as the selection set.
#[derive(Debug)]
pub struct OverlaySync {
    markers: OverlayMarkers,
    selected_color: String,
    opacity: f64,
    show_labels: bool,
    label_offset: f64,
    container: Option<NodeId>,
    entries: LinkedHashMap<String, OverlayEntry>,
}

impl OverlaySync {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            markers: config.markers.clone(),
            selected_color: config.selected_color.clone(),
            opacity: config.opacity,
            show_labels: config.show_labels,
            label_offset: config.label_offset,
            container: None,
            entries: LinkedHashMap::new(),
        }
    }

    /// Create the full-viewport container. The container itself never
    /// intercepts the pointer; boxes and labels inside it do.
    pub fn mount(&mut self, page: &mut Page) -> NodeId {
        if let Some(container) = self.container.filter(|c| page.is_attached(*c)) {
            return container;
        }

        let viewport = page.bounding_rect(page.root());
        let mut node = engine_node("div", viewport, CONTAINER_Z, false);
        node.attributes
            .insert("id".to_string(), self.markers.container_id.clone());
        let container = page.create(node);
        let root = page.root();
        page.append_child(root, container);
        self.container = Some(container);
        container
    }

    /// Drop every entry and the container.
    pub fn unmount(&mut self, page: &mut Page) {
        self.clear(page);
        if let Some(container) = self.container.take() {
            page.detach(container);
        }
    }

    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    pub fn add(&mut self, page: &mut Page, identity: &str, target: NodeId, ordinal: usize) {
        if self.entries.contains_key(identity) {
            return;
        }
        let container = self.mount(page);
        let rect = page.bounding_rect(target);

        let mut box_spec = engine_node("div", rect, CONTAINER_Z, true);
        box_spec
            .attributes
            .insert("class".to_string(), self.markers.selected_class.clone());
        box_spec
            .attributes
            .insert("data-element-id".to_string(), identity.to_string());
        box_spec.styles.insert(
            "border".to_string(),
            format!("3px solid {}", self.selected_color),
        );
        box_spec
            .styles
            .insert("opacity".to_string(), self.opacity.to_string());
        let box_node = page.create(box_spec);
        page.append_child(container, box_node);

        let mut label_spec = engine_node("div", self.label_rect(rect), LABEL_Z, true);
        label_spec
            .attributes
            .insert("class".to_string(), self.markers.label_class.clone());
        label_spec
            .attributes
            .insert("data-element-index".to_string(), ordinal.to_string());
        label_spec.displayed = self.show_labels;
        let label_node = page.create(label_spec);
        page.append_child(container, label_node);

        let hover_listener =
            page.listeners_mut()
                .add(EventKind::PointerMove, false, OVERLAY_LISTENER_OWNER);

        let entry = OverlayEntry {
            identity: identity.to_string(),
            target,
            box_node,
            label_node,
            ordinal,
            descriptor_label: short_label(page, target),
            hovered: false,
            hover_listener,
        };
        set_text(page, label_node, &entry.label_text());
        self.entries.insert(identity.to_string(), entry);
    }

    /// Remove one entry, its nodes and its hover listener.
    pub fn remove(&mut self, page: &mut Page, identity: &str) -> bool {
        let Some(entry) = self.entries.remove(identity) else {
            return false;
        };
        page.detach(entry.box_node);
        page.detach(entry.label_node);
        page.listeners_mut().remove(entry.hover_listener);
        true
    }

    pub fn clear(&mut self, page: &mut Page) {
        let identities: Vec<String> = self.entries.keys().cloned().collect();
        for identity in identities {
            self.remove(page, &identity);
        }
    }

    /// Apply fresh 1-based ordinals and rewrite the labels.
    pub fn renumber(&mut self, page: &mut Page, ordinals: &[(String, usize)]) {
        for (identity, ordinal) in ordinals {
            if let Some(entry) = self.entries.get_mut(identity) {
                entry.ordinal = *ordinal;
                page.set_attribute(entry.label_node, "data-element-index", &ordinal.to_string());
                let text = entry.label_text();
                set_text(page, entry.label_node, &text);
            }
        }
    }

    /// Re-measure every target and move its box and label.
    ///
    /// Returns identities whose target is detached or measures degenerate;
    /// those are left for the caller to drop rather than rendered as
    /// phantom boxes.
    pub fn refresh(&mut self, page: &mut Page) -> Vec<String> {
        let mut stale = Vec::new();
        for entry in self.entries.values() {
            let rect = page.bounding_rect(entry.target);
            if !page.is_attached(entry.target) || rect.is_degenerate() {
                warn!(identity = %entry.identity, "overlay target detached or collapsed");
                stale.push(entry.identity.clone());
                continue;
            }
            page.set_rect(entry.box_node, rect);
            page.set_rect(entry.label_node, self.label_rect(rect));
        }
        stale
    }

    /// Label swap on hover: ordinal plus descriptor while the pointer is
    /// inside a highlight box, ordinal only otherwise.
    pub fn on_pointer_move(&mut self, page: &mut Page, x: f64, y: f64) {
        for entry in self.entries.values_mut() {
            let inside = page.bounding_rect(entry.box_node).contains_point(x, y);
            if inside != entry.hovered {
                entry.hovered = inside;
                let text = entry.label_text();
                set_text(page, entry.label_node, &text);
            }
        }
    }

    /// Remove any attached overlay artifact found by marker, tracked or not.
    /// Returns how many nodes were swept.
    pub fn sweep(&mut self, page: &mut Page) -> usize {
        self.clear(page);
        self.container = None;
        let artifacts = self.markers.find_artifacts(page);
        let mut swept = 0;
        for node in artifacts {
            if page.is_attached(node) {
                page.detach(node);
                swept += 1;
            }
        }
        if swept > 0 {
            debug!(swept, "swept overlay artifacts");
        }
        swept
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn identities(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn entry(&self, identity: &str) -> Option<&OverlayEntry> {
        self.entries.get(identity)
    }

    pub fn entries(&self) -> impl Iterator<Item = &OverlayEntry> {
        self.entries.values()
    }

    fn label_rect(&self, target: Rect) -> Rect {
        Rect::new(target.x, target.y - self.label_offset, target.width.max(24.0), LABEL_HEIGHT)
    }
}

/// Engine-layer `div` with fixed geometry.
pub(crate) fn engine_node(tag: &str, rect: Rect, z: i32, intercepts: bool) -> Node {
    let mut node = Node::new(tag, Layer::Engine);
    node.rect = rect;
    node.z_index = Some(z);
    node.pointer_events = Some(intercepts);
    node.styles
        .insert("position".to_string(), "fixed".to_string());
    node
}

pub(crate) fn set_text(page: &mut Page, id: NodeId, text: &str) {
    if let Some(node) = page.node_mut(id) {
        node.text = Some(text.to_string());
    }
}
