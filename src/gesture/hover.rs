use crate::overlay::markers::OverlayMarkers;
use crate::overlay::overlay_sync::{engine_node, set_text};
use crate::page::geometry::Rect;
use crate::page::page_model::{NodeId, Page};
use crate::page::paths::short_label;

const HIGHLIGHT_Z: i32 = 999_999;

/// Pre-selection feedback: one box and one label that follow the pointer.
/// Never touches the selection set.
#[derive(Debug, Default)]
pub struct HoverHighlight {
    box_node: Option<NodeId>,
    label_node: Option<NodeId>,
    hovered: Option<NodeId>,
    label_offset: f64,
}

impl HoverHighlight {
    pub fn new(label_offset: f64) -> Self {
        Self {
            label_offset,
            ..Self::default()
        }
    }

    pub fn mount(&mut self, page: &mut Page, markers: &OverlayMarkers, container: NodeId, color: &str) {
        if self.box_node.is_some_and(|n| page.is_attached(n)) {
            return;
        }

        let mut highlight = engine_node("div", Rect::default(), HIGHLIGHT_Z, false);
        highlight
            .attributes
            .insert("class".to_string(), markers.highlight_class.clone());
        highlight
            .styles
            .insert("background".to_string(), color.to_string());
        highlight.displayed = false;
        let box_node = page.create(highlight);
        page.append_child(container, box_node);

        let mut label = engine_node("div", Rect::default(), HIGHLIGHT_Z, false);
        label
            .attributes
            .insert("class".to_string(), markers.highlight_label_class.clone());
        label.displayed = false;
        let label_node = page.create(label);
        page.append_child(container, label_node);

        self.box_node = Some(box_node);
        self.label_node = Some(label_node);
    }

    pub fn unmount(&mut self, page: &mut Page) {
        for node in [self.box_node.take(), self.label_node.take()].into_iter().flatten() {
            page.detach(node);
        }
        self.hovered = None;
    }

    /// Highlight `target`; no-op when it is already the hovered element.
    pub fn show(&mut self, page: &mut Page, target: NodeId) {
        if self.hovered == Some(target) {
            return;
        }
        let (Some(box_node), Some(label_node)) = (self.box_node, self.label_node) else {
            return;
        };
        let rect = page.bounding_rect(target);
        let label = short_label(page, target);

        page.set_rect(box_node, rect);
        page.set_rect(
            label_node,
            Rect::new(rect.x, rect.y - self.label_offset, rect.width.max(24.0), 20.0),
        );
        set_text(page, label_node, &label);
        for node in [box_node, label_node] {
            if let Some(n) = page.node_mut(node) {
                n.displayed = true;
            }
        }
        self.hovered = Some(target);
    }

    pub fn hide(&mut self, page: &mut Page) {
        for node in [self.box_node, self.label_node].into_iter().flatten() {
            if let Some(n) = page.node_mut(node) {
                n.displayed = false;
            }
        }
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn label_text(&self, page: &Page) -> Option<String> {
        self.hovered?;
        page.node(self.label_node?)?.text.clone()
    }
}
