use crate::overlay::overlay_sync::engine_node;
use crate::page::geometry::Rect;
use crate::page::page_model::{NodeId, Page};

const CONTROL_Z: i32 = 1_000_000;

/// Floating panel host element. Its content belongs to the host; the
/// engine only mounts the surface so gestures over it can be excluded.
#[derive(Debug, Default)]
pub struct ControlSurface {
    node: Option<NodeId>,
}

impl ControlSurface {
    pub fn mount(&mut self, page: &mut Page, rect: Rect, surface_id: &str) -> NodeId {
        if let Some(node) = self.node.filter(|n| page.is_attached(*n)) {
            return node;
        }
        let mut spec = engine_node("div", rect, CONTROL_Z, true);
        spec.attributes
            .insert("id".to_string(), surface_id.to_string());
        let node = page.create(spec);
        let root = page.root();
        page.append_child(root, node);
        self.node = Some(node);
        node
    }

    pub fn unmount(&mut self, page: &mut Page) {
        if let Some(node) = self.node.take() {
            page.detach(node);
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}
