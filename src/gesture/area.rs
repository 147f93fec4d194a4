use std::collections::HashSet;

use crate::overlay::markers::OverlayMarkers;
use crate::overlay::overlay_sync::engine_node;
use crate::page::geometry::Rect;
use crate::page::page_model::{NodeId, Page};

const SELECTION_BOX_Z: i32 = 999_998;

/// In-flight rectangle drag: anchored at pointer-down, resized on move.
#[derive(Debug, Clone)]
pub struct AreaDrag {
    pub anchor: (f64, f64),
    pub current: (f64, f64),
    box_node: NodeId,
}

impl AreaDrag {
    /// Start a drag and render its rectangle inside `container`.
    pub fn begin(
        page: &mut Page,
        markers: &OverlayMarkers,
        container: NodeId,
        x: f64,
        y: f64,
    ) -> Self {
        let mut node = engine_node("div", Rect::new(x, y, 0.0, 0.0), SELECTION_BOX_Z, false);
        node.attributes
            .insert("class".to_string(), markers.selection_box_class.clone());
        node.styles
            .insert("border".to_string(), "2px dashed rgba(59, 130, 246, 0.8)".to_string());
        let box_node = page.create(node);
        page.append_child(container, box_node);

        Self {
            anchor: (x, y),
            current: (x, y),
            box_node,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.anchor.0, self.anchor.1, self.current.0, self.current.1)
    }

    pub fn update(&mut self, page: &mut Page, x: f64, y: f64) {
        self.current = (x, y);
        page.set_rect(self.box_node, self.rect());
    }

    /// Remove the rectangle from the page, returning the final geometry.
    pub fn finish(self, page: &mut Page) -> Rect {
        page.detach(self.box_node);
        self.rect()
    }

    /// Abandon the drag without selecting anything.
    pub fn cancel(self, page: &mut Page) {
        page.detach(self.box_node);
    }
}

/// Outermost page elements fully inside `area`.
///
/// Geometry is sampled now, at finalize time. Engine-owned nodes and
/// collapsed (zero-size) elements are skipped. An element with an ancestor
/// that is itself contained is dropped, so a container and its children are
/// never both returned.
pub fn contained_elements(page: &Page, area: Rect, markers: &OverlayMarkers) -> Vec<NodeId> {
    let contained: Vec<NodeId> = page
        .all_elements()
        .into_iter()
        .filter(|id| !markers.is_engine_node(page, *id))
        .filter(|id| {
            let rect = page.bounding_rect(*id);
            !rect.is_degenerate() && area.contains_rect(&rect)
        })
        .collect();

    let kept: HashSet<NodeId> = contained.iter().copied().collect();
    contained
        .into_iter()
        .filter(|id| !page.ancestors(*id).iter().any(|a| kept.contains(a)))
        .collect()
}
