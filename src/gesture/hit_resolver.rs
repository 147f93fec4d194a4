use std::ops::Deref;

use tracing::debug;

use crate::overlay::markers::OverlayMarkers;
use crate::page::page_model::{NodeId, Page};

/// What a pointer coordinate resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A page-authored element.
    Element(NodeId),
    /// The engine's floating control surface; gestures here select nothing.
    ControlSurface,
    Nothing,
}

impl Resolution {
    pub fn element(self) -> Option<NodeId> {
        match self {
            Resolution::Element(id) => Some(id),
            _ => None,
        }
    }
}

/// Keeps a subtree out of hit testing for as long as it lives.
struct SuppressGuard<'p> {
    page: &'p mut Page,
    node: NodeId,
}

impl<'p> SuppressGuard<'p> {
    fn new(page: &'p mut Page, node: NodeId) -> Self {
        page.suppress_interception(node);
        Self { page, node }
    }
}

impl Deref for SuppressGuard<'_> {
    type Target = Page;

    fn deref(&self) -> &Page {
        self.page
    }
}

impl Drop for SuppressGuard<'_> {
    fn drop(&mut self) {
        self.page.restore_interception(self.node);
    }
}

/// Resolve the page element under a pointer, looking through the engine's
/// own overlay layer.
pub fn resolve(page: &mut Page, markers: &OverlayMarkers, x: f64, y: f64) -> Resolution {
    let Some(hit) = page.element_from_point(x, y) else {
        return Resolution::Nothing;
    };

    let hit = if markers.is_overlay_node(page, hit) {
        let layer = overlay_root(page, markers, hit);
        let guard = SuppressGuard::new(page, layer);
        let below = guard.element_from_point(x, y);
        debug!(?hit, ?below, "looked through overlay layer");
        match below {
            Some(node) => node,
            None => return Resolution::Nothing,
        }
    } else {
        hit
    };

    if markers.is_control_surface(page, hit) {
        return Resolution::ControlSurface;
    }
    if markers.is_engine_node(page, hit) {
        return Resolution::Nothing;
    }
    Resolution::Element(hit)
}

/// Outermost overlay-marked ancestor of `id` (the container when present).
fn overlay_root(page: &Page, markers: &OverlayMarkers, id: NodeId) -> NodeId {
    std::iter::once(id)
        .chain(page.ancestors(id))
        .filter(|n| markers.is_marked_overlay(page, *n))
        .last()
        .unwrap_or(id)
}
