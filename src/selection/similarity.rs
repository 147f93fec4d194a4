use crate::overlay::markers::OverlayMarkers;
use crate::page::page_model::{NodeId, Page};

/// Exact (tag name, full class string) pair two similar elements share.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimilarityKey {
    pub tag: String,
    pub class_name: String,
}

pub fn similarity_key(page: &Page, id: NodeId) -> Option<SimilarityKey> {
    let node = page.node(id)?;
    Some(SimilarityKey {
        tag: node.tag.clone(),
        class_name: node.class_name().to_string(),
    })
}

/// Same key, and parents that also share tag and class string.
///
/// Two parentless elements compare equal on the parent check; a parentless
/// element is never similar to one with a parent.
pub fn are_similar(page: &Page, a: NodeId, b: NodeId) -> bool {
    if similarity_key(page, a).is_none() || similarity_key(page, a) != similarity_key(page, b) {
        return false;
    }
    match (page.parent(a), page.parent(b)) {
        (Some(pa), Some(pb)) => similarity_key(page, pa) == similarity_key(page, pb),
        (None, None) => true,
        _ => false,
    }
}

/// Every attached page element similar to `base`, in document order,
/// excluding `base` itself and engine-owned nodes.
pub fn find_similar(page: &Page, base: NodeId, markers: &OverlayMarkers) -> Vec<NodeId> {
    page.all_elements()
        .into_iter()
        .filter(|id| *id != base)
        .filter(|id| !markers.is_engine_node(page, *id))
        .filter(|id| are_similar(page, base, *id))
        .collect()
}
