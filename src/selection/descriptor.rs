use std::collections::BTreeMap;

use crate::page::markup::inner_html;
use crate::page::page_model::{NodeId, Page};
use crate::page::paths::{css_selector, parent_chain, xpath};
use crate::selection::selection_model::ElementDescriptor;

/// Style properties captured by default.
pub const DEFAULT_CAPTURED_STYLES: &[&str] = &[
    "display",
    "position",
    "width",
    "height",
    "padding",
    "margin",
    "color",
    "background-color",
    "font-size",
    "font-family",
    "font-weight",
    "border",
    "border-radius",
    "box-shadow",
    "opacity",
    "z-index",
];

/// Snapshot `id` as it is laid out right now.
pub fn describe(
    page: &Page,
    id: NodeId,
    captured_styles: &[String],
    max_text_len: usize,
) -> Option<ElementDescriptor> {
    let node = page.node(id)?;

    let computed_styles: BTreeMap<String, String> = captured_styles
        .iter()
        .filter_map(|name| node.styles.get(name).map(|v| (name.clone(), v.clone())))
        .collect();

    Some(ElementDescriptor {
        tag_name: node.tag.clone(),
        class_name: node.class_name().to_string(),
        id_attribute: node.id_attr().to_string(),
        text: truncate_text(&page.text_content(id), max_text_len),
        html: inner_html(page, id),
        attributes: node.attributes.clone(),
        computed_styles,
        bounding_box: page.bounding_rect(id),
        css_selector: css_selector(page, id),
        xpath: xpath(page, id),
        parent_chain: parent_chain(page, id),
        children: page.layer_children(id).len(),
    })
}

/// Cut at a char boundary and mark the cut with an ellipsis.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
