use crate::page::page_model::{Layer, NodeId, Page};

// ============================================================================
// Structural paths: XPath-like, CSS selector, parent chain
// ============================================================================

/// XPath-like structural path from the root, e.g. `/body/div[2]/ul/li[3]`.
///
/// The `[n]` index is emitted only when the node has same-tag siblings.
/// Engine-layer siblings never count, so overlays do not shift page paths.
pub fn xpath(page: &Page, id: NodeId) -> String {
    let mut segments = Vec::new();
    let mut current = Some(id);

    while let Some(node_id) = current {
        let Some(node) = page.node(node_id) else {
            break;
        };
        let siblings = page.siblings(node_id);
        let same_tag: Vec<NodeId> = siblings
            .iter()
            .copied()
            .filter(|s| page.node(*s).is_some_and(|n| n.tag == node.tag && n.layer == node.layer))
            .collect();

        if same_tag.len() > 1 {
            let index = same_tag.iter().position(|s| *s == node_id).unwrap_or(0);
            segments.push(format!("{}[{}]", node.tag, index + 1));
        } else {
            segments.push(node.tag.clone());
        }
        current = node.parent();
    }

    if segments.is_empty() {
        return String::new();
    }
    segments.reverse();
    format!("/{}", segments.join("/"))
}

/// CSS selector path, e.g. `#main > ul > li:nth-of-type(2)`.
///
/// Stops at the first ancestor with an `id`.
pub fn css_selector(page: &Page, id: NodeId) -> String {
    let mut segments = Vec::new();
    let mut current = Some(id);

    while let Some(node_id) = current {
        let Some(node) = page.node(node_id) else {
            break;
        };
        if !node.id_attr().is_empty() {
            segments.push(format!("#{}", node.id_attr()));
            break;
        }

        let nth = page
            .siblings(node_id)
            .iter()
            .take_while(|s| **s != node_id)
            .filter(|s| page.node(**s).is_some_and(|n| n.tag == node.tag && n.layer == node.layer))
            .count()
            + 1;

        if nth == 1 {
            segments.push(node.tag.clone());
        } else {
            segments.push(format!("{}:nth-of-type({})", node.tag, nth));
        }
        current = node.parent();
    }

    segments.reverse();
    segments.join(" > ")
}

/// Compact descriptor: `tag#id.class1.class2`.
pub fn node_descriptor(page: &Page, id: NodeId) -> String {
    let Some(node) = page.node(id) else {
        return String::new();
    };
    let mut out = node.tag.clone();
    if !node.id_attr().is_empty() {
        out.push('#');
        out.push_str(node.id_attr());
    }
    for class in node.class_name().split_whitespace() {
        out.push('.');
        out.push_str(class);
    }
    out
}

/// Short label: `tag#id`, else `tag.firstClass`, else `tag`.
pub fn short_label(page: &Page, id: NodeId) -> String {
    let Some(node) = page.node(id) else {
        return String::new();
    };
    if !node.id_attr().is_empty() {
        format!("{}#{}", node.tag, node.id_attr())
    } else if let Some(class) = node.first_class() {
        format!("{}.{}", node.tag, class)
    } else {
        node.tag.clone()
    }
}

/// Ancestor descriptors nearest first, stopping below the root.
pub fn parent_chain(page: &Page, id: NodeId) -> Vec<String> {
    page.ancestors(id)
        .into_iter()
        .filter(|a| *a != page.root())
        .map(|a| node_descriptor(page, a))
        .collect()
}

/// Resolve a path produced by `css_selector` back to an attached node.
pub fn query_css_path(page: &Page, path: &str) -> Option<NodeId> {
    let mut segments = path.split(" > ").map(str::trim);
    let first = segments.next()?;

    let mut current = if let Some(id_attr) = first.strip_prefix('#') {
        page.element_by_id(id_attr)?
    } else {
        let (tag, nth) = parse_segment(first)?;
        let root = page.root();
        if nth != 1 || page.node(root)?.tag != tag {
            return None;
        }
        root
    };

    for segment in segments {
        let (tag, nth) = parse_segment(segment)?;
        current = page
            .node(current)?
            .children()
            .iter()
            .copied()
            .filter(|c| page.node(*c).is_some_and(|n| n.tag == tag && n.layer == Layer::Page))
            .nth(nth - 1)?;
    }

    Some(current)
}

fn parse_segment(segment: &str) -> Option<(String, usize)> {
    match segment.split_once(":nth-of-type(") {
        Some((tag, rest)) => {
            let n: usize = rest.strip_suffix(')')?.parse().ok()?;
            (n >= 1).then(|| (tag.to_lowercase(), n))
        }
        None => Some((segment.to_lowercase(), 1)),
    }
}
