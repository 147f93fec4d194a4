use crate::page::page_model::{NodeId, Page};

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialized markup of the node's content (own text plus same-layer
/// children).
pub fn inner_html(page: &Page, id: NodeId) -> String {
    let mut out = String::new();
    write_content(page, id, &mut out);
    out
}

fn write_content(page: &Page, id: NodeId, out: &mut String) {
    let Some(node) = page.node(id) else {
        return;
    };
    if let Some(text) = &node.text {
        out.push_str(&escape_text(text));
    }
    for child in page.layer_children(id) {
        write_element(page, child, out);
    }
}

fn write_element(page: &Page, id: NodeId, out: &mut String) {
    let Some(node) = page.node(id) else {
        return;
    };
    out.push('<');
    out.push_str(&node.tag);
    for (name, value) in &node.attributes {
        out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
    }
    out.push('>');

    if VOID_TAGS.contains(&node.tag.as_str()) {
        return;
    }

    write_content(page, id, out);
    out.push_str(&format!("</{}>", node.tag));
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::page_model::NodeSpec;

    #[test]
    fn serializes_nested_markup_with_escaping() {
        let page = Page::from_spec(
            &NodeSpec::new("body").child(
                NodeSpec::new("div")
                    .class("card")
                    .child(NodeSpec::new("b").text("a < b"))
                    .child(NodeSpec::new("input").attr("value", "say \"hi\"")),
            ),
        );
        let div = page.node(page.root()).unwrap().children()[0];
        assert_eq!(
            inner_html(&page, div),
            "<b>a &lt; b</b><input value=\"say &quot;hi&quot;\">"
        );
        assert!(inner_html(&page, page.root()).starts_with("<div class=\"card\">"));
    }
}
