mod common;

use element_picker::error::PickerError;
use element_picker::page::geometry::Rect;
use element_picker::page::page_model::{Layer, Node, NodeSpec, Page};
use element_picker::page::markup::inner_html;
use element_picker::page::paths::query_css_path;

use crate::common::utils::{by_id, fixture, fixture_page, fixture_spec, items};

// ============================================================================
// Loading
// ============================================================================

#[test]
fn json_fixture_matches_builder_page() {
    let loaded = Page::load(&fixture("page.json")).unwrap();
    let built = fixture_page();

    assert_eq!(loaded.all_elements().len(), built.all_elements().len());
    let save = by_id(&loaded, "save");
    assert_eq!(loaded.bounding_rect(save), Rect::new(10.0, 10.0, 80.0, 30.0));
    assert_eq!(loaded.text_content(by_id(&loaded, "cards")), "Card A Card B");
}

#[test]
fn node_spec_json_roundtrip() {
    let spec = fixture_spec();
    let json = serde_json::to_string(&spec).unwrap();
    let parsed: NodeSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, spec);
}

#[test]
fn root_must_be_body() {
    let err = Page::from_json(r#"{"tag": "div"}"#).unwrap_err();
    assert!(matches!(err, PickerError::PageStructure(_)));

    let err = Page::from_json("{ not json").unwrap_err();
    assert!(matches!(err, PickerError::JsonParse { .. }));
}

#[test]
fn missing_fixture_is_io_error() {
    let err = Page::load("tests/fixtures/nope.json").unwrap_err();
    assert!(matches!(err, PickerError::Io { .. }));
    assert!(err.to_string().contains("nope.json"));
}

// ============================================================================
// Tree operations
// ============================================================================

#[test]
fn detached_nodes_measure_as_zero_rect() {
    let mut page = fixture_page();
    let list = by_id(&page, "list");
    let first = items(&page)[0];

    page.detach(list);

    assert!(!page.is_attached(list));
    assert!(!page.is_attached(first));
    assert!(page.bounding_rect(first).is_degenerate());
    assert!(page.element_by_id("list").is_none());
    // The handle stays usable.
    assert_eq!(page.node(first).unwrap().tag, "li");
}

#[test]
fn hidden_ancestor_hides_descendants() {
    let mut page = fixture_page();
    let toolbar = by_id(&page, "toolbar");
    let save = by_id(&page, "save");

    page.node_mut(toolbar).unwrap().displayed = false;

    assert!(!page.is_displayed(save));
    assert_eq!(page.bounding_rect(save), Rect::default());
}

#[test]
fn scrolling_moves_page_nodes_but_not_engine_nodes() {
    let mut page = fixture_page();
    let save = by_id(&page, "save");
    let mut fixed = Node::new("div", Layer::Engine);
    fixed.rect = Rect::new(0.0, 0.0, 50.0, 50.0);
    let fixed = page.create(fixed);
    let root = page.root();
    page.append_child(root, fixed);

    page.scroll_by(5.0, 10.0);

    assert_eq!(page.bounding_rect(save), Rect::new(5.0, 0.0, 80.0, 30.0));
    assert_eq!(page.bounding_rect(fixed), Rect::new(0.0, 0.0, 50.0, 50.0));
    assert_eq!(page.bounding_rect(root), Rect::new(0.0, 0.0, 1024.0, 768.0));
    assert_eq!(page.engine_node_count(), 1);
}

#[test]
fn css_paths_ignore_engine_siblings() {
    let mut page = fixture_page();
    let cards = by_id(&page, "cards");
    let card_b = page.node(cards).unwrap().children()[1];
    let root = page.root();
    let overlay = page.create(Node::new("div", Layer::Engine));
    page.append_child(root, overlay);

    assert_eq!(query_css_path(&page, "body > div:nth-of-type(2)"), Some(cards));
    assert_eq!(query_css_path(&page, "#cards > div:nth-of-type(2)"), Some(card_b));
    assert_eq!(query_css_path(&page, "body > div:nth-of-type(3)"), None);
}

#[test]
fn ancestors_are_nearest_first() {
    let page = fixture_page();
    let title = page.elements_by_class("title")[0];
    let tags: Vec<String> = page
        .ancestors(title)
        .into_iter()
        .map(|a| page.node(a).unwrap().tag.clone())
        .collect();

    assert_eq!(tags, vec!["div", "div", "body"]);
    assert!(page.is_ancestor(by_id(&page, "cards"), title));
    assert!(!page.is_ancestor(title, by_id(&page, "cards")));
}

#[test]
fn content_ignores_engine_layer_children() {
    let mut page = fixture_page();
    let root = page.root();
    let mut label = Node::new("div", Layer::Engine);
    label.text = Some("#1".into());
    let label = page.create(label);
    page.append_child(root, label);

    assert_eq!(page.layer_children(root).len(), 3);
    assert!(!page.text_content(root).contains("#1"));
    assert!(!inner_html(&page, root).ends_with("<div>#1</div>"));
    assert_eq!(page.text_content(label), "#1");
}
