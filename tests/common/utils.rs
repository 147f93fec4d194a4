use element_picker::engine::engine::Engine;
use element_picker::engine::engine_config::EngineConfig;
use element_picker::engine::notify::NotificationLog;
use element_picker::gesture::events::PointerEvent;
use element_picker::page::page_model::{NodeId, NodeSpec, Page};
use element_picker::selection::selection_model::SelectionMode;

pub fn fixture(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    let path = base.join("tests").join("fixtures").join(name);
    path.display().to_string()
}

/// Toolbar with three buttons, a three-item list, and two cards:
///
/// ```text
/// body                      0,0     1024x768
///   div#toolbar.toolbar     0,0     1024x50
///     button#save.btn       10,10   80x30
///     button#load.btn       100,10  80x30
///     button#run.btn.primary 190,10 80x30
///   ul#list.items           0,100   400x300
///     li.item  One          10,110  380x40
///     li.item  Two          10,160  380x40
///     li.item  Three        10,210  380x40
///   div#cards               500,100 500x400
///     div.card              510,110 200x150
///       p.title Card A      520,120 180x20
///     div.card              720,110 200x150
///       p.title Card B      730,120 180x20
/// ```
pub fn fixture_spec() -> NodeSpec {
    NodeSpec::new("body")
        .rect(0.0, 0.0, 1024.0, 768.0)
        .child(
            NodeSpec::new("div")
                .id("toolbar")
                .class("toolbar")
                .rect(0.0, 0.0, 1024.0, 50.0)
                .child(button("save", "btn", "Save", 10.0))
                .child(button("load", "btn", "Load", 100.0))
                .child(button("run", "btn primary", "Run", 190.0)),
        )
        .child(
            NodeSpec::new("ul")
                .id("list")
                .class("items")
                .rect(0.0, 100.0, 400.0, 300.0)
                .child(item("One", 110.0))
                .child(item("Two", 160.0))
                .child(item("Three", 210.0)),
        )
        .child(
            NodeSpec::new("div")
                .id("cards")
                .rect(500.0, 100.0, 500.0, 400.0)
                .child(card("Card A", 510.0))
                .child(card("Card B", 720.0)),
        )
}

fn button(id: &str, class: &str, label: &str, x: f64) -> NodeSpec {
    NodeSpec::new("button")
        .id(id)
        .class(class)
        .text(label)
        .style("color", "white")
        .style("background-color", "blue")
        .rect(x, 10.0, 80.0, 30.0)
}

fn item(label: &str, y: f64) -> NodeSpec {
    NodeSpec::new("li")
        .class("item")
        .text(label)
        .rect(10.0, y, 380.0, 40.0)
}

fn card(title: &str, x: f64) -> NodeSpec {
    NodeSpec::new("div")
        .class("card")
        .rect(x, 110.0, 200.0, 150.0)
        .child(
            NodeSpec::new("p")
                .class("title")
                .text(title)
                .rect(x + 10.0, 120.0, 180.0, 20.0),
        )
}

pub fn fixture_page() -> Page {
    Page::from_spec(&fixture_spec())
}

pub fn engine_with(config: EngineConfig) -> Engine {
    Engine::new(fixture_page(), config)
}

/// Activated engine in `mode` with a notification log that starts empty.
pub fn active_engine(mode: SelectionMode) -> (Engine, NotificationLog) {
    let config = EngineConfig {
        default_mode: mode,
        ..EngineConfig::default()
    };
    active_engine_with(config)
}

pub fn active_engine_with(config: EngineConfig) -> (Engine, NotificationLog) {
    let mut engine = engine_with(config);
    let log = NotificationLog::new();
    engine.subscribe(log.sink());
    engine.activate();
    log.clear();
    (engine, log)
}

pub fn by_id(page: &Page, id_attr: &str) -> NodeId {
    page.element_by_id(id_attr)
        .unwrap_or_else(|| panic!("no element with id '{}'", id_attr))
}

/// The three list items, in document order.
pub fn items(page: &Page) -> Vec<NodeId> {
    page.elements_by_class("item")
}

pub fn center(page: &Page, node: NodeId) -> (f64, f64) {
    let r = page.bounding_rect(node);
    (r.x + r.width / 2.0, r.y + r.height / 2.0)
}

pub fn click_node(engine: &mut Engine, node: NodeId) {
    let (x, y) = center(engine.page(), node);
    engine.dispatch(PointerEvent::click(x, y));
}

pub fn click_id(engine: &mut Engine, id_attr: &str) {
    let node = by_id(engine.page(), id_attr);
    click_node(engine, node);
}

pub fn click_item(engine: &mut Engine, index: usize) {
    let node = items(engine.page())[index];
    click_node(engine, node);
}

pub fn drag(engine: &mut Engine, from: (f64, f64), to: (f64, f64)) {
    engine.dispatch(PointerEvent::down(from.0, from.1));
    engine.dispatch(PointerEvent::moved(to.0, to.1));
    engine.dispatch(PointerEvent::up(to.0, to.1));
}

/// Captured text of each selected element, in insertion order.
pub fn selected_texts(engine: &Engine) -> Vec<String> {
    engine
        .selection()
        .iter()
        .map(|e| e.selected.descriptor.text.clone())
        .collect()
}

pub fn selected_tags(engine: &Engine) -> Vec<String> {
    engine
        .selection()
        .iter()
        .map(|e| e.selected.descriptor.tag_name.clone())
        .collect()
}

/// Text of every attached overlay label, in page order.
pub fn label_texts(page: &Page) -> Vec<String> {
    page.elements_by_class("picker-label")
        .into_iter()
        .filter_map(|n| page.node(n).and_then(|n| n.text.clone()))
        .collect()
}
