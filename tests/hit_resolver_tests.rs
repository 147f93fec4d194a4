mod common;

use element_picker::engine::engine_config::EngineConfig;
use element_picker::gesture::events::{EventOutcome, PointerEvent};
use element_picker::gesture::hit_resolver::{resolve, Resolution};
use element_picker::overlay::markers::OverlayMarkers;
use element_picker::page::geometry::Rect;
use element_picker::selection::selection_model::SelectionMode;

use crate::common::utils::{active_engine, active_engine_with, by_id, click_item, fixture_page, items};

// ============================================================================
// Plain page resolution
// ============================================================================

#[test]
fn resolves_deepest_page_element() {
    let mut page = fixture_page();
    let markers = OverlayMarkers::default();
    let save = by_id(&page, "save");

    assert_eq!(resolve(&mut page, &markers, 50.0, 25.0), Resolution::Element(save));
}

#[test]
fn point_outside_the_page_resolves_to_nothing() {
    let mut page = fixture_page();
    let markers = OverlayMarkers::default();

    assert_eq!(resolve(&mut page, &markers, 2000.0, 2000.0), Resolution::Nothing);
}

// ============================================================================
// Looking through the engine's own overlays
// ============================================================================

#[test]
fn highlight_box_is_topmost_but_resolves_to_element_beneath() {
    let (mut engine, _log) = active_engine(SelectionMode::Multiple);
    click_item(&mut engine, 0);
    let first = items(engine.page())[0];

    // The raw hit test sees the selected box painted over the item.
    let raw = engine.page().element_from_point(200.0, 130.0).unwrap();
    assert!(engine.page().node(raw).unwrap().has_class("picker-selected"));

    assert_eq!(engine.resolve(200.0, 130.0), Resolution::Element(first));
}

#[test]
fn label_over_a_neighbour_resolves_to_the_neighbour() {
    let (mut engine, _log) = active_engine(SelectionMode::Multiple);
    // Label of the second item sits 28px above it, over the first item.
    click_item(&mut engine, 1);
    let first = items(engine.page())[0];

    let raw = engine.page().element_from_point(200.0, 140.0).unwrap();
    assert!(engine.page().node(raw).unwrap().has_class("picker-label"));

    assert_eq!(engine.resolve(200.0, 140.0), Resolution::Element(first));
}

#[test]
fn overlay_interception_is_restored_after_resolution() {
    let (mut engine, _log) = active_engine(SelectionMode::Multiple);
    click_item(&mut engine, 0);
    let container = engine.overlay().container().unwrap();

    engine.resolve(200.0, 130.0);

    assert!(!engine.page().is_suppressed(container));
    let raw = engine.page().element_from_point(200.0, 130.0).unwrap();
    assert!(engine.page().node(raw).unwrap().has_class("picker-selected"));
}

#[test]
fn hover_highlight_never_captures_the_pointer() {
    let (mut engine, _log) = active_engine(SelectionMode::Multiple);
    let second = items(engine.page())[1];

    engine.dispatch(PointerEvent::moved(200.0, 180.0));
    assert_eq!(engine.hover().hovered(), Some(second));

    assert_eq!(engine.resolve(200.0, 180.0), Resolution::Element(second));
}

// ============================================================================
// Control surface
// ============================================================================

fn engine_with_surface() -> element_picker::engine::engine::Engine {
    let config = EngineConfig {
        control_surface: Some(Rect::new(900.0, 700.0, 100.0, 60.0)),
        ..EngineConfig::default()
    };
    active_engine_with(config).0
}

#[test]
fn control_surface_resolves_as_its_own_category() {
    let mut engine = engine_with_surface();
    assert_eq!(engine.resolve(950.0, 730.0), Resolution::ControlSurface);
}

#[test]
fn clicks_on_control_surface_pass_through_and_select_nothing() {
    let mut engine = engine_with_surface();

    let outcome = engine.dispatch(PointerEvent::click(950.0, 730.0));

    assert_eq!(outcome, EventOutcome::Ignored);
    assert!(engine.selection().is_empty());
}

#[test]
fn control_surface_is_unmounted_on_deactivate() {
    let mut engine = engine_with_surface();
    engine.deactivate();

    assert_eq!(engine.page().element_by_id("picker-control-surface"), None);
    assert_eq!(engine.page().engine_node_count(), 0);
}
