mod common;

use element_picker::engine::engine::{Engine, GESTURE_LISTENER_OWNER};
use element_picker::engine::engine_config::EngineConfig;
use element_picker::engine::keyboard::{KeyCommand, KeyEvent};
use element_picker::engine::notify::{Notification, NotificationLog};
use element_picker::gesture::events::{EventOutcome, PointerEvent};
use element_picker::selection::selection_model::SelectionMode;

use crate::common::utils::{
    active_engine, click_id, click_item, engine_with, fixture_page, selected_texts,
};

fn logged_engine() -> (Engine, NotificationLog) {
    let mut engine = engine_with(EngineConfig::default());
    let log = NotificationLog::new();
    engine.subscribe(log.sink());
    (engine, log)
}

// ============================================================================
// Activation lifecycle
// ============================================================================

#[test]
fn activate_is_idempotent() {
    let (mut engine, log) = logged_engine();

    engine.activate();
    engine.activate();

    assert!(engine.is_active());
    assert_eq!(engine.page().listener_count(), 4);
    assert_eq!(
        engine.page().listeners().count_owned_by(GESTURE_LISTENER_OWNER),
        4
    );
    assert_eq!(log.state_changes().len(), 1);
    assert!(log.state_changes()[0].active);
}

#[test]
fn deactivate_restores_the_page() {
    let (mut engine, log) = logged_engine();
    let nodes_before = engine.page().all_elements().len();

    engine.activate();
    click_item(&mut engine, 0);
    click_id(&mut engine, "save");
    engine.dispatch(PointerEvent::moved(200.0, 230.0));
    engine.deactivate();

    assert!(!engine.is_active());
    assert_eq!(engine.page().listener_count(), 0);
    assert_eq!(engine.page().engine_node_count(), 0);
    assert_eq!(engine.page().all_elements().len(), nodes_before);
    assert!(engine.selection().is_empty());
    let last = log.state_changes().pop().unwrap();
    assert!(!last.active);
    assert!(last.selected_elements.is_empty());
}

#[test]
fn deactivate_is_idempotent() {
    let (mut engine, log) = logged_engine();

    engine.deactivate();
    assert!(log.is_empty());

    engine.activate();
    engine.deactivate();
    let published = log.len();
    engine.deactivate();
    assert_eq!(log.len(), published);
}

#[test]
fn repeated_cycles_leak_nothing() {
    let (mut engine, _log) = logged_engine();

    for _ in 0..5 {
        engine.activate();
        click_item(&mut engine, 1);
        engine.deactivate();
    }

    assert_eq!(engine.page().listener_count(), 0);
    assert_eq!(engine.page().engine_node_count(), 0);
}

#[test]
fn reactivated_engine_selects_normally() {
    let (mut engine, _log) = logged_engine();
    engine.activate();
    click_item(&mut engine, 0);
    engine.deactivate();

    engine.activate();
    click_item(&mut engine, 2);

    assert_eq!(selected_texts(&engine), vec!["Three"]);
    assert_eq!(engine.overlay().len(), 1);
}

#[test]
fn deactivate_mid_drag_leaves_no_rectangle() {
    let (mut engine, _log) = active_engine(SelectionMode::Area);
    engine.dispatch(PointerEvent::down(5.0, 105.0));
    engine.dispatch(PointerEvent::moved(300.0, 300.0));

    engine.deactivate();

    assert!(!engine.router().is_dragging());
    assert!(engine.page().elements_by_class("picker-selection-box").is_empty());
    assert_eq!(engine.dispatch(PointerEvent::up(300.0, 300.0)), EventOutcome::Ignored);
    assert!(engine.selection().is_empty());
}

#[test]
fn toggle_flips_activation() {
    let (mut engine, _log) = logged_engine();

    engine.toggle();
    assert!(engine.is_active());
    engine.toggle();
    assert!(!engine.is_active());
}

#[test]
fn teardown_releases_everything() {
    let (mut engine, _log) = active_engine(SelectionMode::Multiple);
    click_item(&mut engine, 0);

    engine.teardown();

    assert!(!engine.is_active());
    assert_eq!(engine.page().listener_count(), 0);
    assert_eq!(engine.page().engine_node_count(), 0);

    // Inactive teardown is harmless.
    engine.teardown();
}

// ============================================================================
// Event routing
// ============================================================================

#[test]
fn inactive_engine_ignores_pointer_events() {
    let mut engine = Engine::new(fixture_page(), EngineConfig::default());

    assert_eq!(engine.dispatch(PointerEvent::click(200.0, 130.0)), EventOutcome::Ignored);
    assert!(engine.selection().is_empty());
}

#[test]
fn clicks_are_consumed_and_moves_are_not() {
    let (mut engine, _log) = active_engine(SelectionMode::Multiple);

    assert_eq!(engine.dispatch(PointerEvent::moved(200.0, 130.0)), EventOutcome::Ignored);
    assert!(engine.dispatch(PointerEvent::click(200.0, 130.0)).is_consumed());
}

#[test]
fn tick_is_inert_while_inactive() {
    let mut engine = Engine::new(fixture_page(), EngineConfig::default());
    assert!(engine.tick().is_empty());
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn key_mapping() {
    assert_eq!(
        KeyCommand::from_event(&KeyEvent::ctrl_shift("E"), false),
        Some(KeyCommand::ToggleActive)
    );
    assert_eq!(KeyCommand::from_event(&KeyEvent::plain("Escape"), false), None);
    assert_eq!(
        KeyCommand::from_event(&KeyEvent::plain("Escape"), true),
        Some(KeyCommand::ClearAndExit)
    );
    assert_eq!(
        KeyCommand::from_event(&KeyEvent::ctrl("a"), true),
        Some(KeyCommand::SelectAllSimilar)
    );
    assert_eq!(KeyCommand::from_event(&KeyEvent::plain("a"), true), None);
    assert_eq!(
        KeyCommand::from_event(&KeyEvent::plain("Backspace"), true),
        Some(KeyCommand::RemoveLast)
    );
}

#[test]
fn shortcut_toggles_activation() {
    let (mut engine, _log) = logged_engine();

    assert!(engine.handle_key(&KeyEvent::ctrl_shift("e")).is_consumed());
    assert!(engine.is_active());

    engine.handle_key(&KeyEvent::ctrl_shift("E"));
    assert!(!engine.is_active());
}

#[test]
fn escape_clears_and_exits() {
    let (mut engine, _log) = active_engine(SelectionMode::Multiple);
    click_item(&mut engine, 0);

    engine.handle_key(&KeyEvent::plain("Escape"));

    assert!(!engine.is_active());
    assert!(engine.selection().is_empty());
    assert_eq!(engine.page().engine_node_count(), 0);
}

#[test]
fn delete_removes_the_last_selection() {
    let (mut engine, _log) = active_engine(SelectionMode::Multiple);
    click_item(&mut engine, 0);
    click_item(&mut engine, 1);

    engine.handle_key(&KeyEvent::plain("Delete"));

    assert_eq!(selected_texts(&engine), vec!["One"]);
}

#[test]
fn unbound_keys_are_ignored() {
    let (mut engine, _log) = active_engine(SelectionMode::Multiple);
    assert_eq!(engine.handle_key(&KeyEvent::plain("x")), EventOutcome::Ignored);
}

// ============================================================================
// Notification wire format
// ============================================================================

#[test]
fn notifications_serialize_with_type_tags() {
    let (mut engine, log) = active_engine(SelectionMode::Multiple);
    click_id(&mut engine, "save");

    let all = log.all();
    let selected = serde_json::to_value(&all[0]).unwrap();
    assert_eq!(selected["type"], "element_selected");
    assert_eq!(selected["selected_element"]["descriptor"]["tag_name"], "button");

    let state = serde_json::to_value(&all[1]).unwrap();
    assert_eq!(state["type"], "state_changed");
    assert_eq!(state["active"], true);
    assert_eq!(state["mode"], "multiple");
    assert_eq!(state["selected_elements"].as_array().unwrap().len(), 1);

    let back: Notification = serde_json::from_value(state).unwrap();
    assert_eq!(back, all[1]);
}
