use tracing::{debug, info};

use crate::engine::engine_config::EngineConfig;
use crate::engine::keyboard::{KeyCommand, KeyEvent};
use crate::engine::notify::NotificationSink;
use crate::gesture::events::{EventOutcome, PointerEvent, PointerKind};
use crate::gesture::hit_resolver::{resolve, Resolution};
use crate::gesture::hover::HoverHighlight;
use crate::gesture::router::{SelectionPlan, StrategyRouter};
use crate::overlay::control_surface::ControlSurface;
use crate::overlay::overlay_sync::OverlaySync;
use crate::page::listeners::{EventKind, ListenerId};
use crate::page::page_model::{NodeId, Page};
use crate::selection::selection_model::{EngineStatus, SelectionMode, StateSnapshot};
use crate::selection::selection_set::SelectionSet;
use crate::selection::selection_state::{SelectionState, ToggleOutcome};
use crate::selection::similarity::find_similar;

pub const GESTURE_LISTENER_OWNER: &str = "picker.gesture";

const GESTURE_EVENTS: [EventKind; 4] = [
    EventKind::PointerMove,
    EventKind::PointerDown,
    EventKind::PointerUp,
    EventKind::Click,
];

/// Selection engine bound to one page.
///
/// `activate` acquires every listener and overlay resource; `deactivate`
/// releases all of them and empties the selection. Nothing is global, so
/// independent engines can run side by side.
#[derive(Debug)]
pub struct Engine {
    page: Page,
    config: EngineConfig,
    active: bool,
    router: StrategyRouter,
    state: SelectionState,
    hover: HoverHighlight,
    control: ControlSurface,
    gesture_listeners: Vec<ListenerId>,
}

impl Engine {
    pub fn new(page: Page, config: EngineConfig) -> Self {
        Self {
            router: StrategyRouter::new(config.default_mode),
            state: SelectionState::new(&config),
            hover: HoverHighlight::new(config.label_offset),
            control: ControlSurface::default(),
            gesture_listeners: Vec::new(),
            active: false,
            page,
            config,
        }
    }

    pub fn subscribe(&mut self, sink: Box<dyn NotificationSink>) {
        self.state.subscribe(sink);
    }

    fn status(&self) -> EngineStatus {
        EngineStatus {
            active: self.active,
            mode: self.router.mode(),
        }
    }

    // ========================================================================
    // Command surface
    // ========================================================================

    /// Start intercepting gestures. Idempotent.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;

        let container = self.state.overlay_mut().mount(&mut self.page);
        self.hover.mount(
            &mut self.page,
            &self.config.markers,
            container,
            &self.config.highlight_color,
        );
        if let Some(rect) = self.config.control_surface {
            self.control
                .mount(&mut self.page, rect, &self.config.markers.control_surface_id);
        }

        for kind in GESTURE_EVENTS {
            let id = self
                .page
                .listeners_mut()
                .add(kind, true, GESTURE_LISTENER_OWNER);
            self.gesture_listeners.push(id);
        }

        info!(mode = %self.router.mode(), "selection activated");
        self.state.publish_state(self.status());
    }

    /// Stop intercepting gestures and return the page to its
    /// pre-activation condition. Idempotent.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        self.router.cancel(&mut self.page);
        self.hover.unmount(&mut self.page);
        for id in self.gesture_listeners.drain(..) {
            self.page.listeners_mut().remove(id);
        }

        let status = self.status();
        self.state.clear(&mut self.page, status);
        self.state.overlay_mut().sweep(&mut self.page);
        self.control.unmount(&mut self.page);

        info!("selection deactivated");
    }

    pub fn toggle(&mut self) {
        if self.active {
            self.deactivate();
        } else {
            self.activate();
        }
    }

    /// Switch strategy. Entering `smart` immediately expands from the most
    /// recently selected element; entering `single` keeps only that element.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.router.set_mode(&mut self.page, mode);
        self.hover.hide(&mut self.page);
        info!(%mode, "selection mode set");

        match mode {
            SelectionMode::Smart if !self.select_all_similar().is_empty() => return,
            SelectionMode::Single => {
                let status = self.status();
                if !self.state.keep_last(&mut self.page, status).is_empty() {
                    return;
                }
            }
            _ => {}
        }
        self.state.publish_state(self.status());
    }

    pub fn clear_selection(&mut self) {
        let status = self.status();
        self.state.clear(&mut self.page, status);
    }

    /// Deselect by identity. Unknown identities are a no-op.
    pub fn remove_element(&mut self, identity: &str) -> bool {
        let status = self.status();
        self.state.remove(&mut self.page, identity, status)
    }

    pub fn get_state(&self) -> StateSnapshot {
        self.state.snapshot(self.status())
    }

    /// Similarity expansion from the last selected element. Returns the
    /// newly selected identities.
    pub fn select_all_similar(&mut self) -> Vec<String> {
        let Some(base) = self.state.set().last().map(|e| e.node) else {
            return Vec::new();
        };
        if !self.page.is_attached(base) {
            return Vec::new();
        }
        self.expand_from(base)
    }

    pub fn remove_last(&mut self) -> Option<String> {
        let status = self.status();
        self.state.remove_last(&mut self.page, status)
    }

    /// Periodic re-measurement of overlay geometry. Returns identities of
    /// selections dropped because their element went away.
    pub fn tick(&mut self) -> Vec<String> {
        if !self.active {
            return Vec::new();
        }
        if let Some(hovered) = self.hover.hovered() {
            if !self.page.is_attached(hovered) {
                self.hover.hide(&mut self.page);
            }
        }
        let status = self.status();
        self.state.refresh(&mut self.page, status)
    }

    /// Page is going away: drop all state and artifacts.
    pub fn teardown(&mut self) {
        if self.active {
            self.deactivate();
        } else {
            self.router.cancel(&mut self.page);
            if !self.state.set().is_empty() {
                let status = self.status();
                self.state.clear(&mut self.page, status);
            }
            self.state.overlay_mut().sweep(&mut self.page);
            self.control.unmount(&mut self.page);
        }
    }

    // ========================================================================
    // Event entry points
    // ========================================================================

    /// Capture-phase pointer handling. Inactive engines ignore everything.
    pub fn dispatch(&mut self, event: PointerEvent) -> EventOutcome {
        if !self.active {
            return EventOutcome::Ignored;
        }
        match event.kind {
            PointerKind::Move => self.on_pointer_move(event.x, event.y),
            PointerKind::Down => self.on_pointer_down(event.x, event.y),
            PointerKind::Up => self.on_pointer_up(event.x, event.y),
            PointerKind::Click => self.on_click(event.x, event.y),
        }
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> EventOutcome {
        let Some(command) = KeyCommand::from_event(event, self.active) else {
            return EventOutcome::Ignored;
        };
        debug!(?command, "keyboard command");
        match command {
            KeyCommand::ToggleActive => self.toggle(),
            KeyCommand::ClearAndExit => {
                self.clear_selection();
                self.deactivate();
            }
            KeyCommand::SelectAllSimilar => {
                self.select_all_similar();
            }
            KeyCommand::RemoveLast => {
                self.remove_last();
            }
        }
        EventOutcome::Consumed
    }

    /// Hit-resolve a point without acting on it.
    pub fn resolve(&mut self, x: f64, y: f64) -> Resolution {
        resolve(&mut self.page, &self.config.markers, x, y)
    }

    fn on_pointer_move(&mut self, x: f64, y: f64) -> EventOutcome {
        self.state
            .overlay_mut()
            .on_pointer_move(&mut self.page, x, y);

        if self.router.update_drag(&mut self.page, x, y) {
            return EventOutcome::Ignored;
        }

        match self.resolve(x, y) {
            Resolution::Element(node) => self.hover.show(&mut self.page, node),
            Resolution::ControlSurface => self.hover.hide(&mut self.page),
            Resolution::Nothing => {}
        }
        EventOutcome::Ignored
    }

    fn on_pointer_down(&mut self, x: f64, y: f64) -> EventOutcome {
        if self.router.mode() != SelectionMode::Area {
            return EventOutcome::Ignored;
        }
        if self.resolve(x, y) == Resolution::ControlSurface {
            return EventOutcome::Ignored;
        }
        self.hover.hide(&mut self.page);
        let container = self.state.overlay_mut().mount(&mut self.page);
        self.router
            .begin_drag(&mut self.page, &self.config.markers, container, x, y);
        EventOutcome::Consumed
    }

    fn on_pointer_up(&mut self, x: f64, y: f64) -> EventOutcome {
        match self
            .router
            .finish_drag(&mut self.page, &self.config.markers, x, y)
        {
            Some(plan) => {
                self.execute(plan);
                EventOutcome::Consumed
            }
            None => EventOutcome::Ignored,
        }
    }

    fn on_click(&mut self, x: f64, y: f64) -> EventOutcome {
        let resolution = self.resolve(x, y);
        if resolution == Resolution::ControlSurface {
            return EventOutcome::Ignored;
        }
        if let Some(plan) = resolution.element().and_then(|n| self.router.plan_click(n)) {
            self.execute(plan);
        }
        EventOutcome::Consumed
    }

    fn execute(&mut self, plan: SelectionPlan) {
        let status = self.status();
        debug!(?plan, "executing selection plan");
        match plan {
            SelectionPlan::Replace(node) => {
                self.state.replace(&mut self.page, node, status);
            }
            SelectionPlan::Toggle(node) => {
                self.state.toggle(&mut self.page, node, status);
            }
            SelectionPlan::ToggleBatch(nodes) => {
                if !nodes.is_empty() {
                    self.state.toggle_batch(&mut self.page, &nodes, status);
                }
            }
            SelectionPlan::ToggleAndExpand(node) => {
                if let ToggleOutcome::Inserted(_) =
                    self.state.toggle(&mut self.page, node, status)
                {
                    self.expand_from(node);
                }
            }
        }
    }

    fn expand_from(&mut self, base: NodeId) -> Vec<String> {
        let similar = find_similar(&self.page, base, &self.config.markers);
        let status = self.status();
        self.state.extend(&mut self.page, &similar, status)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Host-page script access (mutations, scrolling, node removal).
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn mode(&self) -> SelectionMode {
        self.router.mode()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionSet {
        self.state.set()
    }

    pub fn overlay(&self) -> &OverlaySync {
        self.state.overlay()
    }

    pub fn hover(&self) -> &HoverHighlight {
        &self.hover
    }

    pub fn router(&self) -> &StrategyRouter {
        &self.router
    }
}
