use tracing::debug;

use crate::gesture::area::{contained_elements, AreaDrag};
use crate::overlay::markers::OverlayMarkers;
use crate::page::page_model::{NodeId, Page};
use crate::selection::selection_model::SelectionMode;

/// What the selection state should do with resolved candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPlan {
    /// `single`: deselect if already selected, else clear and insert.
    Replace(NodeId),
    /// `multiple`: flip membership.
    Toggle(NodeId),
    /// `area`: flip membership of every outermost contained element.
    ToggleBatch(Vec<NodeId>),
    /// `smart`: flip the base; on insert, add everything similar to it.
    ToggleAndExpand(NodeId),
}

/// Owns the active mode and turns raw gestures into selection plans.
#[derive(Debug, Default)]
pub struct StrategyRouter {
    mode: SelectionMode,
    drag: Option<AreaDrag>,
}

impl StrategyRouter {
    pub fn new(mode: SelectionMode) -> Self {
        Self { mode, drag: None }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch strategy. Any in-flight drag is abandoned.
    pub fn set_mode(&mut self, page: &mut Page, mode: SelectionMode) {
        self.cancel(page);
        self.mode = mode;
    }

    /// Plan for a clicked candidate. Area mode selects on release, not click.
    pub fn plan_click(&self, candidate: NodeId) -> Option<SelectionPlan> {
        match self.mode {
            SelectionMode::Single => Some(SelectionPlan::Replace(candidate)),
            SelectionMode::Multiple => Some(SelectionPlan::Toggle(candidate)),
            SelectionMode::Smart => Some(SelectionPlan::ToggleAndExpand(candidate)),
            SelectionMode::Area => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Anchor a rectangle at the pointer. Only meaningful in area mode.
    pub fn begin_drag(
        &mut self,
        page: &mut Page,
        markers: &OverlayMarkers,
        container: NodeId,
        x: f64,
        y: f64,
    ) -> bool {
        if self.mode != SelectionMode::Area {
            return false;
        }
        self.cancel(page);
        self.drag = Some(AreaDrag::begin(page, markers, container, x, y));
        debug!(x, y, "area drag started");
        true
    }

    pub fn update_drag(&mut self, page: &mut Page, x: f64, y: f64) -> bool {
        match self.drag.as_mut() {
            Some(drag) => {
                drag.update(page, x, y);
                true
            }
            None => false,
        }
    }

    /// Release: remove the rectangle and plan selection of what it contains.
    pub fn finish_drag(
        &mut self,
        page: &mut Page,
        markers: &OverlayMarkers,
        x: f64,
        y: f64,
    ) -> Option<SelectionPlan> {
        let mut drag = self.drag.take()?;
        drag.current = (x, y);
        let area = drag.finish(page);
        let nodes = contained_elements(page, area, markers);
        debug!(?area, count = nodes.len(), "area drag finished");
        Some(SelectionPlan::ToggleBatch(nodes))
    }

    /// Drop in-flight gesture state and its rectangle.
    pub fn cancel(&mut self, page: &mut Page) {
        if let Some(drag) = self.drag.take() {
            drag.cancel(page);
        }
    }
}
