use chrono::Utc;
use tracing::{debug, warn};

use crate::engine::engine_config::EngineConfig;
use crate::engine::notify::{Notification, NotificationSink, Notifier};
use crate::overlay::overlay_sync::OverlaySync;
use crate::page::page_model::{NodeId, Page};
use crate::selection::descriptor::describe;
use crate::selection::identity::{resolve_identity, IdentityResolution};
use crate::selection::selection_model::{EngineStatus, SelectedElement, StateSnapshot};
use crate::selection::selection_set::{SelectionEntry, SelectionSet};

/// Result of routing one candidate through the toggle-insert path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Inserted(String),
    Removed(String),
    /// Capacity reached or the node could not be described.
    Refused,
}

/// Sole writer of the selection set.
///
/// Every mutation renumbers the set, brings the overlay in line, and
/// publishes the new state.
#[derive(Debug)]
pub struct SelectionState {
    set: SelectionSet,
    overlay: OverlaySync,
    notifier: Notifier,
    captured_styles: Vec<String>,
    max_text_len: usize,
    max_elements: usize,
}

impl SelectionState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            set: SelectionSet::default(),
            overlay: OverlaySync::new(config),
            notifier: Notifier::default(),
            captured_styles: config.captured_styles.clone(),
            max_text_len: config.max_text_len,
            max_elements: config.max_elements,
        }
    }

    pub fn set(&self) -> &SelectionSet {
        &self.set
    }

    pub fn overlay(&self) -> &OverlaySync {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut OverlaySync {
        &mut self.overlay
    }

    pub fn subscribe(&mut self, sink: Box<dyn NotificationSink>) {
        self.notifier.subscribe(sink);
    }

    pub fn snapshot(&self, status: EngineStatus) -> StateSnapshot {
        StateSnapshot {
            active: status.active,
            mode: status.mode,
            selected_elements: self.set.snapshot(),
        }
    }

    pub fn publish_state(&mut self, status: EngineStatus) {
        let snapshot = self.snapshot(status);
        self.notifier.publish(Notification::StateChanged(snapshot));
    }

    // ------------------------------------------------------------------
    // Public mutations (each one publishes)
    // ------------------------------------------------------------------

    /// Toggle one candidate in or out.
    pub fn toggle(&mut self, page: &mut Page, node: NodeId, status: EngineStatus) -> ToggleOutcome {
        let outcome = self.toggle_one(page, node);
        if let ToggleOutcome::Inserted(identity) = &outcome {
            self.publish_selected(identity);
        }
        if outcome != ToggleOutcome::Refused {
            self.commit(page, status);
        }
        outcome
    }

    /// Single-mode admission: every other entry goes, then the candidate
    /// toggles. One mutation, so at most one entry remains.
    pub fn replace(&mut self, page: &mut Page, node: NodeId, status: EngineStatus) -> ToggleOutcome {
        let keep = self.set.identity_of(node).map(str::to_string);
        let mut dropped = false;
        for identity in self.set.identities() {
            if keep.as_deref() != Some(identity.as_str()) {
                dropped |= self.remove_one(page, &identity);
            }
        }

        let outcome = self.toggle_one(page, node);
        if let ToggleOutcome::Inserted(identity) = &outcome {
            self.publish_selected(identity);
        }
        if dropped || outcome != ToggleOutcome::Refused {
            self.commit(page, status);
        }
        outcome
    }

    /// Keep only the most recent entry. Publishes when anything went.
    pub fn keep_last(&mut self, page: &mut Page, status: EngineStatus) -> Vec<String> {
        let mut stale = self.set.identities();
        stale.pop();
        let dropped: Vec<String> = stale
            .into_iter()
            .filter(|identity| self.remove_one(page, identity))
            .collect();
        if !dropped.is_empty() {
            self.commit(page, status);
        }
        dropped
    }

    /// Toggle a batch as a single mutation. Only the first insertion of the
    /// batch is announced as a selection.
    pub fn toggle_batch(
        &mut self,
        page: &mut Page,
        nodes: &[NodeId],
        status: EngineStatus,
    ) -> Vec<ToggleOutcome> {
        let outcomes: Vec<ToggleOutcome> =
            nodes.iter().map(|n| self.toggle_one(page, *n)).collect();

        let first_inserted = outcomes.iter().find_map(|o| match o {
            ToggleOutcome::Inserted(id) => Some(id.clone()),
            _ => None,
        });
        if let Some(identity) = first_inserted {
            self.publish_selected(&identity);
        }
        if outcomes.iter().any(|o| *o != ToggleOutcome::Refused) {
            self.commit(page, status);
        }
        outcomes
    }

    /// Insert every node not already selected, as a single mutation.
    /// Returns the new identities.
    pub fn extend(&mut self, page: &mut Page, nodes: &[NodeId], status: EngineStatus) -> Vec<String> {
        let mut inserted = Vec::new();
        for node in nodes {
            if self.set.contains_node(*node) {
                continue;
            }
            if let IdentityResolution::Fresh(identity) = resolve_identity(&self.set, page, *node) {
                if self.insert_one(page, *node, identity.clone()) {
                    inserted.push(identity);
                }
            }
        }
        if !inserted.is_empty() {
            self.commit(page, status);
        }
        inserted
    }

    /// Remove by identity. Unknown identities are a no-op.
    pub fn remove(&mut self, page: &mut Page, identity: &str, status: EngineStatus) -> bool {
        if self.remove_one(page, identity) {
            self.commit(page, status);
            true
        } else {
            debug!(identity, "remove of unknown identity ignored");
            false
        }
    }

    pub fn remove_last(&mut self, page: &mut Page, status: EngineStatus) -> Option<String> {
        let identity = self.set.last()?.selected.id.clone();
        self.remove(page, &identity, status).then_some(identity)
    }

    /// Empty the set and the overlay. Always publishes.
    pub fn clear(&mut self, page: &mut Page, status: EngineStatus) -> usize {
        let removed = self.set.clear();
        self.overlay.clear(page);
        self.publish_state(status);
        removed.len()
    }

    /// Re-measure overlay geometry, dropping entries whose target is gone.
    pub fn refresh(&mut self, page: &mut Page, status: EngineStatus) -> Vec<String> {
        let stale = self.overlay.refresh(page);
        let mut dropped = Vec::new();
        for identity in stale {
            if self.remove_one(page, &identity) {
                dropped.push(identity);
            }
        }
        if !dropped.is_empty() {
            warn!(count = dropped.len(), "dropped stale selections");
            self.commit(page, status);
        }
        dropped
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn toggle_one(&mut self, page: &mut Page, node: NodeId) -> ToggleOutcome {
        match resolve_identity(&self.set, page, node) {
            IdentityResolution::Existing(identity) => {
                self.remove_one(page, &identity);
                ToggleOutcome::Removed(identity)
            }
            IdentityResolution::Fresh(identity) => {
                if self.insert_one(page, node, identity.clone()) {
                    ToggleOutcome::Inserted(identity)
                } else {
                    ToggleOutcome::Refused
                }
            }
        }
    }

    fn insert_one(&mut self, page: &mut Page, node: NodeId, identity: String) -> bool {
        if self.set.len() >= self.max_elements {
            warn!(max = self.max_elements, "selection is full, insert refused");
            return false;
        }
        let Some(descriptor) = describe(page, node, &self.captured_styles, self.max_text_len)
        else {
            return false;
        };

        let ordinal = self.set.len() + 1;
        self.set.insert(SelectionEntry {
            selected: SelectedElement {
                id: identity.clone(),
                descriptor,
                timestamp: Utc::now().timestamp_millis(),
                note: None,
            },
            node,
        });
        self.overlay.add(page, &identity, node, ordinal);
        debug!(identity, "selected");
        true
    }

    fn remove_one(&mut self, page: &mut Page, identity: &str) -> bool {
        let removed = self.set.remove(identity).is_some();
        self.overlay.remove(page, identity);
        if removed {
            debug!(identity, "deselected");
        }
        removed
    }

    fn commit(&mut self, page: &mut Page, status: EngineStatus) {
        let ordinals = self.set.ordinals();
        self.overlay.renumber(page, &ordinals);
        self.publish_state(status);
    }

    fn publish_selected(&mut self, identity: &str) {
        if let Some(entry) = self.set.get(identity) {
            let selected_element = entry.selected.clone();
            self.notifier
                .publish(Notification::ElementSelected { selected_element });
        }
    }
}
