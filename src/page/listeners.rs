use std::collections::BTreeMap;

/// Event kinds the engine can subscribe to on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerDown,
    PointerUp,
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub kind: EventKind,
    /// Capture-phase listeners run before any page-authored handler.
    pub capture: bool,
    pub owner: String,
}

/// Registry of listeners attached to the page document.
///
/// Only bookkeeping lives here; dispatch is done by whoever owns the
/// listener. Keeping the table on the page makes leaked listeners visible.
#[derive(Debug, Default)]
pub struct ListenerTable {
    next_id: u64,
    entries: BTreeMap<ListenerId, Listener>,
}

impl ListenerTable {
    pub fn add(&mut self, kind: EventKind, capture: bool, owner: &str) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            Listener {
                kind,
                capture,
                owner: owner.to_string(),
            },
        );
        id
    }

    /// Returns false when the id was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn get(&self, id: ListenerId) -> Option<&Listener> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_owned_by(&self, owner: &str) -> usize {
        self.entries.values().filter(|l| l.owner == owner).count()
    }
}
