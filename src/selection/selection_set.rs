use hashlink::LinkedHashMap;

use crate::page::page_model::NodeId;
use crate::selection::selection_model::SelectedElement;

#[derive(Debug, Clone)]
pub struct SelectionEntry {
    pub selected: SelectedElement,
    /// Live element the entry was captured from.
    pub node: NodeId,
}

/// Insertion-ordered identity -> selected element map.
#[derive(Debug, Default)]
pub struct SelectionSet {
    entries: LinkedHashMap<String, SelectionEntry>,
}

impl SelectionSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.entries.contains_key(identity)
    }

    pub fn get(&self, identity: &str) -> Option<&SelectionEntry> {
        self.entries.get(identity)
    }

    pub fn identity_of(&self, node: NodeId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, e)| e.node == node)
            .map(|(id, _)| id.as_str())
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.identity_of(node).is_some()
    }

    pub(crate) fn insert(&mut self, entry: SelectionEntry) {
        self.entries.insert(entry.selected.id.clone(), entry);
    }

    pub(crate) fn remove(&mut self, identity: &str) -> Option<SelectionEntry> {
        self.entries.remove(identity)
    }

    pub(crate) fn clear(&mut self) -> Vec<String> {
        let removed = self.identities();
        self.entries.clear();
        removed
    }

    /// Most recently inserted entry.
    pub fn last(&self) -> Option<&SelectionEntry> {
        self.entries.back().map(|(_, e)| e)
    }

    pub fn identities(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.values()
    }

    /// 1-based ordinals in insertion order.
    pub fn ordinals(&self) -> Vec<(String, usize)> {
        self.entries
            .keys()
            .enumerate()
            .map(|(i, id)| (id.clone(), i + 1))
            .collect()
    }

    pub fn snapshot(&self) -> Vec<SelectedElement> {
        self.entries.values().map(|e| e.selected.clone()).collect()
    }
}
