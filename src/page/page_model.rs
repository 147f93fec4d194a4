use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::PickerError;
use crate::page::geometry::Rect;
use crate::page::listeners::ListenerTable;

// ============================================================================
// Page model: an arena of element nodes standing in for the live document
// ============================================================================

/// Handle to a node in a `Page` arena. Stays valid after the node is
/// detached; queries on detached nodes degrade instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Who authored a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Page,
    /// Created by the selection engine (overlays, control surface).
    Engine,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    /// Own text, rendered before the children.
    pub text: Option<String>,
    pub styles: BTreeMap<String, String>,
    pub rect: Rect,
    pub z_index: Option<i32>,
    /// `None` inherits from the parent; the root defaults to intercepting.
    pub pointer_events: Option<bool>,
    pub displayed: bool,
    pub layer: Layer,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
}

impl Node {
    pub fn new(tag: &str, layer: Layer) -> Self {
        Self {
            tag: tag.to_lowercase(),
            attributes: BTreeMap::new(),
            text: None,
            styles: BTreeMap::new(),
            rect: Rect::default(),
            z_index: None,
            pointer_events: None,
            displayed: true,
            layer,
            parent: None,
            children: Vec::new(),
            attached: false,
        }
    }

    pub fn id_attr(&self) -> &str {
        self.attributes.get("id").map(String::as_str).unwrap_or("")
    }

    /// Full `class` attribute string, exactly as authored.
    pub fn class_name(&self) -> &str {
        self.attributes.get("class").map(String::as_str).unwrap_or("")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name().split_whitespace().any(|c| c == class)
    }

    pub fn first_class(&self) -> Option<&str> {
        self.class_name().split_whitespace().next()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Serialized form of a page subtree, used for JSON fixtures and builders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeSpec {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
    #[serde(default)]
    pub z_index: Option<i32>,
    #[serde(default)]
    pub pointer_events: Option<bool>,
    #[serde(default = "default_true")]
    pub displayed: bool,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

fn default_true() -> bool {
    true
}

impl NodeSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            text: None,
            rect: Rect::default(),
            styles: BTreeMap::new(),
            z_index: None,
            pointer_events: None,
            displayed: true,
            children: Vec::new(),
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn style(mut self, name: &str, value: &str) -> Self {
        self.styles.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn rect(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = Rect::new(x, y, width, height);
        self
    }

    pub fn z_index(mut self, z: i32) -> Self {
        self.z_index = Some(z);
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// The live page: a rooted tree of element nodes plus the document-level
/// listener table.
#[derive(Debug)]
pub struct Page {
    nodes: Vec<Node>,
    root: NodeId,
    /// Subtrees currently excluded from hit testing.
    suppressed: HashSet<NodeId>,
    listeners: ListenerTable,
}

impl Page {
    /// Empty page whose `body` covers the given viewport.
    pub fn new(viewport: Rect) -> Self {
        let mut body = Node::new("body", Layer::Page);
        body.rect = viewport;
        body.attached = true;
        Self {
            nodes: vec![body],
            root: NodeId(0),
            suppressed: HashSet::new(),
            listeners: ListenerTable::default(),
        }
    }

    /// Build a page from a `body` spec.
    pub fn from_spec(body: &NodeSpec) -> Self {
        let mut page = Page::new(body.rect);
        {
            let root = &mut page.nodes[0];
            root.attributes = body.attributes.clone();
            root.text = body.text.clone();
            root.styles = body.styles.clone();
            root.z_index = body.z_index;
            root.pointer_events = body.pointer_events;
            root.displayed = body.displayed;
        }
        let root = page.root;
        for child in &body.children {
            page.append_spec(root, child);
        }
        page
    }

    pub fn from_json(json: &str) -> Result<Self, PickerError> {
        let spec: NodeSpec = serde_json::from_str(json).map_err(|e| PickerError::JsonParse {
            context: "page fixture".into(),
            source: e,
        })?;
        if !spec.tag.eq_ignore_ascii_case("body") {
            return Err(PickerError::PageStructure(format!(
                "root element must be <body>, found <{}>",
                spec.tag
            )));
        }
        Ok(Page::from_spec(&spec))
    }

    pub fn load(path: &str) -> Result<Self, PickerError> {
        let content = std::fs::read_to_string(path).map_err(|e| PickerError::io(path, e))?;
        Page::from_json(&content)
    }

    /// Append a subtree built from `spec` under `parent`, returning its root.
    pub fn append_spec(&mut self, parent: NodeId, spec: &NodeSpec) -> NodeId {
        let mut node = Node::new(&spec.tag, Layer::Page);
        node.attributes = spec.attributes.clone();
        node.text = spec.text.clone();
        node.styles = spec.styles.clone();
        node.rect = spec.rect;
        node.z_index = spec.z_index;
        node.pointer_events = spec.pointer_events;
        node.displayed = spec.displayed;

        let id = self.create(node);
        self.append_child(parent, id);
        for child in &spec.children {
            self.append_spec(id, child);
        }
        id
    }

    /// Add a node to the arena without attaching it anywhere.
    pub fn create(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            attached: false,
            ..node
        });
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() || parent == child {
            return;
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        let attached = self.nodes[parent.0].attached;
        self.set_attached(child, attached);
    }

    /// Remove a node (and its subtree) from the tree. The handle stays valid.
    pub fn detach(&mut self, id: NodeId) {
        if id == self.root || id.0 >= self.nodes.len() {
            return;
        }
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
        }
        self.set_attached(id, false);
        self.suppressed.remove(&id);
    }

    fn set_attached(&mut self, id: NodeId, attached: bool) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.0];
            node.attached = attached;
            stack.extend(node.children.iter().copied());
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_attached)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Ancestors of `id`, nearest first, not including `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(id);
        while let Some(p) = current {
            out.push(p);
            current = self.parent(p);
        }
        out
    }

    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Attached nodes in document (pre-)order, root first.
    pub fn all_elements(&self) -> Vec<NodeId> {
        self.descendants_inclusive(self.root)
    }

    pub fn descendants_inclusive(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Children on the same layer as the node, in order. Overlay nodes
    /// mounted under `body` are not part of its page content.
    pub fn layer_children(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        node.children
            .iter()
            .copied()
            .filter(|c| self.node(*c).is_some_and(|n| n.layer == node.layer))
            .collect()
    }

    /// Element children of the node's parent, in order.
    pub fn siblings(&self, id: NodeId) -> &[NodeId] {
        self.parent(id)
            .and_then(|p| self.node(p))
            .map(Node::children)
            .unwrap_or(&[])
    }

    /// First attached node whose `id` attribute matches.
    pub fn element_by_id(&self, id_attr: &str) -> Option<NodeId> {
        self.all_elements()
            .into_iter()
            .find(|id| self.node(*id).is_some_and(|n| n.id_attr() == id_attr))
    }

    /// Attached nodes carrying the given class.
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.all_elements()
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(|n| n.has_class(class)))
            .collect()
    }

    /// Node and every ancestor are displayed.
    pub fn is_displayed(&self, id: NodeId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        node.displayed && self.ancestors(id).iter().all(|a| self.nodes[a.0].displayed)
    }

    /// Live bounding rectangle. Detached or hidden nodes measure as a zero rect.
    pub fn bounding_rect(&self, id: NodeId) -> Rect {
        if !self.is_attached(id) || !self.is_displayed(id) {
            return Rect::default();
        }
        self.nodes[id.0].rect
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.rect = rect;
        }
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Scroll the viewport. Page-authored geometry moves, engine-owned
    /// (fixed) nodes stay put.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        let root = self.root;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            if NodeId(i) != root && node.layer == Layer::Page {
                node.rect.translate(-dx, -dy);
            }
        }
    }

    /// Effective pointer-events: nearest explicit value up the tree.
    pub fn intercepts_pointer(&self, id: NodeId) -> bool {
        if self.suppressed.contains(&id) {
            return false;
        }
        for current in std::iter::once(id).chain(self.ancestors(id)) {
            if self.suppressed.contains(&current) {
                return false;
            }
            if let Some(explicit) = self.node(current).and_then(|n| n.pointer_events) {
                return explicit;
            }
        }
        true
    }

    /// Exclude a subtree from hit testing until `restore_interception`.
    pub fn suppress_interception(&mut self, id: NodeId) {
        self.suppressed.insert(id);
    }

    pub fn restore_interception(&mut self, id: NodeId) {
        self.suppressed.remove(&id);
    }

    pub fn is_suppressed(&self, id: NodeId) -> bool {
        self.suppressed.contains(&id)
    }

    /// Descendant text, depth first, whitespace-joined. Only same-layer
    /// descendants contribute.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        self.collect_text(id, &mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, id: NodeId, parts: &mut Vec<&'a str>) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let Some(text) = node.text.as_deref().map(str::trim) {
            if !text.is_empty() {
                parts.push(text);
            }
        }
        for child in self.layer_children(id) {
            self.collect_text(child, parts);
        }
    }

    pub fn listeners(&self) -> &ListenerTable {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut ListenerTable {
        &mut self.listeners
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Count of attached nodes created by the engine.
    pub fn engine_node_count(&self) -> usize {
        self.all_elements()
            .into_iter()
            .filter(|id| self.nodes[id.0].layer == Layer::Engine)
            .count()
    }
}
