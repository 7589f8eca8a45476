//! Document tree (arena-based allocation)
//!
//! Nodes live in a slot vector indexed by `NodeId`; removed subtrees
//! release their slots to a free list for reuse. The document also
//! owns the session history behind its address.

use std::fmt::Write as _;

use tracing::{debug, trace};

use crate::history::path_of;
use crate::{History, Node, NodeData, NodeId};

/// Result type for document operations
pub type DomResult<T> = Result<T, DomError>;

/// Document operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node id does not refer to a live node
    #[error("node not found")]
    NotFound,

    /// Operation would create a cycle (e.g. appending an ancestor)
    #[error("hierarchy request error")]
    HierarchyRequest,

    /// Operation requires an element node
    #[error("node is not an element")]
    NotAnElement,
}

/// In-process document: arena node tree plus session history
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    root: NodeId,
    body: NodeId,
    history: History,
}

impl Document {
    /// Create a new document with a root and an empty `body` element
    pub fn new(url: &str) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId::NONE,
            body: NodeId::NONE,
            history: History::new(url),
        };

        let root = doc.alloc(Node::document());
        let body = doc.alloc(Node::element("body"));
        doc.root = root;
        doc.link_last(root, body);
        doc.body = body;
        doc
    }

    /// Document root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `body` element, the usual mount container
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(|slot| slot.as_ref())
    }

    /// Get a mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(|slot| slot.as_mut())
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound)
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = Some(node);
                id
            }
            None => {
                let id = NodeId(self.nodes.len() as u32);
                self.nodes.push(Some(node));
                id
            }
        }
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = self.alloc(Node::element(tag));
        trace!(?id, tag, "create element");
        id
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        let id = self.alloc(Node::text(content));
        trace!(?id, "create text");
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that is already in the tree is detached from its old
    /// position first. Appending a node under its own descendant (or
    /// itself) is a hierarchy error.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        self.node(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        self.detach(child)?;
        self.link_last(parent, child);
        Ok(child)
    }

    /// True if `candidate` is an ancestor of `node`
    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut cursor = node;
        while let Some(n) = self.get(cursor) {
            if n.parent == candidate {
                return true;
            }
            cursor = n.parent;
        }
        false
    }

    fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let prev = self.get(parent).map(|p| p.last_child).unwrap_or(NodeId::NONE);
        if prev.is_valid() {
            if let Some(n) = self.get_mut(prev) {
                n.next_sibling = child;
            }
        } else if let Some(n) = self.get_mut(parent) {
            n.first_child = child;
        }
        if let Some(n) = self.get_mut(parent) {
            n.last_child = child;
        }
        if let Some(n) = self.get_mut(child) {
            n.parent = parent;
            n.prev_sibling = prev;
            n.next_sibling = NodeId::NONE;
        }
    }

    /// Unlink `child` from its parent, keeping it alive as a detached node
    pub fn detach(&mut self, child: NodeId) -> DomResult<()> {
        let (parent, prev, next) = {
            let n = self.node(child)?;
            (n.parent, n.prev_sibling, n.next_sibling)
        };
        if !parent.is_valid() {
            return Ok(());
        }

        if prev.is_valid() {
            if let Some(n) = self.get_mut(prev) {
                n.next_sibling = next;
            }
        } else if let Some(n) = self.get_mut(parent) {
            n.first_child = next;
        }
        if next.is_valid() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(n) = self.get_mut(parent) {
            n.last_child = prev;
        }

        if let Some(n) = self.get_mut(child) {
            n.parent = NodeId::NONE;
            n.prev_sibling = NodeId::NONE;
            n.next_sibling = NodeId::NONE;
        }
        Ok(())
    }

    /// Direct children of a node, in document order
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        while let Some(n) = self.get(cursor) {
            out.push(cursor);
            cursor = n.next_sibling;
        }
        out
    }

    /// All nodes strictly below `id`, preorder (parents before children)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id);
        stack.reverse();
        while let Some(next) = stack.pop() {
            out.push(next);
            let mut kids = self.children(next);
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// Remove and free the whole subtree under `id` (the node itself
    /// stays). Returns the freed ids so callers can invalidate any
    /// per-node associations they hold.
    pub fn clear_children(&mut self, id: NodeId) -> DomResult<Vec<NodeId>> {
        self.node(id)?;
        let removed = self.descendants(id);

        if let Some(container) = self.get_mut(id) {
            container.first_child = NodeId::NONE;
            container.last_child = NodeId::NONE;
        }

        for &node_id in &removed {
            self.nodes[node_id.index()] = None;
            self.free.push(node_id);
        }
        debug!(container = ?id, removed = removed.len(), "clear children");
        Ok(removed)
    }

    /// Tag name of an element node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let elem = self
            .node_mut(id)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement)?;
        elem.attrs.set(name, value);
        Ok(())
    }

    /// Get an attribute value from an element
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.attrs.get(name)
    }

    /// Find the first element with a matching `id` attribute
    pub fn get_element_by_id(&self, value: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| self.get_attribute(id, "id") == Some(value))
    }

    /// All elements with the given tag name below `scope`, in document order
    pub fn elements_by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_ascii_lowercase();
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.tag_name(id) == Some(tag.as_str()))
            .collect()
    }

    /// Concatenated text of all text nodes below `id` (including `id`
    /// itself when it is a text node), in document order
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(|n| n.as_text()) {
            out.push_str(text);
        }
        for node_id in self.descendants(id) {
            if let Some(text) = self.get(node_id).and_then(|n| n.as_text()) {
                out.push_str(text);
            }
        }
        out
    }

    /// Serialize the children of `id` as HTML (structural readback)
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(&mut out, child);
        }
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        match &node.data {
            NodeData::Text(t) => escape_text(out, &t.content),
            NodeData::Element(e) => {
                out.push('<');
                out.push_str(&e.tag);
                for attr in e.attrs.iter() {
                    let _ = write!(out, " {}=\"", attr.name);
                    escape_attr(out, &attr.value);
                    out.push('"');
                }
                out.push('>');
                for child in self.children(id) {
                    self.write_node(out, child);
                }
                let _ = write!(out, "</{}>", e.tag);
            }
            NodeData::Document => {
                for child in self.children(id) {
                    self.write_node(out, child);
                }
            }
        }
    }

    // === Location / history ===

    /// Session history for this document
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current address
    pub fn url(&self) -> &str {
        &self.history.current().url
    }

    /// Path component of the current address
    pub fn location_path(&self) -> &str {
        path_of(self.url())
    }

    /// Update the address without a reload, pushing a history entry
    pub fn push_location(&mut self, url: &str) {
        debug!(url, "push location");
        self.history.push(url);
    }

    /// Move back in history; returns the new path when there was one
    pub fn history_back(&mut self) -> Option<String> {
        self.history.back().map(|e| path_of(&e.url).to_string())
    }

    /// Move forward in history; returns the new path when there was one
    pub fn history_forward(&mut self) -> Option<String> {
        self.history.forward().map(|e| path_of(&e.url).to_string())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

fn escape_text(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
