//! Events and the listener registry
//!
//! Handlers are recorded against the real node they were attached to,
//! keyed by `NodeId`. Teardown removes the registrations of exactly
//! the nodes the document freed, so no registration can outlive its
//! node.

use std::collections::HashMap;
use std::rc::Rc;

use wisp_dom::NodeId;

use crate::UiResult;

/// A host event delivered to a node
#[derive(Debug, Clone)]
pub struct Event {
    /// Lower-cased event name ("click", "input", ...)
    pub name: String,
    /// The node the event was dispatched to
    pub target: NodeId,
}

/// Event handler attached via an `on*` prop
pub type EventHandler = Rc<dyn Fn(&Event) -> UiResult<()>>;

/// Map an `on*` prop key to its event name.
///
/// The two-character prefix is matched case-insensitively and the
/// remainder is lower-cased: `onClick` and `ONCLICK` both mean
/// "click". Keys without the prefix (or with nothing after it) are
/// not handler keys.
pub(crate) fn handler_event_name(key: &str) -> Option<String> {
    let rest = key.get(2..)?;
    if rest.is_empty() || !key[..2].eq_ignore_ascii_case("on") {
        return None;
    }
    Some(rest.to_ascii_lowercase())
}

/// Registrations of live listeners, keyed by node identity
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    by_node: HashMap<NodeId, Vec<(String, EventHandler)>>,
}

impl ListenerRegistry {
    /// Record one attached listener
    pub fn record(&mut self, node: NodeId, event_name: &str, handler: EventHandler) {
        self.by_node
            .entry(node)
            .or_default()
            .push((event_name.to_string(), handler));
    }

    /// Drop every registration for the given nodes
    pub fn remove_nodes(&mut self, nodes: &[NodeId]) {
        for id in nodes {
            self.by_node.remove(id);
        }
    }

    /// Handlers currently attached to `node` for `event_name`
    pub fn handlers_for(&self, node: NodeId, event_name: &str) -> Vec<EventHandler> {
        self.by_node
            .get(&node)
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|(name, _)| name == event_name)
                    .map(|(_, handler)| handler.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of attached listeners for one event name, over all nodes
    pub fn attached_count(&self, event_name: &str) -> usize {
        self.by_node
            .values()
            .flatten()
            .filter(|(name, _)| name == event_name)
            .count()
    }

    /// Number of attached listeners over all nodes and events
    pub fn total_attached(&self) -> usize {
        self.by_node.values().map(|v| v.len()).sum()
    }
}
