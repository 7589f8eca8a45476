//! Renderer
//!
//! Walks a virtual tree and imperatively builds real nodes: text
//! primitives become text nodes, elements get their attributes set
//! and their handlers recorded, children are flattened one level and
//! rendered in order. No diffing: every invocation creates brand-new
//! real nodes.

use tracing::warn;
use wisp_dom::NodeId;

use crate::app::App;
use crate::error::UiError;
use crate::events::handler_event_name;
use crate::vnode::{PropValue, VChild, VElement, VNode};
use crate::UiResult;

impl App {
    /// Materialize `vnode` as a new real subtree appended under
    /// `container`, returning the root real node created.
    pub fn render(&self, vnode: &VNode, container: NodeId) -> UiResult<NodeId> {
        match vnode {
            VNode::Text(content) => self.render_text(content, container),
            VNode::Element(element) => self.render_element(element, container),
        }
    }

    fn render_text(&self, content: &str, container: NodeId) -> UiResult<NodeId> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.document.create_text(content);
        inner.document.append_child(container, id)?;
        Ok(id)
    }

    fn render_element(&self, element: &VElement, container: NodeId) -> UiResult<NodeId> {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let inner = &mut *inner;
            let id = inner.document.create_element(&element.tag);
            for (name, value) in element.props.iter() {
                match value {
                    PropValue::Handler(handler) => match handler_event_name(name) {
                        Some(event_name) => {
                            inner.listeners.record(id, &event_name, handler.clone());
                        }
                        None => {
                            warn!(prop = name, "handler prop without an on* key; not attached");
                        }
                    },
                    PropValue::Attr(value) => inner.document.set_attribute(id, name, value)?,
                }
            }
            id
        };

        // Child lists are flattened exactly one level
        for child in &element.children {
            if let VChild::List(entries) = child {
                for entry in entries {
                    self.render_entry(entry, id)?;
                }
            } else {
                self.render_entry(child, id)?;
            }
        }

        self.inner.borrow_mut().document.append_child(container, id)?;
        Ok(id)
    }

    fn render_entry(&self, child: &VChild, parent: NodeId) -> UiResult<NodeId> {
        match child {
            VChild::Node(node) => self.render(node, parent),
            VChild::Text(text) => self.render_text(text, parent),
            VChild::List(_) => Err(UiError::invalid(
                "child lists are flattened one level only; found a list inside a list",
            )),
        }
    }
}
