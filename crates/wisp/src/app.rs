//! Application context
//!
//! `App` owns everything one mounted UI needs: the document, the
//! listener registry, the state store, and the route table. It is a
//! cheap handle (`Rc<RefCell<..>>`): getters, setters, and event
//! handlers clone it, and several independent apps can coexist in one
//! process.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};
use wisp_dom::{Document, NodeId};

use crate::events::{Event, ListenerRegistry};
use crate::state::StateStore;
use crate::vnode::VNode;
use crate::UiResult;

/// A component function: invoked once per render pass, returns the
/// virtual tree for the current state
pub type Component = Rc<dyn Fn(&App) -> UiResult<VNode>>;

/// What gets rendered on every pass: a fixed virtual tree or a
/// component function resolved anew each time
#[derive(Clone)]
pub enum RenderSource {
    Node(VNode),
    Component(Component),
}

impl RenderSource {
    /// Wrap a component function
    pub fn component(f: impl Fn(&App) -> UiResult<VNode> + 'static) -> Self {
        Self::Component(Rc::new(f))
    }

    pub(crate) fn resolve(&self, app: &App) -> UiResult<VNode> {
        match self {
            Self::Node(node) => Ok(node.clone()),
            Self::Component(f) => f(app),
        }
    }
}

impl From<VNode> for RenderSource {
    fn from(node: VNode) -> Self {
        Self::Node(node)
    }
}

pub(crate) struct AppInner {
    pub document: Document,
    pub listeners: ListenerRegistry,
    pub state: StateStore,
    pub routes: HashMap<String, RenderSource>,
    pub current_route: String,
    pub source: Option<RenderSource>,
    pub container: NodeId,
    pub render_count: u64,
}

/// Handle to one running application
#[derive(Clone)]
pub struct App {
    pub(crate) inner: Rc<RefCell<AppInner>>,
}

impl App {
    /// Create an application over a fresh document at `url`. The
    /// current route is seeded from the document's address.
    pub fn new(url: &str) -> Self {
        let document = Document::new(url);
        let current_route = document.location_path().to_string();
        debug!(url, route = %current_route, "app created");
        Self {
            inner: Rc::new(RefCell::new(AppInner {
                document,
                listeners: ListenerRegistry::default(),
                state: StateStore::default(),
                routes: HashMap::new(),
                current_route,
                source: None,
                container: NodeId::NONE,
                render_count: 0,
            })),
        }
    }

    /// The document's `body` element, the usual mount container
    pub fn body(&self) -> NodeId {
        self.inner.borrow().document.body()
    }

    /// Record `source` and `container` as the active render target
    /// and run the first pass: tear down whatever occupies the
    /// container (a no-op when it is empty), reset the state cursor,
    /// resolve the source, render. Mounting again retargets the whole
    /// cycle.
    pub fn mount(&self, source: impl Into<RenderSource>, container: NodeId) -> UiResult<()> {
        let source = source.into();
        {
            let mut inner = self.inner.borrow_mut();
            inner.source = Some(source.clone());
            inner.container = container;
        }
        debug!(?container, "mount");
        self.render_pass(source, container)
    }

    /// Repeat the full teardown-then-rebuild sequence for the active
    /// render target. No-op when nothing is mounted. Nothing from the
    /// previous pass is reused or patched.
    pub fn rerender(&self) -> UiResult<()> {
        let pending = {
            let inner = self.inner.borrow();
            match &inner.source {
                Some(source) if inner.container.is_valid() => {
                    Some((source.clone(), inner.container))
                }
                _ => None,
            }
        };
        let Some((source, container)) = pending else {
            return Ok(());
        };
        self.render_pass(source, container)
    }

    fn render_pass(&self, source: RenderSource, container: NodeId) -> UiResult<()> {
        {
            let mut inner = self.inner.borrow_mut();
            let removed = inner.document.clear_children(container)?;
            inner.listeners.remove_nodes(&removed);
            inner.state.reset_cursor();
        }
        // No borrow is held here: the component function may call
        // use_state (and, through a mis-nested setter, even rerender)
        // while it runs.
        let vnode = source.resolve(self)?;
        self.render(&vnode, container)?;

        let mut inner = self.inner.borrow_mut();
        inner.render_count += 1;
        debug!(pass = inner.render_count, "render pass complete");
        Ok(())
    }

    /// Deliver a host event to the handlers attached to `target`.
    ///
    /// Handlers run after the registry borrow is released, so a
    /// handler that writes state re-renders before `dispatch`
    /// returns. Dispatching to a node with no registrations (or one
    /// already torn down) is a no-op.
    pub fn dispatch(&self, target: NodeId, event_name: &str) -> UiResult<()> {
        let handlers = self.inner.borrow().listeners.handlers_for(target, event_name);
        trace!(?target, event = event_name, handlers = handlers.len(), "dispatch");
        let event = Event {
            name: event_name.to_string(),
            target,
        };
        for handler in handlers {
            handler(&event)?;
        }
        Ok(())
    }

    /// Total render passes completed since creation
    pub fn render_count(&self) -> u64 {
        self.inner.borrow().render_count
    }

    /// Currently attached listeners for one event name
    pub fn attached_listener_count(&self, event_name: &str) -> usize {
        self.inner.borrow().listeners.attached_count(event_name)
    }

    /// Currently attached listeners over all nodes and events
    pub fn total_attached_listeners(&self) -> usize {
        self.inner.borrow().listeners.total_attached()
    }

    /// Run a closure against the document (read-only)
    pub fn with_document<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.inner.borrow().document)
    }

    /// Serialized children of `id` (structural readback)
    pub fn inner_html(&self, id: NodeId) -> String {
        self.inner.borrow().document.inner_html(id)
    }

    /// Concatenated text below `id`
    pub fn text_content(&self, id: NodeId) -> String {
        self.inner.borrow().document.text_content(id)
    }

    /// First element with a matching `id` attribute
    pub fn get_element_by_id(&self, value: &str) -> Option<NodeId> {
        self.inner.borrow().document.get_element_by_id(value)
    }

    /// Elements with the given tag below `scope`, in document order
    pub fn elements_by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.inner.borrow().document.elements_by_tag(scope, tag)
    }

    /// The document's current address
    pub fn url(&self) -> String {
        self.inner.borrow().document.url().to_string()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
