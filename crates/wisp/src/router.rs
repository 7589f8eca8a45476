//! Client-side router
//!
//! A table of exact-match paths, a current-route value seeded from
//! the document's address, and a pseudo-component that renders
//! whatever the current route resolves to. Parameterized paths are
//! the component's business: the table never pattern-matches.

use tracing::debug;
use wisp_dom::Document;

use crate::app::{App, RenderSource};
use crate::error::UiError;
use crate::vnode::{h, Props, VNode};
use crate::{children, UiResult};

impl App {
    /// Register a component (or fixed virtual tree) under an
    /// exact-match path. Registering a path twice replaces the
    /// earlier entry; routes are never removed.
    pub fn add_route(&self, path: &str, component: impl Into<RenderSource>) -> UiResult<()> {
        if path.is_empty() {
            return Err(UiError::invalid("route path must be a non-empty string"));
        }
        self.inner
            .borrow_mut()
            .routes
            .insert(path.to_string(), component.into());
        debug!(path, "route registered");
        Ok(())
    }

    /// Set the current route, update the document's address without a
    /// reload (pushing a history entry), and re-render.
    pub fn navigate(&self, path: &str) -> UiResult<()> {
        if path.is_empty() || !path.starts_with('/') {
            return Err(UiError::invalid(format!(
                "navigation target must be a non-empty path starting with '/', got {path:?}"
            )));
        }
        {
            let mut inner = self.inner.borrow_mut();
            inner.current_route = path.to_string();
            inner.document.push_location(path);
        }
        debug!(path, "navigate");
        self.rerender()
    }

    /// The current-route value
    pub fn current_route(&self) -> String {
        self.inner.borrow().current_route.clone()
    }

    /// The router pseudo-component: resolve whatever is registered
    /// for the current route, or the fixed not-found view when
    /// nothing is. A missing route is a rendered fallback, never an
    /// error.
    pub fn router_view(&self) -> UiResult<VNode> {
        let (route, source) = {
            let inner = self.inner.borrow();
            (
                inner.current_route.clone(),
                inner.routes.get(&inner.current_route).cloned(),
            )
        };
        match source {
            Some(source) => source.resolve(self),
            None => {
                debug!(route = %route, "no route matched, rendering not-found view");
                not_found_view()
            }
        }
    }

    /// The host back-button: step the document history back, adopt
    /// the entry's path as the current route, re-render. No-op at the
    /// start of history.
    pub fn history_back(&self) -> UiResult<()> {
        self.adopt_history_step(|doc| doc.history_back())
    }

    /// The host forward-button counterpart of [`App::history_back`]
    pub fn history_forward(&self) -> UiResult<()> {
        self.adopt_history_step(|doc| doc.history_forward())
    }

    fn adopt_history_step(
        &self,
        step: impl FnOnce(&mut Document) -> Option<String>,
    ) -> UiResult<()> {
        let path = {
            let mut inner = self.inner.borrow_mut();
            let path = step(&mut inner.document);
            if let Some(path) = &path {
                inner.current_route = path.clone();
            }
            path
        };
        match path {
            Some(path) => {
                debug!(path = %path, "history navigation");
                self.rerender()
            }
            None => Ok(()),
        }
    }
}

fn not_found_view() -> UiResult<VNode> {
    h(
        "div",
        Props::new().attr("class", "not-found"),
        children![
            h("h1", Props::new(), children!["404"])?,
            h(
                "p",
                Props::new(),
                children!["Nothing is registered for this address."]
            )?,
        ],
    )
}
