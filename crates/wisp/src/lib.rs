//! Wisp - minimal teardown-and-rebuild UI framework
//!
//! Describe a UI as a tree of plain virtual nodes, mount it into a
//! document, and let per-slot reactive state drive full re-renders.
//! No diffing, no keyed reconciliation, no async scheduling: every
//! state write tears the mounted subtree down and rebuilds it, which
//! keeps ordering and listener lifetimes trivial to reason about.
//!
//! # Example
//! ```rust,ignore
//! use wisp::{children, h, App, Props, RenderSource, UiResult, VNode};
//!
//! fn counter(app: &App) -> UiResult<VNode> {
//!     let (count, set_count) = app.use_state(0i64);
//!     let n = count.get();
//!     h(
//!         "div",
//!         Props::new(),
//!         children![
//!             h("span", Props::new(), children![n])?,
//!             h(
//!                 "button",
//!                 Props::new().on("onClick", move |_| set_count.set(n + 1)),
//!                 children!["+"],
//!             )?,
//!         ],
//!     )
//! }
//!
//! let app = App::new("https://example.com/");
//! app.mount(RenderSource::component(counter), app.body())?;
//! ```

mod app;
mod error;
mod events;
mod render;
mod router;
mod state;
mod vnode;

pub use app::{App, Component, RenderSource};
pub use error::{UiError, UiResult};
pub use events::{Event, EventHandler};
pub use state::{StateHandle, StateSetter};
pub use vnode::{h, PropValue, Props, VChild, VElement, VNode};

// The document types application code touches directly
pub use wisp_dom::{Document, DomError, NodeId};
