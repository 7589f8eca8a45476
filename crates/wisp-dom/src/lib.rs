//! Wisp DOM - In-process document tree
//!
//! Arena-based node tree that plays the role of the host document for
//! the Wisp framework: elements, text nodes, attributes, and the
//! session history behind the address bar.

mod attributes;
mod history;
mod node;
mod tree;

pub use attributes::{Attr, AttrMap};
pub use history::{History, HistoryEntry};
pub use node::{ElementData, Node, NodeData, TextData};
pub use tree::{Document, DomError, DomResult};

/// Node identifier (index into the document arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this id refers to a node
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}
