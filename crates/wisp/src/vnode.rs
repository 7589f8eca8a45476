//! Virtual node model
//!
//! Plain-data description of an element or text node. A virtual node
//! is immutable once constructed: new UI state is always a brand-new
//! tree, never a mutation of an existing one.

use std::fmt;

use crate::error::{UiError, UiResult};
use crate::events::EventHandler;

/// One prospective element or text node
#[derive(Debug, Clone)]
pub enum VNode {
    Element(VElement),
    Text(String),
}

impl VNode {
    /// Build a bare text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }
}

/// Element description: tag, props, ordered children
#[derive(Debug, Clone)]
pub struct VElement {
    pub tag: String,
    pub props: Props,
    pub children: Vec<VChild>,
}

/// A child entry of an element.
///
/// Lists are flattened exactly one level by the renderer; a list
/// nested inside another list is a rendering error, not a deep
/// flatten.
#[derive(Debug, Clone)]
pub enum VChild {
    Node(VNode),
    Text(String),
    List(Vec<VChild>),
}

impl From<VNode> for VChild {
    fn from(node: VNode) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for VChild {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for VChild {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<VChild>> for VChild {
    fn from(list: Vec<VChild>) -> Self {
        Self::List(list)
    }
}

macro_rules! vchild_from_number {
    ($($ty:ty),+) => {
        $(impl From<$ty> for VChild {
            fn from(value: $ty) -> Self {
                Self::Text(value.to_string())
            }
        })+
    };
}

vchild_from_number!(i32, i64, u32, u64, usize, f64);

/// Value of one prop: a literal attribute or an event handler
#[derive(Clone)]
pub enum PropValue {
    Attr(String),
    Handler(EventHandler),
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attr(v) => f.debug_tuple("Attr").field(v).finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// Ordered prop list. Keys with an `on` prefix and a handler value
/// become event listeners; everything else is a literal attribute.
#[derive(Debug, Clone, Default)]
pub struct Props {
    entries: Vec<(String, PropValue)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a literal attribute, coercing the value to a string
    pub fn attr(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.entries
            .push((name.to_string(), PropValue::Attr(value.to_string())));
        self
    }

    /// Add an event handler under an `on*` key (e.g. `onClick`)
    pub fn on(
        mut self,
        name: &str,
        handler: impl Fn(&crate::Event) -> UiResult<()> + 'static,
    ) -> Self {
        self.entries
            .push((name.to_string(), PropValue::Handler(std::rc::Rc::new(handler))));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a prop by key
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Iterate props in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Construct a virtual element node.
///
/// The tag must be non-empty; props and children are taken verbatim
/// (child lists are flattened later, by the renderer). No side
/// effects.
pub fn h(tag: &str, props: Props, children: Vec<VChild>) -> UiResult<VNode> {
    if tag.trim().is_empty() {
        return Err(UiError::invalid("element tag must be a non-empty string"));
    }
    Ok(VNode::Element(VElement {
        tag: tag.to_string(),
        props,
        children,
    }))
}

/// Build a `Vec<VChild>` from a mixed list of nodes, strings, and
/// numbers.
#[macro_export]
macro_rules! children {
    () => { Vec::<$crate::VChild>::new() };
    ($($child:expr),+ $(,)?) => {
        vec![$($crate::VChild::from($child)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h_shape() {
        let node = h(
            "div",
            Props::new().attr("class", "card"),
            children!["hello", 42],
        )
        .unwrap();

        let VNode::Element(el) = node else {
            panic!("expected element")
        };
        assert_eq!(el.tag, "div");
        assert_eq!(el.props.len(), 1);
        assert!(matches!(el.props.get("class"), Some(PropValue::Attr(v)) if v == "card"));
        assert_eq!(el.children.len(), 2);
        assert!(matches!(&el.children[0], VChild::Text(t) if t == "hello"));
        assert!(matches!(&el.children[1], VChild::Text(t) if t == "42"));
    }

    #[test]
    fn test_h_rejects_empty_tag() {
        assert!(matches!(
            h("", Props::new(), children![]),
            Err(UiError::InvalidArgument { .. })
        ));
        assert!(matches!(
            h("   ", Props::new(), children![]),
            Err(UiError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_list_children_kept_verbatim() {
        let items = vec![VChild::from("a"), VChild::from("b")];
        let node = h("ul", Props::new(), children![items]).unwrap();

        let VNode::Element(el) = node else {
            panic!("expected element")
        };
        assert_eq!(el.children.len(), 1);
        assert!(matches!(&el.children[0], VChild::List(l) if l.len() == 2));
    }

    #[test]
    fn test_attr_coercion() {
        let props = Props::new().attr("tabindex", 3).attr("data-ratio", 0.5);
        assert!(matches!(props.get("tabindex"), Some(PropValue::Attr(v)) if v == "3"));
        assert!(matches!(props.get("data-ratio"), Some(PropValue::Attr(v)) if v == "0.5"));
    }
}
