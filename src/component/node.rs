//! Virtual element tree produced by `Component::render`
//!
//! A `Node` describes one element: its tag, attributes, style classes,
//! the messages it sends for DOM events, and its children. Platform hosts
//! turn the tree into real elements and route events back as messages.

use std::collections::BTreeMap;

use crate::events::EventType;

/// XML namespace for SVG elements
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// A node in the UI tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node<M> {
    /// Element tag name
    tag: String,

    /// Element namespace (`None` for HTML)
    namespace: Option<&'static str>,

    /// Node attributes, excluding `class`
    attributes: BTreeMap<String, String>,

    /// Style classes in render order
    classes: Vec<String>,

    /// Messages sent for DOM events on this node
    listeners: Vec<(EventType, M)>,

    /// Child nodes
    children: Vec<Node<M>>,

    /// Name of the host content region, for slot nodes
    slot: Option<String>,

    /// Whether this node is bound to the component's native reference
    is_ref: bool,
}

impl<M> Node<M> {
    /// Create an HTML element node
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            namespace: None,
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            listeners: Vec::new(),
            children: Vec::new(),
            slot: None,
            is_ref: false,
        }
    }

    /// Create an SVG element node
    pub fn svg(tag: impl Into<String>) -> Self {
        Self {
            namespace: Some(SVG_NAMESPACE),
            ..Self::element(tag)
        }
    }

    /// Create a named slot for host-supplied content
    pub fn slot(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            slot: Some(name.clone()),
            ..Self::element("slot").attr("name", name)
        }
    }

    /// Add a style class
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add a style class when `active` is true
    pub fn class_if(self, class: impl Into<String>, active: bool) -> Self {
        if active {
            self.class(class)
        } else {
            self
        }
    }

    /// Set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.insert(name.into(), value.to_string());
        self
    }

    /// Set an attribute only when a value is present
    pub fn attr_opt<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Set a boolean attribute: present (empty) when true, absent when false
    pub fn bool_attr(self, name: impl Into<String>, present: bool) -> Self {
        if present {
            self.attr(name, "")
        } else {
            self
        }
    }

    /// Send `message` when `event` fires on this node
    pub fn on(mut self, event: EventType, message: M) -> Self {
        self.listeners.push((event, message));
        self
    }

    /// Append a child node
    pub fn child(mut self, child: Node<M>) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child node when present
    pub fn child_opt(self, child: Option<Node<M>>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    /// Mark this node as the one bound to the native reference
    pub fn node_ref(mut self) -> Self {
        self.is_ref = true;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn namespace(&self) -> Option<&'static str> {
        self.namespace
    }

    /// Get attributes
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Get a single attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether an attribute is present
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Whether the node carries a style class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The value of the `class` attribute
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// All `(event, message)` pairs of this node
    pub fn listeners(&self) -> &[(EventType, M)] {
        &self.listeners
    }

    /// Messages registered for one event type, in registration order
    pub fn listeners_for(&self, event: EventType) -> impl Iterator<Item = &M> + '_ {
        self.listeners
            .iter()
            .filter(move |(ty, _)| *ty == event)
            .map(|(_, message)| message)
    }

    /// Get a reference to this node's children
    pub fn children(&self) -> &[Node<M>] {
        &self.children
    }

    /// Slot name, when this node is a host content region
    pub fn slot_name(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    pub fn is_ref(&self) -> bool {
        self.is_ref
    }

    /// Depth-first search for the first node matching `predicate`
    pub fn find(&self, predicate: &impl Fn(&Node<M>) -> bool) -> Option<&Node<M>> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }

    /// First node carrying `class`
    pub fn find_by_class(&self, class: &str) -> Option<&Node<M>> {
        self.find(&|node| node.has_class(class))
    }

    /// The node bound to the native reference
    pub fn find_ref(&self) -> Option<&Node<M>> {
        self.find(&|node| node.is_ref)
    }

    /// Nodes from the root down to the first match of `predicate`
    ///
    /// Event bubbling walks this path in reverse.
    pub fn path_to(&self, predicate: &impl Fn(&Node<M>) -> bool) -> Option<Vec<&Node<M>>> {
        if predicate(self) {
            return Some(vec![self]);
        }
        self.children.iter().find_map(|child| {
            child.path_to(predicate).map(|mut path| {
                path.insert(0, self);
                path
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditional_builders() {
        let node: Node<()> = Node::element("input")
            .class("a")
            .class_if("b", false)
            .class_if("c", true)
            .attr_opt("min", Some(1.5))
            .attr_opt::<u32>("maxlength", None)
            .bool_attr("disabled", true)
            .bool_attr("readonly", false);

        assert_eq!(node.class_name(), "a c");
        assert_eq!(node.attribute("min"), Some("1.5"));
        assert!(!node.has_attribute("maxlength"));
        assert_eq!(node.attribute("disabled"), Some(""));
        assert!(!node.has_attribute("readonly"));
    }

    #[test]
    fn test_path_to_nested_node() {
        let tree: Node<u8> = Node::element("div")
            .class("root")
            .child(Node::element("span").class("first"))
            .child(
                Node::element("span")
                    .class("second")
                    .child(Node::element("b").class("leaf").on(EventType::Click, 7)),
            );

        let path = tree
            .path_to(&|node| node.has_class("leaf"))
            .expect("leaf should be found");
        let tags: Vec<&str> = path.iter().map(|node| node.tag()).collect();
        assert_eq!(tags, vec!["div", "span", "b"]);

        let leaf = tree.find_by_class("leaf").unwrap();
        assert_eq!(leaf.listeners_for(EventType::Click).collect::<Vec<_>>(), vec![&7]);
        assert!(tree.path_to(&|node| node.has_class("missing")).is_none());
    }

    #[test]
    fn test_slot_node() {
        let slot: Node<()> = Node::slot("prefix");
        assert_eq!(slot.tag(), "slot");
        assert_eq!(slot.slot_name(), Some("prefix"));
        assert_eq!(slot.attribute("name"), Some("prefix"));
    }
}
