//! A minimal element tree standing in for the host page's DOM.
//!
//! Nodes live in an arena keyed by [`NodeId`]. Only what the carousel needs
//! is modelled: tags, classes, attributes, optional text, and parent/child
//! links. Attributes are kept in an ordered map so snapshots are stable.

use std::collections::BTreeMap;

use slotmap::{SlotMap, new_key_type};

use crate::error::{Error, Result};

new_key_type! {
    /// A unique identifier for an element in a [`Document`].
    pub struct NodeId;
}

/// One element of the document.
#[derive(Debug, Clone, Default)]
pub struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// The lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Class names in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// All attributes, ordered by name.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Text content directly on this node.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The parent element, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// An arena of elements.
#[derive(Debug, Default)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        })
    }

    /// Create a detached element carrying the given classes.
    pub fn create_element_with_classes(&mut self, tag: &str, classes: &[&str]) -> NodeId {
        let id = self.create_element(tag);
        if let Some(node) = self.nodes.get_mut(id) {
            node.classes = classes.iter().map(|c| (*c).to_string()).collect();
        }
        id
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Whether the node exists in this document.
    pub fn exists(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The lowercase tag name, if the node exists.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(|n| n.tag.as_str())
    }

    /// The parent element, if any.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Child elements in document order (empty for unknown nodes).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Child elements with the given tag.
    pub fn children_with_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.tag(child) == Some(tag))
            .collect()
    }

    /// Detach a node from its parent. The node and its subtree stay in the arena.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let parent = self.node_mut(id)?.parent.take();
        if let Some(parent) = parent
            && let Some(parent) = self.nodes.get_mut(parent)
        {
            parent.children.retain(|&c| c != id);
        }
        Ok(())
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.exists(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        if !self.exists(child) {
            return Err(Error::NodeNotFound(child));
        }
        if self.contains(child, parent) {
            return Err(Error::HierarchyCycle { parent, child });
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insert(parent, child)?;
        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Insert `child` as the first child of `parent`, moving it if attached elsewhere.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insert(parent, child)?;
        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.insert(0, child);
        Ok(())
    }

    /// Read an attribute.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    /// Whether an attribute is present.
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Set an attribute.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> Result<()> {
        self.node_mut(id)?
            .attributes
            .insert(name.to_string(), value.into());
        Ok(())
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>> {
        Ok(self.node_mut(id)?.attributes.remove(name))
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        let node = self.node_mut(id)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    /// Whether the node carries the class.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    /// Set the node's own text.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.text = Some(text.into());
        Ok(())
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// The closest inclusive ancestor matching the predicate.
    pub fn closest<F>(&self, id: NodeId, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(NodeId, &Node) -> bool,
    {
        let mut current = Some(id);
        while let Some(candidate) = current {
            let node = self.nodes.get(candidate)?;
            if predicate(candidate, node) {
                return Some(candidate);
            }
            current = node.parent;
        }
        None
    }

    /// All descendants of `root` in document order, excluding `root`.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Descendants of `root` matching the predicate, in document order.
    pub fn find_all<F>(&self, root: NodeId, mut predicate: F) -> Vec<NodeId>
    where
        F: FnMut(NodeId, &Node) -> bool,
    {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.nodes.get(id).is_some_and(|n| predicate(id, n)))
            .collect()
    }

    /// The first descendant of `root` matching the predicate.
    pub fn find_first<F>(&self, root: NodeId, mut predicate: F) -> Option<NodeId>
    where
        F: FnMut(NodeId, &Node) -> bool,
    {
        self.descendants(root)
            .into_iter()
            .find(|&id| self.nodes.get(id).is_some_and(|n| predicate(id, n)))
    }

    /// Descendants of `root` carrying the class.
    pub fn find_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.find_all(root, |_, n| n.classes.iter().any(|c| c == class))
    }

    /// The first descendant of `root` carrying the class.
    pub fn first_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.find_first(root, |_, n| n.classes.iter().any(|c| c == class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_prepend_order() {
        let mut doc = Document::new();
        let list = doc.create_element("UL");
        let a = doc.create_element("li");
        let b = doc.create_element("li");

        doc.append_child(list, a).unwrap();
        doc.prepend_child(list, b).unwrap();

        assert_eq!(doc.tag(list), Some("ul"));
        assert_eq!(doc.children(list), &[b, a]);
        assert_eq!(doc.parent(a), Some(list));
    }

    #[test]
    fn test_append_moves_between_parents() {
        let mut doc = Document::new();
        let row = doc.create_element("div");
        let slide = doc.create_element("li");
        let column = doc.create_element("div");

        doc.append_child(row, column).unwrap();
        doc.append_child(slide, column).unwrap();

        assert!(doc.children(row).is_empty());
        assert_eq!(doc.children(slide), &[column]);
    }

    #[test]
    fn test_cycle_rejected() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner).unwrap();

        assert!(matches!(
            doc.append_child(inner, outer),
            Err(Error::HierarchyCycle { .. })
        ));
    }

    #[test]
    fn test_attributes_and_classes() {
        let mut doc = Document::new();
        let button = doc.create_element_with_classes("button", &["slide-prev"]);

        doc.set_attribute(button, "disabled", "true").unwrap();
        doc.add_class(button, "slide-prev").unwrap();

        assert!(doc.has_class(button, "slide-prev"));
        assert_eq!(doc.node(button).unwrap().classes().len(), 1);
        assert_eq!(doc.attribute(button, "disabled"), Some("true"));
        assert_eq!(
            doc.remove_attribute(button, "disabled").unwrap(),
            Some("true".to_string())
        );
        assert!(!doc.has_attribute(button, "disabled"));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        let first = doc.create_element("p");
        let nested = doc.create_element("a");
        let second = doc.create_element("p");
        doc.append_child(root, first).unwrap();
        doc.append_child(first, nested).unwrap();
        doc.append_child(root, second).unwrap();

        assert_eq!(doc.descendants(root), vec![first, nested, second]);
        assert!(doc.contains(root, nested));
        assert!(!doc.contains(first, second));
        assert_eq!(
            doc.closest(nested, |_, n| n.tag() == "div"),
            Some(root)
        );
    }

    #[test]
    fn test_stale_node_reports_error() {
        let mut doc = Document::new();
        let other = Document::new().create_element("div");
        assert!(matches!(
            doc.set_attribute(other, "id", "x"),
            Err(Error::NodeNotFound(_))
        ));
    }
}
