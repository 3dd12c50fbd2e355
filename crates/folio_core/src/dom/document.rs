//! Document arena in pre-order (document order).

use crate::dom::element::{Element, ElementSpec, NodeId};
use crate::dom::selector::{Selector, SelectorError};
use std::collections::HashMap;

/// Page document: elements in document order plus an id index.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Element>,
    index: HashMap<NodeId, usize>,
}

impl Document {
    /// Builds a document from a root markup description.
    pub fn from_spec(root: &ElementSpec) -> Self {
        let mut document = Self::default();
        document.push_subtree(root, None);
        document
    }

    fn push_subtree(&mut self, spec: &ElementSpec, parent: Option<NodeId>) -> NodeId {
        let element = Element::from_spec(spec, parent);
        let node_id = element.node_id;
        self.index.insert(node_id, self.nodes.len());
        self.nodes.push(element);

        let mut children = Vec::with_capacity(spec.children.len());
        for child in &spec.children {
            children.push(self.push_subtree(child, Some(node_id)));
        }
        if let Some(position) = self.index.get(&node_id).copied() {
            self.nodes[position].children = children;
        }
        node_id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.nodes.first().map(|element| element.node_id)
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.index.get(&node).map(|position| &self.nodes[*position])
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.index.get(&node) {
            Some(position) => self.nodes.get_mut(*position),
            None => None,
        }
    }

    /// Elements in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.nodes.iter()
    }

    /// First element carrying DOM id `dom_id`, like `getElementById`.
    pub fn element_by_id(&self, dom_id: &str) -> Option<&Element> {
        self.nodes
            .iter()
            .find(|element| element.dom_id.as_deref() == Some(dom_id))
    }

    pub fn node_by_id(&self, dom_id: &str) -> Option<NodeId> {
        self.element_by_id(dom_id).map(|element| element.node_id)
    }

    /// Ancestors of `node`, nearest first. The node itself is excluded.
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors {
            document: self,
            next: self.get(node).and_then(Element::parent),
        }
    }

    pub fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(node)
            .any(|element| element.node_id == ancestor)
    }

    /// Descendants of `node` in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let Some(start) = self.index.get(&node).copied() else {
            return Vec::new();
        };
        // Pre-order layout keeps every subtree contiguous.
        self.nodes[start + 1..]
            .iter()
            .take_while(|element| self.is_descendant_of(element.node_id, node))
            .map(|element| element.node_id)
            .collect()
    }

    pub fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|element| selector.matches(self, element.node_id))
            .map(|element| element.node_id)
            .collect()
    }

    pub fn query_selector(&self, selector: &Selector) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|element| selector.matches(self, element.node_id))
            .map(|element| element.node_id)
    }

    /// Parses `selector` and returns every match in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        Ok(self.query_selector_all(&Selector::parse(selector)?))
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        if self.get(node).is_none() {
            return None;
        }
        if selector.matches(self, node) {
            return Some(node);
        }
        self.ancestors(node)
            .map(|element| element.node_id)
            .find(|candidate| selector.matches(self, *candidate))
    }
}

/// Iterator over ancestors, nearest first.
pub struct Ancestors<'doc> {
    document: &'doc Document,
    next: Option<NodeId>,
}

impl<'doc> Iterator for Ancestors<'doc> {
    type Item = &'doc Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.document.get(self.next?)?;
        self.next = element.parent();
        Some(element)
    }
}
