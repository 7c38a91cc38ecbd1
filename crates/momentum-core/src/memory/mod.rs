//! An in-process document.
//!
//! `MemoryDom` is a small element tree backed by a `petgraph` stable graph:
//! edges point parent → child and carry an append sequence number, so child
//! order is append order. Detached elements live in the graph with no
//! incoming edge. There are no text nodes; an element's text content is a
//! field on the element itself.

pub mod selector;

use crate::dom::{Dom, DomError, NameKind, is_valid_name};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use selector::SelectorList;
use smallvec::SmallVec;

/// Handle to an element (or the document node) in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(NodeIndex);

/// One element's own state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementData {
    /// Lowercased local name; `#document` for the document node.
    pub tag: String,
    /// Lowercased names, insertion order.
    pub attributes: SmallVec<[(String, String); 4]>,
    /// CSS property names, insertion order.
    pub styles: SmallVec<[(String, String); 4]>,
    pub text: Option<String>,
}

impl ElementData {
    fn new(tag: String) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|c| c.split_ascii_whitespace().any(|t| t == class))
    }

    fn set_pair(pairs: &mut SmallVec<[(String, String); 4]>, name: String, value: &str) {
        match pairs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => pairs.push((name, value.to_string())),
        }
    }
}

/// An HTML-like document held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    graph: StableDiGraph<ElementData, u64>,
    document: NodeIndex,
    next_seq: u64,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// A document with the usual `html > head + body` skeleton.
    pub fn new() -> Self {
        let mut dom = Self::empty();
        let html = dom.graph.add_node(ElementData::new("html".to_string()));
        dom.link(dom.document, html);
        for tag in ["head", "body"] {
            let idx = dom.graph.add_node(ElementData::new(tag.to_string()));
            dom.link(html, idx);
        }
        dom
    }

    /// A document node with no children.
    pub fn empty() -> Self {
        let mut graph = StableDiGraph::new();
        let document = graph.add_node(ElementData::new("#document".to_string()));
        Self {
            graph,
            document,
            next_seq: 0,
        }
    }

    pub fn document(&self) -> NodeHandle {
        NodeHandle(self.document)
    }

    /// The root element (`html`), if present.
    pub fn document_element(&self) -> Option<NodeHandle> {
        self.children(self.document()).into_iter().next()
    }

    pub fn body(&self) -> Option<NodeHandle> {
        self.root_child("body")
    }

    pub fn head(&self) -> Option<NodeHandle> {
        self.root_child("head")
    }

    fn root_child(&self, tag: &str) -> Option<NodeHandle> {
        let html = self.document_element()?;
        self.children(html)
            .into_iter()
            .find(|&c| self.tag_name(c) == Some(tag))
    }

    /// Total nodes, connected or not, including the document node.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn element(&self, node: NodeHandle) -> Option<&ElementData> {
        self.graph.node_weight(node.0)
    }

    pub fn tag_name(&self, node: NodeHandle) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    pub fn attribute(&self, node: NodeHandle, name: &str) -> Option<&str> {
        self.element(node)?.attribute(name)
    }

    pub fn class_name(&self, node: NodeHandle) -> Option<&str> {
        self.attribute(node, "class")
    }

    pub fn class_list(&self, node: NodeHandle) -> Vec<&str> {
        self.class_name(node)
            .map(|c| c.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn text(&self, node: NodeHandle) -> Option<&str> {
        self.element(node)?.text.as_deref()
    }

    /// Inline style value for a CSS property name.
    pub fn style(&self, node: NodeHandle, property: &str) -> Option<&str> {
        self.element(node)?
            .styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.graph
            .neighbors_directed(node.0, Direction::Incoming)
            .next()
            .map(NodeHandle)
    }

    /// Parent, unless the parent is the document node.
    pub fn parent_element(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.parent(node).filter(|p| p.0 != self.document)
    }

    /// Children in append order.
    pub fn children(&self, node: NodeHandle) -> Vec<NodeHandle> {
        let mut edges: Vec<(u64, NodeIndex)> = self
            .graph
            .edges_directed(node.0, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        edges.sort_unstable();
        edges.into_iter().map(|(_, idx)| NodeHandle(idx)).collect()
    }

    /// Whether the node is reachable from the document node.
    pub fn is_connected(&self, node: NodeHandle) -> bool {
        self.ancestors(node).any(|a| a.0 == self.document) || node.0 == self.document
    }

    /// Parents, nearest first.
    pub fn ancestors(&self, node: NodeHandle) -> impl Iterator<Item = NodeHandle> + '_ {
        std::iter::successors(self.parent(node), move |&n| self.parent(n))
    }

    /// Connected elements in document (pre-order) order, document node excluded.
    pub fn descendants(&self) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeHandle> = self.children(self.document()).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).into_iter().rev());
        }
        out
    }

    fn matching(&self, locator: &str) -> Result<impl Iterator<Item = NodeHandle> + '_, DomError> {
        let selectors = SelectorList::parse(locator)?;
        Ok(self
            .descendants()
            .into_iter()
            .filter(move |&node| selectors.matches(self, node)))
    }

    fn element_mut(&mut self, node: NodeHandle) -> Result<&mut ElementData, DomError> {
        self.graph.node_weight_mut(node.0).ok_or(DomError::NotFound)
    }

    fn link(&mut self, parent: NodeIndex, child: NodeIndex) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.graph.add_edge(parent, child, seq);
    }

    fn detach(&mut self, node: NodeIndex) {
        let incoming: Vec<_> = self
            .graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| e.id())
            .collect();
        for edge in incoming {
            self.graph.remove_edge(edge);
        }
    }
}

impl Dom for MemoryDom {
    type Node = NodeHandle;
    type Parent = NodeHandle;

    fn as_parent(node: NodeHandle) -> NodeHandle {
        node
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeHandle, DomError> {
        if !is_valid_name(tag) {
            return Err(DomError::InvalidCharacter {
                kind: NameKind::Element,
                name: tag.to_string(),
            });
        }
        let idx = self.graph.add_node(ElementData::new(tag.to_ascii_lowercase()));
        Ok(NodeHandle(idx))
    }

    fn get_element_by_id(&self, id: &str) -> Option<NodeHandle> {
        if id.is_empty() {
            return None;
        }
        self.descendants()
            .into_iter()
            .find(|&node| self.attribute(node, "id") == Some(id))
    }

    fn query_selector(&self, locator: &str) -> Result<Option<NodeHandle>, DomError> {
        Ok(self.matching(locator)?.next())
    }

    fn query_selector_all(&self, locator: &str) -> Result<Vec<NodeHandle>, DomError> {
        Ok(self.matching(locator)?.collect())
    }

    fn append_child(&mut self, parent: &NodeHandle, child: &NodeHandle) -> Result<(), DomError> {
        if self.element(*parent).is_none() || self.element(*child).is_none() {
            return Err(DomError::NotFound);
        }
        if child.0 == self.document {
            return Err(DomError::HierarchyRequest {
                reason: "the document cannot be a child".into(),
            });
        }
        if parent == child || self.ancestors(*parent).any(|a| a == *child) {
            return Err(DomError::HierarchyRequest {
                reason: "the new child is an ancestor of the parent".into(),
            });
        }
        if parent.0 == self.document
            && self
                .document_element()
                .is_some_and(|root| root != *child)
        {
            return Err(DomError::HierarchyRequest {
                reason: "the document already has a root element".into(),
            });
        }
        self.detach(child.0);
        self.link(parent.0, child.0);
        Ok(())
    }

    fn set_class_name(&mut self, element: &NodeHandle, value: &str) -> Result<(), DomError> {
        self.set_attribute(element, "class", value)
    }

    fn set_text_content(&mut self, element: &NodeHandle, text: &str) -> Result<(), DomError> {
        self.element_mut(*element)?;
        for child in self.children(*element) {
            self.detach(child.0);
        }
        self.element_mut(*element)?.text = Some(text.to_string());
        Ok(())
    }

    fn set_attribute(
        &mut self,
        element: &NodeHandle,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        if !is_valid_name(name) {
            return Err(DomError::InvalidCharacter {
                kind: NameKind::Attribute,
                name: name.to_string(),
            });
        }
        let data = self.element_mut(*element)?;
        ElementData::set_pair(&mut data.attributes, name.to_ascii_lowercase(), value);
        Ok(())
    }

    fn set_style_property(
        &mut self,
        element: &NodeHandle,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let data = self.element_mut(*element)?;
        if value.is_empty() {
            data.styles.retain(|(k, _)| k != property);
        } else {
            ElementData::set_pair(&mut data.styles, property.to_string(), value);
        }
        Ok(())
    }
}
