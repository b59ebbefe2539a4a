//! Arena-backed DOM used as the working document during conversion.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`], so a
//! subtree stays addressable after it has been detached from its parent.
//! Section extraction relies on this: a detached section keeps its children
//! and can still be walked while the rest of the document shrinks.

mod element;
mod parser;

pub use element::{Element, BLOCK_TAGS, TEXT_TAG};
pub use parser::{parse_document, ParsedHtml};

use crate::error::{Error, Result};

/// Index of a node inside a [`Dom`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A mutable document tree.
///
/// The only structural mutations are appending a detached node and removing
/// a node from its parent. Removed nodes are never freed; their ids stay
/// valid for the lifetime of the arena.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Dom {
    /// Create a document with a single root element.
    pub fn new(root_tag: impl Into<String>) -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        dom.root = dom.create_element(root_tag, Vec::new());
        dom
    }

    /// Get the document root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes ever created in this arena, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element node.
    pub fn create_element(
        &mut self,
        tag: impl Into<String>,
        attributes: Vec<(String, String)>,
    ) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.into().to_ascii_lowercase(),
            attributes,
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Append a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;

        if parent == child || child == self.root {
            return Err(Error::Structure(format!(
                "node {} cannot be appended to node {}",
                child.0, parent.0
            )));
        }
        if self.nodes[child.0].parent.is_some() {
            return Err(Error::Structure(format!(
                "node {} is already attached",
                child.0
            )));
        }
        if matches!(self.nodes[parent.0].kind, NodeKind::Text(_)) {
            return Err(Error::Structure("text nodes cannot have children".into()));
        }

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        Ok(())
    }

    /// Detach a node from its parent's child list.
    ///
    /// The node keeps its own children. Removing a node without a parent
    /// (the root, or an already detached subtree) is an error.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;

        let parent = self.nodes[id.0].parent.ok_or_else(|| {
            Error::Structure(format!("node {} has no parent to be removed from", id.0))
        })?;

        self.nodes[parent.0].children.retain(|child| *child != id);
        self.nodes[id.0].parent = None;
        Ok(())
    }

    /// Get a read-only view over a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this arena.
    pub fn element(&self, id: NodeId) -> Element<'_> {
        assert!(id.0 < self.nodes.len(), "node {} is not in this DOM", id.0);
        Element::new(self, id)
    }

    /// Get a read-only view over a node, if the id belongs to this arena.
    pub fn get(&self, id: NodeId) -> Option<Element<'_>> {
        (id.0 < self.nodes.len()).then(|| Element::new(self, id))
    }

    /// Find the first element with the given tag at or below `from`, in document order.
    pub fn find_first(&self, from: NodeId, tag: &str) -> Option<NodeId> {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(id.0)?;
            if let NodeKind::Element { tag: ref name, .. } = node.kind {
                if name.eq_ignore_ascii_case(tag) {
                    return Some(id);
                }
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(Error::Structure(format!("node {} is not in this DOM", id.0)))
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}
