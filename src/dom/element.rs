//! Read-only navigation view over a DOM node.

use super::{Dom, NodeId, NodeKind};

/// Tag name reported for text nodes.
pub const TEXT_TAG: &str = "#text";

/// Tags treated as structural (non-inline) units when carving sections.
pub const BLOCK_TAGS: &[&str] = &[
    "blockquote",
    "code",
    "div",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "li",
    "p",
    "ol",
    "ul",
    "img",
];

/// A thin view over one node of a [`Dom`].
///
/// Views are cheap to copy and never outlive the arena they borrow. Once the
/// underlying node has been removed, `parent()` returns `None` and sibling
/// navigation no longer reflects the original document.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    dom: &'a Dom,
    id: NodeId,
}

impl<'a> Element<'a> {
    pub(super) fn new(dom: &'a Dom, id: NodeId) -> Self {
        Self { dom, id }
    }

    /// Id of the wrapped node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Lowercase tag name, or [`TEXT_TAG`] for text nodes.
    pub fn tag_name(&self) -> &'a str {
        match &self.dom.node(self.id).kind {
            NodeKind::Element { tag, .. } => tag.as_str(),
            NodeKind::Text(_) => TEXT_TAG,
        }
    }

    /// Textual content: the text itself for text nodes, the concatenated
    /// text of all descendants for elements.
    pub fn value(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![self.id];

        while let Some(id) = pending.pop() {
            let node = self.dom.node(id);
            match &node.kind {
                NodeKind::Text(text) => out.push_str(text),
                NodeKind::Element { .. } => pending.extend(node.children.iter().rev()),
            }
        }

        out
    }

    /// All attributes in source order. Empty for text nodes.
    pub fn attributes(&self) -> &'a [(String, String)] {
        match &self.dom.node(self.id).kind {
            NodeKind::Element { attributes, .. } => attributes.as_slice(),
            NodeKind::Text(_) => &[],
        }
    }

    /// Value of an attribute, or an empty string if it is absent.
    pub fn attribute(&self, name: &str) -> &'a str {
        self.attributes()
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Check whether the tag is in the block allow-list.
    pub fn is_block(&self) -> bool {
        BLOCK_TAGS.contains(&self.tag_name())
    }

    /// Check if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self.dom.node(self.id).kind, NodeKind::Text(_))
    }

    /// Check if this is a text node holding only whitespace.
    pub fn is_whitespace(&self) -> bool {
        match &self.dom.node(self.id).kind {
            NodeKind::Text(text) => text.trim().is_empty(),
            NodeKind::Element { .. } => false,
        }
    }

    /// Check if the node has any child nodes, text included.
    pub fn has_children(&self) -> bool {
        !self.dom.node(self.id).children.is_empty()
    }

    /// Number of child nodes.
    pub fn num_children(&self) -> usize {
        self.dom.node(self.id).children.len()
    }

    /// Snapshot of the child list, in order.
    pub fn children(&self) -> Vec<Element<'a>> {
        self.dom
            .node(self.id)
            .children
            .iter()
            .map(|id| Element::new(self.dom, *id))
            .collect()
    }

    /// Child at `index`, if there is one.
    pub fn child(&self, index: usize) -> Option<Element<'a>> {
        self.dom
            .node(self.id)
            .children
            .get(index)
            .map(|id| Element::new(self.dom, *id))
    }

    /// Parent element, if the node is attached.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.dom
            .node(self.id)
            .parent
            .map(|id| Element::new(self.dom, id))
    }

    /// Next node in document order: first child, else next sibling, else the
    /// next sibling of the nearest ancestor that has one.
    pub fn next(&self) -> Option<Element<'a>> {
        if let Some(first) = self.dom.node(self.id).children.first() {
            return Some(Element::new(self.dom, *first));
        }

        let mut current = self.id;
        loop {
            let parent = self.dom.node(current).parent?;
            let siblings = &self.dom.node(parent).children;
            let position = siblings.iter().position(|id| *id == current)?;
            if let Some(next) = siblings.get(position + 1) {
                return Some(Element::new(self.dom, *next));
            }
            current = parent;
        }
    }

    /// Check whether any ancestor has one of the given tag names.
    pub fn is_descendant_of(&self, tags: &[&str]) -> bool {
        let mut parent = self.parent();
        while let Some(p) = parent {
            if tags.contains(&p.tag_name()) {
                return true;
            }
            parent = p.parent();
        }
        false
    }

    /// Opening tag with its attributes, e.g. `<div class="note">`.
    pub fn open_tag(&self) -> String {
        let mut tag = format!("<{}", self.tag_name());
        for (name, value) in self.attributes() {
            tag.push_str(&format!(" {}=\"{}\"", name, value));
        }
        tag.push('>');
        tag
    }
}

impl std::fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("tag", &self.tag_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Dom, NodeId, NodeId, NodeId) {
        // <body><p class="lead">Hello <strong>world</strong></p> </body>
        let mut dom = Dom::new("body");
        let body = dom.root();
        let p = dom.create_element("p", vec![("class".into(), "lead".into())]);
        let hello = dom.create_text("Hello ");
        let strong = dom.create_element("strong", Vec::new());
        let world = dom.create_text("world");
        let space = dom.create_text(" ");
        dom.append_child(strong, world).unwrap();
        dom.append_child(p, hello).unwrap();
        dom.append_child(p, strong).unwrap();
        dom.append_child(body, p).unwrap();
        dom.append_child(body, space).unwrap();
        (dom, p, strong, space)
    }

    #[test]
    fn test_value_concatenates_descendants() {
        let (dom, p, strong, _) = sample();
        assert_eq!(dom.element(p).value(), "Hello world");
        assert_eq!(dom.element(strong).value(), "world");
    }

    #[test]
    fn test_value_of_deep_nesting() {
        let mut dom = Dom::new("body");
        let mut parent = dom.root();
        for _ in 0..10_000 {
            let span = dom.create_element("span", Vec::new());
            dom.append_child(parent, span).unwrap();
            parent = span;
        }
        let text = dom.create_text("deep");
        dom.append_child(parent, text).unwrap();

        assert_eq!(dom.element(dom.root()).value(), "deep");
    }

    #[test]
    fn test_block_and_text() {
        let (dom, p, strong, space) = sample();
        assert!(dom.element(p).is_block());
        assert!(!dom.element(strong).is_block());
        assert!(dom.element(space).is_text());
        assert!(dom.element(space).is_whitespace());
        assert_eq!(dom.element(space).tag_name(), TEXT_TAG);
        assert!(!dom.element(dom.root()).is_block());
    }

    #[test]
    fn test_attributes() {
        let (dom, p, _, space) = sample();
        assert_eq!(dom.element(p).attribute("class"), "lead");
        assert_eq!(dom.element(p).attribute("missing"), "");
        assert_eq!(dom.element(space).attribute("class"), "");
        assert_eq!(dom.element(p).open_tag(), "<p class=\"lead\">");
    }

    #[test]
    fn test_children_and_parent() {
        let (dom, p, strong, _) = sample();
        let body = dom.element(dom.root());
        assert!(body.has_children());
        assert_eq!(body.num_children(), 2);
        assert_eq!(dom.element(strong).parent().map(|e| e.id()), Some(p));
        assert!(body.parent().is_none());
        assert!(dom.element(strong).children()[0].children().is_empty());
        assert_eq!(body.child(1).map(|e| e.tag_name()), Some(TEXT_TAG));
        assert!(body.child(2).is_none());
    }

    #[test]
    fn test_next_in_document_order() {
        let (dom, p, _, space) = sample();
        let order: Vec<&str> = std::iter::successors(Some(dom.element(p)), |e| e.next())
            .map(|e| e.tag_name())
            .collect();
        assert_eq!(order, vec!["p", TEXT_TAG, "strong", TEXT_TAG, TEXT_TAG]);
        assert!(dom.element(space).next().is_none());
    }

    #[test]
    fn test_is_descendant_of() {
        let (dom, _, strong, _) = sample();
        assert!(dom.element(strong).is_descendant_of(&["p"]));
        assert!(dom.element(strong).is_descendant_of(&["ul", "body"]));
        assert!(!dom.element(strong).is_descendant_of(&["li"]));
    }
}
