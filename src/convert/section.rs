//! Section extraction.
//!
//! The walk is depth-first and innermost-first. The deepest block element
//! that has children marks a section boundary one level up: its parent is
//! detached from the tree and becomes the section. Each pass extracts at
//! most one section, so the walk is repeated over the shrinking tree until
//! a pass finds nothing.

use crate::dom::{Dom, NodeId};
use crate::error::{Error, Result};

/// Outcome of a single extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// A section was detached; the id is its root
    Extracted(NodeId),

    /// Nothing left to extract below the walk root
    Exhausted,

    /// The only candidate would require detaching the walk root or the
    /// document root
    RootReached,
}

/// Run one extraction pass below `root`.
///
/// Nodes are visited in post-order on an explicit stack, so the first
/// candidate found is the innermost one in document order.
pub fn extract_next(dom: &mut Dom, root: NodeId) -> Result<Extraction> {
    // (node, index of the next child to visit)
    let mut stack = vec![(root, 0)];

    while let Some(top) = stack.last_mut() {
        let (node, next) = *top;
        if let Some(child) = dom.element(node).child(next) {
            top.1 += 1;
            stack.push((child.id(), 0));
            continue;
        }

        stack.pop();
        match boundary(dom, node, root)? {
            Extraction::Exhausted => {}
            found => return Ok(found),
        }
    }

    Ok(Extraction::Exhausted)
}

// Checks a node whose children have all been visited.
fn boundary(dom: &mut Dom, node: NodeId, root: NodeId) -> Result<Extraction> {
    let element = dom.element(node);
    if !(element.is_block() && element.has_children()) {
        return Ok(Extraction::Exhausted);
    }

    let parent = match element.parent() {
        Some(parent) if node != root && parent.parent().is_some() => parent,
        _ => return Ok(Extraction::RootReached),
    };

    let section = parent.id();
    log::trace!(
        "section boundary at {} below {}",
        element.open_tag(),
        parent.open_tag()
    );

    dom.remove(section)?;
    Ok(Extraction::Extracted(section))
}

/// Detach every section below `root`, in document order.
///
/// Extraction stops once `root` itself has been taken as a section. Fails
/// with [`Error::InvalidInput`] when the first candidate found is the root.
pub fn extract_sections(dom: &mut Dom, root: NodeId) -> Result<Vec<NodeId>> {
    let mut sections = Vec::new();

    loop {
        match extract_next(dom, root)? {
            Extraction::Extracted(section) => {
                sections.push(section);
                if section == root {
                    break;
                }
            }
            Extraction::Exhausted => break,
            Extraction::RootReached if sections.is_empty() => {
                return Err(Error::InvalidInput(
                    "the document root cannot be converted to a section".into(),
                ));
            }
            Extraction::RootReached => break,
        }
    }

    log::debug!("extracted {} sections", sections.len());
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    fn sections_of(html: &str) -> Vec<String> {
        let mut parsed = parse_document(html);
        let body = parsed.body().unwrap();
        let sections = extract_sections(&mut parsed.dom, body).unwrap();
        sections
            .into_iter()
            .map(|id| parsed.dom.element(id).value())
            .collect()
    }

    #[test]
    fn test_sibling_wrappers_become_sections() {
        let sections = sections_of("<div><p>a</p><p>b</p></div><div><p>c</p></div>");
        assert_eq!(sections, vec!["ab", "c"]);
    }

    #[test]
    fn test_flat_body_is_one_section() {
        let mut parsed = parse_document("<p>one</p><p>two</p>");
        let body = parsed.body().unwrap();
        let sections = extract_sections(&mut parsed.dom, body).unwrap();

        assert_eq!(sections, vec![body]);
        assert!(parsed.dom.element(body).parent().is_none());
        assert_eq!(parsed.dom.element(body).num_children(), 2);
    }

    #[test]
    fn test_innermost_block_wins() {
        let mut parsed = parse_document("<div class=\"outer\"><div class=\"inner\"><p>x</p></div></div>");
        let body = parsed.body().unwrap();

        let first = extract_next(&mut parsed.dom, body).unwrap();
        let Extraction::Extracted(section) = first else {
            panic!("Expected a section, got {:?}", first);
        };
        assert_eq!(parsed.dom.element(section).attribute("class"), "inner");

        // The emptied outer wrapper yields nothing further.
        assert_eq!(extract_next(&mut parsed.dom, body).unwrap(), Extraction::Exhausted);
    }

    #[test]
    fn test_sections_are_detached() {
        let mut parsed = parse_document("<div><p>a</p></div><div><p>b</p></div>");
        let body = parsed.body().unwrap();
        let sections = extract_sections(&mut parsed.dom, body).unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(parsed.dom.element(body).num_children(), 0);
        for section in sections {
            assert!(parsed.dom.element(section).parent().is_none());
        }
    }

    #[test]
    fn test_inline_only_body_has_no_sections() {
        assert!(sections_of("<span>loose</span> text").is_empty());
        assert!(sections_of("").is_empty());
    }

    #[test]
    fn test_block_root_is_rejected() {
        let mut dom = Dom::new("html");
        let html = dom.root();
        let body = dom.create_element("body", Vec::new());
        dom.append_child(html, body).unwrap();
        let div = dom.create_element("div", Vec::new());
        dom.append_child(body, div).unwrap();
        let text = dom.create_text("x");
        dom.append_child(div, text).unwrap();

        assert_eq!(extract_next(&mut dom, div).unwrap(), Extraction::RootReached);
        assert!(matches!(
            extract_sections(&mut dom, div),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_deep_nesting_extracts_innermost_first() {
        // <body><div>…10k…<div><p>x</p></div>…</div></body>
        let mut dom = Dom::new("html");
        let body = dom.create_element("body", Vec::new());
        dom.append_child(dom.root(), body).unwrap();

        let mut parent = body;
        for _ in 0..10_000 {
            let div = dom.create_element("div", Vec::new());
            dom.append_child(parent, div).unwrap();
            parent = div;
        }
        let p = dom.create_element("p", Vec::new());
        dom.append_child(parent, p).unwrap();
        let text = dom.create_text("x");
        dom.append_child(p, text).unwrap();

        let sections = extract_sections(&mut dom, body).unwrap();

        assert_eq!(sections[0], parent);
        assert_eq!(dom.element(sections[0]).value(), "x");
        // Each later pass takes the grandparent of the innermost non-empty div.
        assert_eq!(sections.len(), 3_334);
        assert_eq!(dom.element(body).num_children(), 0);
        assert!(sections[1..].iter().all(|id| dom.element(*id).value().is_empty()));
    }

    #[test]
    fn test_document_root_is_never_detached() {
        // <html><p>x</p></html>: the paragraph's parent is the arena root.
        let mut dom = Dom::new("html");
        let html = dom.root();
        let p = dom.create_element("p", Vec::new());
        dom.append_child(html, p).unwrap();
        let text = dom.create_text("x");
        dom.append_child(p, text).unwrap();

        assert_eq!(extract_next(&mut dom, html).unwrap(), Extraction::RootReached);
    }
}
