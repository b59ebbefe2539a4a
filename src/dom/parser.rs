//! HTML parsing into the arena DOM.
//!
//! Tokenizing and tree construction are delegated to `scraper` (html5ever);
//! the resulting tree is copied into a [`Dom`] so that it can be mutated
//! during section extraction. Comments, doctypes and processing
//! instructions are dropped on import.

use scraper::{ElementRef, Html, Node as ScraperNode};

use super::{Dom, NodeId};

/// A parsed document together with the parser's error report.
#[derive(Debug, Clone)]
pub struct ParsedHtml {
    /// The working document; its root is the `<html>` element
    pub dom: Dom,

    /// Recoverable parse errors (unclosed tags, stray end tags, ...)
    pub errors: Vec<String>,
}

impl ParsedHtml {
    /// Locate the `<body>` element.
    pub fn body(&self) -> Option<NodeId> {
        self.dom.find_first(self.dom.root(), "body")
    }
}

/// Parse an HTML document or fragment.
///
/// The HTML parser always synthesises `<html>`, `<head>` and `<body>` for
/// fragments, so any input yields a usable tree.
pub fn parse_document(html: &str) -> ParsedHtml {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut dom = Dom::new(root.value().name());
    import_tree(&mut dom, root);

    ParsedHtml {
        dom,
        errors: document.errors.iter().map(|e| e.to_string()).collect(),
    }
}

// Copies the tree below `root` into the arena. Each pending entry pairs an
// imported element with its source; children are appended in source order.
fn import_tree(dom: &mut Dom, root: ElementRef<'_>) {
    let mut pending = vec![(dom.root(), root)];

    while let Some((parent, element)) = pending.pop() {
        for child in element.children() {
            let id = match child.value() {
                ScraperNode::Text(text) => {
                    let content: &str = text;
                    dom.create_text(content)
                }
                ScraperNode::Element(_) => {
                    let Some(child_element) = ElementRef::wrap(child) else {
                        continue;
                    };
                    let value = child_element.value();
                    let attributes = value
                        .attrs()
                        .map(|(name, value)| (name.to_string(), value.to_string()))
                        .collect();
                    let id = dom.create_element(value.name(), attributes);
                    pending.push((id, child_element));
                    id
                }
                _ => continue,
            };

            // Freshly created nodes are always detached, so this cannot fail.
            if let Err(e) = dom.append_child(parent, id) {
                log::warn!("Dropping node while importing HTML: {}", e);
            }
        }
    }
}
