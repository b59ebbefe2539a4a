//! Layout assembly: grouping a section's components into layouts.

use crate::components::{ComponentRegistry, Matched};
use crate::dom::Element;
use crate::error::{Error, Result};
use crate::id::IdSource;
use crate::model::{Layout, Section};
use crate::sanitize::is_blank;

/// Accumulates rendered components into layouts.
///
/// A new layout starts when there is none yet, when the match asks for one,
/// or when the matcher kind differs from the previous component's.
pub struct LayoutAssembler<'i> {
    ids: &'i dyn IdSource,
    layouts: Vec<Layout>,
    current: Option<Layout>,
    previous_kind: Option<String>,
}

impl<'i> LayoutAssembler<'i> {
    /// Create an assembler drawing names from `ids`.
    pub fn new(ids: &'i dyn IdSource) -> Self {
        Self {
            ids,
            layouts: Vec::new(),
            current: None,
            previous_kind: None,
        }
    }

    /// Render a match into the active layout, opening a new one if needed.
    pub fn push(&mut self, matched: &Matched<'_, '_>) {
        let kind = matched.kind();
        let boundary = self.current.is_none()
            || matched.requires_new_layout()
            || self.previous_kind.as_deref() != Some(kind);

        if boundary {
            let fresh = matched.layout(self.ids);
            if let Some(done) = self.current.replace(fresh) {
                self.layouts.push(done);
            }
        }

        let component = matched.render(self.ids);
        if let Some(layout) = self.current.as_mut() {
            layout.add_component(component);
        }
        self.previous_kind = Some(kind.to_string());
    }

    /// Number of layouts opened so far.
    pub fn len(&self) -> usize {
        self.layouts.len() + usize::from(self.current.is_some())
    }

    /// Check if no layout has been opened.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Close the active layout and return all layouts in order.
    pub fn finish(mut self) -> Vec<Layout> {
        if let Some(layout) = self.current.take() {
            self.layouts.push(layout);
        }
        self.layouts
    }
}

/// Convert the direct children of a section into a [`Section`].
///
/// Whitespace-only children that no matcher claims are skipped, as are
/// claimed children with no text. Any other unclaimed child aborts the
/// conversion. Returns `None` when nothing was rendered.
pub fn convert_section(
    section: Element<'_>,
    registry: &ComponentRegistry,
    ids: &dyn IdSource,
) -> Result<Option<Section>> {
    let mut assembler = LayoutAssembler::new(ids);

    for child in section.children() {
        let Some(matched) = registry.find(child) else {
            if is_blank(&child.value()) {
                continue;
            }
            return Err(Error::UnclassifiableElement {
                tag: child.open_tag(),
            });
        };

        if matched.is_empty() {
            log::debug!("skipping empty {}", child.open_tag());
            continue;
        }

        assembler.push(&matched);
    }

    let layouts = assembler.finish();
    if layouts.is_empty() {
        return Ok(None);
    }

    log::debug!("section assembled into {} layouts", layouts.len());
    Ok(Some(Section::new(ids.next_id(), layouts)))
}
