//! Flattening of the section tree into one linear element sequence.

use crate::model::{ContentElement, Document, ElementBody, Section};

/// Break type tag attached to breaks synthesized from `pageBreakAfter`.
pub const SECTION_BREAK_TYPE: &str = "section";

/// Flatten a document into the sequence the paginator works on.
///
/// Each section contributes, in order: a heading synthesized from its title
/// (level `min(6, section.level + 1)`, id `<section>_title`), its content
/// elements as written, and a `PageBreak` of type `"section"` (id
/// `<section>_break`) when `page_break_after` is set.
pub fn flatten(document: &Document) -> Vec<ContentElement> {
    let mut elements = Vec::with_capacity(document.element_count() + 2 * document.sections.len());
    for section in &document.sections {
        flatten_section(section, &mut elements);
    }
    elements
}

fn flatten_section(section: &Section, out: &mut Vec<ContentElement>) {
    if let Some(ref title) = section.title {
        let level = section.level.saturating_add(1).min(6);
        out.push(ContentElement::heading(
            format!("{}_title", section.id),
            level,
            title.clone(),
        ));
    }

    out.extend(section.content.iter().cloned());

    if section.page_break_after {
        out.push(ContentElement::new(
            format!("{}_break", section.id),
            ElementBody::PageBreak {
                break_type: Some(SECTION_BREAK_TYPE.to_string()),
            },
        ));
    }
}
