//! Document-level types.

use super::{Attributes, ContentElement, ElementBody, ParagraphContent};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A report document: an ordered sequence of top-level sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Report title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Sections in reading order
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from sections.
    pub fn with_sections(sections: Vec<Section>) -> Self {
        Self {
            title: None,
            sections,
        }
    }

    /// Parse a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Add a section to the document.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of top-level content elements across all sections.
    pub fn element_count(&self) -> usize {
        self.sections.iter().map(|s| s.content.len()).sum()
    }

    /// Check the content model invariants.
    ///
    /// Identifiers must be unique across sections and every nested element,
    /// sections may only appear at the top level, heading levels must be in
    /// 1..=6, and explicit image heights must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(Error::DuplicateId(section.id.clone()));
            }
            for element in &section.content {
                validate_element(element, &mut seen)?;
            }
        }
        Ok(())
    }
}

fn validate_element<'a>(element: &'a ContentElement, seen: &mut HashSet<&'a str>) -> Result<()> {
    if !seen.insert(element.id.as_str()) {
        return Err(Error::DuplicateId(element.id.clone()));
    }

    match &element.body {
        ElementBody::Section { .. } => Err(Error::NestedSection(element.id.clone())),
        ElementBody::Heading { level, .. } if !(1..=6).contains(level) => {
            Err(Error::InvalidHeadingLevel(element.id.clone(), *level))
        }
        ElementBody::Image {
            height: Some(height),
            ..
        } => match height.to_pixels() {
            Some(px) if px < 0.0 => Err(Error::InvalidDocument(format!(
                "image '{}' has negative height {}",
                element.id, px
            ))),
            _ => Ok(()),
        },
        ElementBody::Paragraph {
            content: ParagraphContent::Elements(children),
        } => children
            .iter()
            .try_for_each(|child| validate_element(child, seen)),
        ElementBody::List { items, .. } => items
            .iter()
            .try_for_each(|item| validate_element(item, seen)),
        _ => Ok(()),
    }
}

/// A top-level report section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Document-wide unique identifier
    pub id: String,

    /// Section title, rendered as a heading one level below the section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Nesting level (0 = chapter)
    #[serde(default)]
    pub level: u8,

    /// Content elements
    #[serde(default)]
    pub content: Vec<ContentElement>,

    /// Force a page break after this section
    #[serde(default)]
    pub page_break_after: bool,

    /// Style hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Attributes>,

    /// Free-form metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Attributes>,
}

impl Section {
    /// Create an untitled section.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Create a titled section.
    pub fn titled(id: impl Into<String>, title: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            level,
            ..Default::default()
        }
    }

    /// Append an element (builder style).
    pub fn with_element(mut self, element: ContentElement) -> Self {
        self.content.push(element);
        self
    }

    /// Append several elements (builder style).
    pub fn with_elements(mut self, elements: impl IntoIterator<Item = ContentElement>) -> Self {
        self.content.extend(elements);
        self
    }

    /// Request a page break after this section.
    pub fn with_page_break_after(mut self, enabled: bool) -> Self {
        self.page_break_after = enabled;
        self
    }

    /// Append an element.
    pub fn add_element(&mut self, element: ContentElement) {
        self.content.push(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageHeight;

    fn survey() -> Document {
        Document::with_sections(vec![
            Section::titled("intro", "Introduction", 0)
                .with_element(ContentElement::paragraph("intro-p1", "Survey scope.")),
            Section::titled("trees", "Tree Schedule", 0).with_elements([
                ContentElement::list("species", false, ["Oak", "Ash"]),
                ContentElement::image("plan", "site.png"),
            ]),
        ])
    }

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.element_count(), 0);
    }

    #[test]
    fn test_validate_ok() {
        let doc = survey();
        assert!(doc.validate().is_ok());
        assert_eq!(doc.element_count(), 3);
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let mut doc = survey();
        doc.sections[1].add_element(ContentElement::paragraph("intro-p1", "again"));
        assert!(matches!(doc.validate(), Err(Error::DuplicateId(id)) if id == "intro-p1"));
    }

    #[test]
    fn test_validate_duplicate_list_item_ids() {
        let mut doc = survey();
        doc.sections[0].add_element(ContentElement::paragraph("species_item2", "clash"));
        assert!(matches!(doc.validate(), Err(Error::DuplicateId(_))));
    }

    #[test]
    fn test_validate_nested_section() {
        let mut doc = survey();
        doc.sections[0].add_element(ContentElement::new(
            "inner",
            ElementBody::Section {
                title: None,
                level: 1,
                content: Vec::new(),
                page_break_after: false,
            },
        ));
        assert!(matches!(doc.validate(), Err(Error::NestedSection(id)) if id == "inner"));
    }

    #[test]
    fn test_validate_heading_level() {
        let mut doc = survey();
        doc.sections[0].add_element(ContentElement::heading("h0", 0, "Zero"));
        assert!(matches!(
            doc.validate(),
            Err(Error::InvalidHeadingLevel(_, 0))
        ));
    }

    #[test]
    fn test_validate_negative_image_height() {
        let mut doc = survey();
        doc.sections[0].add_element(
            ContentElement::image("neg", "x.png").with_height(ImageHeight::Pixels(-5.0)),
        );
        assert!(matches!(doc.validate(), Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn test_document_from_json() {
        let json = r#"{
            "title": "Arboricultural Survey",
            "sections": [
                {
                    "id": "s1",
                    "title": "Findings",
                    "level": 1,
                    "pageBreakAfter": true,
                    "content": [
                        {"id": "p1", "type": "paragraph", "content": "Three mature oaks."},
                        {"id": "t1", "type": "table", "rows": [{"cells": ["T1", "Oak"], "isHeader": false}]}
                    ]
                }
            ]
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.title.as_deref(), Some("Arboricultural Survey"));
        assert!(doc.sections[0].page_break_after);
        assert_eq!(doc.sections[0].content.len(), 2);
        assert_eq!(
            doc.sections[0].content[0].paragraph_text(),
            Some("Three mature oaks.")
        );
    }
}
