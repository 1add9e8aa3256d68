//! Content element types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque style or metadata mapping carried through pagination untouched.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// A single unit of report content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentElement {
    /// Document-wide unique identifier
    pub id: String,

    /// Kind-specific payload (serialized inline with a `type` tag)
    #[serde(flatten)]
    pub body: ElementBody,

    /// Style hints for the renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Attributes>,

    /// Free-form metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Attributes>,
}

impl ContentElement {
    /// Create an element from an id and a body.
    pub fn new(id: impl Into<String>, body: ElementBody) -> Self {
        Self {
            id: id.into(),
            body,
            style: None,
            metadata: None,
        }
    }

    /// Create an inline text element.
    pub fn text(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementBody::Text {
                content: content.into(),
            },
        )
    }

    /// Create a heading element.
    pub fn heading(id: impl Into<String>, level: u8, content: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementBody::Heading {
                level,
                content: content.into(),
            },
        )
    }

    /// Create a paragraph with plain text content.
    pub fn paragraph(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementBody::Paragraph {
                content: ParagraphContent::Text(text.into()),
            },
        )
    }

    /// Create a paragraph composed of child elements.
    pub fn paragraph_with(id: impl Into<String>, children: Vec<ContentElement>) -> Self {
        Self::new(
            id,
            ElementBody::Paragraph {
                content: ParagraphContent::Elements(children),
            },
        )
    }

    /// Create a list from item texts. Items get ids `<id>_item<n>` (1-indexed).
    pub fn list<S: Into<String>>(
        id: impl Into<String>,
        ordered: bool,
        items: impl IntoIterator<Item = S>,
    ) -> Self {
        let id = id.into();
        let items = items
            .into_iter()
            .enumerate()
            .map(|(i, text)| ContentElement::list_item(format!("{}_item{}", id, i + 1), text))
            .collect();
        Self::new(
            id,
            ElementBody::List {
                ordered,
                start: None,
                items,
            },
        )
    }

    /// Create a list item.
    pub fn list_item(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementBody::ListItem {
                content: content.into(),
            },
        )
    }

    /// Create a table from rows.
    pub fn table(id: impl Into<String>, rows: Vec<TableRow>) -> Self {
        Self::new(id, ElementBody::Table { rows })
    }

    /// Create an image reference without an explicit height.
    pub fn image(id: impl Into<String>, src: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementBody::Image {
                src: src.into(),
                alt: None,
                height: None,
            },
        )
    }

    /// Create a code block.
    pub fn code(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementBody::Code {
                content: content.into(),
                language: None,
            },
        )
    }

    /// Create a block quote.
    pub fn quote(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementBody::Quote {
                content: content.into(),
            },
        )
    }

    /// Create a horizontal divider.
    pub fn divider(id: impl Into<String>) -> Self {
        Self::new(id, ElementBody::Divider)
    }

    /// Create a manual page break.
    pub fn page_break(id: impl Into<String>) -> Self {
        Self::new(id, ElementBody::PageBreak { break_type: None })
    }

    /// Create an opaque custom element.
    pub fn custom(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            id,
            ElementBody::Custom {
                name: Some(name.into()),
                data: None,
            },
        )
    }

    /// Set an explicit image height. No effect on other kinds.
    pub fn with_height(mut self, value: ImageHeight) -> Self {
        if let ElementBody::Image { ref mut height, .. } = self.body {
            *height = Some(value);
        }
        self
    }

    /// Attach style hints.
    pub fn with_style(mut self, style: Attributes) -> Self {
        self.style = Some(style);
        self
    }

    /// Attach metadata.
    pub fn with_metadata(mut self, metadata: Attributes) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The element's kind tag.
    pub fn kind(&self) -> ElementKind {
        self.body.kind()
    }

    /// Check if this is a manual page break.
    pub fn is_page_break(&self) -> bool {
        matches!(self.body, ElementBody::PageBreak { .. })
    }

    /// Check if this is a paragraph (of either content form).
    pub fn is_paragraph(&self) -> bool {
        matches!(self.body, ElementBody::Paragraph { .. })
    }

    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self.body {
            ElementBody::Heading { level, .. } => Some(level),
            _ => None,
        }
    }

    /// Text of a string-content paragraph.
    pub fn paragraph_text(&self) -> Option<&str> {
        match &self.body {
            ElementBody::Paragraph {
                content: ParagraphContent::Text(text),
            } => Some(text),
            _ => None,
        }
    }
}

/// Kind-specific element payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ElementBody {
    /// Inline text
    Text {
        /// Text content
        #[serde(default)]
        content: String,
    },

    /// A heading
    Heading {
        /// Heading level (1-6)
        level: u8,
        /// Heading text
        #[serde(default)]
        content: String,
    },

    /// A paragraph
    Paragraph {
        /// Plain text or nested elements
        content: ParagraphContent,
    },

    /// A bulleted or numbered list
    List {
        /// Whether the list is numbered
        #[serde(default)]
        ordered: bool,
        /// First number of an ordered list (1 when absent)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<u32>,
        /// List items
        #[serde(default)]
        items: Vec<ContentElement>,
    },

    /// A list item
    ListItem {
        /// Item text
        #[serde(default)]
        content: String,
    },

    /// A table
    Table {
        /// Table rows
        #[serde(default)]
        rows: Vec<TableRow>,
    },

    /// An image reference
    Image {
        /// Image source (path, URL, or resource id)
        #[serde(default)]
        src: String,
        /// Alternative text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        /// Explicit rendered height
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<ImageHeight>,
    },

    /// A code block
    Code {
        /// Code text
        #[serde(default)]
        content: String,
        /// Language hint
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },

    /// A block quote
    Quote {
        /// Quoted text
        #[serde(default)]
        content: String,
    },

    /// A horizontal rule
    Divider,

    /// A manual page break marker
    PageBreak {
        /// Origin of the break (e.g. "section")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        break_type: Option<String>,
    },

    /// A section; only valid at the top level of a document
    Section {
        /// Section title
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Section nesting level
        #[serde(default)]
        level: u8,
        /// Section content
        #[serde(default)]
        content: Vec<ContentElement>,
        /// Force a page break after the section
        #[serde(default)]
        page_break_after: bool,
    },

    /// An element the engine knows nothing about
    Custom {
        /// Renderer-specific name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// Renderer-specific payload
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },
}

impl ElementBody {
    /// The kind tag of this payload.
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementBody::Text { .. } => ElementKind::Text,
            ElementBody::Heading { .. } => ElementKind::Heading,
            ElementBody::Paragraph { .. } => ElementKind::Paragraph,
            ElementBody::List { .. } => ElementKind::List,
            ElementBody::ListItem { .. } => ElementKind::ListItem,
            ElementBody::Table { .. } => ElementKind::Table,
            ElementBody::Image { .. } => ElementKind::Image,
            ElementBody::Code { .. } => ElementKind::Code,
            ElementBody::Quote { .. } => ElementKind::Quote,
            ElementBody::Divider => ElementKind::Divider,
            ElementBody::PageBreak { .. } => ElementKind::PageBreak,
            ElementBody::Section { .. } => ElementKind::Section,
            ElementBody::Custom { .. } => ElementKind::Custom,
        }
    }
}

/// Element kind tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Text,
    Heading,
    Paragraph,
    List,
    ListItem,
    Table,
    Image,
    Code,
    Quote,
    Divider,
    PageBreak,
    Section,
    Custom,
}

impl ElementKind {
    /// The wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Heading => "heading",
            ElementKind::Paragraph => "paragraph",
            ElementKind::List => "list",
            ElementKind::ListItem => "list_item",
            ElementKind::Table => "table",
            ElementKind::Image => "image",
            ElementKind::Code => "code",
            ElementKind::Quote => "quote",
            ElementKind::Divider => "divider",
            ElementKind::PageBreak => "page_break",
            ElementKind::Section => "section",
            ElementKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paragraph content: a plain string or a sequence of inline elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParagraphContent {
    /// Plain text
    Text(String),
    /// Nested elements
    Elements(Vec<ContentElement>),
}

/// An explicit image height: a number of pixels or a CSS length string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageHeight {
    /// Pixels
    Pixels(f64),
    /// CSS length such as `"240px"`
    Css(String),
}

impl ImageHeight {
    /// Resolve to pixels. Only `<n>px` strings are understood.
    pub fn to_pixels(&self) -> Option<f64> {
        let px = match self {
            ImageHeight::Pixels(px) => Some(*px),
            ImageHeight::Css(css) => css
                .trim()
                .strip_suffix("px")
                .and_then(|n| n.trim().parse::<f64>().ok()),
        };
        px.filter(|px| px.is_finite())
    }
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Cell texts
    #[serde(default)]
    pub cells: Vec<String>,

    /// Whether this is a header row
    #[serde(default)]
    pub is_header: bool,
}

impl TableRow {
    /// Create a body row.
    pub fn new(cells: Vec<String>) -> Self {
        Self {
            cells,
            is_header: false,
        }
    }

    /// Create a header row.
    pub fn header(cells: Vec<String>) -> Self {
        Self {
            cells,
            is_header: true,
        }
    }

    /// Create a body row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_item_ids() {
        let list = ContentElement::list("species", true, ["Oak", "Ash", "Beech"]);
        match &list.body {
            ElementBody::List { items, ordered, .. } => {
                assert!(*ordered);
                assert_eq!(items.len(), 3);
                assert_eq!(items[0].id, "species_item1");
                assert_eq!(items[2].id, "species_item3");
                assert_eq!(items[1].kind(), ElementKind::ListItem);
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_image_height_parsing() {
        assert_eq!(ImageHeight::Pixels(120.0).to_pixels(), Some(120.0));
        assert_eq!(ImageHeight::Css("240px".into()).to_pixels(), Some(240.0));
        assert_eq!(ImageHeight::Css(" 12.5 px ".into()).to_pixels(), Some(12.5));
        assert_eq!(ImageHeight::Css("50%".into()).to_pixels(), None);
        assert_eq!(ImageHeight::Css("auto".into()).to_pixels(), None);
        assert_eq!(ImageHeight::Pixels(f64::NAN).to_pixels(), None);
    }

    #[test]
    fn test_with_height_only_applies_to_images() {
        let img = ContentElement::image("img", "tree.png").with_height(ImageHeight::Pixels(90.0));
        assert!(matches!(
            img.body,
            ElementBody::Image {
                height: Some(ImageHeight::Pixels(_)),
                ..
            }
        ));

        let para = ContentElement::paragraph("p", "x").with_height(ImageHeight::Pixels(90.0));
        assert_eq!(para, ContentElement::paragraph("p", "x"));
    }

    #[test]
    fn test_element_json_shape() {
        let json = r#"{"id":"pb","type":"page_break","breakType":"section"}"#;
        let el: ContentElement = serde_json::from_str(json).unwrap();
        assert!(el.is_page_break());
        assert!(matches!(
            el.body,
            ElementBody::PageBreak { break_type: Some(ref t) } if t == "section"
        ));

        let json = r#"{"id":"p","type":"paragraph","content":[{"id":"t","type":"text","content":"hi"}]}"#;
        let el: ContentElement = serde_json::from_str(json).unwrap();
        assert!(el.is_paragraph());
        assert!(el.paragraph_text().is_none());

        let json = r#"{"id":"img","type":"image","src":"a.png","height":"300px"}"#;
        let el: ContentElement = serde_json::from_str(json).unwrap();
        assert!(matches!(
            el.body,
            ElementBody::Image { height: Some(ImageHeight::Css(_)), .. }
        ));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ElementKind::PageBreak.to_string(), "page_break");
        assert_eq!(ContentElement::divider("d").kind(), ElementKind::Divider);
    }
}
