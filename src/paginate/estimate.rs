//! Heuristic height estimation.
//!
//! Heights are coarse pixel estimates derived from element kind and content
//! size; there is no text shaping. The formulas are fixed so that page counts
//! stay stable across releases.

use super::breaks::{self, BreakEligibility};
use super::PaginationConfig;
use crate::model::{ContentElement, ElementBody, ParagraphContent};

/// Pixels per estimated line of text.
pub const LINE_HEIGHT: f64 = 20.0;

/// Characters per estimated line of paragraph text.
pub const CHARS_PER_LINE: usize = 100;

/// Floor applied to every estimate.
pub const MIN_ELEMENT_HEIGHT: f64 = 10.0;

/// Height used for images without a usable explicit height.
pub const DEFAULT_IMAGE_HEIGHT: f64 = 200.0;

/// Height used for kinds without a dedicated rule.
pub const DEFAULT_ELEMENT_HEIGHT: f64 = 30.0;

/// Estimated height and break eligibility of one flattened element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightEstimate {
    /// Index of the element in the flattened sequence
    pub index: usize,
    /// Estimated height in pixels, spacing included
    pub height: f64,
    /// A new page may start at this element
    pub can_break_before: bool,
    /// A new page may start right after this element. The partition loop
    /// only consults `can_break_before`; this is reported for callers that
    /// lay pages out themselves.
    pub can_break_after: bool,
    /// The element may be split across two pages
    pub can_break_inside: bool,
}

impl HeightEstimate {
    /// Estimate the element at `index`.
    pub fn of(index: usize, element: &ContentElement, config: &PaginationConfig) -> Self {
        let BreakEligibility {
            before,
            after,
            inside,
        } = breaks::classify(element, config);
        Self {
            index,
            height: estimate_height(element, config),
            can_break_before: before,
            can_break_after: after,
            can_break_inside: inside,
        }
    }
}

/// Estimate every element of a flattened sequence.
pub fn estimate_all(elements: &[ContentElement], config: &PaginationConfig) -> Vec<HeightEstimate> {
    elements
        .iter()
        .enumerate()
        .map(|(i, element)| HeightEstimate::of(i, element, config))
        .collect()
}

/// Estimated rendered height of an element in pixels.
///
/// Typography spacing (`paragraph_spacing + 2 * list_item_spacing`) is added
/// to every kind, not only paragraphs and lists.
pub fn estimate_height(element: &ContentElement, config: &PaginationConfig) -> f64 {
    let spacing = config.paragraph_spacing + config.list_item_spacing * 2.0;
    (base_height(element, config) + spacing).max(MIN_ELEMENT_HEIGHT)
}

/// Kind-specific height before spacing.
pub fn base_height(element: &ContentElement, config: &PaginationConfig) -> f64 {
    match &element.body {
        ElementBody::Text { .. } => LINE_HEIGHT,
        ElementBody::Heading { level, .. } => 40.0 - f64::from(*level) * 4.0,
        ElementBody::Paragraph { content } => match content {
            ParagraphContent::Text(text) => paragraph_lines(text) as f64 * LINE_HEIGHT,
            ParagraphContent::Elements(_) => 2.0 * LINE_HEIGHT,
        },
        ElementBody::List { items, .. } => items.len() as f64 * 30.0,
        ElementBody::Table { rows } => rows.len() as f64 * 25.0,
        ElementBody::Image { height, .. } => height
            .as_ref()
            .and_then(|h| h.to_pixels())
            .unwrap_or(DEFAULT_IMAGE_HEIGHT),
        ElementBody::Divider => 10.0,
        ElementBody::PageBreak { .. } => config.page_break_margin,
        ElementBody::ListItem { .. }
        | ElementBody::Code { .. }
        | ElementBody::Quote { .. }
        | ElementBody::Section { .. }
        | ElementBody::Custom { .. } => DEFAULT_ELEMENT_HEIGHT,
    }
}

/// `ceil(chars / 100)` lines of paragraph text.
fn paragraph_lines(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_LINE)
}
