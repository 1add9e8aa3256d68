//! Splitting of oversized paragraphs and lists across a page boundary.

use super::PaginationConfig;
use crate::model::{ContentElement, ElementBody, ParagraphContent};

/// Smallest share of an element kept on the page it breaks out of.
pub const MIN_SPLIT_RATIO: f64 = 0.3;

/// Largest share of an element kept on the page it breaks out of.
pub const MAX_SPLIT_RATIO: f64 = 0.7;

/// Suffix of the fragment that stays on the current page.
pub const FIRST_PART_SUFFIX: &str = "_part1";

/// Suffix of the fragment that starts the next page.
pub const SECOND_PART_SUFFIX: &str = "_part2";

/// The two fragments of a split element.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitParts {
    /// Fragment placed on the current page (`<id>_part1`)
    pub first: ContentElement,
    /// Fragment seeding the next page (`<id>_part2`)
    pub second: ContentElement,
    /// Number of words or items in the first fragment
    pub split_index: usize,
}

/// Whether an element is large enough and of a kind that can be split.
///
/// Only string-content paragraphs and lists qualify, and only when their
/// estimated height is at least twice `min_content_height`.
pub fn is_splittable(element: &ContentElement, estimated_height: f64, config: &PaginationConfig) -> bool {
    let kind_ok = matches!(
        element.body,
        ElementBody::Paragraph {
            content: ParagraphContent::Text(_)
        } | ElementBody::List { .. }
    );
    kind_ok && estimated_height >= 2.0 * config.min_content_height
}

/// Share of the element that stays on the current page.
pub fn split_ratio(available_space: f64, estimated_height: f64) -> f64 {
    if estimated_height <= 0.0 {
        return MIN_SPLIT_RATIO;
    }
    (available_space / estimated_height).clamp(MIN_SPLIT_RATIO, MAX_SPLIT_RATIO)
}

/// Split an element given the height already used on the current page.
///
/// Returns `None` when the element is not a splittable kind or when the
/// computed split index would leave one fragment empty.
pub fn split_element(
    element: &ContentElement,
    estimated_height: f64,
    current_height: f64,
    config: &PaginationConfig,
) -> Option<SplitParts> {
    let available_space = config.max_content_height - current_height;
    let ratio = split_ratio(available_space, estimated_height);

    match &element.body {
        ElementBody::Paragraph {
            content: ParagraphContent::Text(text),
        } => split_paragraph(element, text, ratio),
        ElementBody::List {
            ordered,
            start,
            items,
        } => split_list(element, *ordered, *start, items, ratio),
        _ => None,
    }
}

fn split_index(count: usize, ratio: f64) -> Option<usize> {
    let index = (count as f64 * ratio).floor() as usize;
    (index > 0 && index < count).then_some(index)
}

fn split_paragraph(element: &ContentElement, text: &str, ratio: f64) -> Option<SplitParts> {
    let words: Vec<&str> = text.split(' ').collect();
    let index = split_index(words.len(), ratio)?;

    let first = fragment(
        element,
        FIRST_PART_SUFFIX,
        ElementBody::Paragraph {
            content: ParagraphContent::Text(words[..index].join(" ")),
        },
    );
    let second = fragment(
        element,
        SECOND_PART_SUFFIX,
        ElementBody::Paragraph {
            content: ParagraphContent::Text(words[index..].join(" ")),
        },
    );

    Some(SplitParts {
        first,
        second,
        split_index: index,
    })
}

fn split_list(
    element: &ContentElement,
    ordered: bool,
    start: Option<u32>,
    items: &[ContentElement],
    ratio: f64,
) -> Option<SplitParts> {
    if items.len() <= 1 {
        return None;
    }
    let index = split_index(items.len(), ratio)?;
    let (head, tail) = items.split_at(index);

    // Numbering of an ordered list carries over into the second fragment
    let second_start = if ordered {
        let offset = u32::try_from(index).unwrap_or(u32::MAX);
        Some(start.unwrap_or(1).saturating_add(offset))
    } else {
        start
    };

    let first = fragment(
        element,
        FIRST_PART_SUFFIX,
        ElementBody::List {
            ordered,
            start,
            items: head.to_vec(),
        },
    );
    let second = fragment(
        element,
        SECOND_PART_SUFFIX,
        ElementBody::List {
            ordered,
            start: second_start,
            items: tail.to_vec(),
        },
    );

    Some(SplitParts {
        first,
        second,
        split_index: index,
    })
}

fn fragment(original: &ContentElement, suffix: &str, body: ElementBody) -> ContentElement {
    ContentElement {
        id: format!("{}{}", original.id, suffix),
        body,
        style: original.style.clone(),
        metadata: original.metadata.clone(),
    }
}

/// Strip a split suffix, recovering the id of the element a fragment came from.
pub fn source_id(id: &str) -> &str {
    id.strip_suffix(FIRST_PART_SUFFIX)
        .or_else(|| id.strip_suffix(SECOND_PART_SUFFIX))
        .unwrap_or(id)
}
