//! Break eligibility rules.

use super::PaginationConfig;
use crate::model::{ContentElement, ElementBody, ElementKind};

/// Where a page boundary may be placed relative to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakEligibility {
    /// A page may end immediately before this element
    pub before: bool,
    /// A page may end immediately after this element
    pub after: bool,
    /// The element may be split across pages
    pub inside: bool,
}

/// Classify an element's break eligibility.
pub fn classify(element: &ContentElement, config: &PaginationConfig) -> BreakEligibility {
    BreakEligibility {
        before: can_break_before(element),
        after: can_break_after(element),
        inside: can_break_inside(element, config),
    }
}

/// Page breaks and level-1 headings cannot start a new page by themselves.
pub fn can_break_before(element: &ContentElement) -> bool {
    match element.body {
        ElementBody::PageBreak { .. } => false,
        ElementBody::Heading { level, .. } => level != 1,
        _ => true,
    }
}

/// Headings stay bound to the content that follows them.
pub fn can_break_after(element: &ContentElement) -> bool {
    !matches!(element.body, ElementBody::Heading { .. })
}

/// Tables, images and code never split, whatever the configuration says.
pub fn can_break_inside(element: &ContentElement, config: &PaginationConfig) -> bool {
    let kind = element.kind();
    !config.avoids_breaking_inside(kind)
        && !matches!(
            kind,
            ElementKind::Table | ElementKind::Image | ElementKind::Code
        )
}
