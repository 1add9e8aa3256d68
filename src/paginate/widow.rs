//! Widow and orphan control.
//!
//! The check runs each time the partition loop completes a page, over the
//! pages completed so far. A short paragraph stranded at the bottom of a page
//! (orphan) is pushed to the top of the next page; a short paragraph stranded
//! at the top of a page (widow) is pulled back to the end of the previous one.
//! At most one element crosses each boundary, and the boundary into the page
//! still being built is never inspected.

use super::result::{Page, PaginationStats};
use super::PaginationConfig;
use std::fmt;

/// Pixels per line when comparing against widow/orphan line counts.
pub const CONTROL_LINE_HEIGHT: f64 = 20.0;

/// A paragraph moved across a page boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Migration {
    /// Moved from the end of page `from` to the start of page `to`
    Orphan { from: usize, to: usize },
    /// Moved from the start of page `from` to the end of page `to`
    Widow { from: usize, to: usize },
}

impl fmt::Display for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed in messages
        match self {
            Migration::Orphan { from, to } => write!(
                f,
                "Orphan control: moved short paragraph from page {} to page {}",
                from + 1,
                to + 1
            ),
            Migration::Widow { from, to } => write!(
                f,
                "Widow control: moved short paragraph from page {} to page {}",
                from + 1,
                to + 1
            ),
        }
    }
}

/// Widow/orphan state for one pagination run.
///
/// Boundaries are re-checked on every call, so a move at one boundary can
/// make the next boundary eligible. A boundary that has already moved an
/// element is settled and left alone afterwards; without that, a paragraph
/// pushed forward as an orphan would be pulled straight back as a widow on
/// the following flush.
#[derive(Debug, Clone, Default)]
pub struct WidowControl {
    settled: Vec<bool>,
}

impl WidowControl {
    /// Create control state with no settled boundaries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every unsettled boundary between the given completed pages.
    ///
    /// Does nothing for a single page. Each move is logged, appended to
    /// `warnings` and counted in `stats`.
    pub fn apply(
        &mut self,
        pages: &mut [Page],
        config: &PaginationConfig,
        warnings: &mut Vec<String>,
        stats: &mut PaginationStats,
    ) {
        if pages.len() <= 1 {
            return;
        }
        if self.settled.len() < pages.len() - 1 {
            self.settled.resize(pages.len() - 1, false);
        }

        for i in 0..pages.len() - 1 {
            if self.settled[i] {
                continue;
            }
            if let Some(migration) = control_boundary(pages, i, config) {
                log::warn!("{}", migration);
                match migration {
                    Migration::Orphan { .. } => stats.orphan_moves += 1,
                    Migration::Widow { .. } => stats.widow_moves += 1,
                }
                warnings.push(migration.to_string());
                self.settled[i] = true;
            }
        }
    }

    /// Whether the boundary after page `i` (0-indexed) has moved an element.
    pub fn is_settled(&self, i: usize) -> bool {
        self.settled.get(i).copied().unwrap_or(false)
    }
}

/// Inspect the boundary between page `i` and page `i + 1`, moving at most one
/// paragraph. Orphan control is tried before widow control.
///
/// A move is skipped when it would empty the source page or push the
/// destination page past `max_content_height`.
pub fn control_boundary(pages: &mut [Page], i: usize, config: &PaginationConfig) -> Option<Migration> {
    if i + 1 >= pages.len() {
        return None;
    }
    let (head, tail) = pages.split_at_mut(i + 1);
    let (current, next) = (&mut head[i], &mut tail[0]);

    if config.orphan_control {
        let threshold = f64::from(config.orphan_line_count) * CONTROL_LINE_HEIGHT;
        let movable = current.len() > 1
            && current
                .last()
                .is_some_and(|(el, h)| el.is_paragraph() && h < threshold && fits(next, h, config));
        if movable {
            if let Some((element, height)) = current.pop() {
                next.push_front(element, height);
                return Some(Migration::Orphan { from: i, to: i + 1 });
            }
        }
    }

    if config.widow_control {
        let threshold = f64::from(config.widow_line_count) * CONTROL_LINE_HEIGHT;
        let movable = next.len() > 1
            && next
                .first()
                .is_some_and(|(el, h)| el.is_paragraph() && h < threshold && fits(current, h, config));
        if movable {
            if let Some((element, height)) = next.pop_front() {
                current.push(element, height);
                return Some(Migration::Widow { from: i + 1, to: i });
            }
        }
    }

    None
}

fn fits(page: &Page, height: f64, config: &PaginationConfig) -> bool {
    page.height + height <= config.max_content_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentElement;

    fn page(number: u32, items: &[(&str, f64, bool)]) -> Page {
        let mut page = Page::new(number);
        for &(id, h, is_para) in items {
            let el = if is_para {
                ContentElement::paragraph(id, "x")
            } else {
                ContentElement::divider(id)
            };
            page.push(el, h);
        }
        page
    }

    fn config() -> PaginationConfig {
        PaginationConfig::default().with_max_content_height(200.0)
    }

    #[test]
    fn test_orphan_moved_forward() {
        let mut pages = vec![
            page(1, &[("a", 100.0, false), ("short", 20.0, true)]),
            page(2, &[("b", 100.0, false)]),
        ];
        let mut warnings = Vec::new();
        let mut stats = PaginationStats::new();
        WidowControl::new().apply(&mut pages, &config(), &mut warnings, &mut stats);

        assert_eq!(pages[0].element_ids(), ["a"]);
        assert_eq!(pages[1].element_ids(), ["short", "b"]);
        assert_eq!(pages[1].height, 120.0);
        assert_eq!(
            warnings,
            ["Orphan control: moved short paragraph from page 1 to page 2"]
        );
        assert_eq!(stats.orphan_moves, 1);
    }

    #[test]
    fn test_widow_pulled_back() {
        let mut pages = vec![
            page(1, &[("a", 100.0, false)]),
            page(2, &[("short", 30.0, true), ("b", 100.0, false)]),
        ];
        let mut warnings = Vec::new();
        let mut stats = PaginationStats::new();
        WidowControl::new().apply(&mut pages, &config(), &mut warnings, &mut stats);

        assert_eq!(pages[0].element_ids(), ["a", "short"]);
        assert_eq!(pages[1].element_ids(), ["b"]);
        assert_eq!(
            warnings,
            ["Widow control: moved short paragraph from page 2 to page 1"]
        );
        assert_eq!(stats.widow_moves, 1);
    }

    #[test]
    fn test_one_move_per_boundary() {
        // Both an orphan and a widow candidate: only the orphan moves
        let mut pages = vec![
            page(1, &[("a", 50.0, false), ("tail", 20.0, true)]),
            page(2, &[("head", 20.0, true), ("b", 50.0, false)]),
        ];
        let mut warnings = Vec::new();
        let mut stats = PaginationStats::new();
        WidowControl::new().apply(&mut pages, &config(), &mut warnings, &mut stats);

        assert_eq!(warnings.len(), 1);
        assert_eq!(pages[0].element_ids(), ["a"]);
        assert_eq!(pages[1].element_ids(), ["tail", "head", "b"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut pages = vec![
            page(1, &[("a", 50.0, false), ("tail", 40.0, true)]),
            page(2, &[("b", 50.0, false)]),
        ];
        assert_eq!(control_boundary(&mut pages, 0, &config()), None);
    }

    #[test]
    fn test_non_paragraph_not_moved() {
        let mut pages = vec![
            page(1, &[("a", 50.0, false), ("rule", 10.0, false)]),
            page(2, &[("b", 50.0, false)]),
        ];
        assert_eq!(control_boundary(&mut pages, 0, &config()), None);
    }

    #[test]
    fn test_move_skipped_when_destination_full() {
        let mut pages = vec![
            page(1, &[("a", 50.0, false), ("tail", 20.0, true)]),
            page(2, &[("b", 190.0, false)]),
        ];
        assert_eq!(control_boundary(&mut pages, 0, &config()), None);
    }

    #[test]
    fn test_move_skipped_when_source_would_empty() {
        let mut pages = vec![
            page(1, &[("only", 20.0, true)]),
            page(2, &[("b", 50.0, false)]),
        ];
        assert_eq!(control_boundary(&mut pages, 0, &config()), None);
    }

    #[test]
    fn test_disabled_controls() {
        let config = config().with_orphan_control(false).with_widow_control(false);
        let mut pages = vec![
            page(1, &[("a", 50.0, false), ("tail", 20.0, true)]),
            page(2, &[("head", 20.0, true), ("b", 50.0, false)]),
        ];
        assert_eq!(control_boundary(&mut pages, 0, &config), None);
    }

    #[test]
    fn test_single_page_untouched() {
        let mut pages = vec![page(1, &[("a", 50.0, false), ("tail", 20.0, true)])];
        let mut warnings = Vec::new();
        let mut stats = PaginationStats::new();
        WidowControl::new().apply(&mut pages, &config(), &mut warnings, &mut stats);
        assert!(warnings.is_empty());
        assert_eq!(stats.migrations(), 0);
    }

    #[test]
    fn test_line_counts_scale_threshold() {
        let config = config().with_orphan_lines(3);
        let mut pages = vec![
            page(1, &[("a", 50.0, false), ("tail", 50.0, true)]),
            page(2, &[("b", 50.0, false)]),
        ];
        assert_eq!(
            control_boundary(&mut pages, 0, &config),
            Some(Migration::Orphan { from: 0, to: 1 })
        );
    }

    #[test]
    fn test_settled_boundary_not_revisited() {
        let config = config().with_max_content_height(130.0);
        let mut control = WidowControl::new();
        let mut warnings = Vec::new();
        let mut stats = PaginationStats::new();
        let mut pages = vec![
            page(1, &[("a", 100.0, false), ("short", 20.0, true)]),
            page(2, &[("b", 100.0, false)]),
        ];
        control.apply(&mut pages, &config, &mut warnings, &mut stats);
        assert_eq!(pages[1].element_ids(), ["short", "b"]);
        assert!(control.is_settled(0));

        // A later flush: "short" now heads a two-element page and would
        // qualify as a widow, but its boundary has already moved it
        pages.push(page(3, &[("c", 100.0, false)]));
        control.apply(&mut pages, &config, &mut warnings, &mut stats);
        assert_eq!(pages[0].element_ids(), ["a"]);
        assert_eq!(pages[1].element_ids(), ["short", "b"]);
        assert_eq!(warnings.len(), 1);
        assert!(!control.is_settled(1));
    }

    #[test]
    fn test_move_cascades_to_next_boundary() {
        // Pulling "w1" back frees room on page 2 for "w2"
        let config = config().with_max_content_height(100.0);
        let mut pages = vec![
            page(1, &[("a", 60.0, false)]),
            page(2, &[("w1", 20.0, true), ("b", 80.0, false)]),
            page(3, &[("w2", 20.0, true), ("c", 80.0, false)]),
        ];
        let mut warnings = Vec::new();
        let mut stats = PaginationStats::new();
        WidowControl::new().apply(&mut pages, &config, &mut warnings, &mut stats);

        assert_eq!(pages[0].element_ids(), ["a", "w1"]);
        assert_eq!(pages[1].element_ids(), ["b", "w2"]);
        assert_eq!(pages[2].element_ids(), ["c"]);
        assert_eq!(
            warnings,
            [
                "Widow control: moved short paragraph from page 2 to page 1",
                "Widow control: moved short paragraph from page 3 to page 2",
            ]
        );
        assert_eq!(stats.widow_moves, 2);
    }
}
