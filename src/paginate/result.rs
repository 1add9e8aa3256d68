//! Pagination output types.

use super::split::source_id;
use crate::model::ContentElement;
use serde::{Deserialize, Serialize};

/// One output page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Elements in reading order (originals or split fragments)
    pub elements: Vec<ContentElement>,

    /// Estimated height of each element, parallel to `elements`
    pub element_heights: Vec<f64>,

    /// Cumulative estimated height
    pub height: f64,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Append an element.
    pub fn push(&mut self, element: ContentElement, height: f64) {
        self.elements.push(element);
        self.element_heights.push(height);
        self.height += height;
    }

    /// Insert an element at the top of the page.
    pub fn push_front(&mut self, element: ContentElement, height: f64) {
        self.elements.insert(0, element);
        self.element_heights.insert(0, height);
        self.height += height;
    }

    /// Remove the last element.
    pub fn pop(&mut self) -> Option<(ContentElement, f64)> {
        let element = self.elements.pop()?;
        let height = self.element_heights.pop().unwrap_or_default();
        self.height -= height;
        Some((element, height))
    }

    /// Remove the first element.
    pub fn pop_front(&mut self) -> Option<(ContentElement, f64)> {
        if self.elements.is_empty() {
            return None;
        }
        let element = self.elements.remove(0);
        let height = if self.element_heights.is_empty() {
            0.0
        } else {
            self.element_heights.remove(0)
        };
        self.height -= height;
        Some((element, height))
    }

    /// First element and its height.
    pub fn first(&self) -> Option<(&ContentElement, f64)> {
        Some((self.elements.first()?, *self.element_heights.first()?))
    }

    /// Last element and its height.
    pub fn last(&self) -> Option<(&ContentElement, f64)> {
        Some((self.elements.last()?, *self.element_heights.last()?))
    }

    /// Check if the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements on the page.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Identifiers of the elements on the page.
    pub fn element_ids(&self) -> Vec<&str> {
        self.elements.iter().map(|e| e.id.as_str()).collect()
    }
}

/// Result of paginating a document.
///
/// Callers must check `errors`: a fatal problem never panics or returns an
/// `Err`, it leaves a best-effort (possibly empty) page list behind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult {
    /// Pages in order
    pub pages: Vec<Page>,

    /// Height of each page, parallel to `pages`
    pub page_heights: Vec<f64>,

    /// Flattened element index at which each page break occurred
    pub break_positions: Vec<usize>,

    /// Informational messages (widow/orphan moves)
    pub warnings: Vec<String>,

    /// Fatal problems encountered while paginating
    pub errors: Vec<String>,

    /// Counters describing the pass
    pub stats: PaginationStats,
}

impl PaginationResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if pagination finished without fatal errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&Page> {
        if number == 0 {
            return None;
        }
        self.pages.get((number - 1) as usize)
    }

    /// Identifiers of every emitted element with split suffixes removed.
    ///
    /// A split element contributes its id twice (once per fragment).
    pub fn source_ids(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.elements.iter())
            .map(|element| source_id(&element.id))
            .collect()
    }

    /// Renumber pages and recompute `page_heights` from page contents.
    pub(crate) fn sync_pages(&mut self) {
        self.page_heights.clear();
        for (i, page) in self.pages.iter_mut().enumerate() {
            page.number = (i + 1) as u32;
            page.height = page.element_heights.iter().sum();
            self.page_heights.push(page.height);
        }
        self.stats.page_count = self.pages.len() as u32;
    }
}

/// Counters collected during a pagination pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationStats {
    /// Elements after flattening (page breaks included)
    pub element_count: u32,

    /// Pages produced
    pub page_count: u32,

    /// Manual page breaks consumed
    pub manual_breaks: u32,

    /// Elements split across pages
    pub splits: u32,

    /// Elements forced whole onto a fresh page
    pub forced_placements: u32,

    /// Pages taller than the configured maximum
    pub oversized_pages: u32,

    /// Paragraphs moved forward by orphan control
    pub orphan_moves: u32,

    /// Paragraphs moved back by widow control
    pub widow_moves: u32,
}

impl PaginationStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total widow and orphan moves.
    pub fn migrations(&self) -> u32 {
        self.orphan_moves + self.widow_moves
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &PaginationStats) {
        self.element_count += other.element_count;
        self.page_count += other.page_count;
        self.manual_breaks += other.manual_breaks;
        self.splits += other.splits;
        self.forced_placements += other.forced_placements;
        self.oversized_pages += other.oversized_pages;
        self.orphan_moves += other.orphan_moves;
        self.widow_moves += other.widow_moves;
    }
}
