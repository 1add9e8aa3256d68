//! The page-breaking pass.
//!
//! Works on the flattened element sequence in a single greedy sweep. Each
//! element either fits on the page being built, starts a new page, is split
//! across the boundary, or is forced whole onto a fresh page. Widow/orphan
//! control runs over the completed pages each time a page is flushed; the
//! trailing page is never re-checked.

use super::estimate::{estimate_all, estimate_height};
use super::flatten::flatten;
use super::result::{Page, PaginationResult, PaginationStats};
use super::split::{is_splittable, split_element};
use super::widow::WidowControl;
use super::PaginationConfig;
use crate::error::Result;
use crate::model::{ContentElement, Document};

/// Breaks documents into pages according to a [`PaginationConfig`].
///
/// The engine holds only its configuration; every call starts from scratch,
/// so one engine may serve many documents, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct PaginationEngine {
    config: PaginationConfig,
}

impl PaginationEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Paginate a document.
    ///
    /// Never fails: a malformed document or unusable configuration is
    /// reported through `errors` on an otherwise empty result.
    pub fn apply_page_breaks(&self, document: &Document) -> PaginationResult {
        match self.try_apply_page_breaks(document) {
            Ok(result) => result,
            Err(e) => {
                log::error!("Pagination failed: {}", e);
                let mut result = PaginationResult::new();
                result.errors.push(e.to_string());
                result
            }
        }
    }

    /// Paginate a document, returning validation failures as `Err`.
    pub fn try_apply_page_breaks(&self, document: &Document) -> Result<PaginationResult> {
        self.config.validate()?;
        document.validate()?;
        let elements = flatten(document);
        Ok(self.paginate_elements(&elements))
    }

    /// Paginate an already flattened element sequence.
    ///
    /// The sequence is trusted as-is; no document validation is performed.
    pub fn paginate_elements(&self, elements: &[ContentElement]) -> PaginationResult {
        let config = &self.config;
        let mut stats = PaginationStats {
            element_count: elements.len() as u32,
            ..Default::default()
        };

        if !config.enabled {
            log::debug!("Pagination disabled, placing {} elements on one page", elements.len());
            return self.single_page(elements, stats);
        }

        let estimates = estimate_all(elements, config);
        let mut acc = PageAccumulator::new(config);
        let mut i = 0;

        while i < elements.len() {
            let element = &elements[i];
            let estimate = estimates[i];

            if element.is_page_break() {
                if config.manual_break_support {
                    stats.manual_breaks += 1;
                    acc.flush(i);
                }
                i += 1;
                continue;
            }

            if !config.automatic_detection || acc.fits(estimate.height) {
                acc.push(element.clone(), estimate.height);
                i += 1;
                continue;
            }

            if estimate.can_break_before && !acc.is_empty() {
                log::debug!(
                    "Break before '{}' at {:.1}px (element {:.1}px)",
                    element.id,
                    acc.height(),
                    estimate.height
                );
                acc.flush(i);
                // Retry the same element on the fresh page
                continue;
            }

            if estimate.can_break_inside && is_splittable(element, estimate.height, config) {
                if let Some(parts) = split_element(element, estimate.height, acc.height(), config) {
                    log::debug!(
                        "Split '{}' at index {} ({:.1}px used)",
                        element.id,
                        parts.split_index,
                        acc.height()
                    );
                    let first_height = estimate_height(&parts.first, config);
                    let second_height = estimate_height(&parts.second, config);
                    acc.push(parts.first, first_height);
                    acc.flush(i);
                    acc.push(parts.second, second_height);
                    stats.splits += 1;
                    i += 1;
                    continue;
                }
                log::debug!("Could not split '{}', placing it whole", element.id);
            }

            log::debug!(
                "Forcing '{}' ({:.1}px) onto a new page",
                element.id,
                estimate.height
            );
            acc.flush(i);
            acc.push(element.clone(), estimate.height);
            stats.forced_placements += 1;
            i += 1;
        }

        let (pages, break_positions, warnings, migrations) = acc.finish(elements.len());
        stats.merge(&migrations);

        let mut result = PaginationResult {
            pages,
            page_heights: Vec::new(),
            break_positions,
            warnings,
            errors: Vec::new(),
            stats,
        };
        result.sync_pages();
        result.stats.oversized_pages = result
            .page_heights
            .iter()
            .filter(|&&h| h > config.max_content_height)
            .count() as u32;

        log::info!(
            "Paginated {} elements into {} pages ({} splits, {} migrations)",
            elements.len(),
            result.page_count(),
            result.stats.splits,
            result.stats.migrations()
        );
        result
    }

    /// Passthrough used when pagination is disabled. Page breaks are dropped.
    fn single_page(&self, elements: &[ContentElement], stats: PaginationStats) -> PaginationResult {
        let mut page = Page::new(1);
        for element in elements.iter().filter(|e| !e.is_page_break()) {
            page.push(element.clone(), estimate_height(element, &self.config));
        }

        let mut result = PaginationResult {
            stats,
            ..Default::default()
        };
        if !page.is_empty() {
            result.pages.push(page);
            result.break_positions.push(elements.len());
        }
        result.sync_pages();
        result
    }
}

/// Page-building state threaded through the partition loop.
#[derive(Debug)]
struct PageAccumulator<'a> {
    config: &'a PaginationConfig,
    current: Page,
    pages: Vec<Page>,
    break_positions: Vec<usize>,
    control: WidowControl,
    warnings: Vec<String>,
    /// Only the migration counters are used
    migrations: PaginationStats,
}

impl<'a> PageAccumulator<'a> {
    fn new(config: &'a PaginationConfig) -> Self {
        Self {
            config,
            current: Page::new(1),
            pages: Vec::new(),
            break_positions: Vec::new(),
            control: WidowControl::new(),
            warnings: Vec::new(),
            migrations: PaginationStats::new(),
        }
    }

    fn height(&self) -> f64 {
        self.current.height
    }

    fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    fn fits(&self, height: f64) -> bool {
        self.current.height + height <= self.config.max_content_height
    }

    fn push(&mut self, element: ContentElement, height: f64) {
        self.current.push(element, height);
    }

    /// Complete the current page if it has content, recording `index` as the
    /// flattened position of the break, then run widow/orphan control over
    /// the completed pages.
    fn flush(&mut self, index: usize) {
        if self.complete_page(index) {
            self.control.apply(
                &mut self.pages,
                self.config,
                &mut self.warnings,
                &mut self.migrations,
            );
        }
    }

    fn complete_page(&mut self, index: usize) -> bool {
        if self.current.is_empty() {
            return false;
        }
        let next = Page::new(self.pages.len() as u32 + 2);
        let page = std::mem::replace(&mut self.current, next);
        log::debug!(
            "Page {} complete: {} elements, {:.1}px",
            page.number,
            page.len(),
            page.height
        );
        self.pages.push(page);
        self.break_positions.push(index);
        true
    }

    /// Complete the trailing page without another widow/orphan check.
    fn finish(mut self, len: usize) -> (Vec<Page>, Vec<usize>, Vec<String>, PaginationStats) {
        self.complete_page(len);
        (self.pages, self.break_positions, self.warnings, self.migrations)
    }
}
