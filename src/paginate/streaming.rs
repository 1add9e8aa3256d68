//! Page-by-page event stream over a pagination result.
//!
//! Exporters that render one page at a time (headers, footers, page numbers)
//! can walk a [`PaginationResult`] as a flat sequence of events instead of
//! nesting loops over pages and elements.
//!
//! # Example
//!
//! ```
//! use reportpage::model::{ContentElement, Document, Section};
//! use reportpage::paginate::{PageEvent, PageEvents, PaginationConfig, PaginationEngine};
//!
//! let doc = Document::with_sections(vec![
//!     Section::titled("s1", "Findings", 0)
//!         .with_element(ContentElement::paragraph("p1", "Two veteran oaks.")),
//! ]);
//! let result = PaginationEngine::new(PaginationConfig::default()).apply_page_breaks(&doc);
//!
//! for event in PageEvents::new(&result) {
//!     if let PageEvent::PageStart { number, total } = event {
//!         println!("page {} of {}", number, total);
//!     }
//! }
//! ```

use super::PaginationResult;
use crate::model::ContentElement;

/// Events emitted while walking a pagination result.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<'a> {
    /// Walk started.
    PaginationStart {
        /// Total number of pages
        page_count: usize,
    },

    /// A new page is starting.
    PageStart {
        /// 1-indexed page number
        number: u32,
        /// Total number of pages
        total: usize,
    },

    /// An element on the current page.
    Element {
        /// The element
        element: &'a ContentElement,
        /// Its estimated height
        height: f64,
    },

    /// A page has finished.
    PageEnd {
        /// 1-indexed page number
        number: u32,
        /// Cumulative page height
        height: f64,
    },

    /// Walk completed.
    PaginationEnd,
}

impl PageEvent<'_> {
    /// Check if this event carries an element.
    pub fn is_element(&self) -> bool {
        matches!(self, PageEvent::Element { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    PageStart,
    Elements,
    PageEnd,
    End,
    Done,
}

/// Iterator over [`PageEvent`]s.
#[derive(Debug, Clone)]
pub struct PageEvents<'a> {
    result: &'a PaginationResult,
    state: State,
    page_idx: usize,
    element_idx: usize,
}

impl<'a> PageEvents<'a> {
    /// Create an event stream over a result.
    pub fn new(result: &'a PaginationResult) -> Self {
        Self {
            result,
            state: State::Start,
            page_idx: 0,
            element_idx: 0,
        }
    }
}

impl<'a> Iterator for PageEvents<'a> {
    type Item = PageEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let pages = &self.result.pages;
        loop {
            match self.state {
                State::Start => {
                    self.state = if pages.is_empty() {
                        State::End
                    } else {
                        State::PageStart
                    };
                    return Some(PageEvent::PaginationStart {
                        page_count: pages.len(),
                    });
                }
                State::PageStart => {
                    let page = &pages[self.page_idx];
                    self.element_idx = 0;
                    self.state = State::Elements;
                    return Some(PageEvent::PageStart {
                        number: page.number,
                        total: pages.len(),
                    });
                }
                State::Elements => {
                    let page = &pages[self.page_idx];
                    if let Some(element) = page.elements.get(self.element_idx) {
                        let height = page
                            .element_heights
                            .get(self.element_idx)
                            .copied()
                            .unwrap_or_default();
                        self.element_idx += 1;
                        return Some(PageEvent::Element { element, height });
                    }
                    self.state = State::PageEnd;
                }
                State::PageEnd => {
                    let page = &pages[self.page_idx];
                    self.page_idx += 1;
                    self.state = if self.page_idx < pages.len() {
                        State::PageStart
                    } else {
                        State::End
                    };
                    return Some(PageEvent::PageEnd {
                        number: page.number,
                        height: page.height,
                    });
                }
                State::End => {
                    self.state = State::Done;
                    return Some(PageEvent::PaginationEnd);
                }
                State::Done => return None,
            }
        }
    }
}

/// Collect the element ids of each page from an event stream.
pub fn collect_page_ids(result: &PaginationResult) -> Vec<Vec<String>> {
    let mut pages = Vec::new();
    for event in PageEvents::new(result) {
        match event {
            PageEvent::PageStart { .. } => pages.push(Vec::new()),
            PageEvent::Element { element, .. } => {
                if let Some(page) = pages.last_mut() {
                    page.push(element.id.clone());
                }
            }
            _ => {}
        }
    }
    pages
}
