//! # reportpage
//!
//! Pagination engine for arboricultural survey reports.
//!
//! This library takes a report [`Document`] (ordered sections of headings,
//! paragraphs, lists, tables, images and so on) and breaks it into pages of
//! bounded height, ready for a multi-page HTML/PDF exporter or a preview
//! window.
//!
//! ## Quick Start
//!
//! ```
//! use reportpage::model::{ContentElement, Document, Section};
//! use reportpage::{paginate_with_config, PaginationConfig};
//!
//! let doc = Document::with_sections(vec![
//!     Section::titled("findings", "Findings", 0).with_elements([
//!         ContentElement::paragraph("p1", "T1 Oak, category B. Crown lift to 5m."),
//!         ContentElement::list("actions", true, ["Deadwood", "Crown lift"]),
//!     ]),
//! ]);
//!
//! let config = PaginationConfig::new().with_max_content_height(800.0);
//! let result = paginate_with_config(&doc, &config);
//! assert!(result.is_ok());
//! assert_eq!(result.page_count(), 1);
//! ```
//!
//! ## Features
//!
//! - **Heuristic heights**: fixed per-kind estimates, no font metrics needed
//! - **Break eligibility**: headings stay with what follows; tables, images
//!   and code never split
//! - **Splitting**: oversized paragraphs and lists break across pages
//! - **Widow/orphan control**: short stranded paragraphs move across a boundary
//! - **Never panics on bad input**: problems land in `PaginationResult::errors`
//! - **Parallel batches**: paginate many documents at once with Rayon

pub mod error;
pub mod model;
pub mod paginate;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    ContentElement, Document, ElementBody, ElementKind, ImageHeight, ParagraphContent, Section,
    TableRow,
};
pub use paginate::{
    paginate_batch, JsonFormat, Page, PageEvent, PageEvents, PaginationConfig, PaginationEngine,
    PaginationResult, PaginationStats,
};

use std::path::Path;

/// Paginate a document with the default configuration.
///
/// # Example
///
/// ```
/// use reportpage::{paginate, Document};
///
/// let result = paginate(&Document::new());
/// assert_eq!(result.page_count(), 0);
/// ```
pub fn paginate(document: &Document) -> PaginationResult {
    paginate_with_config(document, &PaginationConfig::default())
}

/// Paginate a document with a custom configuration.
pub fn paginate_with_config(document: &Document, config: &PaginationConfig) -> PaginationResult {
    PaginationEngine::new(config.clone()).apply_page_breaks(document)
}

/// Parse a document from JSON and paginate it.
///
/// Malformed JSON is an `Err`; a well-formed but invalid document is reported
/// through the result's `errors`.
///
/// # Example
///
/// ```
/// use reportpage::{paginate_json, PaginationConfig};
///
/// let json = r#"{"sections": [{"id": "s1", "content": [
///     {"id": "p1", "type": "paragraph", "content": "No works required."}
/// ]}]}"#;
/// let result = paginate_json(json, &PaginationConfig::default())?;
/// assert_eq!(result.page_count(), 1);
/// # Ok::<(), reportpage::Error>(())
/// ```
pub fn paginate_json(json: &str, config: &PaginationConfig) -> Result<PaginationResult> {
    let document = Document::from_json(json)?;
    Ok(paginate_with_config(&document, config))
}

/// Load a JSON document from a file and paginate it.
///
/// # Example
///
/// ```no_run
/// use reportpage::{paginate_file, PaginationConfig};
///
/// let result = paginate_file("survey.json", &PaginationConfig::default())?;
/// println!("{} pages", result.page_count());
/// # Ok::<(), reportpage::Error>(())
/// ```
pub fn paginate_file<P: AsRef<Path>>(path: P, config: &PaginationConfig) -> Result<PaginationResult> {
    let document = Document::from_json_file(path)?;
    Ok(paginate_with_config(&document, config))
}
