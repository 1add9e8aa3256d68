//! Pagination of report documents into bounded-height pages.
//!
//! The pipeline is: [`flatten`] the section tree, estimate each element's
//! height and break eligibility ([`estimate`], [`breaks`]), partition greedily
//! into pages ([`PaginationEngine`]), [`split`] oversized paragraphs and lists
//! when needed, and apply [`widow`]/orphan control as each page completes.

pub mod batch;
pub mod breaks;
pub mod estimate;
pub mod flatten;
mod engine;
mod json;
mod options;
mod result;
pub mod split;
pub mod streaming;
pub mod widow;

pub use batch::{paginate_batch, total_stats};
pub use breaks::BreakEligibility;
pub use engine::PaginationEngine;
pub use estimate::{estimate_height, HeightEstimate};
pub use flatten::flatten;
pub use json::{to_json, JsonFormat};
pub use options::PaginationConfig;
pub use result::{Page, PaginationResult, PaginationStats};
pub use split::{split_element, SplitParts};
pub use streaming::{collect_page_ids, PageEvent, PageEvents};
pub use widow::Migration;
