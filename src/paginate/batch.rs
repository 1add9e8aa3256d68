//! Parallel pagination of independent documents.

use super::{PaginationConfig, PaginationEngine, PaginationResult, PaginationStats};
use crate::model::Document;
use rayon::prelude::*;

/// Paginate many documents with one configuration.
///
/// Documents are processed in parallel; results come back in input order.
pub fn paginate_batch(documents: &[Document], config: &PaginationConfig) -> Vec<PaginationResult> {
    let engine = PaginationEngine::new(config.clone());
    log::debug!("Paginating {} documents in parallel", documents.len());
    documents
        .par_iter()
        .map(|doc| engine.apply_page_breaks(doc))
        .collect()
}

/// Sum the statistics of several results.
pub fn total_stats(results: &[PaginationResult]) -> PaginationStats {
    results.iter().fold(PaginationStats::new(), |mut total, r| {
        total.merge(&r.stats);
        total
    })
}
