//! Depot extraction from a listing page.
//!
//! Two pure strategies run over the same parsed tree:
//!
//! 1. [`primary_depots`] scans table body rows positionally
//!    (id, name, type) and keeps rows whose type mentions "depot".
//! 2. [`fallback_depots`] scans depot class and `data-depot-id` markers.
//!
//! The fallback runs only when the primary pass finds nothing; a non-empty
//! primary result is returned as-is.

mod markers;
mod table;

use scraper::{ElementRef, Html};

use crate::document::RawDocument;
use crate::error::ScraperError;
use depotgen_core::DepotRecord;

pub use markers::fallback_depots;
pub use table::primary_depots;

/// Extracts depots from a fetched listing.
///
/// Returns an empty list when neither strategy recognizes a depot; that is
/// not an error.
///
/// # Errors
///
/// Returns [`ScraperError::NotMarkup`] when the body cannot be read as HTML.
pub fn extract_depots(document: &RawDocument) -> Result<Vec<DepotRecord>, ScraperError> {
    let markup = document.as_markup()?;
    let depots = extract_depots_from_html(markup);
    tracing::info!(
        url = document.url(),
        depots = depots.len(),
        "depot extraction finished"
    );
    Ok(depots)
}

/// Parses `markup` and applies the primary-then-fallback rule.
#[must_use]
pub fn extract_depots_from_html(markup: &str) -> Vec<DepotRecord> {
    let html = Html::parse_document(markup);

    let primary = primary_depots(&html);
    if !primary.is_empty() {
        tracing::debug!(depots = primary.len(), "table scan matched");
        return primary;
    }

    let fallback = fallback_depots(&html);
    tracing::debug!(
        depots = fallback.len(),
        "table scan matched nothing; used marker scan"
    );
    fallback
}

/// Whitespace-trimmed text content of `element`, `None` when blank.
fn trimmed_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
