//! Depot listing retrieval and extraction.
//!
//! [`SteamDbClient`] fetches the depot listing page for an application and
//! [`extract_depots`] turns that page into an ordered list of
//! [`DepotRecord`]s. Both halves hold no cross-request state.

pub mod client;
pub mod document;
pub mod error;
pub mod extract;

pub use client::SteamDbClient;
pub use depotgen_core::DepotRecord;
pub use document::RawDocument;
pub use error::ScraperError;
pub use extract::{extract_depots, extract_depots_from_html, fallback_depots, primary_depots};
