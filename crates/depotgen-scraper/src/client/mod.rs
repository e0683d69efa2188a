//! HTTP client for the public depot listing pages.

use std::time::Duration;

use reqwest::Client;

use crate::document::RawDocument;
use crate::error::ScraperError;
use crate::extract::extract_depots;
use depotgen_core::DepotRecord;

const MAX_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Fetches `{base_url}/app/{app_id}/depots/` pages.
///
/// Every call is a single attempt: transport errors, timeouts and non-2xx
/// statuses are returned as typed errors without retry.
pub struct SteamDbClient {
    client: Client,
    base_url: String,
}

impl SteamDbClient {
    /// Creates a client with the given source, request timeout and
    /// browser-like `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(
                timeout_secs.min(MAX_CONNECT_TIMEOUT_SECS),
            ))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Retrieves the raw depot listing for `app_id`.
    ///
    /// `app_id` is not validated here; it is percent-encoded into a single
    /// path segment.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidBaseUrl`]: the configured source is not a URL.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx response.
    /// - [`ScraperError::Http`]: network, TLS or timeout failure.
    pub async fn fetch_depot_page(&self, app_id: &str) -> Result<RawDocument, ScraperError> {
        let url = self.depots_url(app_id)?;
        tracing::debug!(app_id, url = %url, "fetching depot listing");

        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(app_id, status = status.as_u16(), "depot listing request failed");
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;

        tracing::debug!(app_id, bytes = body.len(), "depot listing fetched");
        Ok(RawDocument::new(url, content_type, body.to_vec()))
    }

    /// Fetches and extracts the depots of `app_id` in one step.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::fetch_depot_page`] or [`extract_depots`].
    pub async fn fetch_depots(&self, app_id: &str) -> Result<Vec<DepotRecord>, ScraperError> {
        let document = self.fetch_depot_page(app_id).await?;
        extract_depots(&document)
    }

    /// Builds the depot listing URL for `app_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if the base URL cannot be
    /// parsed or cannot carry path segments.
    fn depots_url(&self, app_id: &str) -> Result<String, ScraperError> {
        let invalid = |reason: String| ScraperError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason,
        };

        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["app", app_id, "depots", ""]);

        Ok(url.to_string())
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
