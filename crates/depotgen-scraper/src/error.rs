use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid depot source URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("response from {url} is not markup: {reason}")]
    NotMarkup { url: String, reason: String },
}

impl ScraperError {
    /// `true` for transport-level problems reaching the depot listing.
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        !self.is_parse_failure()
    }

    /// `true` when a body was retrieved but cannot be read as markup.
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, ScraperError::NotMarkup { .. })
    }
}
