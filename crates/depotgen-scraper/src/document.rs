//! The fetched depot listing body, before extraction.

use crate::error::ScraperError;

/// Raw response body of a depot listing page.
///
/// Created per request by [`crate::SteamDbClient`] and consumed by
/// [`crate::extract_depots`]. Nothing retains it afterwards.
#[derive(Debug, Clone)]
pub struct RawDocument {
    url: String,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl RawDocument {
    #[must_use]
    pub fn new(url: impl Into<String>, content_type: Option<String>, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            content_type,
            body,
        }
    }

    /// Wraps an in-memory HTML string, e.g. a saved page or a test fixture.
    #[must_use]
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            url: "memory://document".to_string(),
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: html.into().into_bytes(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the body as text suitable for an HTML parser.
    ///
    /// The HTML parser itself accepts any string, so this is where a body is
    /// rejected as "not markup": a declared non-textual content type, invalid
    /// UTF-8, or embedded NUL bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::NotMarkup`] when the body cannot be interpreted
    /// as HTML or text.
    pub fn as_markup(&self) -> Result<&str, ScraperError> {
        if let Some(content_type) = self.content_type.as_deref() {
            if !is_textual_content_type(content_type) {
                return Err(self.not_markup(format!("content type \"{content_type}\"")));
            }
        }

        let text = std::str::from_utf8(&self.body)
            .map_err(|e| self.not_markup(format!("invalid UTF-8: {e}")))?;

        if text.contains('\0') {
            return Err(self.not_markup("body contains NUL bytes".to_string()));
        }

        Ok(text)
    }

    fn not_markup(&self, reason: String) -> ScraperError {
        ScraperError::NotMarkup {
            url: self.url.clone(),
            reason,
        }
    }
}

fn is_textual_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.is_empty()
        || mime.starts_with("text/")
        || mime.ends_with("+xml")
        || mime.ends_with("/xml")
        || mime.ends_with("/html")
}
