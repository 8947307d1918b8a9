//! Remote citation resolver backed by a free-text citation-matching form.
//!
//! The service is session-based: the form POST is rejected server-side
//! unless the session first visited the landing page, so the resolver's
//! client carries a cookie jar. The result markup is an external,
//! versioned dependency owned by the service; drift surfaces as the
//! recovered [`ResolveError::NoMatch`] diagnostic, never as a crash.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::doi::{self, Resolution};
use crate::http::{self, TlsPolicy};

use super::ResolveError;

/// Default base URL of the citation-matching form service.
const DEFAULT_BASE_URL: &str = "https://doi.crossref.org";

/// Path of the free-text query form, relative to the base URL.
const QUERY_PATH: &str = "/simpleTextQuery";

/// Table cell carrying a matched result in the response markup.
const RESULT_CELL_SELECTOR: &str = "td.resultB";

/// Resolves free-text citations to DOIs via the citation-matching form.
pub struct CitationResolver {
    client: Client,
    base_url: String,
}

impl CitationResolver {
    /// Creates a resolver against the default service endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ClientConstruction`] if the HTTP client
    /// cannot be built.
    pub fn new() -> Result<Self, ResolveError> {
        Self::build(DEFAULT_BASE_URL.to_string())
    }

    /// Creates a resolver with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ClientConstruction`] if the HTTP client
    /// cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ResolveError> {
        Self::build(base_url.into())
    }

    fn build(base_url: String) -> Result<Self, ResolveError> {
        let jar = Arc::new(Jar::default());
        // The citation service gets a verifying client; the TLS
        // trade-off applies only to the metadata/mirror endpoints.
        let client = http::build_client(Some(jar), TlsPolicy::default())
            .map_err(|e| ResolveError::client_construction(&e))?;
        Ok(Self { client, base_url })
    }

    /// Submits the citation and returns the extractor's verdict on the
    /// first matched result.
    ///
    /// An empty email skips the network entirely. A response without the
    /// expected result markup yields [`ResolveError::NoMatch`]. There is
    /// no retry on failure.
    ///
    /// # Errors
    ///
    /// Every error is a recovered diagnostic; the caller reports it and
    /// continues with an unresolved DOI.
    #[tracing::instrument(skip(self, email, citation), fields(citation_len = citation.len()))]
    pub async fn resolve(&self, email: &str, citation: &str) -> Result<Resolution, ResolveError> {
        if email.trim().is_empty() {
            return Err(ResolveError::MissingEmail);
        }

        let form_url = format!("{}{}", self.base_url, QUERY_PATH);

        // Session establishment. Posting without the cookies handed out
        // here fails server-side.
        self.client
            .get(&form_url)
            .send()
            .await
            .map_err(|e| ResolveError::network(&e))?;

        let params = [
            ("email", email),
            ("command", "Submit"),
            ("freetext", citation),
        ];
        let response = self
            .client
            .post(&form_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ResolveError::network(&e))?;

        let body = response.text().await.map_err(|e| ResolveError::network(&e))?;

        let Some(anchor_text) = first_result_anchor(&body) else {
            warn!("citation service response carried no result cell");
            return Err(ResolveError::NoMatch);
        };

        debug!(anchor = %anchor_text, "citation service returned a match");
        Ok(doi::extract_from_url(&anchor_text))
    }
}

impl std::fmt::Debug for CitationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitationResolver")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Extracts the text of the first anchor inside the first result cell.
fn first_result_anchor(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let cell = Selector::parse(RESULT_CELL_SELECTOR).ok()?;
    let anchor = Selector::parse("a").ok()?;

    let first_cell = document.select(&cell).next()?;
    let link = first_cell.select(&anchor).next()?;
    let text = link.text().collect::<String>().trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}
