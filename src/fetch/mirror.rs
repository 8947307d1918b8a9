//! Download-link retrieval from the mirror service.
//!
//! The mirror answers a DOI lookup with an HTML page embedding the
//! article in an inline frame. That frame's `src` is the download link.
//! The frame markup is an external, versioned dependency owned by the
//! mirror; its absence degrades to the recovered
//! [`MirrorOutcome::NotAvailable`] diagnostic.

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use crate::doi::Doi;
use crate::http::{self, TlsPolicy};

use super::FetchError;

/// Default base URL of the mirror service.
const DEFAULT_BASE_URL: &str = "https://sci-hub.se";

/// Inline frame carrying the article once the mirror finds it.
const PDF_FRAME_SELECTOR: &str = "iframe#pdf";

/// Result of a download-link lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// Absolute URL of the embedded content frame.
    Link(String),
    /// The response carried no content frame; the mirror does not serve
    /// this paper.
    NotAvailable,
}

/// Fetches direct download links for DOIs from the mirror service.
pub struct MirrorFetcher {
    client: Client,
    base_url: String,
}

impl MirrorFetcher {
    /// Creates a fetcher against the default mirror endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientConstruction`] if the HTTP client
    /// cannot be built.
    pub fn new(tls: TlsPolicy) -> Result<Self, FetchError> {
        Self::build(DEFAULT_BASE_URL.to_string(), tls)
    }

    /// Creates a fetcher with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientConstruction`] if the HTTP client
    /// cannot be built.
    pub fn with_base_url(base_url: impl Into<String>, tls: TlsPolicy) -> Result<Self, FetchError> {
        Self::build(base_url.into(), tls)
    }

    fn build(base_url: String, tls: TlsPolicy) -> Result<Self, FetchError> {
        let client =
            http::build_client(None, tls).map_err(|e| FetchError::client_construction(&e))?;
        Ok(Self { client, base_url })
    }

    /// Submits the DOI to the mirror and extracts the content-frame URL.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] on transport failure; the caller
    /// reports it and carries on.
    #[tracing::instrument(skip(self), fields(doi = %doi))]
    pub async fn fetch(&self, doi: &Doi) -> Result<MirrorOutcome, FetchError> {
        let params = [("request", doi.as_str()), ("sci-hub-plugin-check", "")];

        let response = self
            .client
            .post(&self.base_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| FetchError::network(&e))?;

        let body = response.text().await.map_err(|e| FetchError::network(&e))?;

        match extract_frame_src(&body) {
            Some(src) => {
                let link = ensure_scheme(&src);
                debug!(link = %link, "mirror returned a content frame");
                Ok(MirrorOutcome::Link(link))
            }
            None => {
                debug!("mirror response carried no content frame");
                Ok(MirrorOutcome::NotAvailable)
            }
        }
    }
}

impl std::fmt::Debug for MirrorFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorFetcher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Extracts the `src` attribute of the content frame, if present.
fn extract_frame_src(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let frame = Selector::parse(PDF_FRAME_SELECTOR).ok()?;
    document
        .select(&frame)
        .next()?
        .value()
        .attr("src")
        .map(|src| src.trim().to_string())
}

/// Prepends an explicit scheme when the frame `src` lacks one.
///
/// The mirror commonly emits protocol-relative URLs (`//host/path`);
/// already-absolute `src` values pass through unchanged.
fn ensure_scheme(src: &str) -> String {
    if src.starts_with("http:") || src.starts_with("https:") {
        src.to_string()
    } else {
        format!("http:{src}")
    }
}
