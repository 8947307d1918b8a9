//! Bibliographic record retrieval via DOI content negotiation.
//!
//! The DOI-resolution redirect service returns a BibTeX record when
//! asked for one via the `Accept` header. The record is treated as an
//! opaque payload and passed through byte-for-byte; correctness is
//! defined purely by that passthrough.

use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::debug;

use crate::doi::Doi;
use crate::http::{self, TlsPolicy};

use super::FetchError;

/// Default base URL of the DOI-resolution redirect service.
const DEFAULT_BASE_URL: &str = "https://dx.doi.org";

/// Content type negotiated for the bibliographic record.
const BIBTEX_MIME: &str = "application/x-bibtex";

/// Marker the redirect service embeds in the body of a failed lookup.
const NOT_FOUND_MARKER: &str = "Error: DOI Not Found";

/// Result of a bibliographic record lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BibtexOutcome {
    /// Raw record body, unparsed.
    Record(String),
    /// The redirect service does not know this DOI.
    NotFound,
}

/// Fetches machine-readable bibliographic records for DOIs.
pub struct BibtexFetcher {
    client: Client,
    base_url: String,
}

impl BibtexFetcher {
    /// Creates a fetcher against the default redirect endpoint.
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

    /// Requests the BibTeX record for a DOI.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] on transport failure; the caller
    /// reports it and carries on.
    #[tracing::instrument(skip(self), fields(doi = %doi))]
    pub async fn fetch(&self, doi: &Doi) -> Result<BibtexOutcome, FetchError> {
        let url = format!("{}/{}", self.base_url, doi.url_encoded());
        debug!(url = %url, "requesting bibliographic record");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, BIBTEX_MIME)
            .send()
            .await
            .map_err(|e| FetchError::network(&e))?;

        let body = response.text().await.map_err(|e| FetchError::network(&e))?;

        if body.contains(NOT_FOUND_MARKER) {
            debug!("redirect service reported the DOI as unknown");
            return Ok(BibtexOutcome::NotFound);
        }

        Ok(BibtexOutcome::Record(body))
    }
}

impl std::fmt::Debug for BibtexFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BibtexFetcher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
