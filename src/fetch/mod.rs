//! Downstream lookups dispatched concurrently once a DOI is known.
//!
//! The two fetchers are independent: each opens its own short-lived HTTP
//! client, they share no mutable state, and the orchestrator joins both
//! before the process exits. Every failure here is recovered into a
//! printed diagnostic.

mod bibtex;
mod mirror;

pub use bibtex::{BibtexFetcher, BibtexOutcome};
pub use mirror::{MirrorFetcher, MirrorOutcome};

use thiserror::Error;

/// Errors shared by the two fetchers.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Transport-level failure talking to the service.
    #[error("request failed: {reason}")]
    Network {
        /// Underlying transport error description.
        reason: String,
    },

    /// HTTP client construction failed before any request was sent.
    #[error("failed to initialize the HTTP client: {reason}")]
    ClientConstruction {
        /// Underlying construction error description.
        reason: String,
    },
}

impl FetchError {
    /// Creates a `Network` error from a transport failure.
    #[must_use]
    pub fn network(error: &reqwest::Error) -> Self {
        Self::Network {
            reason: error.to_string(),
        }
    }

    /// Creates a `ClientConstruction` error.
    #[must_use]
    pub fn client_construction(error: &reqwest::Error) -> Self {
        Self::ClientConstruction {
            reason: error.to_string(),
        }
    }
}
