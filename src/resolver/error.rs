//! Error types for remote citation resolution.
//!
//! Every variant is a recovered diagnostic: the orchestrator prints it
//! and continues with an unresolved DOI; nothing here crashes the run.

use thiserror::Error;

/// Errors that can occur while resolving a citation remotely.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// The citation service requires a contact email and none was given.
    #[error("no email provided; the citation service requires one")]
    MissingEmail,

    /// Could not reach the citation service.
    #[error("cannot reach the citation service: {reason}")]
    Network {
        /// Underlying transport error description.
        reason: String,
    },

    /// The response carried none of the expected result markup. Happens
    /// for unregistered emails and for citations the service cannot
    /// match unambiguously.
    #[error("citation service returned no match (unregistered email or invalid input)")]
    NoMatch,

    /// HTTP client construction failed before any request was sent.
    #[error("failed to initialize the citation service client: {reason}")]
    ClientConstruction {
        /// Underlying construction error description.
        reason: String,
    },
}

impl ResolveError {
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
