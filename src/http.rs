//! Shared HTTP client construction policy.
//!
//! This module centralizes networking defaults so all three service
//! clients stay consistent on timeout, user-agent, compression, cookie
//! support, and the TLS-verification trade-off.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::Client;

use crate::user_agent;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// TLS verification policy for a client.
///
/// The metadata and mirror endpoints present certificates that stock
/// clients reject, so verification is disabled for them by default. This
/// is a deliberate, documented trade-off controlled from the CLI; it is
/// never applied to the citation service client.
#[derive(Debug, Clone, Copy, Default)]
pub struct TlsPolicy {
    /// Skip certificate verification for this client.
    pub accept_invalid_certs: bool,
}

impl TlsPolicy {
    /// Policy that skips certificate verification.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            accept_invalid_certs: true,
        }
    }
}

/// Builds an HTTP client using shared project policy.
///
/// A cookie jar is attached when the caller needs a session (the
/// citation service rejects posts from sessions that never visited its
/// landing page).
///
/// # Errors
///
/// Returns the underlying [`reqwest::Error`] when client construction
/// fails; callers wrap it in their own boundary error type.
pub fn build_client(cookie_jar: Option<Arc<Jar>>, tls: TlsPolicy) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
        .user_agent(user_agent::default_user_agent())
        .gzip(true);

    if tls.accept_invalid_certs {
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(jar) = cookie_jar {
        builder = builder.cookie_provider(jar);
    }

    builder.build()
}
