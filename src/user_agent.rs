//! Shared User-Agent string for reftool HTTP clients.
//!
//! Single source for the project URL and UA format so traffic to all three
//! services stays consistent and easy to update (good citizenship; RFC 9308).

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/reftool/reftool";

/// Default User-Agent used by every reftool HTTP client.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("reftool/{version} (citation-resolution-tool; +{PROJECT_UA_URL})")
}
