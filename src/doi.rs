//! DOI recognition and local (offline) resolution of raw target strings.

use std::fmt;

use tracing::debug;
use url::Url;

/// DOI registrant-prefix marker. Every DOI this tool handles begins with it.
pub const DOI_PREFIX: &str = "10.1";

/// Resolver bases whose URLs embed a DOI directly after the base path.
///
/// A URL that contains the registrant marker but matches none of these is
/// deliberately not treated as a DOI link. The narrowing keeps publisher
/// landing-page URLs (which often contain a DOI somewhere in the path)
/// from being mistaken for resolver links.
const KNOWN_RESOLVER_PREFIXES: [&str; 4] = [
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "https://doi.org/",
    "http://doi.org/",
];

/// A DOI string guaranteed by construction to start with [`DOI_PREFIX`].
///
/// Once constructed, the value is treated as authoritative for every
/// downstream lookup; no further validation occurs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Doi(String);

impl Doi {
    /// Wraps a candidate string, returning `None` unless it carries the
    /// registrant prefix.
    #[must_use]
    pub fn parse(candidate: &str) -> Option<Self> {
        let trimmed = candidate.trim();
        if trimmed.starts_with(DOI_PREFIX) {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    /// Returns the DOI as a plain string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encodes the DOI for use as a URL path segment.
    #[must_use]
    pub fn url_encoded(&self) -> String {
        urlencoding::encode(&self.0).to_string()
    }
}

impl fmt::Display for Doi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a resolution stage.
///
/// `Unresolved` is a normal negative result, not a fault: callers report
/// it and stop, they never treat it as an error to propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A DOI was found and is authoritative from here on.
    Resolved(Doi),
    /// No DOI could be determined from the input.
    Unresolved,
}

impl Resolution {
    /// Returns true when a DOI was found.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Returns the resolved DOI, if any.
    #[must_use]
    pub fn doi(&self) -> Option<&Doi> {
        match self {
            Self::Resolved(doi) => Some(doi),
            Self::Unresolved => None,
        }
    }
}

/// Extracts a DOI embedded in a resolver URL.
///
/// The input must parse as an absolute URL and contain the registrant
/// marker; the DOI is the suffix following one of the known resolver
/// bases. Anything else is `Unresolved`. The extractor never
/// double-processes: a bare DOI is not a URL and yields `Unresolved`.
#[must_use]
pub fn extract_from_url(input: &str) -> Resolution {
    let trimmed = input.trim();
    if Url::parse(trimmed).is_err() || !trimmed.contains(DOI_PREFIX) {
        return Resolution::Unresolved;
    }

    for prefix in KNOWN_RESOLVER_PREFIXES {
        if let Some(suffix) = trimmed.strip_prefix(prefix) {
            if let Some(doi) = Doi::parse(suffix) {
                debug!(doi = %doi, "extracted DOI from resolver URL");
                return Resolution::Resolved(doi);
            }
        }
    }

    debug!(input = %trimmed, "URL contains the registrant marker but no known resolver base");
    Resolution::Unresolved
}

/// Local resolution of the raw target string. Synchronous, no I/O.
///
/// A target starting with the registrant prefix is returned unchanged
/// (bare-DOI fast path); a resolver URL goes through [`extract_from_url`];
/// everything else is `Unresolved` and left for the remote resolver.
#[must_use]
pub fn resolve_local(target: &str) -> Resolution {
    let trimmed = target.trim();
    if let Some(doi) = Doi::parse(trimmed) {
        debug!(doi = %doi, "target is a bare DOI");
        return Resolution::Resolved(doi);
    }
    extract_from_url(trimmed)
}
