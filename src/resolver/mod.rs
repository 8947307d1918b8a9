//! Remote citation resolution.
//!
//! The remote stage of the resolution pipeline: when the local stage
//! ([`crate::doi::resolve_local`]) cannot produce a DOI, the
//! [`CitationResolver`] submits the free-text citation to the
//! citation-matching service and feeds the scraped result back through
//! the DOI extractor.

mod citation;
mod error;

pub use citation::CitationResolver;
pub use error::ResolveError;
