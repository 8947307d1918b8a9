//! reftool core library
//!
//! Resolves a free-form bibliographic citation (or an existing DOI/URL)
//! to a canonical DOI, then optionally fetches a BibTeX record and/or a
//! direct download link from a mirror service.
//!
//! # Architecture
//!
//! - [`doi`] - DOI extraction and local resolution (pure, no I/O)
//! - [`resolver`] - Remote citation resolution against the matching service
//! - [`fetch`] - Concurrent BibTeX and download-link lookups
//! - [`app`] - Pipeline orchestration and report rendering
//! - [`http`] - Shared HTTP client construction policy

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod doi;
pub mod fetch;
pub mod http;
pub mod resolver;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use app::{PipelineState, RunConfig, RunReport, run};
pub use doi::{DOI_PREFIX, Doi, Resolution, extract_from_url, resolve_local};
pub use fetch::{BibtexFetcher, BibtexOutcome, FetchError, MirrorFetcher, MirrorOutcome};
pub use http::TlsPolicy;
pub use resolver::{CitationResolver, ResolveError};
