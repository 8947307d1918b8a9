//! Pipeline orchestration: resolve the target to a DOI, then dispatch
//! the requested lookups concurrently and collect every outcome.
//!
//! The resolution stages run synchronously (local first, then remote);
//! only the two downstream fetchers are scheduled as concurrent tasks.
//! The run completes when every dispatched task finishes - there is no
//! cancellation and no early exit on first failure.

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::doi::{self, Doi, Resolution};
use crate::fetch::{BibtexFetcher, BibtexOutcome, MirrorFetcher, MirrorOutcome};
use crate::http::TlsPolicy;
use crate::resolver::CitationResolver;

/// Default base URLs used when the config does not override them.
const DEFAULT_CITATION_BASE_URL: &str = "https://doi.crossref.org";
const DEFAULT_METADATA_BASE_URL: &str = "https://dx.doi.org";
const DEFAULT_MIRROR_BASE_URL: &str = "https://sci-hub.se";

/// Explicit run configuration, constructed once at the entry point and
/// passed by parameter. There is no ambient global state.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Contact email required by the citation-matching service.
    pub email: String,
    /// Free-text citation, bare DOI, or resolver URL.
    pub target: String,
    /// Fetch and print the bibliographic record.
    pub fetch_bibtex: bool,
    /// Fetch and print the download link.
    pub fetch_download: bool,
    /// TLS policy for the metadata and mirror clients.
    pub tls: TlsPolicy,
    /// Base URL of the citation-matching form service.
    pub citation_base_url: String,
    /// Base URL of the DOI-resolution redirect service.
    pub metadata_base_url: String,
    /// Base URL of the mirror service.
    pub mirror_base_url: String,
}

impl RunConfig {
    /// Creates a config against the default service endpoints, with both
    /// downstream lookups disabled and the documented TLS-relaxed policy
    /// for the metadata/mirror clients.
    #[must_use]
    pub fn new(email: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            target: target.into(),
            fetch_bibtex: false,
            fetch_download: false,
            tls: TlsPolicy::relaxed(),
            citation_base_url: DEFAULT_CITATION_BASE_URL.to_string(),
            metadata_base_url: DEFAULT_METADATA_BASE_URL.to_string(),
            mirror_base_url: DEFAULT_MIRROR_BASE_URL.to_string(),
        }
    }
}

/// Terminal state of the resolution stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    /// The DOI came straight from the input, no network involved.
    LocalDoi(Doi),
    /// The DOI came from the citation-matching service.
    RemoteDoi(Doi),
    /// Neither stage produced a DOI; nothing else runs.
    Failed,
}

impl PipelineState {
    /// Returns the resolved DOI, if any.
    #[must_use]
    pub fn doi(&self) -> Option<&Doi> {
        match self {
            Self::LocalDoi(doi) | Self::RemoteDoi(doi) => Some(doi),
            Self::Failed => None,
        }
    }
}

/// Everything a run produced, in print order.
///
/// Collecting lines instead of printing in place keeps the fetchers'
/// nondeterministic completion order out of the output: both outcomes
/// always appear, bibliographic record first.
#[derive(Debug)]
pub struct RunReport {
    /// Terminal resolution state.
    pub state: PipelineState,
    /// Console lines, results and recovered diagnostics alike.
    pub lines: Vec<String>,
}

/// Runs the full pipeline.
///
/// Every downstream failure is recovered into a report line; the run
/// itself always completes once the dispatch phase is reached.
pub async fn run(config: &RunConfig) -> RunReport {
    let mut lines = Vec::new();
    let state = resolve_target(config, &mut lines).await;

    let Some(resolved) = state.doi().cloned() else {
        lines.push("DOI: unresolved".to_string());
        return RunReport { state, lines };
    };
    lines.push(format!("DOI: {resolved}"));

    if !config.fetch_bibtex && !config.fetch_download {
        // No-op success: the DOI resolves and nothing else was asked
        // for, so no further network calls are made.
        debug!("no outputs requested; skipping fetch dispatch");
        return RunReport { state, lines };
    }

    // Both tasks are spawned before either is awaited so their I/O
    // interleaves; join-all before returning, in fixed report order.
    let bibtex_task: Option<JoinHandle<Vec<String>>> = config.fetch_bibtex.then(|| {
        let base_url = config.metadata_base_url.clone();
        let tls = config.tls;
        let doi = resolved.clone();
        tokio::spawn(async move { bibtex_lines(&base_url, tls, &doi).await })
    });
    let mirror_task: Option<JoinHandle<Vec<String>>> = config.fetch_download.then(|| {
        let base_url = config.mirror_base_url.clone();
        let tls = config.tls;
        let doi = resolved.clone();
        tokio::spawn(async move { mirror_lines(&base_url, tls, &doi).await })
    });

    if let Some(task) = bibtex_task {
        match task.await {
            Ok(task_lines) => lines.extend(task_lines),
            Err(error) => lines.push(format!("bibliographic lookup task failed: {error}")),
        }
    }
    if let Some(task) = mirror_task {
        match task.await {
            Ok(task_lines) => lines.extend(task_lines),
            Err(error) => lines.push(format!("download-link lookup task failed: {error}")),
        }
    }

    RunReport { state, lines }
}

/// Two-stage resolution: local extraction, then the remote citation
/// service. Remote diagnostics are recovered into report lines.
async fn resolve_target(config: &RunConfig, lines: &mut Vec<String>) -> PipelineState {
    if let Resolution::Resolved(doi) = doi::resolve_local(&config.target) {
        info!(doi = %doi, "resolved locally");
        return PipelineState::LocalDoi(doi);
    }

    let resolver = match CitationResolver::with_base_url(&config.citation_base_url) {
        Ok(resolver) => resolver,
        Err(error) => {
            lines.push(error.to_string());
            return PipelineState::Failed;
        }
    };

    match resolver.resolve(&config.email, &config.target).await {
        Ok(Resolution::Resolved(doi)) => {
            info!(doi = %doi, "resolved via the citation service");
            PipelineState::RemoteDoi(doi)
        }
        Ok(Resolution::Unresolved) => PipelineState::Failed,
        Err(error) => {
            lines.push(error.to_string());
            PipelineState::Failed
        }
    }
}

async fn bibtex_lines(base_url: &str, tls: TlsPolicy, doi: &Doi) -> Vec<String> {
    let fetcher = match BibtexFetcher::with_base_url(base_url, tls) {
        Ok(fetcher) => fetcher,
        Err(error) => return vec![error.to_string()],
    };
    match fetcher.fetch(doi).await {
        Ok(BibtexOutcome::Record(record)) => vec![record],
        Ok(BibtexOutcome::NotFound) => {
            vec!["No bibliographic record: the DOI is unknown to the resolution service.".to_string()]
        }
        Err(error) => vec![error.to_string()],
    }
}

async fn mirror_lines(base_url: &str, tls: TlsPolicy, doi: &Doi) -> Vec<String> {
    let fetcher = match MirrorFetcher::with_base_url(base_url, tls) {
        Ok(fetcher) => fetcher,
        Err(error) => return vec![error.to_string()],
    };
    match fetcher.fetch(doi).await {
        Ok(MirrorOutcome::Link(link)) => {
            vec![format!("Link to download the article: {link}")]
        }
        Ok(MirrorOutcome::NotAvailable) => vec!["Paper probably not available.".to_string()],
        Err(error) => vec![error.to_string()],
    }
}
