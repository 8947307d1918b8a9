//! CLI argument definitions using clap derive macros.

use clap::Parser;

/// Resolve a citation to a DOI, with optional BibTeX and download-link lookups.
///
/// reftool resolves free-text citations, bare DOIs, and resolver URLs to
/// a canonical DOI, then fetches the requested outputs concurrently.
#[derive(Parser, Debug)]
#[command(name = "reftool")]
#[command(author, version, about)]
pub struct Args {
    /// Increase log verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Fetch both the bibliographic record and the download link
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Fetch and print the BibTeX record for the resolved DOI
    #[arg(short = 'b', long = "bibtex")]
    pub bibtex: bool,

    /// Fetch and print a direct download link from the mirror service
    #[arg(short = 'd', long = "download")]
    pub download: bool,

    /// Verify TLS certificates for the metadata and mirror services
    /// (verification is off by default because those endpoints present
    /// certificates stock clients reject)
    #[arg(long)]
    pub verify_tls: bool,

    /// Contact email required by the citation-matching service
    pub email: String,

    /// Free-text citation, bare DOI, or resolver URL embedding a DOI
    pub reference: String,
}

impl Args {
    /// True when the bibliographic record was requested.
    #[must_use]
    pub fn wants_bibtex(&self) -> bool {
        self.all || self.bibtex
    }

    /// True when the download link was requested.
    #[must_use]
    pub fn wants_download(&self) -> bool {
        self.all || self.download
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const EMAIL: &str = "someone@example.com";
    const DOI: &str = "10.1039/C4CC08563A";

    #[test]
    fn test_cli_positional_args_parse() {
        let args = Args::try_parse_from(["reftool", EMAIL, DOI]).unwrap();
        assert_eq!(args.email, EMAIL);
        assert_eq!(args.reference, DOI);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert!(!args.verify_tls);
    }

    #[test]
    fn test_cli_no_flags_requests_nothing() {
        let args = Args::try_parse_from(["reftool", EMAIL, DOI]).unwrap();
        assert!(!args.wants_bibtex());
        assert!(!args.wants_download());
    }

    #[test]
    fn test_cli_bibtex_flag() {
        let args = Args::try_parse_from(["reftool", "-b", EMAIL, DOI]).unwrap();
        assert!(args.wants_bibtex());
        assert!(!args.wants_download());
    }

    #[test]
    fn test_cli_download_flag() {
        let args = Args::try_parse_from(["reftool", "-d", EMAIL, DOI]).unwrap();
        assert!(!args.wants_bibtex());
        assert!(args.wants_download());
    }

    #[test]
    fn test_cli_all_flag_implies_both() {
        let args = Args::try_parse_from(["reftool", "-a", EMAIL, DOI]).unwrap();
        assert!(args.wants_bibtex());
        assert!(args.wants_download());
    }

    #[test]
    fn test_cli_long_flags() {
        let args =
            Args::try_parse_from(["reftool", "--bibtex", "--download", EMAIL, DOI]).unwrap();
        assert!(args.wants_bibtex());
        assert!(args.wants_download());
    }

    #[test]
    fn test_cli_verify_tls_flag() {
        let args = Args::try_parse_from(["reftool", "--verify-tls", EMAIL, DOI]).unwrap();
        assert!(args.verify_tls);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["reftool", "-vv", EMAIL, DOI]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["reftool", "-q", EMAIL, DOI]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_free_text_citation_as_single_argument() {
        let citation = "J.-P. Francoia, R. Pascal and L. Vial, Chem. Commun., 2015, 51, 1953";
        let args = Args::try_parse_from(["reftool", "-a", EMAIL, citation]).unwrap();
        assert_eq!(args.reference, citation);
    }

    #[test]
    fn test_cli_missing_positionals_rejected() {
        let result = Args::try_parse_from(["reftool", EMAIL]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        // --help causes early exit, so we check it returns an error with Help kind
        let result = Args::try_parse_from(["reftool", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["reftool", "--invalid-flag", EMAIL, DOI]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
