//! Error types emitted by the triage CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use triage_ranker::RankError;

/// Errors emitted by the triage CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The merged weights or match limit were rejected by the ranker.
    #[error("invalid ranking configuration: {0}")]
    InvalidRankerConfig(#[source] RankError),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the input.
        field: &'static str,
        /// Path that was looked up.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the input.
        field: &'static str,
        /// Path that was looked up.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the input.
        field: &'static str,
        /// Path that was looked up.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The output directory exists but is not a directory.
    #[error("output directory {path:?} is not a directory")]
    OutputDirectoryNotDirectory {
        /// Configured output directory.
        path: Utf8PathBuf,
    },
    /// Creating or inspecting the output directory failed.
    #[error("failed to prepare output directory {path:?}: {source}")]
    CreateOutputDirectory {
        /// Configured output directory.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the facility dataset failed.
    #[error("failed to open facility dataset at {path:?}: {source}")]
    OpenDataset {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The facility dataset is not a JSON array of facility records.
    #[error("failed to parse facility dataset at {path:?}: {source}")]
    ParseDataset {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// Opening the case document failed.
    #[error("failed to open case document at {path:?}: {source}")]
    OpenCase {
        /// Case document path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The case document is not valid JSON.
    #[error("failed to parse case document at {path:?}: {source}")]
    ParseCase {
        /// Case document path.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The case document did not yield a rankable case.
    #[error("{source}")]
    Rank {
        /// Case document path.
        path: Utf8PathBuf,
        /// Ranking failure.
        #[source]
        source: RankError,
    },
    /// Serialising the ranking result failed.
    #[error("failed to serialise ranking result: {0}")]
    SerialiseResult(#[source] serde_json::Error),
    /// Writing the ranking result failed.
    #[error("failed to write ranking result to {path:?}: {source}")]
    WriteResult {
        /// Result file path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}
