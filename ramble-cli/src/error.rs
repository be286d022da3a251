//! Error types emitted by the Ramble CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use ramble_core::{InvalidInputError, PlanError};
use thiserror::Error;

use crate::catalog::CatalogRecordError;

/// Errors emitted by the Ramble CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name the value belongs to.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option name the value belongs to.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option name the value belongs to.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option name the value belongs to.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Opening an input file failed.
    #[error("failed to open {field} at {path:?}: {source}")]
    OpenInput {
        /// Option name the value belongs to.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// An input file was not valid JSON of the expected shape.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseInput {
        /// Option name the value belongs to.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// A catalog record could not be turned into a POI.
    #[error("catalog {path:?} record {id:?} is invalid: {source}")]
    InvalidCatalogRecord {
        /// Offending path.
        path: Utf8PathBuf,
        /// Identifier of the rejected record.
        id: String,
        /// Underlying error.
        #[source]
        source: CatalogRecordError,
    },
    /// A profile key is not a usable tag.
    #[error("profile {path:?} has an invalid tag {tag:?}: {source}")]
    InvalidProfileTag {
        /// Offending path.
        path: Utf8PathBuf,
        /// Raw profile key.
        tag: String,
        /// Underlying error.
        #[source]
        source: ramble_core::TagError,
    },
    /// The resolved request parameters are invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] InvalidInputError),
    /// The planner rejected the request.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
