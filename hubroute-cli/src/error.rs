//! Error types emitted by the hubroute CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use hubroute_core::{RoutingError, SnapshotError};
use hubroute_load::LoadError;
use thiserror::Error;

/// Errors emitted by the hubroute CLI.
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
        /// Option name.
        field: &'static str,
        /// Environment variable that would supply it.
        env: &'static str,
    },
    /// An option value could not be interpreted.
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidOption {
        /// Option name.
        field: &'static str,
        /// Value as given.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The network snapshot path does not exist.
    #[error("network path {path:?} does not exist")]
    MissingNetworkFile {
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// The network snapshot path exists but is not a file.
    #[error("network path {path:?} exists but is not a file")]
    NetworkPathNotFile {
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// Opening or inspecting the network snapshot failed.
    #[error("failed to open network at {path:?}: {source}")]
    OpenNetwork {
        /// Path as configured.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The network snapshot could not be parsed or is inconsistent.
    #[error("failed to load network from {path:?}: {source}")]
    LoadNetwork {
        /// Path as configured.
        path: Utf8PathBuf,
        /// Snapshot failure.
        #[source]
        source: SnapshotError,
    },
    /// A search rejected its request.
    #[error(transparent)]
    Routing(#[from] RoutingError),
    /// Load planning rejected its request.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Serialising the command result failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command result failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
