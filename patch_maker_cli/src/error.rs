//! Error types for the `patch-maker` command.
//!
//! `CliError` wraps calculation failures from `patch_maker` alongside the
//! I/O and configuration issues the binary runs into before and after the
//! calculation, so `main` can render a single diagnostic.
use std::sync::Arc;

use camino::Utf8PathBuf;
use patch_maker::{OptionFailure, PatchMakerError};
use thiserror::Error;

/// Errors raised by the `patch-maker` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A document file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A document file does not contain JSON.
    #[error("{path} is not valid JSON: {source}")]
    Parse {
        /// File that failed to parse.
        path: Utf8PathBuf,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("configuration file {0} does not exist")]
    MissingConfig(Utf8PathBuf),

    /// Settings could not be extracted from the configuration layers.
    #[error("failed to load settings: {0}")]
    Settings(#[from] Box<figment::Error>),

    /// An ignore entry could not be turned into a calculate option.
    #[error("invalid ignore entry: {0}")]
    InvalidIgnore(#[source] OptionFailure),

    /// The patch calculation failed.
    #[error(transparent)]
    Calculate(#[from] Arc<PatchMakerError>),

    /// The result could not be rendered.
    #[error("failed to render result: {0}")]
    Render(#[source] serde_json::Error),

    /// The tracing subscriber could not be installed.
    #[error("failed to set up logging: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Result alias for the command.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
