//! Command-line surface of `patch-maker`.

use camino::Utf8PathBuf;
use clap::{Args, Parser};
use serde::Serialize;

use crate::settings::OutputFormat;

/// Computes the three-way merge patch between JSON documents on disk.
#[derive(Debug, Parser)]
#[command(
    name = "patch-maker",
    bin_name = "patch-maker",
    about = "Compute the three-way JSON merge patch that reconciles a live object",
    version
)]
pub struct CommandLine {
    /// Document last applied to the live system. Omit for first applies.
    #[arg(long, value_name = "PATH")]
    pub original: Option<Utf8PathBuf>,

    /// Desired document.
    #[arg(long, value_name = "PATH")]
    pub modified: Utf8PathBuf,

    /// Live document.
    #[arg(long, value_name = "PATH")]
    pub current: Utf8PathBuf,

    /// Overrides configuration discovery with an explicit file path.
    #[arg(long = "config", short = 'c', value_name = "PATH")]
    pub config_path: Option<Utf8PathBuf>,

    /// Emit trace-level diagnostics on stderr.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Settings that may also come from the configuration file or
    /// environment.
    #[command(flatten)]
    pub overrides: SettingsOverrides,
}

/// Command-line layer of [`crate::settings::Settings`].
///
/// Only flags the user actually passed are serialised, so absent flags leave
/// lower layers untouched.
#[derive(Debug, Default, Args, Serialize)]
pub struct SettingsOverrides {
    /// Field name or JSON pointer (`/metadata/generation`) to mask from the
    /// diff. Repeatable; replaces configured entries.
    #[arg(long = "ignore-field", value_name = "FIELD")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_fields: Vec<String>,

    /// Mask the top-level `status` block.
    #[arg(long)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ignore_status: bool,

    /// Treat explicit `null` members as absent.
    #[arg(long)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ignore_nulls: bool,

    /// Output format.
    #[arg(long, value_enum)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,

    /// Exit with status 1 when the patch is not empty.
    #[arg(long)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub exit_code: bool,
}
