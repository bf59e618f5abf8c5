//! Layered settings for the `patch-maker` command.
//!
//! Layers, lowest precedence first:
//!
//! 1. built-in defaults;
//! 2. the configuration file (`--config PATH`, or `patch-maker.toml` in the
//!    working directory when present; parent directories are not searched);
//! 3. `PATCH_MAKER_*` environment variables;
//! 4. command-line flags.

use camino::Utf8Path;
use clap::ValueEnum;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use patch_maker::{
    CalculateOption, OptionFailure, ignore_field, ignore_null_fields, ignore_pointer,
    ignore_status_fields,
};
use serde::{Deserialize, Serialize};

use crate::cli::SettingsOverrides;
use crate::error::{CliError, Result};

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "patch-maker.toml";

/// Prefix for settings supplied through the environment.
pub const ENV_PREFIX: &str = "PATCH_MAKER_";

/// How the result is printed.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A JSON object holding the patch, the patched document, and an
    /// `empty` flag.
    #[default]
    Json,
    /// The diagnostic text rendering of the patch result.
    Text,
}

/// Effective settings after all layers are merged.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Field names or JSON pointers masked from the diff.
    pub ignore_fields: Vec<String>,
    /// Mask the top-level `status` block.
    pub ignore_status: bool,
    /// Treat explicit `null` members as absent.
    pub ignore_nulls: bool,
    /// Output format.
    pub format: OutputFormat,
    /// Exit with status 1 when the patch is not empty.
    pub exit_code: bool,
}

impl Settings {
    /// Build the calculate options these settings ask for, in a fixed order:
    /// ignored fields as listed, then `status`, then nulls.
    ///
    /// Entries starting with `/` are JSON pointers; anything else names a
    /// top-level field.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionFailure`] for malformed pointers.
    pub fn options(&self) -> std::result::Result<Vec<Box<dyn CalculateOption>>, OptionFailure> {
        let mut options: Vec<Box<dyn CalculateOption>> = Vec::new();
        for entry in &self.ignore_fields {
            if entry.starts_with('/') {
                options.push(Box::new(ignore_pointer(entry)?));
            } else {
                options.push(Box::new(ignore_field(entry.as_str())));
            }
        }
        if self.ignore_status {
            options.push(Box::new(ignore_status_fields()));
        }
        if self.ignore_nulls {
            options.push(Box::new(ignore_null_fields()));
        }
        Ok(options)
    }
}

/// Merge every settings layer.
///
/// # Errors
///
/// Returns [`CliError::MissingConfig`] when `config_path` does not exist and
/// [`CliError::Settings`] when a layer holds values of the wrong type.
pub fn load_settings(
    config_path: Option<&Utf8Path>,
    overrides: &SettingsOverrides,
) -> Result<Settings> {
    let file = match config_path {
        Some(path) if !path.is_file() => return Err(CliError::MissingConfig(path.to_owned())),
        Some(path) => Toml::file_exact(path),
        None => Toml::file_exact(DEFAULT_CONFIG_FILE),
    };
    let settings = Figment::from(Serialized::defaults(Settings::default()))
        .merge(file)
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(overrides))
        .extract::<Settings>()
        .map_err(Box::new)?;
    tracing::debug!(?settings, "loaded settings");
    Ok(settings)
}
