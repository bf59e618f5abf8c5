//! Reads the documents, runs the calculation, and renders the result.

use std::fs;

use camino::Utf8Path;
use patch_maker::{CalculateOption, Maker, PatchMaker, PatchResult};
use serde_json::{Value, json};

use crate::cli::CommandLine;
use crate::error::{CliError, Result};
use crate::settings::{OutputFormat, Settings};

/// Rendered output of one invocation.
#[derive(Debug)]
pub struct Outcome {
    /// Text to print on stdout.
    pub rendered: String,
    /// Whether the patch changes anything.
    pub changed: bool,
}

/// Compute and render the patch for the documents named on the command line.
///
/// A missing `--original` is treated as a first apply: the object did not
/// exist before.
///
/// # Errors
///
/// Returns a [`CliError`] when a document cannot be read or parsed, an
/// ignore entry is malformed, or the calculation fails.
pub fn run(cli: &CommandLine, settings: &Settings) -> Result<Outcome> {
    let original = cli
        .original
        .as_deref()
        .map_or(Ok(Value::Null), read_document)?;
    let modified = read_document(&cli.modified)?;
    let current = read_document(&cli.current)?;

    let options = settings.options().map_err(CliError::InvalidIgnore)?;
    let options: Vec<&dyn CalculateOption> = options.iter().map(Box::as_ref).collect();

    let result = PatchMaker::default().calculate(&current, &modified, &original, &options)?;
    tracing::info!(empty = result.is_empty(), "calculated patch");

    Ok(Outcome {
        rendered: render(&result, settings.format)?,
        changed: !result.is_empty(),
    })
}

/// Read a JSON document from disk.
///
/// # Errors
///
/// Returns [`CliError::Read`] or [`CliError::Parse`].
pub fn read_document(path: &Utf8Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_owned(),
        source,
    })
}

fn render(result: &PatchResult<Value>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let patch = result.patch_value().map_err(CliError::Render)?;
            let document = json!({
                "patch": patch,
                "patched": result.patched(),
                "empty": result.is_empty(),
            });
            serde_json::to_string_pretty(&document).map_err(CliError::Render)
        }
        OutputFormat::Text => Ok(result.to_string()),
    }
}
