//! Helpers for building JSON fixtures.

use std::fs;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

/// Canonical byte encoding of `value`, matching what the patch pipeline
/// produces for the same content.
#[must_use]
pub fn canonical(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}

/// Writes `value` as pretty-printed JSON to `dir/name` and returns the path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_document(dir: &Utf8Path, name: &str, value: &Value) -> Result<Utf8PathBuf> {
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(value).context("serialise fixture")?;
    fs::write(&path, text).with_context(|| format!("write fixture {path}"))?;
    Ok(path)
}
