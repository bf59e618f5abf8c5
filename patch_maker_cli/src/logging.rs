//! Diagnostic output for the binary.
//!
//! The library only emits `tracing` events; this module installs the
//! subscriber that prints them to stderr so stdout stays machine-readable.

use tracing_subscriber::{
    Layer as _, Registry,
    filter::LevelFilter,
    fmt::{Layer as FmtLayer, format::FmtSpan},
    layer::SubscriberExt as _,
};

use crate::error::Result;

/// Install the global subscriber: `INFO` by default, `TRACE` when verbose.
///
/// # Errors
///
/// Returns [`crate::error::CliError::Logging`] when a global subscriber is
/// already installed.
pub fn set_up(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::INFO
    };
    let span_events = if verbose {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let fmt_layer = FmtLayer::new()
        .with_writer(std::io::stderr)
        .with_span_events(span_events)
        .with_filter(level);
    tracing::subscriber::set_global_default(Registry::default().with(fmt_layer))?;
    Ok(())
}
