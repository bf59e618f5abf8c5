//! Library half of the `patch-maker` binary.
//!
//! Split out so tests can drive argument parsing, settings layering, and the
//! calculation without spawning a process.

pub mod cli;
pub mod error;
pub mod logging;
pub mod run;
pub mod settings;
