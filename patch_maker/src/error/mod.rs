//! Error types produced while calculating patches.

mod constructors;
mod conversions;
mod types;

pub use types::{DocumentRole, MergePatchError, OptionFailure, PatchMakerError};
