//! Test helpers shared across crates in the patch-maker workspace.
//!
//! [`json`] builds canonical documents and fixture files; [`figment`] wraps
//! `figment::Jail` for configuration tests.

pub mod figment;
pub mod json;
