//! Three-way JSON merge patch calculation.
//!
//! Declarative reconcilers keep three versions of every object they manage:
//! the *original* state they last applied, the *modified* state the user now
//! wants, and the *current* state observed on the live system. This crate
//! computes the merge patch that carries the user's change onto the live
//! object without clobbering edits made there by other actors, and returns
//! the patched object alongside it.
//!
//! ```rust
//! use patch_maker::{Maker, PatchMaker, ignore_pointer};
//! use serde_json::json;
//!
//! let maker = PatchMaker::default();
//! let generation = ignore_pointer("/metadata/generation")?;
//! let result = maker.calculate(
//!     &json!({"metadata": {"generation": 4}, "spec": {"replicas": 1}}),
//!     &json!({"metadata": {}, "spec": {"replicas": 2}}),
//!     &json!({"metadata": {}, "spec": {"replicas": 1}}),
//!     &[&generation],
//! )?;
//! assert!(!result.is_empty());
//! assert_eq!(result.patch(), br#"{"spec":{"replicas":2}}"#);
//! assert_eq!(
//!     result.patched(),
//!     &json!({"metadata": {"generation": 4}, "spec": {"replicas": 2}})
//! );
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::sync::Arc;

mod calculator;
pub mod codec;
mod error;
mod merge_patch;
mod option;
mod result;
pub mod result_ext;

pub use calculator::{Maker, PatchMaker, default_patch_maker};
pub use error::{DocumentRole, MergePatchError, OptionFailure, PatchMakerError};
pub use merge_patch::{
    BaseJsonMergePatcher, JsonMergePatcher, StrategicMergePatcher,
    UnsupportedStrategicMergePatcher,
};
pub use option::{
    CalculateOption, IgnoreNullFields, IgnorePath, OptionOutput, ignore_field,
    ignore_null_fields, ignore_pointer, ignore_status_fields,
};
pub use result::PatchResult;

/// Result alias for patch calculation, sharing errors behind an [`Arc`].
pub type PatchMakerResult<T> = Result<T, Arc<PatchMakerError>>;
