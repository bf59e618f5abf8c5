//! Extensions for mapping step failures into `PatchMakerResult` concisely.
//!
//! These helpers replace repetitive
//! `.map_err(|e| Arc::new(PatchMakerError::…(e)))` chains in the calculator
//! with a single call that names the failing step.
//!
//! # Examples
//!
//! ```
//! use patch_maker::{DocumentRole, PatchMakerResult};
//! use patch_maker::result_ext::EncodingResultExt;
//!
//! fn encode(value: &u8) -> PatchMakerResult<Vec<u8>> {
//!     serde_json::to_vec(value).into_encoding(DocumentRole::Current)
//! }
//! # assert_eq!(encode(&7).unwrap(), b"7");
//! ```

use std::sync::Arc;

use crate::{DocumentRole, MergePatchError, OptionFailure, PatchMakerError, PatchMakerResult};

/// Map codec failures into [`PatchMakerError::Encoding`] or
/// [`PatchMakerError::Decoding`].
pub trait EncodingResultExt<T> {
    /// Convert a serialisation failure for `role` into a shared encoding error.
    ///
    /// # Errors
    ///
    /// Returns [`PatchMakerError::Encoding`] when the input is `Err`.
    fn into_encoding(self, role: DocumentRole) -> PatchMakerResult<T>;

    /// Convert a deserialisation failure into a shared decoding error.
    ///
    /// # Errors
    ///
    /// Returns [`PatchMakerError::Decoding`] when the input is `Err`.
    fn into_decoding(self) -> PatchMakerResult<T>;
}

impl<T> EncodingResultExt<T> for Result<T, serde_json::Error> {
    fn into_encoding(self, role: DocumentRole) -> PatchMakerResult<T> {
        self.map_err(|e| Arc::new(PatchMakerError::encoding(role, e)))
    }

    fn into_decoding(self) -> PatchMakerResult<T> {
        self.map_err(|e| Arc::new(PatchMakerError::decoding(e)))
    }
}

/// Map merge-patch failures into step-tagged [`PatchMakerError`] variants.
pub trait MergePatchResultExt<T> {
    /// Tag a failure as [`PatchMakerError::PatchGeneration`] for `step`.
    ///
    /// # Errors
    ///
    /// Returns the tagged error when the input is `Err`.
    fn generating(self, step: &'static str) -> PatchMakerResult<T>;

    /// Tag a failure as [`PatchMakerError::PatchApply`] for `step`.
    ///
    /// # Errors
    ///
    /// Returns the tagged error when the input is `Err`.
    fn applying(self, step: &'static str) -> PatchMakerResult<T>;
}

impl<T> MergePatchResultExt<T> for Result<T, MergePatchError> {
    fn generating(self, step: &'static str) -> PatchMakerResult<T> {
        self.map_err(|e| Arc::new(PatchMakerError::patch_generation(step, e)))
    }

    fn applying(self, step: &'static str) -> PatchMakerResult<T> {
        self.map_err(|e| Arc::new(PatchMakerError::patch_apply(step, e)))
    }
}

/// Map option failures into [`PatchMakerError::Option`].
pub trait OptionResultExt<T> {
    /// Tag a failure with the option's pipeline position.
    ///
    /// # Errors
    ///
    /// Returns [`PatchMakerError::Option`] when the input is `Err`.
    fn at_option(self, index: usize) -> PatchMakerResult<T>;
}

impl<T> OptionResultExt<T> for Result<T, OptionFailure> {
    fn at_option(self, index: usize) -> PatchMakerResult<T> {
        self.map_err(|e| Arc::new(PatchMakerError::option(index, e)))
    }
}
