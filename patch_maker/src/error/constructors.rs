//! Constructors for `PatchMakerError` and `MergePatchError`.

use std::sync::Arc;

use super::{DocumentRole, MergePatchError, OptionFailure, PatchMakerError};

impl PatchMakerError {
    /// Construct an encoding error for the given input role.
    ///
    /// # Examples
    ///
    /// ```
    /// use patch_maker::{DocumentRole, PatchMakerError};
    /// let source = serde_json::from_str::<u8>("x").unwrap_err();
    /// let e = PatchMakerError::encoding(DocumentRole::Current, source);
    /// assert!(e.to_string().starts_with("failed to convert current object"));
    /// ```
    #[must_use]
    pub const fn encoding(role: DocumentRole, source: serde_json::Error) -> Self {
        Self::Encoding { role, source }
    }

    /// Construct an option error for the option at `index`.
    #[must_use]
    pub const fn option(index: usize, source: OptionFailure) -> Self {
        Self::Option { index, source }
    }

    /// Construct a patch generation error for the named step.
    #[must_use]
    pub const fn patch_generation(step: &'static str, source: MergePatchError) -> Self {
        Self::PatchGeneration { step, source }
    }

    /// Construct a patch application error for the named step.
    #[must_use]
    pub const fn patch_apply(step: &'static str, source: MergePatchError) -> Self {
        Self::PatchApply { step, source }
    }

    /// Construct a decoding error.
    #[must_use]
    pub const fn decoding(source: serde_json::Error) -> Self {
        Self::Decoding { source }
    }

    /// Wrap the error in an [`Arc`] for use with [`crate::PatchMakerResult`].
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl MergePatchError {
    /// Construct an invalid-document error.
    #[must_use]
    pub const fn invalid(document: &'static str, source: serde_json::Error) -> Self {
        Self::InvalidDocument { document, source }
    }

    /// Construct a not-an-object error.
    #[must_use]
    pub const fn not_an_object(document: &'static str) -> Self {
        Self::NotAnObject { document }
    }
}
