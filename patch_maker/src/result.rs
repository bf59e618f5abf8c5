//! The immutable outcome of a patch calculation.

use std::fmt;

use serde_json::Value;

use crate::codec::EMPTY_OBJECT;

/// Patch produced by [`crate::Maker::calculate`] together with the documents
/// it was computed from and the materialised patched object.
///
/// `current` and `modified` hold the documents after calculate options ran;
/// `original` is never transformed. `patched` is always a fresh `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchResult<T> {
    patch: Vec<u8>,
    current: Vec<u8>,
    modified: Vec<u8>,
    original: Vec<u8>,
    patched: T,
}

impl<T> PatchResult<T> {
    pub(crate) const fn new(
        patch: Vec<u8>,
        current: Vec<u8>,
        modified: Vec<u8>,
        original: Vec<u8>,
        patched: T,
    ) -> Self {
        Self {
            patch,
            current,
            modified,
            original,
            patched,
        }
    }

    /// Returns `true` when the patch is the canonical empty patch `{}`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patch == EMPTY_OBJECT
    }

    /// The merge patch to send to the live system.
    #[must_use]
    pub fn patch(&self) -> &[u8] {
        &self.patch
    }

    /// The current document after calculate options ran.
    #[must_use]
    pub fn current(&self) -> &[u8] {
        &self.current
    }

    /// The modified document after calculate options ran.
    #[must_use]
    pub fn modified(&self) -> &[u8] {
        &self.modified
    }

    /// The original document.
    #[must_use]
    pub fn original(&self) -> &[u8] {
        &self.original
    }

    /// The current object with the patch applied.
    #[must_use]
    pub const fn patched(&self) -> &T {
        &self.patched
    }

    /// Consume the result, returning the patched object.
    #[must_use]
    pub fn into_patched(self) -> T {
        self.patched
    }

    /// Parse the patch into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns the parser error if the patch bytes are not valid JSON, which
    /// only happens with a misbehaving [`crate::JsonMergePatcher`].
    pub fn patch_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.patch)
    }
}

impl<T> fmt::Display for PatchResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Patch: {} ", String::from_utf8_lossy(&self.patch))?;
        writeln!(f, "Current: {}", String::from_utf8_lossy(&self.current))?;
        writeln!(f, "Modified: {}", String::from_utf8_lossy(&self.modified))?;
        writeln!(f, "Original: {}", String::from_utf8_lossy(&self.original))
    }
}
