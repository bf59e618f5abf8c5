//! Extension point for strategic (list-merge-key-aware) merge patches.

use crate::MergePatchError;

/// Creates strategic merge patches.
///
/// Strategic patches merge lists by key rather than replacing them. The
/// calculator carries a patcher of this kind but only uses JSON merge
/// patches today.
pub trait StrategicMergePatcher: Send + Sync {
    /// Create the three-way strategic merge patch for the given documents.
    ///
    /// # Errors
    ///
    /// Returns a [`MergePatchError`] when the patch cannot be produced.
    fn create_three_way_merge_patch(
        &self,
        original: &[u8],
        modified: &[u8],
        current: &[u8],
    ) -> Result<Vec<u8>, MergePatchError>;
}

/// Placeholder strategic patcher that rejects every request.
///
/// # Examples
///
/// ```
/// use patch_maker::{MergePatchError, StrategicMergePatcher, UnsupportedStrategicMergePatcher};
///
/// let err = UnsupportedStrategicMergePatcher
///     .create_three_way_merge_patch(b"{}", b"{}", b"{}")
///     .unwrap_err();
/// assert!(matches!(err, MergePatchError::Unsupported(_)));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedStrategicMergePatcher;

impl StrategicMergePatcher for UnsupportedStrategicMergePatcher {
    fn create_three_way_merge_patch(
        &self,
        _original: &[u8],
        _modified: &[u8],
        _current: &[u8],
    ) -> Result<Vec<u8>, MergePatchError> {
        Err(MergePatchError::Unsupported("strategic merge patching"))
    }
}
