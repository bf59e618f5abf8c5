//! Three-way patch calculation with self-verification.
//!
//! [`PatchMaker::calculate`] serialises the three inputs, runs the calculate
//! options over the current and modified documents, and computes a three-way
//! merge patch. A non-empty patch is then verified: it is applied to the
//! transformed current document and re-diffed, which drops entries that turn
//! out to be no-ops, and the re-diffed patch is applied to the untouched
//! current document so masked fields survive into the patched object.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use crate::codec::{self, EMPTY_OBJECT};
use crate::result_ext::{EncodingResultExt, MergePatchResultExt, OptionResultExt};
use crate::{
    BaseJsonMergePatcher, CalculateOption, DocumentRole, JsonMergePatcher, PatchMakerResult,
    PatchResult, StrategicMergePatcher, UnsupportedStrategicMergePatcher,
};

/// Computes patches between original, modified, and current objects.
pub trait Maker {
    /// Calculate the patch that moves `current` towards `modified`, given
    /// that `original` was the last state applied.
    ///
    /// `options` run in order over the serialised current and modified
    /// documents before diffing. The patched object in the result has the
    /// same type as `current`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::PatchMakerError`] naming the failed step when an
    /// input cannot be serialised, an option fails, a patch cannot be
    /// generated or applied, or the patched document does not deserialise
    /// into `T`.
    fn calculate<T, M, O>(
        &self,
        current: &T,
        modified: &M,
        original: &O,
        options: &[&dyn CalculateOption],
    ) -> PatchMakerResult<PatchResult<T>>
    where
        T: Serialize + DeserializeOwned,
        M: Serialize + ?Sized,
        O: Serialize + ?Sized;
}

/// The default [`Maker`], backed by a JSON merge patcher.
///
/// Cloning is cheap; the collaborators are shared.
///
/// # Examples
///
/// ```
/// use patch_maker::{Maker, PatchMaker};
/// use serde_json::json;
///
/// let maker = PatchMaker::default();
/// let result = maker.calculate(
///     &json!({"a": 1, "b": 9}),
///     &json!({"a": 2, "b": 1}),
///     &json!({"a": 1, "b": 1}),
///     &[],
/// )?;
/// assert_eq!(result.patch(), br#"{"a":2}"#);
/// assert_eq!(result.patched(), &json!({"a": 2, "b": 9}));
/// # Ok::<_, std::sync::Arc<patch_maker::PatchMakerError>>(())
/// ```
#[derive(Clone)]
pub struct PatchMaker {
    strategic_merge_patcher: Arc<dyn StrategicMergePatcher>,
    json_merge_patcher: Arc<dyn JsonMergePatcher>,
}

impl PatchMaker {
    /// Build a maker from its two collaborators.
    #[must_use]
    pub const fn new(
        strategic_merge_patcher: Arc<dyn StrategicMergePatcher>,
        json_merge_patcher: Arc<dyn JsonMergePatcher>,
    ) -> Self {
        Self {
            strategic_merge_patcher,
            json_merge_patcher,
        }
    }

    /// The strategic merge patcher slot.
    #[must_use]
    pub fn strategic_merge_patcher(&self) -> &dyn StrategicMergePatcher {
        self.strategic_merge_patcher.as_ref()
    }

    /// The JSON merge patcher used for calculation.
    #[must_use]
    pub fn json_merge_patcher(&self) -> &dyn JsonMergePatcher {
        self.json_merge_patcher.as_ref()
    }

    /// Compute the verified three-way patch and the patched current document.
    fn json_merge_patch(
        &self,
        original: &[u8],
        modified: &[u8],
        current: &[u8],
        pristine_current: Vec<u8>,
    ) -> PatchMakerResult<(Vec<u8>, Vec<u8>)> {
        let patcher = self.json_merge_patcher();
        let patch = patcher
            .create_three_way_json_merge_patch(original, modified, current)
            .generating("generate three-way merge patch")?;
        trace!(patch = %String::from_utf8_lossy(&patch), "three-way merge patch");

        if patch == EMPTY_OBJECT {
            debug!("three-way merge patch is empty, keeping current object");
            return Ok((patch, pristine_current));
        }

        let patched = patcher
            .merge_patch(current, &patch)
            .applying("merge generated patch into current object")?;
        let verified = patcher
            .create_merge_patch(current, &patched)
            .generating("create patch between current and patched current object")?;
        let patched_current = patcher
            .merge_patch(&pristine_current, &verified)
            .applying("apply verified patch to unmodified current object")?;
        debug!(
            empty = verified == EMPTY_OBJECT,
            patch = %String::from_utf8_lossy(&verified),
            "verified merge patch"
        );
        Ok((verified, patched_current))
    }
}

impl Default for PatchMaker {
    fn default() -> Self {
        Self::new(
            Arc::new(UnsupportedStrategicMergePatcher),
            Arc::new(BaseJsonMergePatcher),
        )
    }
}

impl fmt::Debug for PatchMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchMaker")
            .field("strategic_merge_patcher", &"<dyn StrategicMergePatcher>")
            .field("json_merge_patcher", &"<dyn JsonMergePatcher>")
            .finish()
    }
}

impl Maker for PatchMaker {
    fn calculate<T, M, O>(
        &self,
        current: &T,
        modified: &M,
        original: &O,
        options: &[&dyn CalculateOption],
    ) -> PatchMakerResult<PatchResult<T>>
    where
        T: Serialize + DeserializeOwned,
        M: Serialize + ?Sized,
        O: Serialize + ?Sized,
    {
        let mut current_bytes = codec::marshal(current).into_encoding(DocumentRole::Current)?;
        let pristine_current = current_bytes.clone();
        let mut modified_bytes = codec::marshal(modified).into_encoding(DocumentRole::Modified)?;

        for (index, option) in options.iter().enumerate() {
            (current_bytes, modified_bytes) = option
                .apply(current_bytes, modified_bytes)
                .at_option(index)?;
        }
        debug!(options = options.len(), "applied calculate options");

        let original_bytes = codec::marshal(original).into_encoding(DocumentRole::Original)?;

        let (patch, patched_current) = self.json_merge_patch(
            &original_bytes,
            &modified_bytes,
            &current_bytes,
            pristine_current,
        )?;

        let patched = codec::unmarshal::<T>(&patched_current).into_decoding()?;

        Ok(PatchResult::new(
            patch,
            current_bytes,
            modified_bytes,
            original_bytes,
            patched,
        ))
    }
}

/// Build a [`PatchMaker`] with the default collaborators.
#[must_use]
pub fn default_patch_maker() -> PatchMaker {
    PatchMaker::default()
}
