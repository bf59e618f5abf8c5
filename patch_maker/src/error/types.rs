//! Error enums surfaced by patch calculation and the merge-patch primitives.

use std::fmt;

use thiserror::Error;

/// Role a domain object plays in a patch calculation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DocumentRole {
    /// The live object as currently observed.
    Current,
    /// The desired object supplied by the user.
    Modified,
    /// The object as it was last applied.
    Original,
}

impl DocumentRole {
    /// Lower-case name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Modified => "modified",
            Self::Original => "original",
        }
    }
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while computing a patch.
///
/// Every variant names the step that failed. None of them are retryable: the
/// calculation is a pure function of its inputs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatchMakerError {
    /// A domain object could not be serialised to canonical JSON bytes.
    #[error("failed to convert {role} object to byte sequence: {source}")]
    Encoding {
        /// Which input failed to serialise.
        role: DocumentRole,
        /// Underlying codec failure.
        #[source]
        source: serde_json::Error,
    },

    /// A caller-supplied calculate option rejected its input.
    #[error("failed to apply option function #{index}: {source}")]
    Option {
        /// Zero-based position of the option in the pipeline.
        index: usize,
        /// Failure reported by the option.
        #[source]
        source: OptionFailure,
    },

    /// A merge patch could not be generated.
    #[error("failed to {step}: {source}")]
    PatchGeneration {
        /// Human-readable name of the failing step.
        step: &'static str,
        /// Failure reported by the merge patcher.
        #[source]
        source: MergePatchError,
    },

    /// A merge patch could not be applied to a document.
    #[error("failed to {step}: {source}")]
    PatchApply {
        /// Human-readable name of the failing step.
        step: &'static str,
        /// Failure reported by the merge patcher.
        #[source]
        source: MergePatchError,
    },

    /// The patched bytes could not be turned back into the caller's type.
    #[error("failed to create patched object: {source}")]
    Decoding {
        /// Underlying codec failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors reported by [`crate::JsonMergePatcher`] and
/// [`crate::StrategicMergePatcher`] implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergePatchError {
    /// The named document is not valid JSON.
    #[error("{document} document is not valid JSON: {source}")]
    InvalidDocument {
        /// Name of the offending document (`original`, `patch`, ...).
        document: &'static str,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },

    /// The named document must be a JSON object but is not.
    #[error("{document} document must be a JSON object")]
    NotAnObject {
        /// Name of the offending document.
        document: &'static str,
    },

    /// Serialising a computed document failed.
    #[error("failed to serialise {document} document: {source}")]
    Serialise {
        /// Name of the document being written.
        document: &'static str,
        /// Serialiser failure.
        #[source]
        source: serde_json::Error,
    },

    /// The patcher does not implement the requested operation.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

/// Failure raised by a [`crate::CalculateOption`].
///
/// Options may fail with any error type; this newtype boxes it so the
/// pipeline can report failures uniformly.
#[derive(Debug)]
pub struct OptionFailure(Box<dyn std::error::Error + Send + Sync>);

impl OptionFailure {
    /// Wrap an arbitrary error raised by an option.
    #[must_use]
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }

    /// Borrow the wrapped error.
    #[must_use]
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl fmt::Display for OptionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for OptionFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}
