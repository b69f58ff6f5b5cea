//! Typed errors for the listing wizard.
//!
//! Library code returns `thiserror` enums; only the demo binary and
//! environment loading reach for `anyhow`. Validation failures are not
//! errors in this sense: they come back as [`crate::validation::FieldErrors`]
//! and are shown next to the offending field.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::media::MediaId;

/// Top-level error for wizard operations that can fail outright.
#[derive(Debug, Error)]
pub enum WizardError {
    /// Draft or preference storage failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Media collection lookup failed
    #[error("media error: {0}")]
    Media(#[from] MediaError),

    /// A step identifier did not name a known step
    #[error("unknown step: {0}")]
    UnknownStep(String),

    /// A wizard needs at least one step
    #[error("wizard has no steps")]
    NoSteps,

    /// A language code outside the supported set
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Translation table could not be parsed
    #[error("invalid translation table for {lang}: {source}")]
    TranslationTable {
        lang: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures of the client-side key/value store.
///
/// These are environment failures (disabled storage, quota exhausted,
/// unwritable directory). Callers persisting a draft log and swallow them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the value would exceed the store's quota
    #[error("quota exceeded writing {key}: {needed} bytes, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    /// Storage has been disabled by the environment
    #[error("storage unavailable")]
    Unavailable,

    /// Value could not be serialized
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Lookup failures in the media collection.
///
/// Callers that follow the "absent id is a no-op" rule simply ignore these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MediaError {
    #[error("media entry not found: {0}")]
    NotFound(MediaId),
}

/// Result type alias for wizard operations.
pub type Result<T> = std::result::Result<T, WizardError>;

/// Result type alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Result type alias for media operations.
pub type MediaResult<T> = std::result::Result<T, MediaError>;
