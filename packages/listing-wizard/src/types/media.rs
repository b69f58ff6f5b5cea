//! Media data types shared by the gallery and the step payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::Id;

/// Identifier of a gallery entry, stable for the entry's lifetime.
pub type MediaId = Id<MediaEntry>;

/// A file handed over by the file input or a drop event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Original filename, used as the entry's display name.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Session-scoped reference to binary media data (an object URL).
///
/// Not `Clone`: a handle has exactly one owner, and releasing it consumes it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ResourceHandle(String);

impl ResourceHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One photo in the gallery.
#[derive(Debug)]
pub struct MediaEntry {
    pub id: MediaId,
    pub display_name: String,
    pub size: usize,
    pub added_at: DateTime<Utc>,
    pub(crate) handle: ResourceHandle,
}

impl MediaEntry {
    /// The object URL to render this entry with.
    pub fn src(&self) -> &str {
        self.handle.as_str()
    }
}

/// Ordering and cover selection of a gallery at one instant.
///
/// Snapshots are what the validator sees of the photos step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSnapshot {
    pub order: Vec<MediaId>,
    pub primary: Option<MediaId>,
    pub video_link: Option<String>,
}
