//! Object-URL style resource handles and their release tracking.
//!
//! Handles are allocated by a [`ResourceAllocator`] and must be released
//! exactly once. The gallery registers every entry that owns a handle in a
//! [`HandleLedger`]; only handles of entries still registered are ever
//! passed back to the allocator.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::types::media::{MediaFile, MediaId, ResourceHandle};

/// Allocates and releases session-scoped handles to binary media.
pub trait ResourceAllocator {
    /// Bind a new handle to the file's bytes.
    fn allocate(&mut self, file: &MediaFile) -> ResourceHandle;

    /// Release a handle. Called at most once per allocated handle.
    fn release(&mut self, handle: ResourceHandle);
}

impl<A: ResourceAllocator + ?Sized> ResourceAllocator for Box<A> {
    fn allocate(&mut self, file: &MediaFile) -> ResourceHandle {
        (**self).allocate(file)
    }

    fn release(&mut self, handle: ResourceHandle) {
        (**self).release(handle)
    }
}

/// In-memory blob registry handing out `blob:<uuid>` URLs.
///
/// Keeps the bytes of every live handle so renderers can resolve them.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    blobs: HashMap<String, Vec<u8>>,
    allocated: usize,
    released: usize,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes behind a live handle.
    pub fn resolve(&self, url: &str) -> Option<&[u8]> {
        self.blobs.get(url).map(Vec::as_slice)
    }

    pub fn live(&self) -> usize {
        self.blobs.len()
    }

    pub fn allocated(&self) -> usize {
        self.allocated
    }

    pub fn released(&self) -> usize {
        self.released
    }
}

impl ResourceAllocator for ObjectUrlRegistry {
    fn allocate(&mut self, file: &MediaFile) -> ResourceHandle {
        let url = format!("blob:{}", Uuid::new_v4());
        self.blobs.insert(url.clone(), file.bytes.clone());
        self.allocated += 1;
        ResourceHandle::new(url)
    }

    fn release(&mut self, handle: ResourceHandle) {
        if self.blobs.remove(handle.as_str()).is_some() {
            self.released += 1;
        } else {
            warn!(url = %handle, "release of unknown object URL");
        }
    }
}

/// Entries whose handle is still owned by a collection.
///
/// Keyed by entry id rather than by handle value: an allocator is free to
/// hand out the same URL twice, and each allocation still needs its own
/// release.
#[derive(Debug, Default)]
pub struct HandleLedger {
    live: HashSet<MediaId>,
}

impl HandleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `id` owns a freshly allocated handle.
    ///
    /// Returns false if the id was already registered.
    pub fn register(&mut self, id: MediaId) -> bool {
        self.live.insert(id)
    }

    /// Release the handle owned by `id` through `allocator`.
    ///
    /// Returns false (and releases nothing) when `id` no longer owns one.
    pub fn release<A: ResourceAllocator + ?Sized>(
        &mut self,
        allocator: &mut A,
        id: MediaId,
        handle: ResourceHandle,
    ) -> bool {
        if !self.live.remove(&id) {
            return false;
        }
        debug!(%id, url = %handle, "releasing media handle");
        allocator.release(handle);
        true
    }

    pub fn contains(&self, id: MediaId) -> bool {
        self.live.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
