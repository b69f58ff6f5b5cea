//! Photo gallery for the photos step.
//!
//! `MediaCollection` keeps an ordered list of entries (the gallery order),
//! a primary ("main photo") reference and the resource handle of every
//! entry. Each handle is released exactly once: when its entry is removed,
//! or when the collection is disposed or dropped.
//!
//! ```rust
//! use listing_wizard::media::{MediaCollection, ObjectUrlRegistry};
//! use listing_wizard::types::media::MediaFile;
//!
//! let mut gallery = MediaCollection::new(ObjectUrlRegistry::new(), 20);
//! let outcome = gallery.add([MediaFile::new("front.jpg", vec![0u8; 4])]);
//! assert_eq!(gallery.primary(), outcome.added.first().copied());
//! gallery.dispose();
//! ```

pub mod drag;
pub mod resource;

use std::fmt;

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};
use crate::types::media::{MediaEntry, MediaFile, MediaId, MediaSnapshot};

pub use drag::DragTransfer;
pub use resource::{HandleLedger, ObjectUrlRegistry, ResourceAllocator};

/// Files turned away because the gallery was full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityNotice {
    pub limit: usize,
    pub rejected: usize,
}

impl fmt::Display for CapacityNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You can upload up to {} photos; {} file(s) were not added",
            self.limit, self.rejected
        )
    }
}

/// Result of [`MediaCollection::add`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Ids of the new entries, in input order.
    pub added: Vec<MediaId>,
    /// Names of the files that did not fit.
    pub rejected: Vec<String>,
    /// Set whenever `rejected` is non-empty.
    pub notice: Option<CapacityNotice>,
}

/// Ordered gallery with a primary entry and owned resource handles.
pub struct MediaCollection<A: ResourceAllocator> {
    entries: Vec<MediaEntry>,
    primary: Option<MediaId>,
    video_link: Option<String>,
    max_media: usize,
    ledger: HandleLedger,
    allocator: A,
}

impl<A: ResourceAllocator> MediaCollection<A> {
    pub fn new(allocator: A, max_media: usize) -> Self {
        Self {
            entries: Vec::new(),
            primary: None,
            video_link: None,
            max_media,
            ledger: HandleLedger::new(),
            allocator,
        }
    }

    /// Append files in input order, up to the capacity limit.
    ///
    /// If the gallery was empty, the first new entry becomes primary.
    pub fn add<I>(&mut self, files: I) -> AddOutcome
    where
        I: IntoIterator<Item = MediaFile>,
    {
        let was_empty = self.entries.is_empty();
        let mut outcome = AddOutcome::default();

        for file in files {
            if self.entries.len() >= self.max_media {
                outcome.rejected.push(file.name);
                continue;
            }

            let handle = self.allocator.allocate(&file);
            let id = MediaId::new();
            self.ledger.register(id);
            let entry = MediaEntry {
                id,
                display_name: file.name,
                size: file.bytes.len(),
                added_at: Utc::now(),
                handle,
            };
            debug!(id = %entry.id, name = %entry.display_name, "media added");
            outcome.added.push(entry.id);
            self.entries.push(entry);
        }

        if was_empty && self.primary.is_none() {
            self.primary = outcome.added.first().copied();
        }

        if !outcome.rejected.is_empty() {
            warn!(
                limit = self.max_media,
                rejected = outcome.rejected.len(),
                "gallery full, files rejected"
            );
            outcome.notice = Some(CapacityNotice {
                limit: self.max_media,
                rejected: outcome.rejected.len(),
            });
        }

        outcome
    }

    /// Remove an entry and release its handle.
    ///
    /// Removing the primary entry promotes the new first entry.
    pub fn remove(&mut self, id: MediaId) -> MediaResult<()> {
        let index = self.index_of(id).ok_or(MediaError::NotFound(id))?;
        let entry = self.entries.remove(index);
        self.ledger.release(&mut self.allocator, entry.id, entry.handle);

        if self.primary == Some(id) {
            self.primary = self.entries.first().map(|e| e.id);
        }
        debug!(%id, primary = ?self.primary, "media removed");
        Ok(())
    }

    /// Move `source` to sit immediately before `target`.
    ///
    /// The other entries keep their relative order. Returns false (and
    /// changes nothing) when either id is missing or both are the same.
    pub fn reorder(&mut self, source: MediaId, target: MediaId) -> bool {
        if source == target || self.index_of(target).is_none() {
            return false;
        }
        let Some(from) = self.index_of(source) else {
            return false;
        };

        let moved = self.entries.remove(from);
        let to = self.index_of(target).unwrap_or(self.entries.len());
        self.entries.insert(to, moved);
        debug!(%source, %target, from, to, "media reordered");
        true
    }

    pub fn set_primary(&mut self, id: MediaId) -> MediaResult<()> {
        if self.index_of(id).is_none() {
            return Err(MediaError::NotFound(id));
        }
        self.primary = Some(id);
        Ok(())
    }

    /// Start dragging an entry. `None` if the id is not in the gallery.
    pub fn begin_drag(&self, id: MediaId) -> Option<DragTransfer> {
        self.index_of(id).map(|_| DragTransfer::new(id))
    }

    /// Finish a drag gesture on `target`.
    pub fn drop_on(&mut self, transfer: DragTransfer, target: MediaId) -> bool {
        self.reorder(transfer.source(), target)
    }

    pub fn set_video_link(&mut self, link: Option<String>) {
        self.video_link = link.filter(|l| !l.trim().is_empty());
    }

    pub fn video_link(&self) -> Option<&str> {
        self.video_link.as_deref()
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn get(&self, id: MediaId) -> Option<&MediaEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn ids(&self) -> Vec<MediaId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn primary(&self) -> Option<MediaId> {
        self.primary
    }

    pub fn primary_entry(&self) -> Option<&MediaEntry> {
        self.primary.and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_media
    }

    pub fn remaining(&self) -> usize {
        self.max_media.saturating_sub(self.entries.len())
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Gallery order, primary and video link as the photos step sees them.
    pub fn snapshot(&self) -> MediaSnapshot {
        MediaSnapshot {
            order: self.ids(),
            primary: self.primary,
            video_link: self.video_link.clone(),
        }
    }

    /// Release every handle still owned and consume the collection.
    ///
    /// Returns how many handles were released.
    pub fn dispose(mut self) -> usize {
        self.release_all()
    }

    fn release_all(&mut self) -> usize {
        let mut released = 0;
        for entry in self.entries.drain(..) {
            if self.ledger.release(&mut self.allocator, entry.id, entry.handle) {
                released += 1;
            }
        }
        self.primary = None;
        if released > 0 {
            debug!(released, "media collection torn down");
        }
        released
    }

    fn index_of(&self, id: MediaId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

impl<A: ResourceAllocator> Drop for MediaCollection<A> {
    fn drop(&mut self) {
        self.release_all();
    }
}

impl<A: ResourceAllocator> fmt::Debug for MediaCollection<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaCollection")
            .field("entries", &self.entries)
            .field("primary", &self.primary)
            .field("video_link", &self.video_link)
            .field("max_media", &self.max_media)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{AllocationLog, RecordingAllocator};
    use crate::types::media::ResourceHandle;
    use proptest::prelude::*;

    fn files(names: &[&str]) -> Vec<MediaFile> {
        names
            .iter()
            .map(|n| MediaFile::new(*n, n.as_bytes().to_vec()))
            .collect()
    }

    fn gallery(max: usize) -> (MediaCollection<RecordingAllocator>, AllocationLog) {
        let allocator = RecordingAllocator::new();
        let log = allocator.log();
        (MediaCollection::new(allocator, max), log)
    }

    #[test]
    fn add_to_empty_keeps_order_and_picks_first_as_primary() {
        let (mut g, _) = gallery(20);
        let outcome = g.add(files(&["f1.jpg", "f2.jpg"]));

        assert_eq!(outcome.added.len(), 2);
        assert_eq!(g.ids(), outcome.added);
        assert_eq!(g.primary(), Some(outcome.added[0]));
        assert_eq!(g.primary_entry().map(|e| e.display_name.as_str()), Some("f1.jpg"));
        assert!(outcome.notice.is_none());
    }

    #[test]
    fn later_adds_keep_existing_primary() {
        let (mut g, _) = gallery(20);
        let first = g.add(files(&["a.jpg"])).added[0];
        g.add(files(&["b.jpg", "c.jpg"]));
        assert_eq!(g.primary(), Some(first));
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn removing_primary_promotes_new_first() {
        let (mut g, log) = gallery(20);
        let ids = g.add(files(&["a", "b", "c"])).added;

        g.remove(ids[0]).unwrap();
        assert_eq!(g.primary(), Some(ids[1]));
        assert_eq!(g.ids(), vec![ids[1], ids[2]]);
        assert_eq!(log.released(), 1);
    }

    #[test]
    fn removing_last_entry_clears_primary() {
        let (mut g, _) = gallery(20);
        let id = g.add(files(&["a"])).added[0];
        g.remove(id).unwrap();
        assert_eq!(g.primary(), None);
        assert!(g.is_empty());
    }

    #[test]
    fn removing_non_primary_keeps_primary() {
        let (mut g, _) = gallery(20);
        let ids = g.add(files(&["a", "b", "c"])).added;
        g.set_primary(ids[2]).unwrap();
        g.remove(ids[1]).unwrap();
        assert_eq!(g.primary(), Some(ids[2]));
    }

    #[test]
    fn remove_unknown_id_reports_not_found() {
        let (mut g, log) = gallery(20);
        g.add(files(&["a"]));
        let missing = MediaId::new();
        assert_eq!(g.remove(missing), Err(MediaError::NotFound(missing)));
        assert_eq!(g.len(), 1);
        assert_eq!(log.released(), 0);
    }

    #[test]
    fn reorder_moves_source_before_target() {
        let (mut g, _) = gallery(20);
        let ids = g.add(files(&["a", "b", "c"])).added;
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        assert!(g.reorder(a, c));
        assert_eq!(g.ids(), vec![b, a, c]);

        assert!(g.reorder(c, b));
        assert_eq!(g.ids(), vec![c, b, a]);
    }

    #[test]
    fn reorder_ignores_missing_or_equal_ids() {
        let (mut g, _) = gallery(20);
        let ids = g.add(files(&["a", "b"])).added;

        assert!(!g.reorder(ids[0], ids[0]));
        assert!(!g.reorder(ids[0], MediaId::new()));
        assert!(!g.reorder(MediaId::new(), ids[1]));
        assert_eq!(g.ids(), ids);
    }

    #[test]
    fn set_primary_requires_member() {
        let (mut g, _) = gallery(20);
        let ids = g.add(files(&["a", "b"])).added;
        g.set_primary(ids[1]).unwrap();
        assert_eq!(g.primary(), Some(ids[1]));

        let missing = MediaId::new();
        assert_eq!(g.set_primary(missing), Err(MediaError::NotFound(missing)));
        assert_eq!(g.primary(), Some(ids[1]));
    }

    #[test]
    fn capacity_rejects_excess_with_notice() {
        let (mut g, log) = gallery(3);
        g.add(files(&["a", "b"]));
        let outcome = g.add(files(&["c", "d", "e"]));

        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.rejected, vec!["d".to_string(), "e".to_string()]);
        assert_eq!(outcome.notice, Some(CapacityNotice { limit: 3, rejected: 2 }));
        assert_eq!(g.len(), 3);
        assert_eq!(g.remaining(), 0);
        assert_eq!(log.allocated(), 3);
    }

    #[test]
    fn drag_transfer_reorders_on_drop() {
        let (mut g, _) = gallery(20);
        let ids = g.add(files(&["a", "b", "c"])).added;

        let transfer = g.begin_drag(ids[2]).unwrap();
        assert_eq!(transfer.source(), ids[2]);
        assert!(g.drop_on(transfer, ids[0]));
        assert_eq!(g.ids(), vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn abandoned_drag_changes_nothing() {
        let (mut g, _) = gallery(20);
        let ids = g.add(files(&["a", "b"])).added;
        let transfer = g.begin_drag(ids[0]);
        drop(transfer);
        assert_eq!(g.ids(), ids);
        assert!(g.begin_drag(MediaId::new()).is_none());
    }

    #[test]
    fn dispose_releases_only_remaining_handles() {
        let (mut g, log) = gallery(20);
        let ids = g.add(files(&["a", "b", "c"])).added;
        g.remove(ids[1]).unwrap();

        assert_eq!(g.dispose(), 2);
        assert_eq!(log.allocated(), 3);
        assert_eq!(log.released(), 3);
        assert!(log.double_releases().is_empty());
    }

    /// Hands out `blob:<file name>`, so equal names share a URL.
    #[derive(Default)]
    struct NamedUrls {
        released: std::rc::Rc<std::cell::RefCell<Vec<String>>>,
    }

    impl ResourceAllocator for NamedUrls {
        fn allocate(&mut self, file: &MediaFile) -> ResourceHandle {
            ResourceHandle::new(format!("blob:{}", file.name))
        }

        fn release(&mut self, handle: ResourceHandle) {
            self.released.borrow_mut().push(handle.as_str().to_string());
        }
    }

    #[test]
    fn equal_urls_are_released_once_per_entry() {
        let allocator = NamedUrls::default();
        let released = allocator.released.clone();
        let mut g = MediaCollection::new(allocator, 20);
        let ids = g.add(files(&["same.jpg", "same.jpg", "same.jpg"])).added;

        g.remove(ids[1]).unwrap();
        assert_eq!(released.borrow().len(), 1);

        assert_eq!(g.dispose(), 2);
        assert_eq!(*released.borrow(), vec!["blob:same.jpg"; 3]);
    }

    #[test]
    fn drop_releases_handles() {
        let (mut g, log) = gallery(20);
        g.add(files(&["a", "b"]));
        drop(g);
        assert_eq!(log.released(), 2);
    }

    #[test]
    fn snapshot_reflects_gallery() {
        let (mut g, _) = gallery(20);
        let ids = g.add(files(&["a", "b"])).added;
        g.set_video_link(Some("https://youtu.be/x".into()));
        let snap = g.snapshot();
        assert_eq!(snap.order, ids);
        assert_eq!(snap.primary, Some(ids[0]));
        assert_eq!(snap.video_link.as_deref(), Some("https://youtu.be/x"));
    }

    #[test]
    fn registry_backed_entries_resolve_to_bytes() {
        let mut g = MediaCollection::new(ObjectUrlRegistry::new(), 5);
        let id = g.add([MediaFile::new("x.png", vec![9, 9])]).added[0];
        let src = g.get(id).unwrap().src().to_string();
        assert_eq!(g.allocator().resolve(&src), Some(&[9u8, 9][..]));
        g.remove(id).unwrap();
        assert_eq!(g.allocator().resolve(&src), None);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Remove(usize),
        Reorder(usize, usize),
        SetPrimary(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1usize..4).prop_map(Op::Add),
            (0usize..8).prop_map(Op::Remove),
            (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Reorder(a, b)),
            (0usize..8).prop_map(Op::SetPrimary),
        ]
    }

    proptest! {
        #[test]
        fn every_allocation_is_released_exactly_once(ops in prop::collection::vec(op(), 0..40)) {
            let (mut g, log) = gallery(6);
            let pick = |g: &MediaCollection<RecordingAllocator>, i: usize| {
                let ids = g.ids();
                if ids.is_empty() { MediaId::new() } else { ids[i % ids.len()] }
            };

            for op in ops {
                match op {
                    Op::Add(n) => {
                        let names: Vec<String> = (0..n).map(|i| format!("{i}.jpg")).collect();
                        g.add(names.into_iter().map(|n| MediaFile::new(n, vec![1])));
                    }
                    Op::Remove(i) => {
                        let id = pick(&g, i);
                        let _ = g.remove(id);
                    }
                    Op::Reorder(a, b) => {
                        let (a, b) = (pick(&g, a), pick(&g, b));
                        g.reorder(a, b);
                    }
                    Op::SetPrimary(i) => {
                        let id = pick(&g, i);
                        let _ = g.set_primary(id);
                    }
                }

                // primary always points into the gallery
                match g.primary() {
                    Some(p) => prop_assert!(g.get(p).is_some()),
                    None => prop_assert!(g.is_empty()),
                }
                prop_assert!(g.len() <= 6);
            }

            g.dispose();
            prop_assert_eq!(log.allocated(), log.released());
            prop_assert!(log.double_releases().is_empty());
        }
    }
}
