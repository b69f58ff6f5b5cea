//! Testing utilities: recording collaborators for the wizard.
//!
//! These let tests (and embedders' tests) observe what the wizard asked of
//! its collaborators without a real browser or router.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::media::ResourceAllocator;
use crate::types::draft::Draft;
use crate::types::media::{MediaFile, ResourceHandle};
use crate::wizard::Navigator;

#[derive(Debug, Default)]
struct AllocationState {
    allocated: Vec<String>,
    releases: HashMap<String, usize>,
}

/// Shared view of a [`RecordingAllocator`]'s calls.
///
/// Stays readable after the allocator (and its collection) is gone.
#[derive(Debug, Clone, Default)]
pub struct AllocationLog {
    state: Arc<Mutex<AllocationState>>,
}

impl AllocationLog {
    pub fn allocated(&self) -> usize {
        self.lock().allocated.len()
    }

    /// Total release calls, including any repeated ones.
    pub fn released(&self) -> usize {
        self.lock().releases.values().sum()
    }

    /// Handles allocated and not yet released.
    pub fn live(&self) -> Vec<String> {
        let state = self.lock();
        state
            .allocated
            .iter()
            .filter(|h| !state.releases.contains_key(*h))
            .cloned()
            .collect()
    }

    /// Handles released more than once, or never allocated.
    pub fn double_releases(&self) -> Vec<String> {
        let state = self.lock();
        state
            .releases
            .iter()
            .filter(|(h, n)| **n > 1 || !state.allocated.contains(h))
            .map(|(h, _)| h.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AllocationState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Allocator that records every allocate and release call.
#[derive(Debug, Default)]
pub struct RecordingAllocator {
    log: AllocationLog,
}

impl RecordingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> AllocationLog {
        self.log.clone()
    }
}

impl ResourceAllocator for RecordingAllocator {
    fn allocate(&mut self, _file: &MediaFile) -> ResourceHandle {
        let url = format!("blob:test-{}", Uuid::new_v4());
        self.log.lock().allocated.push(url.clone());
        ResourceHandle::new(url)
    }

    fn release(&mut self, handle: ResourceHandle) {
        *self
            .log
            .lock()
            .releases
            .entry(handle.as_str().to_string())
            .or_insert(0) += 1;
    }
}

/// Record of a call made to a [`RecordingNavigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    AdvanceTo(String),
    ReturnTo(String),
    Complete { steps: usize },
}

/// Navigator that records instructions instead of routing.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    events: Vec<NavigationEvent>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events.clone()
    }
}

impl Navigator for RecordingNavigator {
    fn advance_to(&mut self, path: &str) {
        self.events.push(NavigationEvent::AdvanceTo(path.to_string()));
    }

    fn return_to(&mut self, path: &str) {
        self.events.push(NavigationEvent::ReturnTo(path.to_string()));
    }

    fn complete(&mut self, draft: &Draft) {
        self.events.push(NavigationEvent::Complete {
            steps: draft.completed_steps().count(),
        });
    }
}
