//! The cross-step draft and its best-effort persistence.

use tracing::{debug, warn};

use crate::store::KeyValueStore;
use crate::types::config::WizardConfig;
use crate::types::draft::{Draft, StepId, StepPayload};
use crate::types::listing::BasicInfo;

/// What happened to the persisted copy after [`DraftStore::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The basic-info payload was written.
    Persisted,
    /// Nothing to persist for this step (session-local payload).
    Skipped,
    /// The write failed; the in-memory draft is still updated.
    Failed,
}

/// Owns the draft of one wizard session.
///
/// Only the basic-info payload is persisted. Photo data lives in the
/// session's media collection and never survives a reload.
#[derive(Debug)]
pub struct DraftStore<S: KeyValueStore> {
    store: S,
    key: String,
    draft: Draft,
}

impl<S: KeyValueStore> DraftStore<S> {
    /// Restore the draft persisted in `store`.
    ///
    /// A missing, unreadable or corrupt value yields an empty draft.
    pub fn load(store: S, config: &WizardConfig) -> Self {
        let key = config.storage_key.clone();
        let mut draft = Draft::new();

        match store.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<BasicInfo>(&raw) {
                Ok(info) if info.is_consistent() => {
                    debug!(key = %key, "restored persisted basic info");
                    draft.replace(StepPayload::BasicInfo(info));
                }
                Ok(_) => warn!(key = %key, "persisted basic info is inconsistent, starting empty"),
                Err(e) => warn!(key = %key, error = %e, "persisted draft is corrupt, starting empty"),
            },
            Ok(None) => debug!(key = %key, "no persisted draft"),
            Err(e) => warn!(key = %key, error = %e, "could not read persisted draft"),
        }

        Self { store, key, draft }
    }

    /// Replace the payload for its step, then try to persist.
    ///
    /// Storage failures are logged and swallowed; they never undo the
    /// in-memory update.
    pub fn apply(&mut self, payload: StepPayload) -> PersistOutcome {
        let step = payload.step();
        self.draft.replace(payload);
        debug!(%step, "draft step applied");

        if step != StepId::BasicInfo {
            return PersistOutcome::Skipped;
        }
        self.persist()
    }

    pub fn get(&self, step: StepId) -> Option<&StepPayload> {
        self.draft.get(step)
    }

    pub fn basic_info(&self) -> Option<&BasicInfo> {
        self.draft.basic_info()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Drop the draft and its persisted copy (after a finished listing).
    pub fn clear(&mut self) {
        self.draft = Draft::new();
        if let Err(e) = self.store.remove(&self.key) {
            warn!(key = %self.key, error = %e, "could not remove persisted draft");
        }
    }

    pub fn into_draft(self) -> Draft {
        self.draft
    }

    fn persist(&self) -> PersistOutcome {
        let Some(info) = self.draft.basic_info() else {
            return PersistOutcome::Skipped;
        };

        let json = match serde_json::to_string(info) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not serialize draft");
                return PersistOutcome::Failed;
            }
        };

        match self.store.set(&self.key, &json) {
            Ok(()) => PersistOutcome::Persisted,
            Err(e) => {
                warn!(key = %self.key, error = %e, "draft not persisted");
                PersistOutcome::Failed
            }
        }
    }
}
