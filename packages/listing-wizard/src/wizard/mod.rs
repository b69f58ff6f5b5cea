//! The listing wizard: sequencing, validation gating and draft updates.
//!
//! ```text
//! form input ──► FieldValidator ──ok──► DraftStore.apply ──► WizardMachine.decide
//!                     │                                            │
//!                     └─err──► Rejected(errors)                    ▼
//!                                                             Navigator
//! ```
//!
//! One controller is built per wizard session and owns that session's
//! draft, gallery and navigator. There is no shared global draft.

pub mod machine;

use tracing::{debug, info};

use crate::error::Result;
use crate::media::{MediaCollection, ResourceAllocator};
use crate::store::{DraftStore, KeyValueStore};
use crate::types::config::WizardConfig;
use crate::types::draft::{Draft, StepId, StepPayload};
use crate::validation::{FieldErrors, FieldValidator, RawInput};

pub use machine::{default_steps, NavigationCommand, StepDefinition, WizardEvent, WizardMachine};

/// Receives navigation instructions. Paths are opaque to the wizard.
pub trait Navigator {
    fn advance_to(&mut self, path: &str);
    fn return_to(&mut self, path: &str);
    /// The final step validated; `draft` is the finished listing.
    fn complete(&mut self, draft: &Draft);
}

/// Result of [`WizardController::submit_step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Advanced { from: StepId, to: StepId },
    Completed,
    /// Validation failed; the wizard stays on the step.
    Rejected(FieldErrors),
}

pub struct WizardController<S, A, N>
where
    S: KeyValueStore,
    A: ResourceAllocator,
    N: Navigator,
{
    machine: WizardMachine,
    validator: FieldValidator,
    drafts: DraftStore<S>,
    media: MediaCollection<A>,
    navigator: N,
}

impl<S, A, N> WizardController<S, A, N>
where
    S: KeyValueStore,
    A: ResourceAllocator,
    N: Navigator,
{
    /// Controller over the standard four steps, starting at step 1.
    pub fn new(config: &WizardConfig, drafts: DraftStore<S>, allocator: A, navigator: N) -> Self {
        Self::with_machine(config, WizardMachine::new(), drafts, allocator, navigator)
    }

    /// Controller over custom steps.
    pub fn with_steps(
        config: &WizardConfig,
        steps: Vec<StepDefinition>,
        drafts: DraftStore<S>,
        allocator: A,
        navigator: N,
    ) -> Result<Self> {
        let machine = WizardMachine::with_steps(steps)?;
        Ok(Self::with_machine(config, machine, drafts, allocator, navigator))
    }

    fn with_machine(
        config: &WizardConfig,
        machine: WizardMachine,
        drafts: DraftStore<S>,
        allocator: A,
        navigator: N,
    ) -> Self {
        Self {
            machine,
            validator: FieldValidator::new(config),
            drafts,
            media: MediaCollection::new(allocator, config.max_media),
            navigator,
        }
    }

    /// Validate the current step and, on success, store it and move on.
    pub fn submit_step(&mut self, mut raw: RawInput) -> SubmitOutcome {
        let step = self.machine.current_step().id;
        if step == StepId::Photos {
            raw.set_media(self.media.snapshot());
        }

        let payload = match self.validator.validate(step, &raw) {
            Ok(payload) => payload,
            Err(errors) => {
                debug!(%step, errors = errors.len(), "step rejected");
                return SubmitOutcome::Rejected(errors);
            }
        };

        if let StepPayload::Photos(photos) = &payload {
            self.media.set_video_link(photos.video_link.clone());
        }
        self.drafts.apply(payload);

        let command = self.machine.decide(&WizardEvent::StepValidated);
        let outcome = match &command {
            Some(NavigationCommand::AdvanceTo { step: to, .. }) => SubmitOutcome::Advanced {
                from: step,
                to: *to,
            },
            _ => SubmitOutcome::Completed,
        };
        if let Some(command) = command {
            self.execute(command);
        }
        outcome
    }

    /// Step back one page. Never validates and never touches the draft.
    ///
    /// Returns false on the first step.
    pub fn go_back(&mut self) -> bool {
        match self.machine.decide(&WizardEvent::BackRequested) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    /// Errors for one field of the current step (validate on blur).
    pub fn validate_field(&self, field: &str, raw: &RawInput) -> FieldErrors {
        let step = self.machine.current_step().id;
        if step == StepId::Photos && raw.media().is_none() {
            let raw = raw.clone().with_media(self.media.snapshot());
            return self.validator.validate_field(step, field, &raw);
        }
        self.validator.validate_field(step, field, raw)
    }

    fn execute(&mut self, command: NavigationCommand) {
        match command {
            NavigationCommand::AdvanceTo { step, path } => {
                debug!(to = %step, path, "advancing");
                self.navigator.advance_to(path);
            }
            NavigationCommand::ReturnTo { step, path } => {
                debug!(to = %step, path, "returning");
                self.navigator.return_to(path);
            }
            NavigationCommand::Complete => {
                info!(
                    steps = self.drafts.draft().completed_steps().count(),
                    photos = self.media.len(),
                    "listing wizard complete"
                );
                self.navigator.complete(self.drafts.draft());
            }
        }
    }

    pub fn current_step(&self) -> &StepDefinition {
        self.machine.current_step()
    }

    pub fn current_index(&self) -> usize {
        self.machine.current_index()
    }

    pub fn steps(&self) -> &[StepDefinition] {
        self.machine.steps()
    }

    pub fn step_count(&self) -> usize {
        self.machine.step_count()
    }

    pub fn progress_percent(&self) -> u8 {
        self.machine.progress_percent()
    }

    pub fn is_complete(&self) -> bool {
        self.machine.is_complete()
    }

    pub fn draft(&self) -> &Draft {
        self.drafts.draft()
    }

    pub fn drafts(&self) -> &DraftStore<S> {
        &self.drafts
    }

    pub fn media(&self) -> &MediaCollection<A> {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut MediaCollection<A> {
        &mut self.media
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// End the session: release every media handle and hand back the draft.
    pub fn finish(self) -> Draft {
        let Self { media, drafts, .. } = self;
        media.dispose();
        drafts.into_draft()
    }
}
