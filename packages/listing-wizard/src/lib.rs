//! Listing-draft wizard for posting a real-estate ad.
//!
//! A listing is authored over four steps (basic info, photos, features,
//! review). This crate holds the parts with real invariants:
//!
//! - [`validation`] - per-step rules turning raw form input into typed payloads
//! - [`media`] - the photo gallery: order, main photo, object-URL lifetimes
//! - [`store`] - the cross-step draft and its best-effort persistence
//! - [`wizard`] - step sequencing gated on validation
//! - [`i18n`] - dotted-key translation lookup with a fallback language
//! - [`testing`] - recording collaborators for tests
//!
//! # Usage
//!
//! ```rust
//! use listing_wizard::{
//!     DraftStore, MemoryStore, ObjectUrlRegistry, RawInput, SubmitOutcome,
//!     WizardConfig, WizardController, testing::RecordingNavigator,
//! };
//! use listing_wizard::validation::fields;
//!
//! let config = WizardConfig::default();
//! let drafts = DraftStore::load(MemoryStore::new(), &config);
//! let mut wizard = WizardController::new(
//!     &config,
//!     drafts,
//!     ObjectUrlRegistry::new(),
//!     RecordingNavigator::new(),
//! );
//!
//! let outcome = wizard.submit_step(
//!     RawInput::new()
//!         .with(fields::PROPERTY_TYPE, "apartment")
//!         .with(fields::TRANSACTION_TYPE, "sale")
//!         .with(fields::ASKING_PRICE, "250000")
//!         .with(fields::AREA_SQM, "80")
//!         .with(fields::ADDRESS, "12 Main Street, Berlin"),
//! );
//! assert!(matches!(outcome, SubmitOutcome::Advanced { .. }));
//! assert_eq!(wizard.current_index(), 1);
//! ```

pub mod error;
pub mod i18n;
pub mod id;
pub mod logging;
pub mod media;
pub mod store;
pub mod testing;
pub mod types;
pub mod validation;
pub mod wizard;

pub use error::{MediaError, StorageError, WizardError};
pub use i18n::{Direction, Language, LanguagePreference, Translator};
pub use media::{
    AddOutcome, CapacityNotice, DragTransfer, MediaCollection, ObjectUrlRegistry,
    ResourceAllocator,
};
pub use store::{DraftStore, FileStore, KeyValueStore, MemoryStore, PersistOutcome};
pub use types::{
    config::WizardConfig,
    draft::{Draft, StepId, StepPayload},
    listing::{Amenity, BasicInfo, Features, PhotosInfo, PropertyType, Review, TransactionType},
    media::{MediaEntry, MediaFile, MediaId, MediaSnapshot, ResourceHandle},
};
pub use validation::{FieldError, FieldErrors, FieldValidator, RawInput};
pub use wizard::{Navigator, StepDefinition, SubmitOutcome, WizardController};
