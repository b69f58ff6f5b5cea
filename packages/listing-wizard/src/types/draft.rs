//! The accumulating listing draft.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WizardError;
use crate::types::listing::{BasicInfo, Features, PhotosInfo, Review};

/// Identifies a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    BasicInfo,
    Photos,
    Features,
    Review,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::BasicInfo => "basic-info",
            StepId::Photos => "photos",
            StepId::Features => "features",
            StepId::Review => "review",
        }
    }

    /// All steps in wizard order.
    pub fn all() -> &'static [StepId] {
        &[
            StepId::BasicInfo,
            StepId::Photos,
            StepId::Features,
            StepId::Review,
        ]
    }
}

impl FromStr for StepId {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| WizardError::UnknownStep(s.to_string()))
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated step result, one variant per step kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "kebab-case")]
pub enum StepPayload {
    BasicInfo(BasicInfo),
    Photos(PhotosInfo),
    Features(Features),
    Review(Review),
}

impl StepPayload {
    pub fn step(&self) -> StepId {
        match self {
            StepPayload::BasicInfo(_) => StepId::BasicInfo,
            StepPayload::Photos(_) => StepId::Photos,
            StepPayload::Features(_) => StepId::Features,
            StepPayload::Review(_) => StepId::Review,
        }
    }
}

/// Mapping from step to its validated payload.
///
/// A step's entry is only ever replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    steps: BTreeMap<StepId, StepPayload>,
    updated_at: Option<DateTime<Utc>>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entry for the payload's step, returning the previous one.
    pub fn replace(&mut self, payload: StepPayload) -> Option<StepPayload> {
        self.updated_at = Some(Utc::now());
        self.steps.insert(payload.step(), payload)
    }

    pub fn get(&self, step: StepId) -> Option<&StepPayload> {
        self.steps.get(&step)
    }

    pub fn basic_info(&self) -> Option<&BasicInfo> {
        match self.steps.get(&StepId::BasicInfo) {
            Some(StepPayload::BasicInfo(info)) => Some(info),
            _ => None,
        }
    }

    pub fn photos(&self) -> Option<&PhotosInfo> {
        match self.steps.get(&StepId::Photos) {
            Some(StepPayload::Photos(photos)) => Some(photos),
            _ => None,
        }
    }

    pub fn features(&self) -> Option<&Features> {
        match self.steps.get(&StepId::Features) {
            Some(StepPayload::Features(features)) => Some(features),
            _ => None,
        }
    }

    pub fn review(&self) -> Option<&Review> {
        match self.steps.get(&StepId::Review) {
            Some(StepPayload::Review(review)) => Some(review),
            _ => None,
        }
    }

    /// Completed steps, in wizard order.
    pub fn completed_steps(&self) -> impl Iterator<Item = StepId> + '_ {
        self.steps.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}
