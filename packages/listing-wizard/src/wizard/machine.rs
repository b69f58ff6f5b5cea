//! Step sequencing as a pure state machine.
//!
//! The machine owns the current step index and nothing else. It receives
//! events (facts: a step validated, the user asked to go back) and decides
//! at most one navigation command per event. It does no IO; the controller
//! executes the commands.

use crate::error::{Result, WizardError};
use crate::types::draft::StepId;

/// A wizard page: which step it is, its label key and its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: StepId,
    /// Translation key of the step label.
    pub label_key: &'static str,
    /// Route the navigation collaborator shows this step at.
    pub path: &'static str,
}

/// The four listing steps in order.
pub fn default_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition {
            id: StepId::BasicInfo,
            label_key: "post_ad.steps.basic_info",
            path: "/create-new-property",
        },
        StepDefinition {
            id: StepId::Photos,
            label_key: "post_ad.steps.photos",
            path: "/create-new-property/photos",
        },
        StepDefinition {
            id: StepId::Features,
            label_key: "post_ad.steps.features",
            path: "/create-new-property/features",
        },
        StepDefinition {
            id: StepId::Review,
            label_key: "post_ad.steps.review",
            path: "/create-new-property/review",
        },
    ]
}

/// Facts the machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    /// The current step's input validated and was stored.
    StepValidated,
    /// The user pressed "Previous".
    BackRequested,
}

/// Navigation intent decided by the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationCommand {
    AdvanceTo { step: StepId, path: &'static str },
    ReturnTo { step: StepId, path: &'static str },
    /// The last step validated.
    Complete,
}

/// Current position within a fixed, non-empty list of steps.
#[derive(Debug, Clone)]
pub struct WizardMachine {
    steps: Vec<StepDefinition>,
    current: usize,
    complete: bool,
}

impl Default for WizardMachine {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            current: 0,
            complete: false,
        }
    }
}

impl WizardMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Machine over custom steps. Fails on an empty list.
    pub fn with_steps(steps: Vec<StepDefinition>) -> Result<Self> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        Ok(Self {
            steps,
            current: 0,
            complete: false,
        })
    }

    /// Apply an event. Moves by at most one step.
    pub fn decide(&mut self, event: &WizardEvent) -> Option<NavigationCommand> {
        match event {
            WizardEvent::StepValidated => {
                if self.current + 1 < self.steps.len() {
                    self.current += 1;
                    let next = &self.steps[self.current];
                    Some(NavigationCommand::AdvanceTo {
                        step: next.id,
                        path: next.path,
                    })
                } else {
                    self.complete = true;
                    Some(NavigationCommand::Complete)
                }
            }
            WizardEvent::BackRequested => {
                if self.current == 0 {
                    return None;
                }
                self.current -= 1;
                self.complete = false;
                let previous = &self.steps[self.current];
                Some(NavigationCommand::ReturnTo {
                    step: previous.id,
                    path: previous.path,
                })
            }
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.steps[self.current]
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// `round((index + 1) / count * 100)`.
    pub fn progress_percent(&self) -> u8 {
        ((self.current + 1) as f64 / self.steps.len() as f64 * 100.0).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_first_step() {
        let machine = WizardMachine::new();
        assert_eq!(machine.current_index(), 0);
        assert_eq!(machine.current_step().id, StepId::BasicInfo);
        assert_eq!(machine.progress_percent(), 25);
        assert!(!machine.is_complete());
    }

    #[test]
    fn validated_steps_advance_one_at_a_time() {
        let mut machine = WizardMachine::new();
        assert_eq!(
            machine.decide(&WizardEvent::StepValidated),
            Some(NavigationCommand::AdvanceTo {
                step: StepId::Photos,
                path: "/create-new-property/photos"
            })
        );
        assert_eq!(machine.current_index(), 1);
        assert_eq!(machine.progress_percent(), 50);
    }

    #[test]
    fn last_step_completes_without_moving() {
        let mut machine = WizardMachine::new();
        for _ in 0..3 {
            machine.decide(&WizardEvent::StepValidated);
        }
        assert_eq!(machine.progress_percent(), 100);
        assert_eq!(
            machine.decide(&WizardEvent::StepValidated),
            Some(NavigationCommand::Complete)
        );
        assert_eq!(machine.current_index(), 3);
        assert!(machine.is_complete());
    }

    #[test]
    fn back_is_clamped_at_zero() {
        let mut machine = WizardMachine::new();
        assert_eq!(machine.decide(&WizardEvent::BackRequested), None);
        assert_eq!(machine.current_index(), 0);

        machine.decide(&WizardEvent::StepValidated);
        assert_eq!(
            machine.decide(&WizardEvent::BackRequested),
            Some(NavigationCommand::ReturnTo {
                step: StepId::BasicInfo,
                path: "/create-new-property"
            })
        );
        assert_eq!(machine.current_index(), 0);
    }

    #[test]
    fn progress_rounds() {
        let steps = default_steps().into_iter().take(3).collect();
        let machine = WizardMachine::with_steps(steps).unwrap();
        assert_eq!(machine.progress_percent(), 33);
    }

    #[test]
    fn empty_step_list_is_rejected() {
        assert!(matches!(
            WizardMachine::with_steps(vec![]),
            Err(WizardError::NoSteps)
        ));
    }
}
