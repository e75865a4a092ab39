use serde::Serialize;

use super::domain::{FormAnswers, WizardStep};
use super::validator::is_step_valid;

/// Linear five-step wizard position plus the submission-in-flight flag.
#[derive(Debug, Clone, Default)]
pub struct StepNavigator {
    current: WizardStep,
    submitting: bool,
}

/// What a successful `next` asks the caller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "step", rename_all = "snake_case")]
pub enum Advance {
    Moved(WizardStep),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("step '{}' is incomplete", .0.label())]
    StepIncomplete(WizardStep),
    #[error("cannot jump to step {target} before completing step {current}")]
    AheadOfProgress { target: usize, current: usize },
    #[error("unknown step {0}")]
    UnknownStep(usize),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
}

impl StepNavigator {
    pub fn current(&self) -> WizardStep {
        self.current
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Moves forward when the current step validates. At the last step this
    /// marks a submission in flight instead of moving.
    pub fn next(&mut self, answers: &FormAnswers) -> Result<Advance, NavigationError> {
        if self.submitting {
            return Err(NavigationError::SubmissionInFlight);
        }
        if !is_step_valid(self.current, answers) {
            return Err(NavigationError::StepIncomplete(self.current));
        }
        match self.current.next() {
            Some(step) => {
                self.current = step;
                Ok(Advance::Moved(step))
            }
            None => {
                self.submitting = true;
                Ok(Advance::Submit)
            }
        }
    }

    /// Clears the in-flight flag once the submission settled, whatever its outcome.
    pub fn finish_submission(&mut self) {
        self.submitting = false;
    }

    pub fn prev(&mut self) -> WizardStep {
        if let Some(step) = self.current.previous() {
            self.current = step;
        }
        self.current
    }

    /// Sidebar jump; only already-visited steps are reachable.
    pub fn jump(&mut self, target: usize) -> Result<WizardStep, NavigationError> {
        let step = WizardStep::from_index(target).ok_or(NavigationError::UnknownStep(target))?;
        if step > self.current {
            return Err(NavigationError::AheadOfProgress {
                target,
                current: self.current.index(),
            });
        }
        self.current = step;
        Ok(step)
    }

    /// Back to the first step. An in-flight submission stays flagged until
    /// it settles.
    pub fn reset(&mut self) {
        self.current = WizardStep::default();
    }
}
