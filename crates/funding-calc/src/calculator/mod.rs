//! Multi-step intake wizard: answers, persistence, validation, navigation
//! and submission to the scoring backend.

pub mod domain;
pub mod navigator;
pub mod options;
pub mod persistence;
pub mod router;
pub mod session;
pub mod store;
pub mod submission;
pub mod validator;

#[cfg(test)]
mod tests;

pub use domain::{BudgetItem, FormAnswers, FormPatch, Hydrated, WizardStep};
pub use navigator::{Advance, NavigationError, StepNavigator};
pub use persistence::{
    FileSlot, MemorySlot, PersistenceError, PersistencePort, FORM_STATE_KEY, RESULT_KEY,
};
pub use router::{calculator_router, CalculatorState};
pub use session::{CalculatorSession, NextOutcome, SessionSnapshot};
pub use store::FormStateStore;
pub use submission::{
    HttpScoringGateway, ScoringError, ScoringGateway, Submission, SubmissionClient,
    SubmissionOutcome, SubmissionPayload,
};
pub use validator::{is_step_valid, step_validity, StepStatus};
