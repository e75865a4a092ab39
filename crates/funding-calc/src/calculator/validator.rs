use serde::Serialize;

use super::domain::{FormAnswers, WizardStep};

/// Whether the answers allow leaving `step` forwards.
pub fn is_step_valid(step: WizardStep, answers: &FormAnswers) -> bool {
    match step {
        WizardStep::Profile => {
            answers.location.is_some()
                && answers.legal_entity.is_some()
                && answers.industry.is_some()
                && answers.employees.is_some()
                && answers.revenue.is_some()
        }
        WizardStep::Project => {
            !answers.current_tools.is_empty()
                && answers.digital_level.is_some()
                && !answers.project_types.is_empty()
                && answers.timeline.is_some()
                && answers.main_goal.is_some()
        }
        WizardStep::Budget => answers.total_budget() > 0.0,
        WizardStep::Preferences => answers.complexity_preference.is_some(),
        WizardStep::Review => answers.disclaimer_accepted,
    }
}

/// Sidebar entry for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepStatus {
    pub step: WizardStep,
    pub index: usize,
    pub label: &'static str,
    pub valid: bool,
}

pub fn step_validity(answers: &FormAnswers) -> Vec<StepStatus> {
    WizardStep::ordered()
        .into_iter()
        .map(|step| StepStatus {
            step,
            index: step.index(),
            label: step.label(),
            valid: is_step_valid(step, answers),
        })
        .collect()
}
