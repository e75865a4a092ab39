use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{FormAnswers, FormPatch, WizardStep};
use super::navigator::{Advance, NavigationError, StepNavigator};
use super::persistence::PersistencePort;
use super::store::FormStateStore;
use super::submission::{ScoringGateway, Submission, SubmissionClient};
use super::validator::{step_validity, StepStatus};
use crate::report::{BackendResult, ExportRequest, ReportRenderer, ResultsPage};

/// State reported to the wizard after every interaction.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub answers: FormAnswers,
    pub current_step: WizardStep,
    pub step_index: usize,
    pub step_label: &'static str,
    pub steps: Vec<StepStatus>,
    pub total_budget: f64,
    pub submitting: bool,
}

/// Where a `next` interaction landed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "destination", rename_all = "snake_case")]
pub enum NextOutcome {
    Step { snapshot: SessionSnapshot },
    Results { submission: Submission, page: ResultsPage },
}

/// Single-writer calculator session: answers, wizard position and the last
/// scoring result.
pub struct CalculatorSession {
    store: FormStateStore,
    navigator: StepNavigator,
    results: Arc<dyn PersistencePort>,
    client: Arc<SubmissionClient>,
    renderer: ReportRenderer,
}

impl CalculatorSession {
    pub fn new(
        answers: Arc<dyn PersistencePort>,
        results: Arc<dyn PersistencePort>,
        gateway: Arc<dyn ScoringGateway>,
    ) -> Self {
        let client = Arc::new(SubmissionClient::new(gateway, results.clone()));
        Self {
            store: FormStateStore::open(answers),
            navigator: StepNavigator::default(),
            results,
            client,
            renderer: ReportRenderer,
        }
    }

    pub fn answers(&self) -> &FormAnswers {
        self.store.answers()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let answers = self.store.answers().clone();
        let current = self.navigator.current();
        SessionSnapshot {
            steps: step_validity(&answers),
            total_budget: answers.total_budget(),
            answers,
            current_step: current,
            step_index: current.index(),
            step_label: current.label(),
            submitting: self.navigator.is_submitting(),
        }
    }

    pub fn update(&mut self, patch: FormPatch) -> SessionSnapshot {
        self.store.update(patch);
        self.snapshot()
    }

    /// Clears the answers and returns to the first step. The stored result is
    /// kept until explicitly cleared.
    pub fn reset(&mut self) -> SessionSnapshot {
        self.store.reset();
        self.navigator.reset();
        info!("calculator session reset");
        self.snapshot()
    }

    /// Navigation half of `next`; the caller performs the submission when
    /// asked to.
    pub fn advance(&mut self) -> Result<Advance, NavigationError> {
        self.navigator.next(self.store.answers())
    }

    pub fn submission_client(&self) -> Arc<SubmissionClient> {
        self.client.clone()
    }

    pub fn finish_submission(&mut self) {
        self.navigator.finish_submission();
    }

    /// Moves forward, submitting from the review step. Requires exclusive
    /// access for the whole submission.
    pub async fn next(&mut self) -> Result<NextOutcome, NavigationError> {
        match self.advance()? {
            Advance::Moved(_) => Ok(NextOutcome::Step {
                snapshot: self.snapshot(),
            }),
            Advance::Submit => {
                let submission = self.client.submit(self.store.answers().clone()).await;
                self.finish_submission();
                Ok(NextOutcome::Results {
                    submission,
                    page: self.results(),
                })
            }
        }
    }

    pub fn prev(&mut self) -> SessionSnapshot {
        self.navigator.prev();
        self.snapshot()
    }

    pub fn jump(&mut self, target: usize) -> Result<SessionSnapshot, NavigationError> {
        self.navigator.jump(target)?;
        Ok(self.snapshot())
    }

    /// Last persisted backend result, if one is stored and readable.
    pub fn stored_result(&self) -> Option<BackendResult> {
        let raw = match self.results.load() {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(error = %err, "failed to read stored result");
                return None;
            }
        };
        let parsed = BackendResult::from_raw(&raw);
        if parsed.is_none() {
            warn!("stored result is not a JSON object; ignoring it");
        }
        parsed
    }

    pub fn results(&self) -> ResultsPage {
        let stored = self.stored_result();
        self.renderer.render(self.store.answers(), stored.as_ref())
    }

    /// "Clear result & retry".
    pub fn clear_results(&self) {
        if let Err(err) = self.results.clear() {
            warn!(error = %err, "failed to clear stored result");
        }
    }

    pub fn export_request(&self) -> ExportRequest {
        let page = self.results();
        ExportRequest::from_view(page.report(), self.store.answers())
    }
}
