//! End-to-end wizard scenarios against file-backed persistence.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::tempdir;

use funding_calc::calculator::options::{
    ComplexityPreference, DigitalLevel, EmployeeBand, Industry, LegalEntity, MainGoal,
    ProjectDetailLevel, ProjectType, Region, RevenueBand, Timeline, ToolTag,
};
use funding_calc::calculator::{
    BudgetItem, CalculatorSession, FileSlot, FormPatch, NavigationError, NextOutcome,
    PersistencePort, ScoringError, ScoringGateway, SubmissionOutcome, SubmissionPayload,
    WizardStep, FORM_STATE_KEY, RESULT_KEY,
};
use funding_calc::report::{ReportSource, COULD_NOT_CALCULATE};

/// Replays queued responses in order.
struct ScriptedGateway {
    responses: Mutex<Vec<Result<Value, u16>>>,
}

impl ScriptedGateway {
    fn new(responses: Vec<Result<Value, u16>>) -> Self {
        Self {
            responses: Mutex::new(responses),
        }
    }
}

#[async_trait]
impl ScoringGateway for ScriptedGateway {
    async fn score(&self, _payload: &SubmissionPayload) -> Result<Value, ScoringError> {
        let mut guard = self.responses.lock().expect("script mutex poisoned");
        match guard.remove(0) {
            Ok(body) => Ok(body),
            Err(status) => Err(ScoringError::Status(status)),
        }
    }
}

fn completed_patches() -> Vec<FormPatch> {
    vec![
        FormPatch {
            location: Some(Some(Region::Saguenay)),
            legal_entity: Some(Some(LegalEntity::Incorporated)),
            industry: Some(Some(Industry::Manufacturing)),
            employees: Some(Some(EmployeeBand::TenToFortyNine)),
            revenue: Some(Some(RevenueBand::Under5M)),
            ..FormPatch::default()
        },
        FormPatch {
            current_tools: Some(vec![ToolTag::Accounting, ToolTag::Crm]),
            digital_level: Some(Some(DigitalLevel::Disconnected)),
            project_types: Some(vec![ProjectType::Erp, ProjectType::Cybersecurity]),
            timeline: Some(Some(Timeline::ThreeToSixMonths)),
            main_goal: Some(Some(MainGoal::Efficiency)),
            project_detail_level: Some(Some(ProjectDetailLevel::WrittenRoadmap)),
            ..FormPatch::default()
        },
        FormPatch {
            budget_items: Some(vec![
                BudgetItem::new("1", "ERP licences", 70_000.0),
                BudgetItem::new("2", "Integrator", 30_000.0),
            ]),
            ..FormPatch::default()
        },
        FormPatch {
            complexity_preference: Some(Some(ComplexityPreference::Simple)),
            company_name: Some("Scierie Tremblay".to_string()),
            contact_name: Some("Marc Tremblay".to_string()),
            email: Some("marc@scierie-tremblay.ca".to_string()),
            disclaimer_accepted: Some(true),
            ..FormPatch::default()
        },
    ]
}

fn open_session(dir: &std::path::Path, gateway: Arc<dyn ScoringGateway>) -> CalculatorSession {
    CalculatorSession::new(
        Arc::new(FileSlot::new(dir, FORM_STATE_KEY)),
        Arc::new(FileSlot::new(dir, RESULT_KEY)),
        gateway,
    )
}

async fn walk_to_review(session: &mut CalculatorSession) {
    for patch in completed_patches() {
        session.update(patch);
    }
    for _ in 0..4 {
        session.next().await.expect("step advances");
    }
    assert_eq!(session.snapshot().current_step, WizardStep::Review);
}

#[tokio::test]
async fn answers_survive_a_restart() {
    let dir = tempdir().expect("temp dir");
    let gateway: Arc<dyn ScoringGateway> = Arc::new(ScriptedGateway::new(Vec::new()));

    {
        let mut session = open_session(dir.path(), gateway.clone());
        for patch in completed_patches().into_iter().take(2) {
            session.update(patch);
        }
    }

    let mut reopened = open_session(dir.path(), gateway);
    let snapshot = reopened.snapshot();
    assert_eq!(snapshot.answers.location, Some(Region::Saguenay));
    assert_eq!(
        snapshot.answers.project_types,
        vec![ProjectType::Erp, ProjectType::Cybersecurity]
    );
    assert_eq!(snapshot.current_step, WizardStep::Profile);
    assert!(matches!(
        reopened.jump(2),
        Err(NavigationError::AheadOfProgress {
            target: 2,
            current: 0
        })
    ));
}

#[tokio::test]
async fn corrupt_state_file_falls_back_to_defaults() {
    let dir = tempdir().expect("temp dir");
    std::fs::write(
        dir.path().join(format!("{FORM_STATE_KEY}.json")),
        r#"{"location": "atlantis", "companyName": "Boulangerie Roy", "budgetItems": 7}"#,
    )
    .expect("seed state");

    let session = open_session(dir.path(), Arc::new(ScriptedGateway::new(Vec::new())));
    let answers = session.answers();
    assert_eq!(answers.location, None);
    assert_eq!(answers.company_name, "Boulangerie Roy");
    assert_eq!(answers.budget_items.len(), 3);
}

#[tokio::test]
async fn soft_failure_replaces_a_stored_result_with_the_estimate() {
    let dir = tempdir().expect("temp dir");
    let backend = json!({
        "company": "Scierie Tremblay",
        "summary": {"estimated_min": 20000, "estimated_max": 40000},
        "program_results": [
            {"name": "ESSOR", "status": "eligible", "estimate": {"est_min": 20000, "est_max": 40000}}
        ]
    });
    let gateway = Arc::new(ScriptedGateway::new(vec![Ok(backend), Err(503)]));
    let mut session = open_session(dir.path(), gateway);
    walk_to_review(&mut session).await;

    let first = session.next().await.expect("submits");
    let NextOutcome::Results { submission, page } = first else {
        panic!("expected results destination");
    };
    assert_eq!(submission.outcome, SubmissionOutcome::Stored);
    assert!(page.is_calculated());
    assert_eq!(page.report().source, ReportSource::Backend);
    let result_slot = FileSlot::new(dir.path(), RESULT_KEY);
    assert!(result_slot.load().expect("readable").is_some());

    let second = session.next().await.expect("submits again");
    let NextOutcome::Results { submission, page } = second else {
        panic!("expected results destination");
    };
    assert!(matches!(
        submission.outcome,
        SubmissionOutcome::SoftFailed { .. }
    ));
    assert!(!page.is_calculated());
    assert_eq!(page.report().source, ReportSource::Estimate);
    assert_eq!(page.report().summary.support_low, 25_000.0);
    assert!(result_slot.load().expect("readable").is_none());

    let value = serde_json::to_value(&page).expect("serializes");
    assert_eq!(value["status"], "could_not_calculate");
    assert_eq!(value["message"], COULD_NOT_CALCULATE);
}
