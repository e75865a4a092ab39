use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::calculator::domain::{BudgetItem, FormPatch};
use crate::calculator::options::{
    ComplexityPreference, DigitalLevel, EmployeeBand, Industry, LegalEntity, MainGoal,
    ProjectDetailLevel, ProjectType, Region, RevenueBand, Timeline, ToolTag,
};
use crate::calculator::persistence::{MemorySlot, PersistencePort};
use crate::calculator::session::CalculatorSession;
use crate::calculator::submission::{ScoringError, ScoringGateway, SubmissionPayload};
use crate::calculator::{calculator_router, CalculatorState};
use crate::report::export::{DocumentExporter, ExportError, ExportRequest, ExportedDocument};

pub(super) fn profile_patch() -> FormPatch {
    FormPatch {
        location: Some(Some(Region::Monteregie)),
        legal_entity: Some(Some(LegalEntity::Incorporated)),
        industry: Some(Some(Industry::Manufacturing)),
        employees: Some(Some(EmployeeBand::TenToFortyNine)),
        revenue: Some(Some(RevenueBand::Under5M)),
        ..FormPatch::default()
    }
}

pub(super) fn project_patch() -> FormPatch {
    FormPatch {
        current_tools: Some(vec![ToolTag::Accounting, ToolTag::BasicTools]),
        digital_level: Some(Some(DigitalLevel::Disconnected)),
        project_types: Some(vec![ProjectType::Erp, ProjectType::ProductionAutomation]),
        timeline: Some(Some(Timeline::ThreeToSixMonths)),
        main_goal: Some(Some(MainGoal::Efficiency)),
        project_detail_level: Some(Some(ProjectDetailLevel::WrittenRoadmap)),
        ..FormPatch::default()
    }
}

pub(super) fn budget_patch() -> FormPatch {
    FormPatch {
        budget_items: Some(vec![
            BudgetItem::new("1", "Software Licenses (ERP/CRM)", 60_000.0),
            BudgetItem::new("2", "Implementation Consultants", 35_000.0),
            BudgetItem::new("3", "Training", 5_000.0),
        ]),
        ..FormPatch::default()
    }
}

pub(super) fn review_patch() -> FormPatch {
    FormPatch {
        complexity_preference: Some(Some(ComplexityPreference::Simple)),
        company_name: Some("Usinage Lapointe".to_string()),
        contact_name: Some("Julie Lapointe".to_string()),
        email: Some("julie@usinage-lapointe.ca".to_string()),
        disclaimer_accepted: Some(true),
        ..FormPatch::default()
    }
}

/// Fills every step and walks the wizard to the review step.
pub(super) async fn session_at_review(session: &mut CalculatorSession) {
    for patch in [profile_patch(), project_patch(), budget_patch(), review_patch()] {
        session.update(patch);
    }
    for _ in 0..4 {
        session.next().await.expect("step advances");
    }
}

pub(super) struct Harness {
    pub(super) session: CalculatorSession,
    pub(super) answers: Arc<MemorySlot>,
    pub(super) results: Arc<MemorySlot>,
}

pub(super) fn harness(gateway: Arc<dyn ScoringGateway>) -> Harness {
    harness_with_results(gateway, MemorySlot::default())
}

pub(super) fn harness_with_results(
    gateway: Arc<dyn ScoringGateway>,
    results: MemorySlot,
) -> Harness {
    let answers = Arc::new(MemorySlot::default());
    let results = Arc::new(results);
    let session = CalculatorSession::new(answers.clone(), results.clone(), gateway);
    Harness {
        session,
        answers,
        results,
    }
}

pub(super) fn backend_document() -> Value {
    json!({
        "company": "Usinage Lapointe",
        "profile": {"region": "Montérégie", "sector": "Manufacturing", "employees_band": "10-49"},
        "project": {"budget": 100000, "main_goal": "efficiency"},
        "summary": {"estimated_min": 30000, "estimated_max": 45000, "grants_total": 30000, "tax_total": 12000},
        "program_results": [
            {"name": "CanExport SMEs", "status": "ineligible", "estimate": {"est_typical": 50000}},
            {"name": "ESSOR", "status": "eligible", "estimate": {"est_typical": 30000}},
            {"name": "C3i", "status": "maybe", "estimate": {"est_max": 12000}},
        ]
    })
}

/// Answers every call with the same document and records payloads.
#[derive(Default)]
pub(super) struct StaticGateway {
    pub(super) response: Value,
    pub(super) payloads: Mutex<Vec<Value>>,
}

impl StaticGateway {
    pub(super) fn new(response: Value) -> Self {
        Self {
            response,
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn payloads(&self) -> Vec<Value> {
        self.payloads.lock().expect("payload mutex poisoned").clone()
    }
}

#[async_trait]
impl ScoringGateway for StaticGateway {
    async fn score(&self, payload: &SubmissionPayload) -> Result<Value, ScoringError> {
        let recorded = serde_json::to_value(payload).expect("payload serializes");
        self.payloads
            .lock()
            .expect("payload mutex poisoned")
            .push(recorded);
        Ok(self.response.clone())
    }
}

/// Always answers with a non-success status.
pub(super) struct FailingGateway {
    pub(super) status: u16,
    pub(super) calls: AtomicUsize,
}

impl FailingGateway {
    pub(super) fn new(status: u16) -> Self {
        Self {
            status,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScoringGateway for FailingGateway {
    async fn score(&self, _payload: &SubmissionPayload) -> Result<Value, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ScoringError::Status(self.status))
    }
}

/// Parks every call until released, so tests can observe the in-flight state.
#[derive(Default)]
pub(super) struct ParkedGateway {
    pub(super) entered: Notify,
    pub(super) release: Notify,
}

#[async_trait]
impl ScoringGateway for ParkedGateway {
    async fn score(&self, _payload: &SubmissionPayload) -> Result<Value, ScoringError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(backend_document())
    }
}

#[derive(Default)]
pub(super) struct RecordingExporter {
    pub(super) requests: Mutex<Vec<ExportRequest>>,
}

#[async_trait]
impl DocumentExporter for RecordingExporter {
    async fn export(&self, request: &ExportRequest) -> Result<ExportedDocument, ExportError> {
        self.requests
            .lock()
            .expect("export mutex poisoned")
            .push(request.clone());
        Ok(ExportedDocument {
            filename: "usinage-lapointe-funding-report.html".to_string(),
            content_type: "text/html; charset=utf-8".to_string(),
            bytes: b"<html></html>".to_vec(),
        })
    }
}

pub(super) struct RejectingExporter;

#[async_trait]
impl DocumentExporter for RejectingExporter {
    async fn export(&self, _request: &ExportRequest) -> Result<ExportedDocument, ExportError> {
        Err(ExportError::Rejected {
            status: 400,
            error: "Failed to generate document".to_string(),
            details: "missing calc block".to_string(),
        })
    }
}

pub(super) fn router_for(
    gateway: Arc<dyn ScoringGateway>,
    exporter: Arc<dyn DocumentExporter>,
) -> (axum::Router, Arc<MemorySlot>) {
    let harness = harness(gateway);
    let state = CalculatorState::new(harness.session, exporter);
    (calculator_router(state), harness.results)
}

pub(super) fn stored(slot: &MemorySlot) -> Option<String> {
    slot.load().expect("memory slot readable")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
