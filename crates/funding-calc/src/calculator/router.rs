use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::domain::FormPatch;
use super::navigator::{Advance, NavigationError};
use super::session::{CalculatorSession, NextOutcome};
use crate::report::DocumentExporter;

/// Shared handle to the one calculator session served by this process.
#[derive(Clone)]
pub struct CalculatorState {
    pub session: Arc<Mutex<CalculatorSession>>,
    pub exporter: Arc<dyn DocumentExporter>,
}

impl CalculatorState {
    pub fn new(session: CalculatorSession, exporter: Arc<dyn DocumentExporter>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            exporter,
        }
    }
}

/// Router builder exposing the wizard and results endpoints.
pub fn calculator_router(state: CalculatorState) -> Router {
    Router::new()
        .route(
            "/api/v1/calculator",
            get(snapshot_handler).delete(reset_handler),
        )
        .route(
            "/api/v1/calculator/answers",
            axum::routing::patch(update_handler),
        )
        .route("/api/v1/calculator/next", post(next_handler))
        .route("/api/v1/calculator/prev", post(prev_handler))
        .route("/api/v1/calculator/steps/:step", post(jump_handler))
        .route(
            "/api/v1/results",
            get(results_handler).delete(clear_results_handler),
        )
        .route("/api/v1/results/export", post(export_handler))
        .with_state(state)
}

pub(crate) async fn snapshot_handler(State(state): State<CalculatorState>) -> Response {
    let session = state.session.lock().await;
    Json(session.snapshot()).into_response()
}

pub(crate) async fn update_handler(
    State(state): State<CalculatorState>,
    Json(patch): Json<FormPatch>,
) -> Response {
    let mut session = state.session.lock().await;
    Json(session.update(patch)).into_response()
}

pub(crate) async fn reset_handler(State(state): State<CalculatorState>) -> Response {
    let mut session = state.session.lock().await;
    Json(session.reset()).into_response()
}

pub(crate) async fn next_handler(State(state): State<CalculatorState>) -> Response {
    let (client, answers) = {
        let mut session = state.session.lock().await;
        match session.advance() {
            Ok(Advance::Moved(_)) => {
                let outcome = NextOutcome::Step {
                    snapshot: session.snapshot(),
                };
                return Json(outcome).into_response();
            }
            Ok(Advance::Submit) => (session.submission_client(), session.answers().clone()),
            Err(err) => return navigation_error(err),
        }
    };

    // The lock is released while the scoring call is in flight; the
    // navigator's in-flight flag turns concurrent `next` calls away.
    let submission = client.submit(answers).await;

    let mut session = state.session.lock().await;
    session.finish_submission();
    let page = session.results();
    info!(outcome = ?submission.outcome, "submission settled");
    Json(NextOutcome::Results { submission, page }).into_response()
}

pub(crate) async fn prev_handler(State(state): State<CalculatorState>) -> Response {
    let mut session = state.session.lock().await;
    Json(session.prev()).into_response()
}

pub(crate) async fn jump_handler(
    State(state): State<CalculatorState>,
    Path(step): Path<usize>,
) -> Response {
    let mut session = state.session.lock().await;
    match session.jump(step) {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => navigation_error(err),
    }
}

pub(crate) async fn results_handler(State(state): State<CalculatorState>) -> Response {
    let session = state.session.lock().await;
    Json(session.results()).into_response()
}

pub(crate) async fn clear_results_handler(State(state): State<CalculatorState>) -> Response {
    let session = state.session.lock().await;
    session.clear_results();
    StatusCode::NO_CONTENT.into_response()
}

pub(crate) async fn export_handler(State(state): State<CalculatorState>) -> Response {
    let request = state.session.lock().await.export_request();

    match state.exporter.export(&request).await {
        Ok(document) => {
            let disposition = format!("attachment; filename=\"{}\"", document.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, document.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                document.bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(error = %err, "report export failed");
            let payload = json!({
                "error": "Failed to export report",
                "details": err.details(),
            });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

fn navigation_error(err: NavigationError) -> Response {
    let status = match err {
        NavigationError::UnknownStep(_) => StatusCode::NOT_FOUND,
        NavigationError::StepIncomplete(_)
        | NavigationError::AheadOfProgress { .. }
        | NavigationError::SubmissionInFlight => StatusCode::CONFLICT,
    };
    let mut payload = json!({ "error": err.to_string() });
    if let NavigationError::StepIncomplete(step) = err {
        payload["step"] = json!(step);
        payload["step_index"] = json!(step.index());
    }
    (status, Json(payload)).into_response()
}
