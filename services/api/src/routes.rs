use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use funding_calc::calculator::{calculator_router, CalculatorState};
use funding_calc::catalog::catalog_router;
use funding_calc::report::document_router;
use serde_json::json;

/// Full service surface: wizard, results, catalog, document generator and
/// operational probes. Expects an `AppState` extension layer.
pub(crate) fn with_service_routes(calculator: CalculatorState) -> Router {
    calculator_router(calculator)
        .merge(catalog_router())
        .merge(document_router())
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

const SERVICE: &str = "funding-calc";

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": SERVICE }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = json!({
        "status": if ready { "ready" } else { "initializing" },
        "service": SERVICE,
    });

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
