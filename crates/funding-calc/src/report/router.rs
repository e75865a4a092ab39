use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, warn};

use super::document::{render_document, DocumentError};
use super::export::ExportRequest;

pub const DOCUMENT_ROUTE: &str = "/api/report-document";

/// Local document generator used as the export collaborator.
pub fn document_router() -> Router {
    Router::new().route(DOCUMENT_ROUTE, post(generate_handler))
}

pub(crate) async fn generate_handler(body: Bytes) -> Response {
    let rendered = serde_json::from_slice::<ExportRequest>(&body)
        .map_err(|err| DocumentError::InvalidRequest(err.to_string()))
        .and_then(|request| render_document(&request));

    match rendered {
        Ok(document) => {
            info!(filename = %document.filename, "generated funding document");
            let disposition = format!("attachment; filename=\"{}\"", document.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                document.body,
            )
                .into_response()
        }
        Err(err) => {
            warn!(error = %err, "document generation failed");
            let status = match err {
                DocumentError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                DocumentError::Format(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let payload = json!({
                "error": "Failed to generate document",
                "details": err.to_string(),
            });
            (status, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn returns_attachment_for_valid_request() {
        let response = document_router()
            .oneshot(
                Request::post(DOCUMENT_ROUTE)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"calc":{"companyName":"Acme Outils"}}"#))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        assert_eq!(
            disposition.as_deref(),
            Some("attachment; filename=\"Acme-Outils-funding-report.html\"")
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let response = document_router()
            .oneshot(
                Request::post(DOCUMENT_ROUTE)
                    .body(Body::from("{not json"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("body");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload["error"], "Failed to generate document");
        assert!(payload["details"].as_str().is_some_and(|d| !d.is_empty()));
    }
}
