use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{info, warn};

use super::domain::FormAnswers;
use super::persistence::PersistencePort;

/// Body posted to the scoring backend: every answer plus derived totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub answers: FormAnswers,
    pub total_budget: f64,
    #[serde(serialize_with = "rfc3339_millis")]
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionPayload {
    pub fn new(answers: FormAnswers, submitted_at: DateTime<Utc>) -> Self {
        let total_budget = answers.total_budget();
        Self {
            answers,
            total_budget,
            submitted_at,
        }
    }
}

fn rfc3339_millis<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Outbound call to the external scoring service.
#[async_trait]
pub trait ScoringGateway: Send + Sync {
    async fn score(&self, payload: &SubmissionPayload) -> Result<Value, ScoringError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("scoring service answered with status {0}")]
    Status(u16),
    #[error("scoring service unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("scoring service returned an unreadable body: {0}")]
    Body(String),
}

/// reqwest-backed gateway posting JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpScoringGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpScoringGateway {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ScoringError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ScoringError::Transport)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScoringGateway for HttpScoringGateway {
    async fn score(&self, payload: &SubmissionPayload) -> Result<Value, ScoringError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ScoringError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(ScoringError::Transport)?;
        serde_json::from_slice(&body).map_err(|err| ScoringError::Body(err.to_string()))
    }
}

/// How a submission attempt settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Stored,
    SoftFailed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub payload: SubmissionPayload,
    pub outcome: SubmissionOutcome,
}

/// Posts answers to the scoring service and keeps the result slot in sync
/// with the last attempt. Never fails: errors become a soft failure.
pub struct SubmissionClient {
    gateway: Arc<dyn ScoringGateway>,
    results: Arc<dyn PersistencePort>,
}

impl SubmissionClient {
    pub fn new(gateway: Arc<dyn ScoringGateway>, results: Arc<dyn PersistencePort>) -> Self {
        Self { gateway, results }
    }

    pub async fn submit(&self, answers: FormAnswers) -> Submission {
        let payload = SubmissionPayload::new(answers, Utc::now());

        let outcome = match self.gateway.score(&payload).await {
            Ok(result) => self.store(&result),
            Err(err) => {
                warn!(error = %err, "submission soft-failed; clearing stored result");
                self.clear_result();
                SubmissionOutcome::SoftFailed {
                    reason: err.to_string(),
                }
            }
        };

        Submission { payload, outcome }
    }

    fn store(&self, result: &Value) -> SubmissionOutcome {
        let raw = match serde_json::to_string(result) {
            Ok(raw) => raw,
            Err(err) => {
                self.clear_result();
                return SubmissionOutcome::SoftFailed {
                    reason: err.to_string(),
                };
            }
        };
        match self.results.save(&raw) {
            Ok(()) => {
                info!(bytes = raw.len(), "stored scoring result");
                SubmissionOutcome::Stored
            }
            Err(err) => {
                warn!(error = %err, "failed to store scoring result");
                self.clear_result();
                SubmissionOutcome::SoftFailed {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn clear_result(&self) {
        if let Err(err) = self.results.clear() {
            warn!(error = %err, "failed to clear stored result");
        }
    }
}
