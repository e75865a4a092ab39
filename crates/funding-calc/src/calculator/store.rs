use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::domain::{FormAnswers, FormPatch};
use super::persistence::PersistencePort;

/// Holds the in-progress answers and mirrors every change to the
/// persistence port.
pub struct FormStateStore {
    port: Arc<dyn PersistencePort>,
    answers: FormAnswers,
}

impl FormStateStore {
    /// Builds a store already hydrated from whatever the port holds.
    pub fn open(port: Arc<dyn PersistencePort>) -> Self {
        let mut store = Self {
            port,
            answers: FormAnswers::default(),
        };
        store.load();
        store
    }

    /// Re-reads persisted answers. Missing or unreadable state yields the
    /// defaults; nothing is propagated.
    pub fn load(&mut self) -> &FormAnswers {
        self.answers = match self.port.load() {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) => {
                    let hydrated = FormAnswers::from_persisted(&value);
                    if !hydrated.rejected_fields.is_empty() {
                        warn!(
                            fields = ?hydrated.rejected_fields,
                            "discarded malformed persisted answers"
                        );
                    }
                    hydrated.answers
                }
                Err(err) => {
                    warn!(error = %err, "persisted answers are not valid JSON; using defaults");
                    FormAnswers::default()
                }
            },
            Ok(None) => FormAnswers::default(),
            Err(err) => {
                warn!(error = %err, "failed to read persisted answers; using defaults");
                FormAnswers::default()
            }
        };
        &self.answers
    }

    pub fn answers(&self) -> &FormAnswers {
        &self.answers
    }

    /// Merges the patch and persists the full record.
    pub fn update(&mut self, patch: FormPatch) -> &FormAnswers {
        self.answers.apply(patch);
        self.persist();
        &self.answers
    }

    /// Clears persisted answers and returns to the defaults.
    pub fn reset(&mut self) -> &FormAnswers {
        if let Err(err) = self.port.clear() {
            warn!(error = %err, "failed to clear persisted answers");
        }
        self.answers = FormAnswers::default();
        &self.answers
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.answers) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "failed to serialize answers");
                return;
            }
        };
        match self.port.save(&raw) {
            Ok(()) => debug!(bytes = raw.len(), "persisted answers"),
            Err(err) => warn!(error = %err, "failed to persist answers"),
        }
    }
}
