use funding_calc::calculator::{
    CalculatorSession, FileSlot, HttpScoringGateway, FORM_STATE_KEY, RESULT_KEY,
};
use funding_calc::config::CalculatorConfig;
use funding_calc::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Session backed by JSON files under the configured state directory.
pub(crate) fn open_session(config: &CalculatorConfig) -> Result<CalculatorSession, AppError> {
    let gateway = HttpScoringGateway::new(config.scoring_url.clone(), config.scoring_timeout)?;
    let answers = FileSlot::new(&config.state_dir, FORM_STATE_KEY);
    let results = FileSlot::new(&config.state_dir, RESULT_KEY);
    debug!(
        answers = %answers.path().display(),
        results = %results.path().display(),
        scoring = gateway.endpoint(),
        "opening calculator session"
    );
    Ok(CalculatorSession::new(
        Arc::new(answers),
        Arc::new(results),
        Arc::new(gateway),
    ))
}
