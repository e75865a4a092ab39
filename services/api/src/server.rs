use crate::cli::ServeArgs;
use crate::infra::{open_session, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use funding_calc::calculator::CalculatorState;
use funding_calc::config::AppConfig;
use funding_calc::error::AppError;
use funding_calc::report::HttpDocumentExporter;
use funding_calc::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let session = open_session(&config.calculator)?;
    let export_url = config.calculator.export_url_for(&config.server);
    let exporter = Arc::new(HttpDocumentExporter::new(export_url.clone()));

    let app = with_service_routes(CalculatorState::new(session, exporter))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        scoring = %config.calculator.scoring_url,
        export = %export_url,
        "funding calculator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
