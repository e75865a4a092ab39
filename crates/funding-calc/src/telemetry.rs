use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "invalid log filter '{}'", value)
            }
            TelemetryError::Subscriber(err) => write!(f, "subscriber already installed: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Where the active log filter came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOrigin {
    RustLog,
    Config,
}

/// `RUST_LOG` when it parses, otherwise the configured level.
pub fn resolve_filter(
    rust_log: Option<&str>,
    config: &TelemetryConfig,
) -> Result<(EnvFilter, FilterOrigin), TelemetryError> {
    if let Some(filter) = rust_log.and_then(|value| EnvFilter::try_new(value).ok()) {
        return Ok((filter, FilterOrigin::RustLog));
    }

    EnvFilter::try_new(&config.log_level)
        .map(|filter| (filter, FilterOrigin::Config))
        .map_err(|source| TelemetryError::EnvFilter {
            value: config.log_level.clone(),
            source,
        })
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (env_filter, origin) = resolve_filter(rust_log.as_deref(), config)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)?;

    tracing::debug!(?origin, "telemetry initialised");
    Ok(())
}
