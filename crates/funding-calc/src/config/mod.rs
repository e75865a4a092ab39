use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::report::DOCUMENT_ROUTE;

type UrlParseError = <Url as FromStr>::Err;

pub const DEFAULT_SCORING_URL: &str = "http://20.119.101.162/calculate";
pub const DEFAULT_STATE_DIR: &str = ".funding-calc";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub calculator: CalculatorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            calculator: CalculatorConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Collaborators and local state used by the calculator.
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    pub scoring_url: String,
    /// No timeout unless configured.
    pub scoring_timeout: Option<Duration>,
    /// Falls back to this service's own document route.
    pub export_url: Option<String>,
    pub state_dir: PathBuf,
}

impl CalculatorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let scoring_url =
            env::var("CALC_SCORING_URL").unwrap_or_else(|_| DEFAULT_SCORING_URL.to_string());
        check_url("CALC_SCORING_URL", &scoring_url)?;

        let scoring_timeout = match env::var("CALC_SCORING_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::InvalidTimeout)?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        let export_url = env::var("CALC_EXPORT_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        if let Some(url) = &export_url {
            check_url("CALC_EXPORT_URL", url)?;
        }

        let state_dir = env::var("CALC_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_DIR));

        Ok(Self {
            scoring_url,
            scoring_timeout,
            export_url,
            state_dir,
        })
    }

    pub fn export_url_for(&self, server: &ServerConfig) -> String {
        match &self.export_url {
            Some(url) => url.clone(),
            None => {
                let host = match server.host.as_str() {
                    "0.0.0.0" | "::" => "127.0.0.1",
                    other => other,
                };
                format!("http://{host}:{}{DOCUMENT_ROUTE}", server.port)
            }
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            scoring_url: DEFAULT_SCORING_URL.to_string(),
            scoring_timeout: None,
            export_url: None,
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
        }
    }
}

fn check_url(variable: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|source| ConfigError::InvalidUrl { variable, source })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidTimeout,
    InvalidUrl {
        variable: &'static str,
        source: UrlParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => write!(
                f,
                "CALC_SCORING_TIMEOUT_SECS must be a positive number of seconds"
            ),
            ConfigError::InvalidUrl { variable, .. } => {
                write!(f, "{variable} must be an absolute URL")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimeout => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidUrl { source, .. } => Some(source),
        }
    }
}
