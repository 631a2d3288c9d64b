use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::analysis::{CatalogError, CategoryCatalog, ScoringConfig, ThresholdConfig};

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
    pub analysis: AnalysisSettings,
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
            analysis: AnalysisSettings::from_env(),
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

/// Scoring overrides and the category dataset location.
///
/// Unlike the server settings these never fail: unparsable values are logged and the
/// documented defaults apply.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSettings {
    pub scoring: ScoringConfig,
    pub catalog_path: Option<PathBuf>,
}

impl AnalysisSettings {
    fn from_env() -> Self {
        let mut scoring = ScoringConfig::default();

        let eligible = env_override::<f64>("AWARDS_ELIGIBLE_THRESHOLD");
        let partial = env_override::<f64>("AWARDS_PARTIAL_THRESHOLD");
        if eligible.is_some() || partial.is_some() {
            scoring.thresholds = ThresholdConfig::new(
                eligible.unwrap_or(scoring.thresholds.eligible),
                partial.unwrap_or(scoring.thresholds.partial),
            );
        }
        if let Some(inclusion) = env_override::<f64>("AWARDS_INCLUSION_THRESHOLD") {
            scoring.inclusion_threshold = inclusion;
        }
        if let Some(max_tokens) = env_override::<usize>("AWARDS_MAX_TOKENS") {
            scoring.max_tokens = max_tokens;
        }

        let catalog_path = env::var("AWARDS_CATALOG_PATH")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Self {
            scoring: scoring.sanitized(),
            catalog_path,
        }
    }

    /// The configured dataset, or the bundled ICONS awards when no path is set.
    pub fn load_catalog(&self) -> Result<CategoryCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => CategoryCatalog::from_path(path),
            None => CategoryCatalog::icons_awards(),
        }
    }
}

fn env_override<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable scoring override");
            None
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
