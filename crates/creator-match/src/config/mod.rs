use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::billing::BillingConfig;
use crate::matching::MatchConfig;

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
    pub matching: MatchConfig,
    pub roster: RosterConfig,
    pub billing: BillingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let matching = load_match_config()?;

        let roster = RosterConfig {
            path: env::var("MATCH_ROSTER_PATH")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        };

        let defaults = BillingConfig::default();
        let gst_rate = env_or("GST_RATE", defaults.gst_rate)?;
        if !gst_rate.is_finite() || !(0.0..1.0).contains(&gst_rate) {
            return Err(ConfigError::InvalidGstRate(gst_rate));
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching,
            roster,
            billing: BillingConfig { gst_rate },
        })
    }
}

fn load_match_config() -> Result<MatchConfig, ConfigError> {
    let mut config = MatchConfig::default();

    config.engagement_cap = env_or("MATCH_ENGAGEMENT_CAP", config.engagement_cap)?;
    config.views_cap = env_or("MATCH_VIEWS_CAP", config.views_cap)?;
    config.weights.relevance = env_or("MATCH_WEIGHT_RELEVANCE", config.weights.relevance)?;
    config.weights.audience = env_or("MATCH_WEIGHT_AUDIENCE", config.weights.audience)?;
    config.weights.perf_price = env_or("MATCH_WEIGHT_PERF_PRICE", config.weights.perf_price)?;
    config.weights.constraints =
        env_or("MATCH_WEIGHT_CONSTRAINTS", config.weights.constraints)?;
    config.diversified_slots = env_or("MATCH_DIVERSIFIED_SLOTS", config.diversified_slots)?;

    config.validate().map_err(ConfigError::InvalidMatchTuning)?;
    Ok(config)
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidNumber { key, value: raw })
        }
        _ => Ok(default),
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the creator roster is seeded from; `None` selects the built-in demo roster.
#[derive(Debug, Clone, Default)]
pub struct RosterConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str, value: String },
    InvalidMatchTuning(Vec<String>),
    InvalidGstRate(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be numeric (found '{value}')")
            }
            ConfigError::InvalidMatchTuning(errors) => {
                write!(f, "match tuning rejected: {}", errors.join("; "))
            }
            ConfigError::InvalidGstRate(rate) => {
                write!(f, "GST_RATE must be a fraction in [0, 1) (found {rate})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidMatchTuning(_)
            | ConfigError::InvalidGstRate(_) => None,
        }
    }
}
