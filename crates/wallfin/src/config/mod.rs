use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::credit::feasibility::FeasibilityConfig;

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

/// Top-level configuration for the credit service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub feasibility: FeasibilityConfig,
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

        let feasibility = match env::var("WALLFIN_FEASIBILITY_CONFIG") {
            Ok(path) if !path.trim().is_empty() => load_feasibility(Path::new(path.trim()))?,
            _ => FeasibilityConfig::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            feasibility,
        })
    }
}

/// Read screening thresholds from a JSON file; omitted fields keep their standard values.
pub fn load_feasibility(path: &Path) -> Result<FeasibilityConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::FeasibilityRead {
        path: path.to_path_buf(),
        source,
    })?;

    let config: FeasibilityConfig =
        serde_json::from_str(&raw).map_err(|source| ConfigError::FeasibilityParse {
            path: path.to_path_buf(),
            source,
        })?;

    if config.review_ratio_floor > config.debt_ratio_cap {
        return Err(ConfigError::InvalidThresholds {
            path: path.to_path_buf(),
        });
    }

    Ok(config)
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    FeasibilityRead {
        path: PathBuf,
        source: std::io::Error,
    },
    FeasibilityParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidThresholds {
        path: PathBuf,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::FeasibilityRead { path, .. } => {
                write!(f, "unable to read feasibility config {}", path.display())
            }
            ConfigError::FeasibilityParse { path, .. } => {
                write!(f, "feasibility config {} is not valid JSON", path.display())
            }
            ConfigError::InvalidThresholds { path } => write!(
                f,
                "feasibility config {}: review_ratio_floor must not exceed debt_ratio_cap",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidThresholds { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::FeasibilityRead { source, .. } => Some(source),
            ConfigError::FeasibilityParse { source, .. } => Some(source),
        }
    }
}
