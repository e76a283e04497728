use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::interview::ConnectPolicy;
use crate::matching::DEFAULT_MIN_SKILL_OVERLAP;
use crate::roster::RosterSource;

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
    pub interview: InterviewConfig,
    pub matching: MatchingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(&var_or("APP_ENV", "development"));

        let server = ServerConfig {
            host: var_or("APP_HOST", "127.0.0.1"),
            port: parse_var("APP_PORT", 3000)?,
        };

        let telemetry = TelemetryConfig {
            log_level: var_or("APP_LOG_LEVEL", "info"),
            log_file: optional_var("APP_LOG_FILE").map(PathBuf::from),
        };

        let interview = InterviewConfig {
            host: var_or("INTERVIEW_HOST", "127.0.0.1"),
            port: parse_var("INTERVIEW_PORT", 65432)?,
            connect_attempts: parse_var("INTERVIEW_CONNECT_ATTEMPTS", 3)?,
            retry_delay_secs: parse_var("INTERVIEW_RETRY_DELAY_SECS", 2)?,
            socket_timeout_secs: parse_var("INTERVIEW_SOCKET_TIMEOUT_SECS", 500)?,
            candidate_terminal: optional_var("INTERVIEW_CANDIDATE_TERMINAL"),
        };

        let roster_source = match optional_var("MATCH_ROSTER_SOURCE") {
            Some(value) => RosterSource::from_str(&value)
                .map_err(|_| ConfigError::InvalidRosterSource { value })?,
            None => RosterSource::Standard,
        };
        let matching = MatchingConfig {
            roster_csv: PathBuf::from(var_or("MATCH_ROSTER_CSV", "candidates.csv")),
            roster_source,
            top_n: parse_var("MATCH_TOP_N", 5)?,
            min_skill_overlap: parse_var("MATCH_MIN_SKILL_OVERLAP", DEFAULT_MIN_SKILL_OVERLAP)?,
        };

        Ok(Self {
            environment,
            server,
            telemetry,
            interview,
            matching,
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
        resolve_addr("APP_HOST", &self.host, self.port)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

/// Interview listener and candidate connection settings.
#[derive(Debug, Clone)]
pub struct InterviewConfig {
    pub host: String,
    pub port: u16,
    pub connect_attempts: u32,
    pub retry_delay_secs: u64,
    /// Zero disables the candidate socket timeout.
    pub socket_timeout_secs: u64,
    /// Command prefix used to open the candidate process in a new terminal.
    pub candidate_terminal: Option<String>,
}

impl InterviewConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        resolve_addr("INTERVIEW_HOST", &self.host, self.port)
    }

    pub fn connect_policy(&self) -> ConnectPolicy {
        ConnectPolicy {
            attempts: self.connect_attempts,
            retry_delay: Duration::from_secs(self.retry_delay_secs),
            socket_timeout: (self.socket_timeout_secs > 0)
                .then(|| Duration::from_secs(self.socket_timeout_secs)),
        }
    }
}

/// Roster location and ranking limits.
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    pub roster_csv: PathBuf,
    pub roster_source: RosterSource,
    pub top_n: usize,
    pub min_skill_overlap: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { var: &'static str, value: String },
    InvalidHost {
        var: &'static str,
        source: std::net::AddrParseError,
    },
    InvalidRosterSource { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { var, value } => {
                write!(f, "{var} must be a valid non-negative number, got '{value}'")
            }
            ConfigError::InvalidHost { var, .. } => {
                write!(f, "{var} must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRosterSource { value } => write!(
                f,
                "MATCH_ROSTER_SOURCE must be 'standard' or 'marketplace', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source, .. } => Some(source),
            ConfigError::InvalidNumber { .. } | ConfigError::InvalidRosterSource { .. } => None,
        }
    }
}

fn var_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

fn optional_var(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        Err(_) => Ok(default),
    }
}

fn resolve_addr(var: &'static str, host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    if host.eq_ignore_ascii_case("localhost") {
        return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), port));
    }

    let ip: IpAddr = host
        .parse()
        .map_err(|source| ConfigError::InvalidHost { var, source })?;

    Ok(SocketAddr::new(ip, port))
}
