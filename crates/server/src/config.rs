//! Server configuration loaded from environment variables.
//!
//! All configuration is carried by an explicit [`ServerConfig`] struct that is
//! passed to components at construction. There is no ambient global state.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TRUELINE_DATABASE_URL` - `PostgreSQL` connection string
//! - `TRUELINE_BASE_URL` - Public URL the platform is served from
//!
//! ## Optional
//! - `TRUELINE_HOST` - Bind address (default: 127.0.0.1)
//! - `TRUELINE_PORT` - Listen port (default: 3000)
//! - `TRUELINE_VCF_DISPOSITION` - `attachment` or `inline` (default: attachment)
//! - `TRUELINE_EVENT_QUEUE_CAPACITY` - Bounded analytics event queue size (default: 1024)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry tracing sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How the vCard endpoint asks the browser to handle the file.
///
/// Whether a scanned contact is saved straight to the address book
/// (`attachment`) or previewed first (`inline`) is a deployment choice; the
/// vCard generator itself knows nothing about transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VcfDisposition {
    #[default]
    Attachment,
    Inline,
}

impl VcfDisposition {
    /// Header value prefix for `Content-Disposition`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attachment => "attachment",
            Self::Inline => "inline",
        }
    }
}

impl FromStr for VcfDisposition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "attachment" => Ok(Self::Attachment),
            "inline" => Ok(Self::Inline),
            other => Err(format!("expected 'attachment' or 'inline', got '{other}'")),
        }
    }
}

/// Trueline application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the platform
    pub base_url: String,
    /// How vCard downloads are served
    pub vcf_disposition: VcfDisposition,
    /// Capacity of the bounded scan/save event queue
    pub event_queue_capacity: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Sentry tracing sample rate
    pub sentry_traces_sample_rate: f32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("TRUELINE_DATABASE_URL")?;
        let host = parse_env_or("TRUELINE_HOST", "127.0.0.1")?;
        let port = parse_env_or("TRUELINE_PORT", "3000")?;
        let base_url = get_required_env("TRUELINE_BASE_URL")?;
        let vcf_disposition = parse_env_or("TRUELINE_VCF_DISPOSITION", "attachment")?;
        let event_queue_capacity = parse_env_or("TRUELINE_EVENT_QUEUE_CAPACITY", "1024")?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_traces_sample_rate = parse_env_or("SENTRY_TRACES_SAMPLE_RATE", "0.0")?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            vcf_disposition,
            event_queue_capacity,
            sentry_dsn,
            sentry_environment,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL` (used by managed
/// `PostgreSQL` attach flows).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse an environment variable with a default value.
fn parse_env_or<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
