//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! ## Server
//! - `NEXUS_HOST` - Bind address (default: 127.0.0.1)
//! - `NEXUS_PORT` - Listen port (default: 3000)
//! - `NEXUS_STATIC_DIR` - Static asset directory (default: crates/admin/static)
//! - `NEXUS_LOG_FORMAT` - `text` or `json` (default: text)
//!
//! ## Simulated backend
//! - `NEXUS_API_LATENCY_MS` - Delay before each data accessor resolves (default: 0)
//! - `NEXUS_API_OFFLINE` - Make every data accessor fail (default: false)
//! - `NEXUS_LOGIN_DELAY_MS` - Simulated login round trip (default: 1000)
//!
//! ## Count-up animation
//! - `NEXUS_COUNTUP_DURATION_MS` - Animation length (default: 2000)
//! - `NEXUS_COUNTUP_FPS` - Keyframes emitted per second (default: 30)
//!
//! ## Error tracking
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Environment tag
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - 0.0 to 1.0 (default: 1.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATIC_DIR: &str = "crates/admin/static";
const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;
const DEFAULT_COUNTUP_DURATION_MS: u64 = 2000;
const DEFAULT_COUNTUP_FPS: u32 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Simulated data source behaviour
    pub api: ApiConfig,
    /// Simulated login round trip
    pub login_delay: Duration,
    /// Count-up animation settings
    pub count_up: CountUpConfig,
    /// Sentry error tracking (optional)
    pub sentry: Option<SentryConfig>,
}

/// Behaviour of the in-memory data source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiConfig {
    /// Delay before every accessor resolves
    pub latency: Duration,
    /// When set, every accessor fails as if the backend were unreachable
    pub offline: bool,
}

/// Count-up animation settings.
#[derive(Debug, Clone, Copy)]
pub struct CountUpConfig {
    pub duration: Duration,
    pub fps: u32,
}

impl Default for CountUpConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_COUNTUP_DURATION_MS),
            fps: DEFAULT_COUNTUP_FPS,
        }
    }
}

/// Sentry configuration.
///
/// Implements `Debug` manually to redact the DSN, which embeds the project key.
#[derive(Clone)]
pub struct SentryConfig {
    pub dsn: String,
    /// Environment tag (e.g., "development", "production")
    pub environment: Option<String>,
    /// Error sample rate (0.0 to 1.0)
    pub sample_rate: f32,
    /// Traces sample rate for performance monitoring (0.0 to 1.0)
    pub traces_sample_rate: f32,
}

impl std::fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryConfig")
            .field("dsn", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("sample_rate", &self.sample_rate)
            .field("traces_sample_rate", &self.traces_sample_rate)
            .finish()
    }
}

impl SentryConfig {
    fn from_env() -> Option<Self> {
        let dsn = get_optional_env("SENTRY_DSN")?;
        Some(Self {
            dsn,
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: get_optional_env("SENTRY_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
            traces_sample_rate: get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_owned(),
            log_format: LogFormat::Text,
            api: ApiConfig::default(),
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            count_up: CountUpConfig::default(),
            sentry: None,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let host = parse_env("NEXUS_HOST", defaults.host)?;
        let port = parse_env("NEXUS_PORT", defaults.port)?;
        let static_dir = get_env_or_default("NEXUS_STATIC_DIR", DEFAULT_STATIC_DIR);
        let log_format = parse_env("NEXUS_LOG_FORMAT", LogFormat::Text)?;

        let api = ApiConfig {
            latency: Duration::from_millis(parse_env("NEXUS_API_LATENCY_MS", 0)?),
            offline: parse_flag("NEXUS_API_OFFLINE")?,
        };
        let login_delay =
            Duration::from_millis(parse_env("NEXUS_LOGIN_DELAY_MS", DEFAULT_LOGIN_DELAY_MS)?);

        let fps = parse_env("NEXUS_COUNTUP_FPS", DEFAULT_COUNTUP_FPS)?;
        if fps == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "NEXUS_COUNTUP_FPS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let count_up = CountUpConfig {
            duration: Duration::from_millis(parse_env(
                "NEXUS_COUNTUP_DURATION_MS",
                DEFAULT_COUNTUP_DURATION_MS,
            )?),
            fps,
        };

        Ok(Self {
            host,
            port,
            static_dir,
            log_format,
            api,
            login_delay,
            count_up,
            sentry: SentryConfig::from_env(),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a boolean flag (`true`/`false`/`1`/`0`), defaulting to `false`.
fn parse_flag(key: &str) -> Result<bool, ConfigError> {
    get_optional_env(key).map_or(Ok(false), |raw| parse_bool(key, &raw))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got `{other}`"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = DashboardConfig {
            port: 3100,
            ..DashboardConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3100);
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.login_delay, Duration::from_secs(1));
        assert_eq!(config.count_up.duration, Duration::from_secs(2));
        assert_eq!(config.api.latency, Duration::ZERO);
        assert!(!config.api.offline);
        assert!(config.sentry.is_none());
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u16>("NEXUS_PORT", "not-a-port").unwrap_err();
        assert!(err.to_string().contains("NEXUS_PORT"));
    }

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "off").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_sentry_config_debug_redacts_dsn() {
        let config = SentryConfig {
            dsn: "https://public-key@o0.ingest.sentry.io/1".to_string(),
            environment: Some("test".to_string()),
            sample_rate: 1.0,
            traces_sample_rate: 0.5,
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("public-key"));
    }
}
