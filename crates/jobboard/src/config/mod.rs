use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the client.
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

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_SESSION_PATH: &str = ".jobboard-session.json";

/// Top-level configuration for the client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let base_url = env::var("APP_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let login_path =
            env::var("APP_LOGIN_PATH").unwrap_or_else(|_| DEFAULT_LOGIN_PATH.to_string());
        let request_timeout = match env::var("APP_REQUEST_TIMEOUT_SECS") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_timeout(&raw)?),
            _ => None,
        };
        let api = ApiConfig::new(base_url, login_path, request_timeout)?;

        let session_path = env::var("APP_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_PATH));

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            api,
            session: SessionConfig { path: session_path },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            value: raw.to_string(),
        }),
    }
}

/// Where the remote API lives and how the transport talks to it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub login_path: String,
    /// `None` leaves the HTTP client's defaults in place.
    pub request_timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(
        base_url: impl Into<String>,
        login_path: impl Into<String>,
        request_timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        url::Url::parse(&base_url).map_err(|source| ConfigError::InvalidApiUrl {
            value: base_url.clone(),
            source,
        })?;
        Ok(Self {
            base_url,
            login_path: login_path.into(),
            request_timeout,
        })
    }

    /// Point an otherwise default configuration at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(base_url, DEFAULT_LOGIN_PATH, None)
    }
}

/// Durable session location.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub path: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidApiUrl {
        value: String,
        source: url::ParseError,
    },
    InvalidTimeout {
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidApiUrl { value, .. } => {
                write!(f, "APP_API_URL must be an absolute URL (got '{value}')")
            }
            ConfigError::InvalidTimeout { value } => write!(
                f,
                "APP_REQUEST_TIMEOUT_SECS must be a positive number of seconds (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidApiUrl { source, .. } => Some(source),
            ConfigError::InvalidTimeout { .. } => None,
        }
    }
}
