use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_SUBMIT_LATENCY_MS: u64 = 1500;
const DEFAULT_RESET_DELAY_MS: u64 = 300;

/// Distinguishes runtime behavior for different stages of the tool.
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

    fn default_log_format(self) -> LogFormat {
        match self {
            Self::Development => LogFormat::Pretty,
            Self::Test | Self::Production => LogFormat::Compact,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub submission: SubmissionConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let latency = duration_var("APP_SUBMIT_LATENCY_MS", DEFAULT_SUBMIT_LATENCY_MS)?;
        let reset_delay = duration_var("APP_RESET_DELAY_MS", DEFAULT_RESET_DELAY_MS)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = match env::var("APP_LOG_FORMAT") {
            Ok(value) => LogFormat::parse(&value).ok_or(ConfigError::InvalidLogFormat { value })?,
            Err(_) => environment.default_log_format(),
        };

        Ok(Self {
            environment,
            submission: SubmissionConfig {
                latency,
                reset_delay,
            },
            telemetry: TelemetryConfig {
                log_level,
                format,
                ansi: environment == AppEnvironment::Development,
            },
        })
    }
}

fn duration_var(var: &'static str, default_ms: u64) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidDuration { var, value }),
        Err(_) => Ok(Duration::from_millis(default_ms)),
    }
}

/// Timings for the simulated round trip and the post-dismissal reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionConfig {
    pub latency: Duration,
    pub reset_delay: Duration,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_SUBMIT_LATENCY_MS),
            reset_delay: Duration::from_millis(DEFAULT_RESET_DELAY_MS),
        }
    }
}

/// Layout of log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line with source locations.
    Pretty,
    Compact,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Tracing controls. Colors are only enabled for development runs.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidDuration { var: &'static str, value: String },
    InvalidLogFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDuration { var, value } => {
                write!(f, "{var} must be a whole number of milliseconds (got '{value}')")
            }
            ConfigError::InvalidLogFormat { value } => {
                write!(f, "APP_LOG_FORMAT must be 'pretty' or 'compact' (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
