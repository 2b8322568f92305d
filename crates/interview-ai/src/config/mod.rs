use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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
    pub scoring: ScoringConfig,
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

        let scoring = ScoringConfig::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring,
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

/// Endpoints and polling behavior for the external scoring collaborators.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub evaluator_url: String,
    pub design_scorer_url: String,
    pub judge_url: String,
    pub judge_api_key: Option<String>,
    pub judge_poll_attempts: u32,
    pub judge_poll_delay: Duration,
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let evaluator_url = env::var("EVALUATOR_URL")
            .unwrap_or_else(|_| "http://localhost:8000/evaluate".to_string());
        let design_scorer_url = env::var("DESIGN_SCORER_URL")
            .unwrap_or_else(|_| "http://localhost:8000/score".to_string());
        let judge_url =
            env::var("JUDGE_URL").unwrap_or_else(|_| "https://judge0-ce.p.rapidapi.com".to_string());
        let judge_api_key = env::var("JUDGE_API_KEY").ok().filter(|key| !key.is_empty());

        let judge_poll_attempts = env::var("JUDGE_POLL_ATTEMPTS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidPollAttempts)?;
        let delay_ms = env::var("JUDGE_POLL_DELAY_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidPollDelay)?;

        Ok(Self {
            evaluator_url,
            design_scorer_url,
            judge_url,
            judge_api_key,
            judge_poll_attempts,
            judge_poll_delay: Duration::from_millis(delay_ms),
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPollAttempts,
    InvalidPollDelay,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPollAttempts => {
                write!(f, "JUDGE_POLL_ATTEMPTS must be a valid u32")
            }
            ConfigError::InvalidPollDelay => {
                write!(f, "JUDGE_POLL_DELAY_MS must be a valid u64 (milliseconds)")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("EVALUATOR_URL");
        env::remove_var("DESIGN_SCORER_URL");
        env::remove_var("JUDGE_URL");
        env::remove_var("JUDGE_API_KEY");
        env::remove_var("JUDGE_POLL_ATTEMPTS");
        env::remove_var("JUDGE_POLL_DELAY_MS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.scoring.judge_poll_attempts, 10);
        assert_eq!(config.scoring.judge_poll_delay, Duration::from_millis(1000));
        assert!(config.scoring.judge_api_key.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn rejects_bad_poll_attempts() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("JUDGE_POLL_ATTEMPTS", "many");
        let err = AppConfig::load().expect_err("invalid poll attempts rejected");
        assert!(matches!(err, ConfigError::InvalidPollAttempts));
    }
}
