use std::time::Duration;

use lessonplans_core::cache::{CacheConfig, DEFAULT_CACHE_TTL_SECS};

use crate::auth::jwt::JwtConfig;

/// Default outbound connect timeout in milliseconds.
const DEFAULT_HTTP_CONNECT_TIMEOUT_MS: u64 = 5_000;
/// Default outbound read timeout in milliseconds.
const DEFAULT_HTTP_READ_TIMEOUT_MS: u64 = 30_000;

/// Timeouts for outbound calls to peer services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpClientConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_millis(DEFAULT_HTTP_CONNECT_TIMEOUT_MS),
            read_timeout: Duration::from_millis(DEFAULT_HTTP_READ_TIMEOUT_MS),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Outbound HTTP client timeouts.
    pub http_client: HttpClientConfig,
    /// Lesson plan cache expiry.
    pub cache: CacheConfig,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

/// Read `name` from the environment, falling back to `default`.
///
/// Panics if the variable is set but does not parse.
fn env_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{name} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `HTTP_CONNECT_TIMEOUT_MS` | `5000`                     |
    /// | `HTTP_READ_TIMEOUT_MS`    | `30000`                    |
    /// | `CACHE_TTL_SECS`          | `300`                      |
    /// | `CACHE_MAX_IDLE_SECS`     | `300`                      |
    ///
    /// # Panics
    ///
    /// Panics if a variable is set to an unparseable value, or if the JWT
    /// configuration is missing (see [`JwtConfig::from_env`]).
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);

        let http_client = HttpClientConfig {
            connect_timeout: Duration::from_millis(env_or(
                "HTTP_CONNECT_TIMEOUT_MS",
                DEFAULT_HTTP_CONNECT_TIMEOUT_MS,
            )),
            read_timeout: Duration::from_millis(env_or(
                "HTTP_READ_TIMEOUT_MS",
                DEFAULT_HTTP_READ_TIMEOUT_MS,
            )),
        };

        let cache = CacheConfig {
            time_to_live: Duration::from_secs(env_or("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)),
            max_idle: Duration::from_secs(env_or("CACHE_MAX_IDLE_SECS", DEFAULT_CACHE_TTL_SECS)),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            http_client,
            cache,
            jwt,
        }
    }
}
