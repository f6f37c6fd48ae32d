/*
 * Responsibility
 * - Load configuration from the environment (listen address, CORS, auth settings)
 * - Validate at startup: a missing required key fails the boot, not the first request
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth_jwt_secret: String,
    pub auth_token_leeway_seconds: u64,
    /// Requests under this path prefix bypass the authentication gate.
    pub auth_exempt_prefix: String,
    /// Seed entries for the in-memory identity store (`email:ROLE1|ROLE2`, comma-separated).
    pub auth_users: Vec<String>,

    pub request_timeout_seconds: u64,
    pub request_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_jwt_secret = std::env::var("AUTH_JWT_SECRET")
            .map_err(|_| ConfigError::Missing("AUTH_JWT_SECRET"))?;
        if auth_jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("AUTH_JWT_SECRET"));
        }

        let auth_token_leeway_seconds = std::env::var("AUTH_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        // An empty prefix would exempt every path, i.e. disable authentication.
        let auth_exempt_prefix =
            std::env::var("AUTH_EXEMPT_PREFIX").unwrap_or_else(|_| "/api/auth/".to_string());
        if auth_exempt_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("AUTH_EXEMPT_PREFIX"));
        }

        let auth_users = std::env::var("AUTH_USERS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let request_timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let request_body_limit_bytes = std::env::var("REQUEST_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            auth_jwt_secret,
            auth_token_leeway_seconds,
            auth_exempt_prefix,
            auth_users,
            request_timeout_seconds,
            request_body_limit_bytes,
        })
    }
}
