use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the libsql database file; `None` selects an in-memory store.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    /// Access token TTL in seconds.
    pub jwt_ttl: i64,
    /// Clock-skew tolerance for expiry checks, in seconds. Strict by default.
    pub jwt_leeway: u64,
}

impl Config {
    /// Loads configuration from the environment (and `.env` if present).
    ///
    /// `JWT_SECRET` is required; a missing or empty value is a configuration
    /// error and the process must not start serving.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::Config("JWT_SECRET is not set".to_string()))?;
        if jwt_secret.is_empty() {
            return Err(AppError::Config("JWT_SECRET is empty".to_string()));
        }

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|e| AppError::Config(format!("Invalid PORT: {}", e)))?,
            },
            database: DatabaseConfig {
                path: env::var("DATABASE_PATH").ok(),
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "vendra".to_string()),
                jwt_audience: env::var("JWT_AUDIENCE")
                    .unwrap_or_else(|_| "vendra-api".to_string()),
                jwt_ttl: env::var("JWT_TTL_SECONDS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse()
                    .map_err(|e| AppError::Config(format!("Invalid JWT_TTL_SECONDS: {}", e)))?,
                jwt_leeway: env::var("JWT_LEEWAY_SECONDS")
                    .unwrap_or_else(|_| "0".to_string())
                    .parse()
                    .map_err(|e| {
                        AppError::Config(format!("Invalid JWT_LEEWAY_SECONDS: {}", e))
                    })?,
            },
        })
    }
}
