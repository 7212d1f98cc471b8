use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::auth::jwt::{DEFAULT_EXPIRATION_SECONDS, DEFAULT_REFRESH_EXPIRATION_SECONDS};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_expiration_seconds: i64,
    pub jwt_refresh_expiration_seconds: i64,
    /// CORS origins; empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "recipe-server".to_string()),
            jwt_expiration_seconds: env::var("JWT_EXPIRATION_SECONDS")
                .map(|v| v.parse())
                .unwrap_or(Ok(DEFAULT_EXPIRATION_SECONDS))
                .context("JWT_EXPIRATION_SECONDS must be a number of seconds")?,
            jwt_refresh_expiration_seconds: env::var("JWT_REFRESH_EXPIRATION_SECONDS")
                .map(|v| v.parse())
                .unwrap_or(Ok(DEFAULT_REFRESH_EXPIRATION_SECONDS))
                .context("JWT_REFRESH_EXPIRATION_SECONDS must be a number of seconds")?,
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
