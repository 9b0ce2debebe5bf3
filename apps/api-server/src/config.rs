//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use anyhow::bail;
use quill_infra::JwtConfig;
use quill_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Refuses to start in production with the placeholder JWT secret.
    pub fn from_env() -> anyhow::Result<Self> {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse_env("DB_MAX_CONNECTIONS", defaults.max_connections),
                min_connections: parse_env("DB_MIN_CONNECTIONS", defaults.min_connections),
                ..defaults
            }
        });

        let jwt_defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: env::var("JWT_SECRET").unwrap_or(jwt_defaults.secret),
            access_ttl_minutes: parse_env("JWT_ACCESS_TTL_MINUTES", jwt_defaults.access_ttl_minutes),
            refresh_ttl_days: parse_env("JWT_REFRESH_TTL_DAYS", jwt_defaults.refresh_ttl_days),
            issuer: env::var("JWT_ISSUER").unwrap_or(jwt_defaults.issuer),
        };

        if jwt.uses_default_secret() {
            if is_production() {
                bail!("JWT_SECRET must be set when RUST_ENV is production");
            }
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_env("PORT", 8080),
            database,
            jwt,
        })
    }
}

fn is_production() -> bool {
    env::var("RUST_ENV")
        .map(|v| v == "production" || v == "prod")
        .unwrap_or(false)
}

/// Read and parse an environment variable, falling back to `default` when it
/// is unset or malformed.
fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
