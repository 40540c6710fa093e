use axum::http::HeaderValue;

/// Default SQLite file, created next to the working directory on first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://monarch.db";

/// Default browser origins for the local frontend dev server.
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {key} ({value:?}): {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Connection string for the project store, `sqlite://` or `postgresql://`.
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var        | Default                                       |
    /// |----------------|-----------------------------------------------|
    /// | `HOST`         | `0.0.0.0`                                     |
    /// | `PORT`         | `8000`                                        |
    /// | `DATABASE_URL` | `sqlite://monarch.db`                         |
    /// | `CORS_ORIGINS` | `http://localhost:3000,http://127.0.0.1:3000` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "0.0.0.0");
        let port = parse_number("PORT", var("PORT", "8000"))?;
        let database_url = var("DATABASE_URL", DEFAULT_DATABASE_URL);
        let cors_origins = parse_origins(&var("CORS_ORIGINS", DEFAULT_CORS_ORIGINS))?;

        Ok(Self {
            host,
            port,
            database_url,
            cors_origins,
        })
    }
}

fn parse_number<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        reason: e.to_string(),
        value,
    })
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| ConfigError {
                key: "CORS_ORIGINS",
                value: origin.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
