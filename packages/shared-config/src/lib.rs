//! Shared configuration types for the artist lookup tools
//!
//! This crate provides the configuration used by both the console report
//! and the web form, so that credentials and endpoints are resolved the
//! same way in every deployment.

mod credentials;
mod error;
mod spotify;

pub use credentials::{
    CredentialSource, Credentials, CLIENT_ID_VAR, CLIENT_SECRET_VAR, DEFAULT_SECRETS_FILE,
    SECRETS_FILE_VAR,
};
pub use error::{ConfigError, ConfigResult};
pub use spotify::{SpotifyConfig, DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URL};

use std::env;

/// Common configuration shared between the entry points
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Spotify endpoint configuration
    pub spotify: SpotifyConfig,

    /// Where client credentials are read from
    pub credential_source: CredentialSource,

    /// Environment mode (development, staging, production)
    pub environment: Environment,

    /// Log filter from `LOG_LEVEL`; `RUST_LOG` still takes precedence in the binaries
    pub log_level: Option<String>,
}

/// Application environment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "staging" | "stage" => Self::Staging,
            _ => Self::Development,
        })
    }
}

impl Environment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Hosted deployments read credentials from a secrets file
    pub fn is_hosted(&self) -> bool {
        !self.is_development()
    }

    /// Read the environment mode from `ENVIRONMENT`
    pub fn from_env() -> Self {
        env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .parse()
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl AppConfig {
    /// Load common configuration from environment variables
    ///
    /// Disabling TLS verification is refused in production.
    pub fn from_env() -> ConfigResult<Self> {
        let environment = Environment::from_env();
        let config = Self {
            spotify: SpotifyConfig::from_env()?,
            credential_source: CredentialSource::from_env(environment),
            environment,
            log_level: env::var("LOG_LEVEL").ok().filter(|s| !s.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> ConfigResult<()> {
        if self.environment.is_production() && self.spotify.danger_accept_invalid_certs {
            return Err(ConfigError::ValidationError(
                "SPOTIFY_DANGER_ACCEPT_INVALID_CERTS cannot be enabled in production".to_string(),
            ));
        }
        Ok(())
    }

    /// Filter directive for the log subscriber, `default` when `LOG_LEVEL` is unset
    pub fn log_filter(&self, default: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| default.to_string())
    }

    /// Load credentials from the configured source
    pub fn load_credentials(&self) -> ConfigResult<Credentials> {
        Credentials::load(&self.credential_source)
    }
}

/// Helper function to get an optional environment variable with a default
pub fn get_env_or_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Helper function to parse an environment variable into a specific type
pub fn parse_env<T>(name: &str, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}
