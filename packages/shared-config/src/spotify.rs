//! Spotify Web API endpoint configuration

use crate::{get_env_or_default, parse_env, ConfigError, ConfigResult};

/// Accounts service endpoint for the client-credentials grant
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Base URL of the Web API
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1/";

/// Spotify Web API client configuration
///
/// One value is built per process and handed to the client at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyConfig {
    /// Token endpoint URL
    pub token_url: String,

    /// Web API base URL (the search path is appended to it)
    pub api_base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Skip TLS certificate verification (diagnostics only)
    pub danger_accept_invalid_certs: bool,
}

impl SpotifyConfig {
    /// Load Spotify configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        let config = Self {
            token_url: get_env_or_default("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_base_url: get_env_or_default("SPOTIFY_API_BASE_URL", DEFAULT_API_BASE_URL),
            timeout_secs: parse_env("SPOTIFY_TIMEOUT", 10)?,
            connect_timeout_secs: parse_env("SPOTIFY_CONNECT_TIMEOUT", 5)?,
            danger_accept_invalid_certs: parse_env("SPOTIFY_DANGER_ACCEPT_INVALID_CERTS", false)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration pointing at custom endpoints (useful for testing)
    pub fn with_urls(token_url: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            token_url: token_url.into(),
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Check that both endpoints are absolute URLs
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in [
            ("SPOTIFY_TOKEN_URL", &self.token_url),
            ("SPOTIFY_API_BASE_URL", &self.api_base_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))?;
        }
        Ok(())
    }

    /// Get the full URL for the search endpoint
    pub fn search_url(&self) -> String {
        format!("{}/search", self.api_base_url.trim_end_matches('/'))
    }
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
            danger_accept_invalid_certs: false,
        }
    }
}
