//! Web server configuration

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use artist_lookup_shared_config::{AppConfig, Credentials, Environment, SpotifyConfig};

/// Web server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Configuration shared with the console tool
    pub common: AppConfig,

    /// Server port (default: 8080)
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let common = AppConfig::from_env().context("Failed to load config")?;

        Ok(Self {
            common,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT value")?,
        })
    }

    /// Address the server binds to
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn spotify(&self) -> &SpotifyConfig {
        &self.common.spotify
    }

    pub fn environment(&self) -> Environment {
        self.common.environment
    }

    /// Load credentials once for the lifetime of the server
    ///
    /// A missing or unreadable source yields empty credentials, so every
    /// search reports the authentication failure instead of the server
    /// refusing to start.
    pub fn load_credentials(&self) -> Credentials {
        self.common.load_credentials().unwrap_or_else(|e| {
            tracing::warn!(
                source = %self.common.credential_source,
                error = %e,
                "Could not load Spotify credentials"
            );
            Credentials::default()
        })
    }
}
