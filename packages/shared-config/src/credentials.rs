//! Spotify client credentials and the sources they are loaded from
//!
//! Local runs read `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET` from the process
//! environment, falling back to a `.env` file. Hosted deployments read the same
//! keys from a TOML secrets file instead.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{ConfigError, ConfigResult, Environment};

/// Environment variable holding the Spotify client identifier
pub const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";

/// Environment variable holding the Spotify client secret
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";

/// Environment variable forcing the secrets-file source at a given path
pub const SECRETS_FILE_VAR: &str = "SPOTIFY_SECRETS_FILE";

/// Secrets file used by hosted deployments when none is configured
pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";

/// Client-credentials pair for the Spotify accounts service
///
/// A value whose fields are empty is still a valid `Credentials`; callers
/// check [`Credentials::is_complete`] before using it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Application client identifier
    pub client_id: String,
    /// Application client secret
    pub client_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &"[REDACTED]")
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from explicit values
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Both values are present and non-blank
    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }

    /// Load credentials from the given source
    ///
    /// Absent keys yield empty strings. Only an unreadable or malformed
    /// secrets file is reported as an error.
    pub fn load(source: &CredentialSource) -> ConfigResult<Self> {
        match source {
            CredentialSource::EnvFile(path) => Ok(Self::from_env_file(path.as_deref())),
            CredentialSource::SecretsFile(path) => Self::from_secrets_file(path),
        }
    }

    /// Read credentials from the process environment with a `.env` fallback
    ///
    /// With `path` unset the usual `.env` lookup (current directory and its
    /// parents) is used. The process environment is never modified and always
    /// takes precedence over file values.
    pub fn from_env_file(path: Option<&Path>) -> Self {
        let file_vars = read_env_file(path);
        let lookup = |name: &str| {
            env::var(name)
                .ok()
                .filter(|value| !value.is_empty())
                .or_else(|| file_vars.get(name).cloned())
                .unwrap_or_default()
        };

        let credentials = Self {
            client_id: lookup(CLIENT_ID_VAR),
            client_secret: lookup(CLIENT_SECRET_VAR),
        };

        if !credentials.is_complete() {
            warn!(
                "{} or {} not found in environment or .env file",
                CLIENT_ID_VAR, CLIENT_SECRET_VAR
            );
        }
        credentials
    }

    /// Read credentials from a TOML secrets file
    pub fn from_secrets_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::SecretsFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let secrets: SecretsFile = toml::from_str(&content).map_err(|e| ConfigError::SecretsFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "Loaded Spotify credentials from secrets file");

        let credentials = Self {
            client_id: secrets.client_id,
            client_secret: secrets.client_secret,
        };
        if !credentials.is_complete() {
            warn!(path = %path.display(), "Secrets file is missing Spotify credentials");
        }
        Ok(credentials)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    #[serde(rename = "SPOTIFY_CLIENT_ID", default)]
    client_id: String,
    #[serde(rename = "SPOTIFY_CLIENT_SECRET", default)]
    client_secret: String,
}

fn read_env_file(path: Option<&Path>) -> HashMap<String, String> {
    let iter = match path {
        Some(path) => dotenvy::from_path_iter(path),
        None => dotenvy::dotenv_iter(),
    };

    match iter {
        Ok(iter) => iter
            .filter_map(|item| match item {
                Ok(pair) => Some(pair),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed .env entry");
                    None
                }
            })
            .collect(),
        Err(e) if e.not_found() => {
            debug!("No .env file found");
            HashMap::new()
        }
        Err(e) => {
            warn!(error = %e, "Failed to read .env file");
            HashMap::new()
        }
    }
}

/// Where credentials come from, chosen by deployment context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Process environment plus an optional explicit `.env` path
    EnvFile(Option<PathBuf>),
    /// Hosted secrets file in TOML format
    SecretsFile(PathBuf),
}

impl CredentialSource {
    /// Default source for a deployment environment
    pub fn for_environment(environment: Environment) -> Self {
        if environment.is_hosted() {
            Self::SecretsFile(PathBuf::from(DEFAULT_SECRETS_FILE))
        } else {
            Self::EnvFile(None)
        }
    }

    /// Resolve the source, honouring `SPOTIFY_SECRETS_FILE` when set
    pub fn from_env(environment: Environment) -> Self {
        match env::var(SECRETS_FILE_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::SecretsFile(PathBuf::from(path)),
            _ => Self::for_environment(environment),
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvFile(Some(path)) => write!(f, "environment ({})", path.display()),
            Self::EnvFile(None) => write!(f, "environment (.env)"),
            Self::SecretsFile(path) => write!(f, "secrets file ({})", path.display()),
        }
    }
}
