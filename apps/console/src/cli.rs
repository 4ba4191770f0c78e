//! Command line arguments

use std::path::PathBuf;

use artist_lookup_shared_config::{AppConfig, CredentialSource};
use clap::Parser;

/// Artist looked up when none is given
pub const DEFAULT_ARTIST: &str = "Doechii";

#[derive(Debug, Clone, Parser)]
#[command(name = "artist-lookup-console")]
#[command(about = "Test the Spotify API connection by looking up one artist")]
pub struct Cli {
    /// Artist to look up
    #[arg(default_value = DEFAULT_ARTIST)]
    pub artist: String,

    /// Read credentials from this .env file instead of ./.env
    #[arg(long, conflicts_with = "secrets_file")]
    pub env_file: Option<PathBuf>,

    /// Read credentials from this TOML secrets file
    #[arg(long)]
    pub secrets_file: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Credential source after applying command line overrides
    pub fn credential_source(&self, config: &AppConfig) -> CredentialSource {
        if let Some(path) = &self.secrets_file {
            CredentialSource::SecretsFile(path.clone())
        } else if let Some(path) = &self.env_file {
            CredentialSource::EnvFile(Some(path.clone()))
        } else {
            config.credential_source.clone()
        }
    }
}
