use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use artist_lookup_console::{run_connection_test, write_summary, Cli, ConnectionReport};
use artist_lookup_shared_config::{AppConfig, Credentials};
use artist_lookup_spotify_client::SpotifyClient;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load environment variables
    if let Some(path) = &cli.env_file {
        dotenvy::from_path(path).ok();
    } else {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Logs go to stderr so stdout only carries the report
    let default_filter = if cli.verbose {
        "artist_lookup_console=debug,artist_lookup_spotify_client=debug".to_string()
    } else {
        config.log_filter("artist_lookup_console=info")
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let source = cli.credential_source(&config);

    tracing::debug!(environment = %config.environment, source = %source, "Loading credentials");

    let credentials = Credentials::load(&source).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Could not load Spotify credentials");
        Credentials::default()
    });

    let client = SpotifyClient::new(&config.spotify).context("Failed to build Spotify client")?;

    let mut stdout = io::stdout();
    let outcome = if cli.json {
        let outcome = run_connection_test(&client, &credentials, &cli.artist, &mut io::sink()).await?;
        let report = ConnectionReport::from_outcome(&cli.artist, &outcome);
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
        outcome
    } else {
        let outcome = run_connection_test(&client, &credentials, &cli.artist, &mut stdout).await?;
        write_summary(&mut stdout, &outcome)?;
        outcome
    };

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
