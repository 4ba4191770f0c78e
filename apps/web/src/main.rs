use anyhow::Context;
use artist_lookup_spotify_client::SpotifyClient;
use artist_lookup_web::{app, Config, SearchState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .common
                    .log_filter("artist_lookup_web=debug,tower_http=debug")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        environment = %config.environment(),
        credentials = %config.common.credential_source,
        "Starting artist search server"
    );

    let credentials = config.load_credentials();
    let client = SpotifyClient::new(config.spotify()).context("Failed to build Spotify client")?;

    let router = app(SearchState::new(client, credentials));

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
