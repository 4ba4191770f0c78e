//! Common helpers for console integration tests

#![allow(dead_code)]

use artist_lookup_console::run_connection_test;
use artist_lookup_spotify_client::{Credentials, SearchOutcome, SpotifyClient};
use artist_lookup_test_utils::MockSpotifyServer;

/// Output captured from one connection test run
pub struct RunOutput {
    pub outcome: SearchOutcome,
    pub text: String,
}

/// Run a connection test against the mock server and capture what it prints
pub async fn run_against(
    server: &MockSpotifyServer,
    credentials: &Credentials,
    artist: &str,
) -> RunOutput {
    let client = SpotifyClient::new(&server.config()).unwrap();
    let mut out = Vec::new();
    let outcome = run_connection_test(&client, credentials, artist, &mut out)
        .await
        .unwrap();

    RunOutput {
        outcome,
        text: String::from_utf8(out).unwrap(),
    }
}
