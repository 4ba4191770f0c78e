//! Connection test report
//!
//! Runs one lookup and prints a human-readable line per step. The lookup
//! stops at the first failing stage; the caller decides the exit status
//! from the returned [`SearchOutcome`].

use std::io::{self, Write};

use artist_lookup_spotify_client::{
    ArtistRecord, Credentials, LookupError, SearchOutcome, SpotifyClient,
};
use serde::Serialize;
use tracing::{info, warn};

/// Printed after a failure that looks like a certificate problem
pub const TLS_HINT: &str =
    "Try setting SPOTIFY_DANGER_ACCEPT_INVALID_CERTS=true if you're just testing";

/// Machine-readable summary of one connection test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionReport {
    pub artist_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionReport {
    /// Summarize an outcome; `requested` is used as the name on failure
    pub fn from_outcome(requested: &str, outcome: &SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Success(artist) => Self {
                artist_name: artist.name.clone(),
                artist_id: Some(artist.id.clone()),
                success: true,
                error: None,
            },
            SearchOutcome::Failure(reason) => Self {
                artist_name: requested.trim().to_string(),
                artist_id: None,
                success: false,
                error: Some(reason.clone()),
            },
        }
    }
}

/// Fetch a token, search for `artist_name` and print each step to `out`
///
/// # Errors
/// Only write failures on `out` are returned; lookup failures become
/// [`SearchOutcome::Failure`].
pub async fn run_connection_test<W: Write>(
    client: &SpotifyClient,
    credentials: &Credentials,
    artist_name: &str,
    out: &mut W,
) -> io::Result<SearchOutcome> {
    writeln!(out, "Testing Spotify API connection...")?;

    if client.tls_verification_disabled() {
        writeln!(out, "Warning: SSL verification is disabled!")?;
    }

    // Input problems are reported before anything is sent
    if let Err(e) = SpotifyClient::validate_artist_name(artist_name) {
        return fail(out, LookupError::from(e));
    }

    let token = match client.get_access_token(credentials).await {
        Ok(token) => token,
        Err(e) => return fail(out, LookupError::from(e)),
    };
    writeln!(out, "✓ Successfully obtained Spotify access token")?;

    let artist = match client.search_artist(&token, artist_name).await {
        Ok(artist) => artist,
        Err(e) => return fail(out, LookupError::from(e)),
    };
    write_artist(out, &artist)?;

    info!(artist = %artist.name, id = %artist.id, "Connection test passed");
    Ok(SearchOutcome::Success(artist))
}

/// Print the closing line for an outcome
pub fn write_summary<W: Write>(out: &mut W, outcome: &SearchOutcome) -> io::Result<()> {
    match outcome {
        SearchOutcome::Success(_) => writeln!(out, "\nConnection test successful!"),
        SearchOutcome::Failure(reason) => writeln!(out, "\nConnection test failed: {}", reason),
    }
}

fn write_artist<W: Write>(out: &mut W, artist: &ArtistRecord) -> io::Result<()> {
    writeln!(out, "✓ Successfully found artist: {}", artist.name)?;
    writeln!(out, "  Artist ID: {}", artist.id)?;
    writeln!(out, "  Popularity: {}/100", artist.popularity)?;
    writeln!(out, "  Genres: {}", artist.genres.join(", "))?;
    writeln!(out, "  Followers: {}", artist.followers_display())?;
    writeln!(out, "  Profile: {}", artist.profile_url)?;
    if let Some(image_url) = &artist.image_url {
        writeln!(out, "  Image: {}", image_url)?;
    }
    Ok(())
}

fn fail<W: Write>(out: &mut W, error: LookupError) -> io::Result<SearchOutcome> {
    warn!(error = %error, "Connection test failed");
    writeln!(out, "Error: {}", error)?;
    if error.is_tls() {
        writeln!(out, "{}", TLS_HINT)?;
    }
    Ok(SearchOutcome::Failure(error.user_message()))
}
