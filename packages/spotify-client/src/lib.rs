//! Spotify Web API client for artist lookups
//!
//! This crate provides:
//! - Client-credentials token exchange against the accounts service
//! - Single-result artist search
//! - A combined lookup that both presentation layers share
//!
//! # Example
//!
//! ```rust,no_run
//! use artist_lookup_spotify_client::{Credentials, SpotifyClient, SpotifyConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SpotifyClient::new(&SpotifyConfig::default())?;
//! let credentials = Credentials::new("client_id", "client_secret");
//!
//! let token = client.get_access_token(&credentials).await?;
//! let artist = client.search_artist(&token, "Doechii").await?;
//! println!("{} has {} followers", artist.name, artist.followers_display());
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET`: application credentials
//!   (see `artist_lookup_shared_config::Credentials`)

mod client;
mod error;
mod models;

pub use artist_lookup_shared_config::{Credentials, SpotifyConfig};
pub use client::{basic_auth_header, SpotifyClient};
pub use error::{
    AuthError, AuthResult, LookupError, LookupResult, SearchError, SearchResult,
};
pub use models::{group_thousands, AccessToken, ArtistRecord, SearchOutcome};
