//! Shared test utilities for the artist lookup workspace
//!
//! This crate provides a mock of the Spotify accounts service and Web API
//! for testing without network dependencies. It is used by the client,
//! console and web test suites.
//!
//! # Example
//!
//! ```rust,ignore
//! use artist_lookup_test_utils::{ArtistFixture, MockSpotifyServer};
//!
//! #[tokio::test]
//! async fn test_with_mocks() {
//!     let spotify = MockSpotifyServer::start().await;
//!     spotify.mock_token_success().await;
//!     spotify.mock_search_artists(vec![ArtistFixture::doechii()]).await;
//!
//!     // Use spotify.config() to configure your client
//! }
//! ```

mod spotify;

pub use spotify::{ArtistFixture, MockSpotifyServer, TEST_CLIENT_ID, TEST_CLIENT_SECRET};
