//! Integration tests for the Spotify client
//!
//! Exercises token exchange and artist search against a wiremock-backed
//! Spotify server, covering success paths, every error variant and the
//! request shape (auth headers, query encoding).

use assert_matches::assert_matches;
use serde_json::json;

use artist_lookup_spotify_client::{
    AccessToken, AuthError, Credentials, LookupError, SearchError, SearchOutcome, SpotifyClient,
    SpotifyConfig,
};
use artist_lookup_test_utils::{ArtistFixture, MockSpotifyServer};

fn client_for(server: &MockSpotifyServer) -> SpotifyClient {
    SpotifyClient::new(&server.config()).unwrap()
}

fn token_for(server: &MockSpotifyServer) -> AccessToken {
    AccessToken::new(server.token()).unwrap()
}

// ============================================================================
// Token exchange
// ============================================================================

#[tokio::test]
async fn test_get_access_token_success() {
    let server = MockSpotifyServer::start_with_token("abc123").await;
    server.mock_token_success().await;

    let token = client_for(&server)
        .get_access_token(&server.credentials())
        .await
        .unwrap();

    assert_eq!(token.as_str(), "abc123");
    assert_eq!(server.token_requests().await, 1);
}

#[tokio::test]
async fn test_get_access_token_empty_credentials_sends_nothing() {
    let server = MockSpotifyServer::start().await;
    server.mock_token_success().await;

    let result = client_for(&server)
        .get_access_token(&Credentials::new("", ""))
        .await;

    assert_matches!(result, Err(AuthError::MissingCredentials));
    assert_eq!(server.total_requests().await, 0);
}

#[tokio::test]
async fn test_get_access_token_rejected_client() {
    let server = MockSpotifyServer::start().await;
    server.mock_token_invalid_client().await;

    let result = client_for(&server)
        .get_access_token(&server.credentials())
        .await;

    assert_matches!(result, Err(AuthError::TokenMissing(body)) if body.contains("invalid_client"));
}

#[tokio::test]
async fn test_get_access_token_missing_key() {
    let server = MockSpotifyServer::start().await;
    server
        .mock_token_response(200, json!({"token_type": "Bearer"}))
        .await;

    let result = client_for(&server)
        .get_access_token(&server.credentials())
        .await;

    assert_matches!(result, Err(AuthError::TokenMissing(body)) if body.contains("token_type"));
}

#[tokio::test]
async fn test_get_access_token_empty_token_is_not_success() {
    let server = MockSpotifyServer::start().await;
    server
        .mock_token_response(200, json!({"access_token": ""}))
        .await;

    let result = client_for(&server)
        .get_access_token(&server.credentials())
        .await;

    assert_matches!(result, Err(AuthError::TokenMissing(_)));
}

#[tokio::test]
async fn test_get_access_token_wrong_credentials_reach_server() {
    let server = MockSpotifyServer::start().await;
    server.mock_token_success().await;

    // The mock only answers the test credentials; anything else gets a bare 404
    let result = client_for(&server)
        .get_access_token(&Credentials::new("other-id", "other-secret"))
        .await;

    assert_matches!(result, Err(AuthError::TokenMissing(_)));
    assert_eq!(server.token_requests().await, 1);
}

#[tokio::test]
async fn test_get_access_token_connection_failed() {
    // Nothing listens on the discard port
    let config = SpotifyConfig::with_urls("http://127.0.0.1:9/api/token", "http://127.0.0.1:9/v1/");
    let client = SpotifyClient::new(&config).unwrap();

    let result = client
        .get_access_token(&Credentials::new("id", "secret"))
        .await;

    assert_matches!(result, Err(AuthError::ConnectionFailed(_)));
}

// ============================================================================
// Artist search
// ============================================================================

#[tokio::test]
async fn test_search_artist_maps_first_item() {
    let server = MockSpotifyServer::start().await;
    server
        .mock_search_artists(vec![
            ArtistFixture::doechii(),
            ArtistFixture::new("Someone Else"),
        ])
        .await;

    let artist = client_for(&server)
        .search_artist(&token_for(&server), "Doechii")
        .await
        .unwrap();

    let fixture = ArtistFixture::doechii();
    assert_eq!(artist.name, "Doechii");
    assert_eq!(artist.id, fixture.id);
    assert_eq!(artist.popularity, 85);
    assert_eq!(artist.genres, vec!["pop", "rap"]);
    assert_eq!(artist.followers_total, 5_000_000);
    assert_eq!(artist.image_url, fixture.image_url);
    assert_eq!(artist.profile_url, fixture.profile_url());
    assert_eq!(server.search_requests().await, 1);
}

#[tokio::test]
async fn test_search_artist_preserves_genre_order() {
    let server = MockSpotifyServer::start().await;
    server
        .mock_search_artists(vec![
            ArtistFixture::new("Ordered").with_genres(&["zeuhl", "avant-prog", "jazz fusion"])
        ])
        .await;

    let artist = client_for(&server)
        .search_artist(&token_for(&server), "Ordered")
        .await
        .unwrap();

    assert_eq!(artist.genres, vec!["zeuhl", "avant-prog", "jazz fusion"]);
}

#[tokio::test]
async fn test_search_artist_allows_empty_genres_and_no_image() {
    let server = MockSpotifyServer::start().await;
    server
        .mock_search_artists(vec![ArtistFixture::new("Bare").without_image()])
        .await;

    let artist = client_for(&server)
        .search_artist(&token_for(&server), "Bare")
        .await
        .unwrap();

    assert!(artist.genres.is_empty());
    assert!(artist.image_url.is_none());
}

#[tokio::test]
async fn test_search_artist_maps_popularity_and_followers() {
    let server = MockSpotifyServer::start().await;
    server
        .mock_search_artists(vec![ArtistFixture::new("Newcomer")
            .with_popularity(0)
            .with_followers(1_234_567)])
        .await;

    let artist = client_for(&server)
        .search_artist(&token_for(&server), "Newcomer")
        .await
        .unwrap();

    assert_eq!(artist.popularity, 0);
    assert_eq!(artist.followers_total, 1_234_567);
    assert_eq!(artist.followers_display(), "1,234,567");
}

#[tokio::test]
async fn test_search_artist_connection_failed() {
    // Nothing listens on the discard port
    let config = SpotifyConfig::with_urls("http://127.0.0.1:9/api/token", "http://127.0.0.1:9/v1/");
    let client = SpotifyClient::new(&config).unwrap();

    let result = client
        .search_artist(&AccessToken::new("abc123").unwrap(), "Doechii")
        .await;

    // Each cause in the chain is reported once
    assert_matches!(
        result,
        Err(SearchError::RequestFailed(reason)) if reason.matches("Connection refused").count() <= 1
    );
}

#[tokio::test]
async fn test_search_artist_not_found() {
    let server = MockSpotifyServer::start().await;
    server.mock_search_empty().await;

    let result = client_for(&server)
        .search_artist(&token_for(&server), "Nobody At All")
        .await;

    assert_matches!(result, Err(SearchError::NotFound(name)) if name == "Nobody At All");
}

#[tokio::test]
async fn test_search_artist_missing_artists_key() {
    let server = MockSpotifyServer::start().await;
    server.mock_search_response(200, json!({})).await;

    let result = client_for(&server)
        .search_artist(&token_for(&server), "Doechii")
        .await;

    assert_matches!(result, Err(SearchError::NotFound(_)));
}

#[tokio::test]
async fn test_search_artist_http_failure() {
    let server = MockSpotifyServer::start().await;
    server.mock_search_failure(503).await;

    let result = client_for(&server)
        .search_artist(&token_for(&server), "Doechii")
        .await;

    assert_matches!(result, Err(SearchError::RequestFailed(reason)) if reason.contains("503"));
}

#[tokio::test]
async fn test_search_artist_wrong_token_is_request_failed() {
    let server = MockSpotifyServer::start().await;
    server.mock_search_artists(vec![ArtistFixture::doechii()]).await;

    let result = client_for(&server)
        .search_artist(&AccessToken::new("stale-token").unwrap(), "Doechii")
        .await;

    assert_matches!(result, Err(SearchError::RequestFailed(_)));
}

#[tokio::test]
async fn test_search_artist_malformed_item() {
    let server = MockSpotifyServer::start().await;
    server
        .mock_search_response(200, json!({"artists": {"items": [{"name": "Half"}]}}))
        .await;

    let result = client_for(&server)
        .search_artist(&token_for(&server), "Half")
        .await;

    assert_matches!(result, Err(SearchError::RequestFailed(reason)) if reason.contains("invalid search response"));
}

#[tokio::test]
async fn test_search_artist_blank_name_sends_nothing() {
    let server = MockSpotifyServer::start().await;
    server.mock_search_artists(vec![ArtistFixture::doechii()]).await;

    let result = client_for(&server)
        .search_artist(&token_for(&server), "   ")
        .await;

    assert_matches!(result, Err(SearchError::InvalidInput(_)));
    assert_eq!(server.total_requests().await, 0);
}

#[tokio::test]
async fn test_search_artist_percent_encodes_name() {
    let server = MockSpotifyServer::start().await;
    server
        .mock_search_artists(vec![ArtistFixture::new("Simon & Garfunkel")])
        .await;

    client_for(&server)
        .search_artist(&token_for(&server), "Simon & Garfunkel #1")
        .await
        .unwrap();

    assert_eq!(
        server.last_search_query().await.as_deref(),
        Some("Simon & Garfunkel #1")
    );
    let raw = server.last_search_raw_query().await.unwrap();
    assert!(raw.contains("%26"));
    assert!(raw.contains("%23"));
    assert!(raw.contains("type=artist"));
    assert!(raw.contains("limit=1"));
}

#[tokio::test]
async fn test_search_artist_twice_hits_server_twice() {
    let server = MockSpotifyServer::start().await;
    server.mock_search_artists(vec![ArtistFixture::doechii()]).await;

    let client = client_for(&server);
    let token = token_for(&server);
    let first = client.search_artist(&token, "Doechii").await.unwrap();
    let second = client.search_artist(&token, "Doechii").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(server.search_requests().await, 2);
}

// ============================================================================
// Combined lookup
// ============================================================================

#[tokio::test]
async fn test_lookup_fetches_fresh_token_each_time() {
    let server = MockSpotifyServer::start().await;
    server.mock_token_success().await;
    server.mock_search_artists(vec![ArtistFixture::doechii()]).await;

    let client = client_for(&server);
    let credentials = server.credentials();
    client.lookup_artist(&credentials, "Doechii").await.unwrap();
    client.lookup_artist(&credentials, "Doechii").await.unwrap();

    assert_eq!(server.token_requests().await, 2);
    assert_eq!(server.search_requests().await, 2);
}

#[tokio::test]
async fn test_lookup_skips_search_when_token_fails() {
    let server = MockSpotifyServer::start().await;
    server.mock_token_invalid_client().await;
    server.mock_search_artists(vec![ArtistFixture::doechii()]).await;

    let result = client_for(&server)
        .lookup_artist(&server.credentials(), "Doechii")
        .await;

    assert_matches!(result, Err(LookupError::Auth(AuthError::TokenMissing(_))));
    assert_eq!(server.token_requests().await, 1);
    assert_eq!(server.search_requests().await, 0);
}

#[tokio::test]
async fn test_lookup_blank_name_skips_token_request() {
    let server = MockSpotifyServer::start().await;
    server.mock_token_success().await;

    let result = client_for(&server)
        .lookup_artist(&server.credentials(), "  ")
        .await;

    assert_matches!(result, Err(LookupError::Search(SearchError::InvalidInput(_))));
    assert_eq!(server.total_requests().await, 0);
}

#[tokio::test]
async fn test_lookup_outcome_not_found_mentions_term() {
    let server = MockSpotifyServer::start().await;
    server.mock_token_success().await;
    server.mock_search_empty().await;

    let outcome = client_for(&server)
        .lookup(&server.credentials(), "Doechii")
        .await;

    assert_matches!(outcome, SearchOutcome::Failure(reason) if reason.contains("Doechii"));
    assert_eq!(server.total_requests().await, 2);
}

#[tokio::test]
async fn test_lookup_outcome_success() {
    let server = MockSpotifyServer::start_with_token("abc123").await;
    server.mock_token_success().await;
    server.mock_search_artists(vec![ArtistFixture::doechii()]).await;

    let outcome = client_for(&server)
        .lookup(&server.credentials(), "Doechii")
        .await;

    assert!(outcome.is_success());
    assert_eq!(outcome.artist().unwrap().name, "Doechii");
}
