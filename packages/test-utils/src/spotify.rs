//! Mock Spotify server for testing token exchange and artist search
//!
//! Provides a [`MockSpotifyServer`] that simulates both the accounts service
//! token endpoint and the Web API search endpoint on one local server.

use artist_lookup_shared_config::{Credentials, SpotifyConfig};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Client id the token mock expects
pub const TEST_CLIENT_ID: &str = "test-client-id";

/// Client secret the token mock expects
pub const TEST_CLIENT_SECRET: &str = "test-client-secret";

// base64("test-client-id:test-client-secret")
const TEST_BASIC_AUTH: &str = "Basic dGVzdC1jbGllbnQtaWQ6dGVzdC1jbGllbnQtc2VjcmV0";

const TOKEN_PATH: &str = "/api/token";
const SEARCH_PATH: &str = "/v1/search";

/// Mock Spotify server for testing lookups
///
/// This struct wraps a [`wiremock::MockServer`]. The token mock only answers
/// requests carrying [`TEST_CLIENT_ID`] / [`TEST_CLIENT_SECRET`], and the
/// search mocks only answer requests carrying the token this server issues.
/// Unmatched requests get wiremock's default 404.
///
/// # Example
///
/// ```rust,ignore
/// use artist_lookup_test_utils::{ArtistFixture, MockSpotifyServer};
///
/// #[tokio::test]
/// async fn test_lookup() {
///     let server = MockSpotifyServer::start().await;
///     server.mock_token_success().await;
///     server.mock_search_artists(vec![ArtistFixture::doechii()]).await;
///
///     let client = SpotifyClient::new(&server.config()).unwrap();
///     // ... run your test with server.credentials()
/// }
/// ```
pub struct MockSpotifyServer {
    server: MockServer,
    token: String,
}

impl MockSpotifyServer {
    /// Start a new mock server issuing the default token
    pub async fn start() -> Self {
        Self::start_with_token("test-access-token").await
    }

    /// Start a new mock server issuing a custom token
    pub async fn start_with_token(token: &str) -> Self {
        let server = MockServer::start().await;
        Self {
            server,
            token: token.to_string(),
        }
    }

    /// Get the server URL
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Token this server issues and expects on searches
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Client configuration pointing at this server
    pub fn config(&self) -> SpotifyConfig {
        SpotifyConfig::with_urls(
            format!("{}{}", self.url(), TOKEN_PATH),
            format!("{}/v1/", self.url()),
        )
    }

    /// Credentials accepted by the token mock
    pub fn credentials(&self) -> Credentials {
        Credentials::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
    }

    /// Mount a token endpoint that issues [`Self::token`]
    pub async fn mock_token_success(&self) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(header("authorization", TEST_BASIC_AUTH))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": self.token,
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .mount(&self.server)
            .await;
    }

    /// Mount a token endpoint returning an arbitrary status and JSON body
    pub async fn mock_token_response(&self, status_code: u16, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a token endpoint rejecting the client (`invalid_client`)
    pub async fn mock_token_invalid_client(&self) {
        self.mock_token_response(
            400,
            json!({
                "error": "invalid_client",
                "error_description": "Invalid client"
            }),
        )
        .await;
    }

    /// Mount a search endpoint returning the given artists
    pub async fn mock_search_artists(&self, artists: Vec<ArtistFixture>) {
        let items: Vec<serde_json::Value> = artists.iter().map(ArtistFixture::to_json).collect();
        self.mock_search_response(200, json!({ "artists": { "items": items } }))
            .await;
    }

    /// Mount a search endpoint with no matches
    pub async fn mock_search_empty(&self) {
        self.mock_search_response(200, json!({ "artists": { "items": [] } }))
            .await;
    }

    /// Mount a search endpoint failing with the given status
    pub async fn mock_search_failure(&self, status_code: u16) {
        self.mock_search_response(
            status_code,
            json!({
                "error": {
                    "status": status_code,
                    "message": "mock failure"
                }
            }),
        )
        .await;
    }

    /// Mount a search endpoint returning an arbitrary status and JSON body
    pub async fn mock_search_response(&self, status_code: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("type", "artist"))
            .and(query_param("limit", "1"))
            .and(header("authorization", format!("Bearer {}", self.token).as_str()))
            .respond_with(ResponseTemplate::new(status_code).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// All requests received so far
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Number of requests received on any path
    pub async fn total_requests(&self) -> usize {
        self.requests().await.len()
    }

    /// Number of token requests received
    pub async fn token_requests(&self) -> usize {
        self.count_path(TOKEN_PATH).await
    }

    /// Number of search requests received
    pub async fn search_requests(&self) -> usize {
        self.count_path(SEARCH_PATH).await
    }

    /// Decoded `q` parameter of the most recent search request
    pub async fn last_search_query(&self) -> Option<String> {
        self.requests()
            .await
            .iter()
            .rev()
            .find(|request| request.url.path() == SEARCH_PATH)
            .and_then(|request| {
                request
                    .url
                    .query_pairs()
                    .find(|(key, _)| key == "q")
                    .map(|(_, value)| value.into_owned())
            })
    }

    /// Raw query string of the most recent search request
    pub async fn last_search_raw_query(&self) -> Option<String> {
        self.requests()
            .await
            .iter()
            .rev()
            .find(|request| request.url.path() == SEARCH_PATH)
            .and_then(|request| request.url.query().map(str::to_string))
    }

    async fn count_path(&self, wanted: &str) -> usize {
        self.requests()
            .await
            .iter()
            .filter(|request| request.url.path() == wanted)
            .count()
    }
}

/// Test fixture for a Spotify artist object
#[derive(Debug, Clone)]
pub struct ArtistFixture {
    pub id: String,
    pub name: String,
    pub popularity: u8,
    pub genres: Vec<String>,
    pub followers: u64,
    pub image_url: Option<String>,
}

impl ArtistFixture {
    /// Artist with an image, no genres and a derived id
    pub fn new(name: &str) -> Self {
        let id: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        Self {
            image_url: Some(format!("https://i.scdn.co/image/{}", id)),
            id,
            name: name.to_string(),
            popularity: 50,
            genres: Vec::new(),
            followers: 1_000,
        }
    }

    /// The artist used across end-to-end scenarios
    pub fn doechii() -> Self {
        Self {
            id: "4E2rKHVDssGJm2SCDOMMJB".to_string(),
            popularity: 85,
            followers: 5_000_000,
            ..Self::new("Doechii")
        }
        .with_genres(&["pop", "rap"])
    }

    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = genres.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn with_popularity(mut self, popularity: u8) -> Self {
        self.popularity = popularity;
        self
    }

    pub fn with_followers(mut self, followers: u64) -> Self {
        self.followers = followers;
        self
    }

    pub fn without_image(mut self) -> Self {
        self.image_url = None;
        self
    }

    /// Profile URL Spotify would report for this artist
    pub fn profile_url(&self) -> String {
        format!("https://open.spotify.com/artist/{}", self.id)
    }

    /// Convert to JSON in the shape of the search response items
    pub fn to_json(&self) -> serde_json::Value {
        let images: Vec<serde_json::Value> = self
            .image_url
            .iter()
            .map(|url| json!({ "url": url, "height": 640, "width": 640 }))
            .collect();

        json!({
            "id": self.id,
            "name": self.name,
            "type": "artist",
            "uri": format!("spotify:artist:{}", self.id),
            "popularity": self.popularity,
            "genres": self.genres,
            "followers": { "href": null, "total": self.followers },
            "images": images,
            "external_urls": { "spotify": self.profile_url() }
        })
    }
}
