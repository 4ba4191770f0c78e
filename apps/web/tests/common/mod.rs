//! Common test utilities for web integration tests

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use artist_lookup_spotify_client::{Credentials, SpotifyClient, SpotifyConfig};
use artist_lookup_test_utils::MockSpotifyServer;
use artist_lookup_web::{app, SearchState};

/// App wired to the mock server with the credentials it accepts
pub fn app_for(server: &MockSpotifyServer) -> Router {
    app_with(server.config(), server.credentials())
}

/// App wired to arbitrary configuration and credentials
pub fn app_with(config: SpotifyConfig, credentials: Credentials) -> Router {
    let client = SpotifyClient::new(&config).unwrap();
    app(SearchState::new(client, credentials))
}

/// Send a request and return the status with the body as text
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// GET the search page
pub async fn get_page(app: Router) -> (StatusCode, String) {
    send(
        app,
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await
}

/// POST an already-encoded form body
pub async fn post_form(app: Router, body: &str) -> (StatusCode, String) {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}
