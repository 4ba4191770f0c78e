//! Spotify Web API client implementation

use std::time::Duration;

use artist_lookup_shared_config::{Credentials, SpotifyConfig};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::{header, Client};
use tracing::{debug, info, instrument, warn};

use crate::error::{
    describe_transport_error, AuthError, AuthResult, LookupResult, SearchError, SearchResult,
};
use crate::models::{AccessToken, ArtistRecord, SearchOutcome, SearchResponse, TokenResponse};

/// Maximum artist name length
const MAX_ARTIST_NAME_LENGTH: usize = 256;

/// Only the best match is requested
const SEARCH_LIMIT: &str = "1";

/// Spotify Web API client
///
/// Every lookup performs a fresh token exchange followed by one search;
/// tokens are never cached between lookups.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http_client: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    /// Create a new Spotify client from configuration
    ///
    /// # Errors
    /// Returns `AuthError::Client` if the HTTP client cannot be built
    pub fn new(config: &SpotifyConfig) -> AuthResult<Self> {
        if config.danger_accept_invalid_certs {
            warn!(
                "TLS certificate verification is DISABLED for Spotify requests; \
                 use for diagnostics only"
            );
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
            .user_agent(concat!("artist-lookup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Whether TLS certificate verification is turned off
    pub fn tls_verification_disabled(&self) -> bool {
        self.config.danger_accept_invalid_certs
    }

    /// Trim an artist name and check it is non-empty and at most 256 characters
    pub fn validate_artist_name(artist_name: &str) -> SearchResult<&str> {
        let trimmed = artist_name.trim();
        if trimmed.is_empty() {
            return Err(SearchError::InvalidInput(
                "artist name cannot be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_ARTIST_NAME_LENGTH {
            return Err(SearchError::InvalidInput(format!(
                "artist name too long (max {} characters)",
                MAX_ARTIST_NAME_LENGTH
            )));
        }
        Ok(trimmed)
    }

    /// Exchange client credentials for a bearer token
    ///
    /// Sends one `POST` to the token endpoint with HTTP Basic auth and the
    /// `client_credentials` grant.
    ///
    /// # Errors
    /// - `AuthError::MissingCredentials` - Either value is empty (no request is sent)
    /// - `AuthError::ConnectionFailed` - Transport or TLS failure
    /// - `AuthError::TokenMissing` - The response carries no usable `access_token`
    #[instrument(skip_all)]
    pub async fn get_access_token(&self, credentials: &Credentials) -> AuthResult<AccessToken> {
        if !credentials.is_complete() {
            warn!("Spotify credentials missing, skipping token request");
            return Err(AuthError::MissingCredentials);
        }

        debug!(url = %self.config.token_url, "Requesting Spotify access token");

        let response = self
            .http_client
            .post(&self.config.token_url)
            .header(header::AUTHORIZATION, basic_auth_header(credentials))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AuthError::ConnectionFailed(describe_transport_error(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::ConnectionFailed(describe_transport_error(&e)))?;

        let token = serde_json::from_str::<TokenResponse>(&body)
            .ok()
            .and_then(|parsed| parsed.access_token)
            .and_then(AccessToken::new);

        match token {
            Some(token) => {
                debug!("Obtained Spotify access token");
                Ok(token)
            }
            None => {
                warn!(status = status.as_u16(), "Token response has no access_token");
                Err(AuthError::token_missing(body))
            }
        }
    }

    /// Search for an artist by name and return the best match
    ///
    /// Sends one `GET` to `{api_base}/search?q={name}&type=artist&limit=1`.
    /// The name is trimmed and percent-encoded.
    ///
    /// # Errors
    /// - `SearchError::InvalidInput` - The name is empty or too long (no request is sent)
    /// - `SearchError::RequestFailed` - Non-2xx status, transport failure or malformed body
    /// - `SearchError::NotFound` - No artists matched
    #[instrument(skip(self, token))]
    pub async fn search_artist(
        &self,
        token: &AccessToken,
        artist_name: &str,
    ) -> SearchResult<ArtistRecord> {
        let artist_name = Self::validate_artist_name(artist_name)?;

        debug!(artist = %artist_name, "Searching Spotify for artist");

        let response = self
            .http_client
            .get(self.config.search_url())
            .bearer_auth(token.as_str())
            .query(&[
                ("q", artist_name),
                ("type", "artist"),
                ("limit", SEARCH_LIMIT),
            ])
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(describe_transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(artist = %artist_name, status = status.as_u16(), "Spotify search failed");
            return Err(SearchError::RequestFailed(format!(
                "Spotify returned HTTP {}",
                status
            )));
        }

        let response: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::RequestFailed(format!("invalid search response: {}", e)))?;

        let artist = response
            .artists
            .and_then(|page| page.items.into_iter().next())
            .map(ArtistRecord::from)
            .ok_or_else(|| SearchError::NotFound(artist_name.to_string()))?;

        debug!(artist = %artist_name, found = %artist.name, "Found artist");

        Ok(artist)
    }

    /// Fetch a token and search for an artist
    ///
    /// The name is validated before the token request, and the search is only
    /// attempted once a token has been obtained.
    pub async fn lookup_artist(
        &self,
        credentials: &Credentials,
        artist_name: &str,
    ) -> LookupResult<ArtistRecord> {
        Self::validate_artist_name(artist_name)?;
        let token = self.get_access_token(credentials).await?;
        let artist = self.search_artist(&token, artist_name).await?;
        Ok(artist)
    }

    /// Run a lookup and fold the result into a [`SearchOutcome`]
    pub async fn lookup(&self, credentials: &Credentials, artist_name: &str) -> SearchOutcome {
        match self.lookup_artist(credentials, artist_name).await {
            Ok(artist) => {
                info!(artist = %artist.name, id = %artist.id, "Artist lookup succeeded");
                SearchOutcome::Success(artist)
            }
            Err(e) => {
                warn!(error = %e, "Artist lookup failed");
                SearchOutcome::Failure(e.user_message())
            }
        }
    }
}

/// `Authorization` header value for the token request
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let encoded = BASE64.encode(format!(
        "{}:{}",
        credentials.client_id, credentials.client_secret
    ));
    format!("Basic {}", encoded)
}
