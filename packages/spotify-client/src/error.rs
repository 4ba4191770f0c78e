//! Spotify client error types

use thiserror::Error;

/// Maximum raw response body kept in an error
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Token exchange errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Client id or secret is empty; no request was sent
    #[error("Spotify credentials not found")]
    MissingCredentials,

    /// Transport or TLS failure talking to the accounts service
    #[error("error connecting to Spotify: {0}")]
    ConnectionFailed(String),

    /// The accounts service answered without an `access_token`
    #[error("error getting token: {0}")]
    TokenMissing(String),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl AuthError {
    /// Build a `TokenMissing` error from a raw response body
    pub(crate) fn token_missing(body: String) -> Self {
        Self::TokenMissing(truncate_body(body))
    }

    /// The failure looks like a certificate or TLS handshake problem
    pub fn is_tls(&self) -> bool {
        match self {
            Self::ConnectionFailed(message) => mentions_tls(message),
            _ => false,
        }
    }
}

/// Artist search errors
#[derive(Error, Debug)]
pub enum SearchError {
    /// Artist name is blank or too long; no request was sent
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Non-success status, transport failure or unreadable body
    #[error("search request failed: {0}")]
    RequestFailed(String),

    /// The search succeeded but returned no artists
    #[error("artist '{0}' not found")]
    NotFound(String),
}

impl SearchError {
    /// The failure looks like a certificate or TLS handshake problem
    pub fn is_tls(&self) -> bool {
        match self {
            Self::RequestFailed(message) => mentions_tls(message),
            _ => false,
        }
    }
}

/// Failure of a complete lookup (token exchange followed by search)
#[derive(Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl LookupError {
    pub fn is_tls(&self) -> bool {
        match self {
            Self::Auth(e) => e.is_tls(),
            Self::Search(e) => e.is_tls(),
        }
    }

    /// Text shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(AuthError::MissingCredentials) => {
                "Spotify credentials not found".to_string()
            }
            Self::Auth(e) => format!("Failed to authenticate with Spotify API: {e}"),
            Self::Search(SearchError::NotFound(name)) => format!("Could not find artist: {name}"),
            Self::Search(SearchError::InvalidInput(reason)) => {
                format!("Invalid artist name: {reason}")
            }
            Self::Search(SearchError::RequestFailed(reason)) => {
                format!("Error searching for artist: {reason}")
            }
        }
    }
}

/// Describe a transport error including its source chain
///
/// Causes whose text already appears in the message are skipped, since some
/// reqwest versions fold the inner error into their own `Display`.
pub(crate) fn describe_transport_error(error: &reqwest::Error) -> String {
    describe_chain(error)
}

fn describe_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

fn mentions_tls(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("certificate") || message.contains("tls") || message.contains("ssl")
}

/// Truncate a body on a UTF-8 boundary
fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_SIZE {
        return body;
    }

    let truncate_at = body
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= MAX_ERROR_BODY_SIZE)
        .last()
        .unwrap_or(0);

    format!("{}... (truncated)", &body[..truncate_at])
}

/// Result type for token exchange
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type for artist search
pub type SearchResult<T> = Result<T, SearchError>;

/// Result type for a complete lookup
pub type LookupResult<T> = Result<T, LookupError>;
