//! Spotify API response models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bearer token issued by the accounts service
///
/// Construction guarantees the value is non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token value, rejecting blank strings
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Raw token value for the `Authorization` header
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// Artist fields surfaced by a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRecord {
    /// Artist name
    pub name: String,
    /// Spotify artist ID
    pub id: String,
    /// Popularity (0 - 100)
    pub popularity: u8,
    /// Genres in the order Spotify lists them
    pub genres: Vec<String>,
    /// Follower count
    pub followers_total: u64,
    /// First image URL, if the artist has any images
    pub image_url: Option<String>,
    /// Spotify profile page
    pub profile_url: String,
}

impl ArtistRecord {
    /// Follower count with thousands separators, e.g. `5,000,000`
    pub fn followers_display(&self) -> String {
        group_thousands(self.followers_total)
    }

    /// Genres joined by comma, or `N/A` when there are none
    pub fn genres_display(&self) -> String {
        if self.genres.is_empty() {
            "N/A".to_string()
        } else {
            self.genres.join(", ")
        }
    }
}

/// Result of one lookup as handed to a presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Success(ArtistRecord),
    Failure(String),
}

impl SearchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn artist(&self) -> Option<&ArtistRecord> {
        match self {
            Self::Success(artist) => Some(artist),
            Self::Failure(_) => None,
        }
    }
}

/// Format an integer with `,` between groups of three digits
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// Internal response types for deserialization

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub artists: Option<ArtistPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistPage {
    #[serde(default)]
    pub items: Vec<RawArtist>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtist {
    pub name: String,
    pub id: String,
    pub popularity: u8,
    #[serde(default)]
    pub genres: Vec<String>,
    pub followers: RawFollowers,
    #[serde(default)]
    pub images: Vec<RawImage>,
    pub external_urls: RawExternalUrls,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFollowers {
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawImage {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawExternalUrls {
    pub spotify: String,
}

impl From<RawArtist> for ArtistRecord {
    fn from(raw: RawArtist) -> Self {
        Self {
            name: raw.name,
            id: raw.id,
            popularity: raw.popularity,
            genres: raw.genres,
            followers_total: raw.followers.total,
            image_url: raw.images.into_iter().next().map(|image| image.url),
            profile_url: raw.external_urls.spotify,
        }
    }
}
