//! Artist search page handlers
//!
//! - `GET /` - Empty search form
//! - `POST /` - Look up the submitted `artist_name` and render the result

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Form, Router};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use artist_lookup_spotify_client::{Credentials, LookupError, SearchError, SpotifyClient};

use crate::views::{
    render_page, PageView, Panel, AUTH_FAILED_MESSAGE, EMPTY_NAME_WARNING, NAME_TOO_LONG_WARNING,
    NOT_FOUND_MESSAGE, SEARCH_FAILED_MESSAGE,
};

/// Shared state for the search handlers
#[derive(Clone)]
pub struct SearchState {
    /// Spotify client built once at startup
    pub client: SpotifyClient,
    /// Credentials loaded once at startup
    pub credentials: Arc<Credentials>,
}

impl SearchState {
    pub fn new(client: SpotifyClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials: Arc::new(credentials),
        }
    }
}

/// Submitted search form
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub artist_name: String,
}

/// Create the search page router
pub fn search_router(state: SearchState) -> Router {
    Router::new()
        .route("/", get(search_page).post(submit_search))
        .with_state(state)
}

async fn search_page(State(state): State<SearchState>) -> Html<String> {
    Html(render_page(&PageView {
        query: "",
        panel: Panel::Empty,
        tls_warning: state.client.tls_verification_disabled(),
    }))
}

#[instrument(skip(state))]
async fn submit_search(
    State(state): State<SearchState>,
    Form(form): Form<SearchForm>,
) -> Html<String> {
    let panel = lookup_panel(&state, &form.artist_name).await;

    Html(render_page(&PageView {
        query: &form.artist_name,
        panel,
        tls_warning: state.client.tls_verification_disabled(),
    }))
}

/// Run the lookup for one submission; input problems never reach Spotify
async fn lookup_panel(state: &SearchState, artist_name: &str) -> Panel {
    match SpotifyClient::validate_artist_name(artist_name) {
        Ok(_) => {}
        Err(_) if artist_name.trim().is_empty() => return Panel::Warning(EMPTY_NAME_WARNING),
        Err(_) => return Panel::Warning(NAME_TOO_LONG_WARNING),
    }

    match state.client.lookup_artist(&state.credentials, artist_name).await {
        Ok(artist) => {
            info!(artist = %artist.name, id = %artist.id, "Artist lookup succeeded");
            Panel::Artist(artist)
        }
        Err(e) => {
            warn!(error = %e, "Artist lookup failed");
            Panel::Error(error_message(&e))
        }
    }
}

fn error_message(error: &LookupError) -> &'static str {
    match error {
        LookupError::Auth(_) => AUTH_FAILED_MESSAGE,
        LookupError::Search(SearchError::NotFound(_)) => NOT_FOUND_MESSAGE,
        LookupError::Search(_) => SEARCH_FAILED_MESSAGE,
    }
}
