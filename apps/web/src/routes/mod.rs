//! HTTP route handlers for the artist search page

pub mod search;

pub use search::{search_router, SearchForm, SearchState};
