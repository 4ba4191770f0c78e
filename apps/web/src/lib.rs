//! Artist search web form
//!
//! This module exposes the router and page rendering for use in integration
//! tests and by the server binary.

pub mod config;
pub mod routes;
pub mod views;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use routes::{search_router, SearchState};

/// Build the application router with request tracing
pub fn app(state: SearchState) -> Router {
    search_router(state).layer(TraceLayer::new_for_http())
}
