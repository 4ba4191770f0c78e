//! Console connection test for the Spotify artist lookup
//!
//! Exposes the argument parser and the report runner so integration tests
//! can drive a full run against a mock Spotify server.

pub mod cli;
pub mod report;

pub use cli::{Cli, DEFAULT_ARTIST};
pub use report::{run_connection_test, write_summary, ConnectionReport, TLS_HINT};
