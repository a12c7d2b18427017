//! goPool dashboard widget feed.
//!
//! Polls a goPool instance's pool and overview status endpoints, reshapes
//! them into the records a dashboard widget expects, and serves the result
//! over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod report;
pub mod tracing;
pub mod upstream;
