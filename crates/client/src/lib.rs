//! HTTP client for the clipsight analysis backend.
//!
//! Wraps the backend's REST surface (video ingest, semantic search,
//! question answering, event timelines, face clusters and tagging)
//! using [`reqwest`], returning the typed payloads from
//! `clipsight-core`. Transport and non-2xx failures are reported as
//! [`error::ApiError`]; what to do with a failure is the caller's
//! policy, not this crate's.

pub mod api;
pub mod config;
pub mod error;

pub use api::BackendApi;
pub use config::ClientConfig;
pub use error::ApiError;
