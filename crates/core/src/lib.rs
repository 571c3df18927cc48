//! Domain model for the clipsight video-analysis client.
//!
//! Pure types and helpers shared by the HTTP client, the session hub,
//! and the view controllers: search results with their timestamp
//! fallback rules, the QA outcome, face clusters, timeline events and
//! summaries, and entities parsed out of search results. This crate has
//! no internal dependencies and performs no I/O.

pub mod entity;
pub mod faces;
pub mod qa;
pub mod search;
pub mod timeline;
pub mod types;
