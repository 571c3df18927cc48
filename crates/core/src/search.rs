//! Semantic search results and query helpers.
//!
//! A [`SearchResult`] is one row returned by the backend's vector index.
//! Results arrive in backend order (ascending relevance distance is
//! assumed, never enforced) and carry a loosely-shaped metadata record;
//! the timestamp fallback chain lives here so no call site reimplements
//! it.

use serde::{Deserialize, Serialize};

use crate::types::VideoId;

/// Metadata attached to a single search result by the indexer.
///
/// Fields beyond `type` and `video_id` depend on the segment kind:
/// transcript segments carry `start`/`end`, visual segments carry
/// `timestamp`, entity rows carry `entity_type` and `wikidata_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetadata {
    /// Segment kind: `"transcript"`, `"visual"`, `"entity"`, ...
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Point-in-time position, present on visual and entity rows.
    #[serde(default)]
    pub timestamp: Option<f64>,

    /// Segment start, present on transcript rows.
    #[serde(default)]
    pub start: Option<f64>,

    /// Segment end, present on transcript rows.
    #[serde(default)]
    pub end: Option<f64>,

    /// The video this row was indexed under.
    #[serde(default)]
    pub video_id: VideoId,

    /// Entity label (e.g. `"PERSON"`, `"ORG"`), entity rows only.
    #[serde(default)]
    pub entity_type: Option<String>,

    /// Wikidata identifier (e.g. `"Q42"`), entity rows only. The backend
    /// sends an empty string when no knowledge-base match was found.
    #[serde(default)]
    pub wikidata_id: Option<String>,
}

/// One search hit, in backend order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Index row identifier.
    #[serde(default)]
    pub id: String,

    /// The indexed free text (transcript snippet, caption, entity line).
    #[serde(default)]
    pub text: String,

    /// Relevance distance; smaller is closer.
    #[serde(default)]
    pub distance: f64,

    pub metadata: SearchMetadata,
}

impl SearchResult {
    /// The playback position this result points at.
    ///
    /// Fallback chain: `metadata.timestamp`, then `metadata.start`, then
    /// `0.0`. This is the only place the chain is spelled out.
    pub fn effective_timestamp(&self) -> f64 {
        self.metadata
            .timestamp
            .or(self.metadata.start)
            .unwrap_or(0.0)
    }
}

/// Normalize a user-typed query: trim it, and map empty/whitespace-only
/// input to `None` so callers can skip the request entirely.
pub fn normalize_query(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
