//! Detected events and the per-video summary.
//!
//! The events endpoint returns everything the detector found for one
//! video — scene changes, audio spikes, silences, entity mentions —
//! plus a single [`Summary`] with the top moments. An empty event list
//! on a successful load is a valid terminal state ("no events
//! detected"), not an error.

use serde::{Deserialize, Serialize};

/// The highlights strip shows at most this many of `top_moments`.
pub const MAX_TOP_HIGHLIGHTS: usize = 5;

/// One detected event on the video timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Playback position of the event, in seconds.
    #[serde(default)]
    pub timestamp: f64,

    /// Detector kind: `"scene_change"`, `"audio_spike"`, `"silence"`,
    /// `"entity_mention"`, ...
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Raw detector score; meaning depends on `kind`.
    #[serde(default)]
    pub score: f64,

    /// Cross-detector importance in `0..1`, used for ranking highlights.
    #[serde(default)]
    pub importance: f64,

    #[serde(default)]
    pub description: Option<String>,
}

/// Per-video roll-up produced alongside the event list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Timestamps of the highest-importance moments, best first.
    #[serde(default)]
    pub top_moments: Vec<f64>,

    #[serde(default)]
    pub event_count: usize,

    #[serde(default)]
    pub scene_count: usize,

    #[serde(default)]
    pub audio_spike_count: Option<usize>,

    #[serde(default)]
    pub highlight_description: String,
}

impl Summary {
    /// The bounded highlights strip: at most the first
    /// [`MAX_TOP_HIGHLIGHTS`] entries of `top_moments`, in given order.
    pub fn top_highlights(&self) -> &[f64] {
        let end = self.top_moments.len().min(MAX_TOP_HIGHLIGHTS);
        &self.top_moments[..end]
    }
}

/// Distinct event kinds in first-observed order, for the type filter.
pub fn distinct_event_kinds(events: &[TimelineEvent]) -> Vec<String> {
    let mut kinds: Vec<String> = Vec::new();
    for event in events {
        if !kinds.iter().any(|k| k == &event.kind) {
            kinds.push(event.kind.clone());
        }
    }
    kinds
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
