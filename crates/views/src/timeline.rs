//! Event timeline and highlights.
//!
//! Loads all detected events plus the summary for the active video in
//! one request. Supports a client-side kind filter and a bounded
//! top-highlights strip; selecting an event row or a highlight proposes
//! that timestamp to the playback cursor. An empty event list on a
//! successful load is the valid "no events detected" state.

use std::sync::Arc;

use tokio::sync::RwLock;

use clipsight_client::BackendApi;
use clipsight_core::timeline::{distinct_event_kinds, Summary, TimelineEvent};
use clipsight_session::{CursorSource, LoadFence, SessionHub};

use crate::state::LoadState;

/// Shown when the events fetch fails.
pub const TIMELINE_LOAD_FAILED_MESSAGE: &str = "Could not load the event timeline.";

/// Kind filter for the event list: everything, or one observed kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    Kind(String),
}

impl EventFilter {
    fn matches(&self, event: &TimelineEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Kind(kind) => &event.kind == kind,
        }
    }
}

/// Everything the timeline panel shows for one video.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineData {
    pub events: Vec<TimelineEvent>,
    pub summary: Summary,
}

/// Controller for the timeline panel.
pub struct TimelineView {
    api: Arc<BackendApi>,
    hub: Arc<SessionHub>,
    fence: LoadFence,
    state: RwLock<LoadState<TimelineData>>,
    filter: RwLock<EventFilter>,
}

impl TimelineView {
    pub fn new(api: Arc<BackendApi>, hub: Arc<SessionHub>) -> Self {
        Self {
            api,
            hub,
            fence: LoadFence::new(),
            state: RwLock::new(LoadState::Idle),
            filter: RwLock::new(EventFilter::All),
        }
    }

    /// Current timeline state (cloned snapshot).
    pub async fn data(&self) -> LoadState<TimelineData> {
        self.state.read().await.clone()
    }

    /// Events passing the current kind filter, in backend order.
    pub async fn visible_events(&self) -> Vec<TimelineEvent> {
        let filter = self.filter.read().await.clone();
        match self.state.read().await.ready() {
            Some(data) => data
                .events
                .iter()
                .filter(|event| filter.matches(event))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Distinct event kinds observed, for the filter bar.
    pub async fn event_kinds(&self) -> Vec<String> {
        match self.state.read().await.ready() {
            Some(data) => distinct_event_kinds(&data.events),
            None => Vec::new(),
        }
    }

    pub async fn filter(&self) -> EventFilter {
        self.filter.read().await.clone()
    }

    pub async fn set_filter(&self, filter: EventFilter) {
        *self.filter.write().await = filter;
    }

    /// The bounded highlights strip (at most the first five moments).
    pub async fn top_highlights(&self) -> Vec<f64> {
        match self.state.read().await.ready() {
            Some(data) => data.summary.top_highlights().to_vec(),
            None => Vec::new(),
        }
    }

    /// Fetch events and summary for the active session.
    ///
    /// A 404 means the detector has produced nothing for this video yet;
    /// that is the "no events" state, not a failure.
    pub async fn load(&self) {
        let Some(video_id) = self.hub.session().await.id else {
            *self.state.write().await = LoadState::Idle;
            return;
        };

        let ticket = self.fence.begin();
        let generation = self.hub.generation();
        *self.state.write().await = LoadState::Loading;

        let loaded = match self.api.load_events(&video_id).await {
            Ok(body) => LoadState::Ready(TimelineData {
                events: body.events,
                summary: body.summary,
            }),
            Err(e) if e.status() == Some(404) => {
                tracing::debug!(%video_id, "No events recorded for video");
                LoadState::Ready(TimelineData::default())
            }
            Err(e) => {
                tracing::warn!(%video_id, error = %e, "Timeline load failed");
                LoadState::Failed(TIMELINE_LOAD_FAILED_MESSAGE.to_string())
            }
        };

        if !self.fence.is_current(ticket) || self.hub.generation() != generation {
            tracing::debug!(%video_id, "Discarding stale timeline response");
            return;
        }
        if let LoadState::Ready(data) = &loaded {
            tracing::debug!(%video_id, events = data.events.len(), "Timeline loaded");
        }
        *self.state.write().await = loaded;
    }

    /// Jump playback to an event row.
    pub async fn select_event(&self, event: &TimelineEvent) {
        self.hub
            .propose_cursor(event.timestamp, CursorSource::Timeline)
            .await;
    }

    /// Jump playback to the `index`-th top highlight. Returns `false`
    /// when the index is outside the bounded strip.
    pub async fn select_highlight(&self, index: usize) -> bool {
        let Some(seconds) = self.top_highlights().await.get(index).copied() else {
            return false;
        };
        self.hub
            .propose_cursor(seconds, CursorSource::Timeline)
            .await;
        true
    }

    /// Discard timeline data and reset the filter, invalidating any
    /// in-flight load (session replacement).
    pub async fn reset(&self) {
        self.fence.invalidate();
        *self.state.write().await = LoadState::Idle;
        *self.filter.write().await = EventFilter::All;
    }
}
