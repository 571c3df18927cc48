//! Semantic search over the active video.
//!
//! Query-driven: nothing loads until the user searches. An empty query
//! is a no-op. Failures here are deliberately quiet — the previous
//! results stay on screen and the error is only logged, because search
//! is never the action the user is blocked on.

use std::sync::Arc;

use tokio::sync::RwLock;

use clipsight_client::BackendApi;
use clipsight_core::search::{normalize_query, SearchResult};
use clipsight_session::{CursorSource, LoadFence, SessionHub};

use crate::state::LoadState;

/// Controller for the search panel.
pub struct SearchView {
    api: Arc<BackendApi>,
    hub: Arc<SessionHub>,
    fence: LoadFence,
    state: RwLock<LoadState<Vec<SearchResult>>>,
}

impl SearchView {
    pub fn new(api: Arc<BackendApi>, hub: Arc<SessionHub>) -> Self {
        Self {
            api,
            hub,
            fence: LoadFence::new(),
            state: RwLock::new(LoadState::Idle),
        }
    }

    /// Current results state (cloned snapshot).
    pub async fn results(&self) -> LoadState<Vec<SearchResult>> {
        self.state.read().await.clone()
    }

    /// Run a search for the current session. Empty or whitespace-only
    /// queries are ignored without a request. Scoped to the active video
    /// when one is set, unscoped otherwise.
    pub async fn run_search(&self, query: &str) {
        let Some(query) = normalize_query(query) else {
            return;
        };

        let ticket = self.fence.begin();
        let generation = self.hub.generation();
        let video_id = self.hub.session().await.id;

        let prior = {
            let mut state = self.state.write().await;
            std::mem::replace(&mut *state, LoadState::Loading)
        };

        match self.api.search(query, video_id.as_deref()).await {
            Ok(results) => {
                if !self.fence.is_current(ticket) || self.hub.generation() != generation {
                    tracing::debug!(query, "Discarding stale search response");
                    return;
                }
                tracing::debug!(query, hits = results.len(), "Search completed");
                *self.state.write().await = LoadState::Ready(results);
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "Search failed; keeping previous results");
                if self.fence.is_current(ticket) && self.hub.generation() == generation {
                    *self.state.write().await = prior;
                }
            }
        }
    }

    /// Jump playback to a selected result's effective timestamp.
    pub async fn select_result(&self, result: &SearchResult) {
        self.hub
            .propose_cursor(result.effective_timestamp(), CursorSource::Search)
            .await;
    }

    /// Discard results and invalidate any in-flight load (session
    /// replacement).
    pub async fn reset(&self) {
        self.fence.invalidate();
        *self.state.write().await = LoadState::Idle;
    }
}
