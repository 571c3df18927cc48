//! Named-entity browser.
//!
//! Entities are not a first-class backend resource: this view issues an
//! empty-query, session-scoped search and keeps only the rows typed
//! `"entity"`, parsed into [`Entity`] values. Purely a reading aid —
//! nothing here ever moves the playback cursor.

use std::sync::Arc;

use tokio::sync::RwLock;

use clipsight_client::BackendApi;
use clipsight_core::entity::{distinct_labels, Entity};
use clipsight_session::{LoadFence, SessionHub};

use crate::state::LoadState;

/// Shown when the entity fetch fails.
pub const ENTITIES_LOAD_FAILED_MESSAGE: &str = "Could not load entities.";

/// Label filter for the browser: everything, or one observed label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EntityFilter {
    #[default]
    All,
    Label(String),
}

impl EntityFilter {
    fn matches(&self, entity: &Entity) -> bool {
        match self {
            EntityFilter::All => true,
            EntityFilter::Label(label) => &entity.label == label,
        }
    }
}

/// Controller for the entity panel.
pub struct EntityBrowser {
    api: Arc<BackendApi>,
    hub: Arc<SessionHub>,
    fence: LoadFence,
    state: RwLock<LoadState<Vec<Entity>>>,
    filter: RwLock<EntityFilter>,
}

impl EntityBrowser {
    pub fn new(api: Arc<BackendApi>, hub: Arc<SessionHub>) -> Self {
        Self {
            api,
            hub,
            fence: LoadFence::new(),
            state: RwLock::new(LoadState::Idle),
            filter: RwLock::new(EntityFilter::All),
        }
    }

    /// Current entity state (cloned snapshot).
    pub async fn entities(&self) -> LoadState<Vec<Entity>> {
        self.state.read().await.clone()
    }

    /// Entities passing the current label filter.
    pub async fn visible(&self) -> Vec<Entity> {
        let filter = self.filter.read().await.clone();
        match self.state.read().await.ready() {
            Some(entities) => entities
                .iter()
                .filter(|entity| filter.matches(entity))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Distinct labels observed in the loaded set, for the filter bar.
    pub async fn labels(&self) -> Vec<String> {
        match self.state.read().await.ready() {
            Some(entities) => distinct_labels(entities),
            None => Vec::new(),
        }
    }

    pub async fn filter(&self) -> EntityFilter {
        self.filter.read().await.clone()
    }

    pub async fn set_filter(&self, filter: EntityFilter) {
        *self.filter.write().await = filter;
    }

    /// Fetch entities for the active session via an empty-query,
    /// session-scoped search.
    pub async fn load(&self) {
        let Some(video_id) = self.hub.session().await.id else {
            *self.state.write().await = LoadState::Idle;
            return;
        };

        let ticket = self.fence.begin();
        let generation = self.hub.generation();
        *self.state.write().await = LoadState::Loading;

        match self.api.search("", Some(&video_id)).await {
            Ok(results) => {
                if !self.fence.is_current(ticket) || self.hub.generation() != generation {
                    tracing::debug!(%video_id, "Discarding stale entity response");
                    return;
                }
                let entities: Vec<Entity> = results
                    .iter()
                    .filter_map(Entity::from_search_result)
                    .collect();
                tracing::debug!(%video_id, count = entities.len(), "Entities loaded");
                *self.state.write().await = LoadState::Ready(entities);
            }
            Err(e) => {
                tracing::warn!(%video_id, error = %e, "Entity load failed");
                if self.fence.is_current(ticket) && self.hub.generation() == generation {
                    *self.state.write().await =
                        LoadState::Failed(ENTITIES_LOAD_FAILED_MESSAGE.to_string());
                }
            }
        }
    }

    /// Discard entities and reset the filter, invalidating any in-flight
    /// load (session replacement).
    pub async fn reset(&self) {
        self.fence.invalidate();
        *self.state.write().await = LoadState::Idle;
        *self.filter.write().await = EntityFilter::All;
    }
}
