//! Session-change fan-out.
//!
//! When the active video is replaced, every result view must discard
//! its data for the old id. The session-scoped views (faces, entities,
//! timeline) then re-fetch immediately; search and QA are query-driven
//! and simply return to their placeholder state until the user acts.
//! Views never talk to each other — this task is the only place the
//! fan-out happens.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use clipsight_client::BackendApi;
use clipsight_session::{SessionEvent, SessionHub};

use crate::entities::EntityBrowser;
use crate::faces::FacesView;
use crate::qa::QaView;
use crate::search::SearchView;
use crate::timeline::TimelineView;

/// The five result views, ready to hand to [`spawn_view_sync`] and to
/// the embedding UI.
#[derive(Clone)]
pub struct ViewSet {
    pub search: Arc<SearchView>,
    pub qa: Arc<QaView>,
    pub faces: Arc<FacesView>,
    pub entities: Arc<EntityBrowser>,
    pub timeline: Arc<TimelineView>,
}

impl ViewSet {
    /// Build all five views against one backend client and hub.
    pub fn new(api: Arc<BackendApi>, hub: Arc<SessionHub>) -> Self {
        Self {
            search: Arc::new(SearchView::new(api.clone(), hub.clone())),
            qa: Arc::new(QaView::new(api.clone(), hub.clone())),
            faces: Arc::new(FacesView::new(api.clone(), hub.clone())),
            entities: Arc::new(EntityBrowser::new(api.clone(), hub.clone())),
            timeline: Arc::new(TimelineView::new(api, hub)),
        }
    }

    /// Discard every view's data and invalidate their in-flight loads.
    pub async fn reset_all(&self) {
        tokio::join!(
            self.search.reset(),
            self.qa.reset(),
            self.faces.reset(),
            self.entities.reset(),
            self.timeline.reset(),
        );
    }

    /// Re-fetch the session-scoped views. Loads run concurrently and
    /// fail independently; one view's failure never touches another.
    pub async fn load_session_scoped(&self) {
        tokio::join!(self.faces.load(), self.entities.load(), self.timeline.load());
    }
}

/// Spawn the task that keeps all views in step with session changes.
///
/// Runs until the hub is dropped. Cursor proposals are ignored here;
/// only the playback surface consumes those.
pub fn spawn_view_sync(hub: &SessionHub, views: ViewSet) -> JoinHandle<()> {
    let mut events = hub.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::SessionReplaced { generation, .. }) => {
                    tracing::info!(generation, "Session replaced; resetting views");
                    views.reset_all().await;
                    views.load_session_scoped().await;
                }
                Ok(SessionEvent::CursorProposed { .. }) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "View sync lagged behind hub events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
