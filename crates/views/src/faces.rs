//! Face clusters and the inline tagging flow.
//!
//! The most stateful view: besides the usual load state it runs a small
//! per-cluster machine, `Untagged -> Tagging -> Untagged | Tagged`. A
//! single draft `{ cluster_id, name }` exists at a time, so starting to
//! tag a second cluster implicitly abandons the first's unsaved text.
//! Confirming submits the cluster's representative face and reloads the
//! whole mapping — the backend propagates the name across the cluster,
//! the client never renames locally.

use std::sync::Arc;

use tokio::sync::RwLock;

use clipsight_client::BackendApi;
use clipsight_core::faces::{
    display_name, displayable_clusters, is_tagged, normalize_person_name, representative,
    ClusterMap, Face, TAG_NAME_VALIDATION_MESSAGE,
};
use clipsight_core::types::ClusterId;
use clipsight_session::{LoadFence, SessionHub};

use crate::state::LoadState;

/// Shown when the cluster request fails.
pub const FACES_LOAD_FAILED_MESSAGE: &str = "Could not load face clusters.";

/// Shown when the tag request fails.
pub const TAG_FAILED_MESSAGE: &str = "Tagging failed. Please try again.";

/// The one in-progress tag input, scoped to a single cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct TagDraft {
    pub cluster_id: ClusterId,
    pub name: String,
}

/// Result of confirming a tag.
#[derive(Debug, Clone, PartialEq)]
pub enum TagOutcome {
    /// The tag was submitted and the clusters were reloaded.
    Applied,
    /// Name was empty after trimming; nothing was sent.
    Rejected(String),
    /// The tag request failed; the draft is kept for a retry.
    Failed(String),
    /// There was no draft, or its cluster no longer exists.
    NoDraft,
}

/// One row of the cluster list as the panel presents it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    pub cluster_id: ClusterId,
    pub display_name: String,
    pub face_count: usize,
    /// Tagged clusters expose no tagging affordance.
    pub tagged: bool,
}

/// Controller for the faces panel.
pub struct FacesView {
    api: Arc<BackendApi>,
    hub: Arc<SessionHub>,
    fence: LoadFence,
    clusters: RwLock<LoadState<ClusterMap>>,
    draft: RwLock<Option<TagDraft>>,
}

impl FacesView {
    pub fn new(api: Arc<BackendApi>, hub: Arc<SessionHub>) -> Self {
        Self {
            api,
            hub,
            fence: LoadFence::new(),
            clusters: RwLock::new(LoadState::Idle),
            draft: RwLock::new(None),
        }
    }

    /// Current cluster state (cloned snapshot). The noise cluster is
    /// already excluded, so `Ready` with an empty map means "no faces
    /// detected".
    pub async fn clusters(&self) -> LoadState<ClusterMap> {
        self.clusters.read().await.clone()
    }

    /// The in-progress tag input, if any.
    pub async fn draft(&self) -> Option<TagDraft> {
        self.draft.read().await.clone()
    }

    /// Cluster rows in display order.
    pub async fn cluster_summaries(&self) -> Vec<ClusterSummary> {
        match &*self.clusters.read().await {
            LoadState::Ready(clusters) => clusters
                .iter()
                .map(|(&cluster_id, faces)| ClusterSummary {
                    cluster_id,
                    display_name: display_name(cluster_id, faces),
                    face_count: faces.len(),
                    tagged: is_tagged(faces),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Fetch the cluster mapping for the active session.
    pub async fn load(&self) {
        let Some(video_id) = self.hub.session().await.id else {
            *self.clusters.write().await = LoadState::Idle;
            return;
        };

        let ticket = self.fence.begin();
        let generation = self.hub.generation();
        *self.clusters.write().await = LoadState::Loading;

        match self.api.face_clusters(&video_id).await {
            Ok(raw) => {
                if !self.fence.is_current(ticket) || self.hub.generation() != generation {
                    tracing::debug!(%video_id, "Discarding stale cluster response");
                    return;
                }
                let shown = displayable_clusters(raw);
                tracing::debug!(%video_id, clusters = shown.len(), "Face clusters loaded");
                *self.clusters.write().await = LoadState::Ready(shown);
            }
            Err(e) => {
                tracing::warn!(%video_id, error = %e, "Face cluster load failed");
                if self.fence.is_current(ticket) && self.hub.generation() == generation {
                    *self.clusters.write().await =
                        LoadState::Failed(FACES_LOAD_FAILED_MESSAGE.to_string());
                }
            }
        }
    }

    /// Open the name input for a cluster. Returns `false` for unknown or
    /// already-tagged clusters (tags are write-once from this side).
    /// Any existing draft for another cluster is abandoned.
    pub async fn begin_tagging(&self, cluster_id: ClusterId) -> bool {
        let taggable = match self.clusters.read().await.ready() {
            Some(clusters) => clusters
                .get(&cluster_id)
                .is_some_and(|faces| !is_tagged(faces)),
            None => false,
        };
        if !taggable {
            return false;
        }

        let mut draft = self.draft.write().await;
        if let Some(previous) = draft.as_ref() {
            if previous.cluster_id != cluster_id {
                tracing::debug!(
                    abandoned_cluster = previous.cluster_id,
                    "Abandoning unsaved tag draft",
                );
            }
        }
        *draft = Some(TagDraft {
            cluster_id,
            name: String::new(),
        });
        true
    }

    /// Replace the draft name as the user types.
    pub async fn update_draft(&self, name: &str) {
        if let Some(draft) = self.draft.write().await.as_mut() {
            draft.name = name.to_string();
        }
    }

    /// Close the name input and discard the draft.
    pub async fn cancel_tagging(&self) {
        *self.draft.write().await = None;
    }

    /// Submit the draft: tag the cluster's representative face, then
    /// reload all clusters so the backend-propagated names are shown.
    pub async fn confirm_tag(&self) -> TagOutcome {
        let Some(draft) = self.draft.read().await.clone() else {
            return TagOutcome::NoDraft;
        };

        let Some(name) = normalize_person_name(&draft.name).map(str::to_string) else {
            return TagOutcome::Rejected(TAG_NAME_VALIDATION_MESSAGE.to_string());
        };

        let face_id = match self.clusters.read().await.ready() {
            Some(clusters) => clusters
                .get(&draft.cluster_id)
                .and_then(|faces| representative(faces))
                .map(|face| face.face_id.clone()),
            None => None,
        };
        let Some(face_id) = face_id else {
            // The cluster vanished under the draft (reload or session
            // change); drop the draft rather than tag the wrong video.
            *self.draft.write().await = None;
            return TagOutcome::NoDraft;
        };

        match self.api.tag_face(&face_id, &name).await {
            Ok(()) => {
                *self.draft.write().await = None;
                self.load().await;
                TagOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(%face_id, error = %e, "Tag request failed");
                TagOutcome::Failed(TAG_FAILED_MESSAGE.to_string())
            }
        }
    }

    /// All appearances of a named person across the corpus. Read-only
    /// lookup; does not disturb cluster state.
    pub async fn person_appearances(
        &self,
        person_name: &str,
    ) -> Result<Vec<Face>, clipsight_client::ApiError> {
        self.api.person_appearances(person_name).await
    }

    /// Discard clusters and draft, invalidating any in-flight load
    /// (session replacement).
    pub async fn reset(&self) {
        self.fence.invalidate();
        *self.clusters.write().await = LoadState::Idle;
        *self.draft.write().await = None;
    }
}
