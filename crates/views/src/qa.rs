//! Question answering about the active video.
//!
//! Holds exactly one answer slot: a new question fully replaces the
//! previous outcome, successful or not. Validation (non-empty question,
//! active session) happens synchronously before any request. When an
//! answer arrives with a grounding timestamp, receiving it also
//! retargets the playback cursor.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use clipsight_client::BackendApi;
use clipsight_core::qa::{QaOutcome, QA_REQUEST_FAILED_MESSAGE, QA_VALIDATION_MESSAGE};
use clipsight_session::{CursorSource, LoadFence, SessionHub};

/// Controller for the QA panel.
pub struct QaView {
    api: Arc<BackendApi>,
    hub: Arc<SessionHub>,
    fence: LoadFence,
    answer: RwLock<Option<QaOutcome>>,
    loading: AtomicBool,
}

impl QaView {
    pub fn new(api: Arc<BackendApi>, hub: Arc<SessionHub>) -> Self {
        Self {
            api,
            hub,
            fence: LoadFence::new(),
            answer: RwLock::new(None),
            loading: AtomicBool::new(false),
        }
    }

    /// The current answer slot (cloned snapshot). `None` until the first
    /// question of the session completes or is rejected.
    pub async fn answer(&self) -> Option<QaOutcome> {
        self.answer.read().await.clone()
    }

    /// Whether a question is outstanding. Surfaced so the UI can disable
    /// re-submission; re-invocation is not blocked structurally.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Ask a question about the active video.
    ///
    /// Requires a non-empty question and an active session; otherwise
    /// the answer slot is filled with a validation failure and no
    /// request is sent.
    pub async fn ask(&self, question: &str) {
        let question = question.trim();
        let session_id = self.hub.session().await.id;

        let Some(video_id) = session_id.filter(|_| !question.is_empty()) else {
            *self.answer.write().await = Some(QaOutcome::Failed {
                message: QA_VALIDATION_MESSAGE.to_string(),
            });
            return;
        };

        let ticket = self.fence.begin();
        let generation = self.hub.generation();
        self.loading.store(true, Ordering::Release);

        let result = self.api.ask(question, &video_id).await;
        self.loading.store(false, Ordering::Release);

        if !self.fence.is_current(ticket) || self.hub.generation() != generation {
            tracing::debug!(question, "Discarding stale QA response");
            return;
        }

        match result {
            Ok(response) => {
                let outcome = QaOutcome::from_response(response);
                if let Some(seconds) = outcome.cursor_target() {
                    self.hub.propose_cursor(seconds, CursorSource::Qa).await;
                }
                *self.answer.write().await = Some(outcome);
            }
            Err(e) => {
                tracing::warn!(question, error = %e, "QA request failed");
                *self.answer.write().await = Some(QaOutcome::Failed {
                    message: QA_REQUEST_FAILED_MESSAGE.to_string(),
                });
            }
        }
    }

    /// Clear the answer slot and invalidate any in-flight question
    /// (session replacement).
    pub async fn reset(&self) {
        self.fence.invalidate();
        *self.answer.write().await = None;
    }
}
