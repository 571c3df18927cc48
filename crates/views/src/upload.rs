//! Upload coordination: turning a locally selected file into the active
//! video session.
//!
//! Owns the single "is an upload in flight" flag. On success the video
//! session is replaced wholesale (id + derived playable URL) and every
//! dependent view observes the new id through the hub; on failure the
//! previous session is left untouched and the error is surfaced to the
//! user.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clipsight_client::BackendApi;
use clipsight_session::{SessionHub, VideoSession};

/// Shown when the ingest request fails.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";

/// Result of one upload attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// The session was replaced with the newly ingested video.
    Completed(VideoSession),
    /// Another upload is still in flight; this invocation was a no-op.
    AlreadyUploading,
    /// The ingest request failed; the previous session is untouched.
    Failed(String),
}

/// Coordinates uploads against the ingest endpoint.
pub struct UploadCoordinator {
    api: Arc<BackendApi>,
    hub: Arc<SessionHub>,
    uploading: AtomicBool,
}

impl UploadCoordinator {
    pub fn new(api: Arc<BackendApi>, hub: Arc<SessionHub>) -> Self {
        Self {
            api,
            hub,
            uploading: AtomicBool::new(false),
        }
    }

    /// Whether an upload is currently in flight (drives the disabled
    /// state of the upload control).
    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::Acquire)
    }

    /// Submit a locally selected file to the ingest endpoint.
    ///
    /// Only one upload may be in flight at a time; a second invocation
    /// while uploading returns [`UploadOutcome::AlreadyUploading`]
    /// without touching the network.
    pub async fn upload(&self, filename: &str, bytes: Vec<u8>) -> UploadOutcome {
        if self
            .uploading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(filename, "Upload already in flight; ignoring");
            return UploadOutcome::AlreadyUploading;
        }

        tracing::info!(filename, size = bytes.len(), "Uploading video");

        let outcome = match self.api.upload_video(filename, bytes).await {
            Ok(response) => {
                let session = VideoSession::new(
                    response.video_id,
                    self.api.playable_url(&response.filename),
                );
                self.hub.replace_session(session.clone()).await;
                UploadOutcome::Completed(session)
            }
            Err(e) => {
                tracing::error!(filename, error = %e, "Video upload failed");
                UploadOutcome::Failed(UPLOAD_FAILED_MESSAGE.to_string())
            }
        };

        self.uploading.store(false, Ordering::Release);
        outcome
    }
}
