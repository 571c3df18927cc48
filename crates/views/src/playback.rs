//! Playback surface: the consumer side of cursor proposals.
//!
//! The hub broadcasts every session replacement and cursor proposal;
//! this task drives an embedder-supplied [`MediaSurface`] from them.
//! Every proposal triggers a seek-and-play, including proposals equal
//! to the current position — a repeated selection must still jump.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use clipsight_session::{SessionEvent, SessionHub};

/// What the embedding host's video element must be able to do.
#[async_trait]
pub trait MediaSurface: Send + Sync {
    /// Point the surface at a new video stream.
    async fn load_media(&self, url: &str);

    /// Seek to `seconds` and resume playback.
    async fn seek_and_play(&self, seconds: f64);
}

/// Spawn the event-consumer task driving `surface` from hub events.
///
/// Runs until the hub is dropped. A lagged receiver skips the missed
/// events and keeps going — the surface only ever needs the latest
/// directive.
pub fn spawn_playback(hub: &SessionHub, surface: Arc<dyn MediaSurface>) -> JoinHandle<()> {
    let mut events = hub.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::SessionReplaced { session, .. }) => {
                    if let Some(url) = session.playable_url {
                        tracing::info!(url = %url, "Loading media into playback surface");
                        surface.load_media(&url).await;
                    }
                }
                Ok(SessionEvent::CursorProposed {
                    seconds, source, ..
                }) => {
                    tracing::debug!(seconds, ?source, "Seeking playback surface");
                    surface.seek_and_play(seconds).await;
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Playback surface lagged behind hub events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
