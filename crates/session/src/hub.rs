//! The session hub: single owner of the active video identity and the
//! shared playback cursor.
//!
//! All mutation funnels through [`SessionHub::replace_session`] and
//! [`SessionHub::propose_cursor`]; everything else only reads. Events
//! are fanned out via a [`tokio::sync::broadcast`] channel so any number
//! of observers (view controllers, the playback surface) receive every
//! change independently. Call [`SessionHub::subscribe`] to receive them.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;

use clipsight_core::types::{Timestamp, VideoId};

/// Broadcast channel capacity for session events.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Identity of the video currently under analysis.
///
/// Created by a successful upload and replaced wholesale by the next
/// one; there is no merge. An absent `id` means no video is active and
/// every view renders its placeholder state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VideoSession {
    pub id: Option<VideoId>,
    /// Where the playback surface streams the video from.
    pub playable_url: Option<String>,
}

impl VideoSession {
    pub fn new(id: impl Into<VideoId>, playable_url: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            playable_url: Some(playable_url.into()),
        }
    }

    /// Whether a video is active.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }
}

/// Which view proposed a cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CursorSource {
    Search,
    Qa,
    Timeline,
}

/// A change observed on the hub.
#[derive(Debug, Clone, Serialize)]
pub enum SessionEvent {
    /// The active video was replaced (or set for the first time).
    SessionReplaced {
        /// Hub generation after the replacement; completions captured
        /// under an older generation are stale.
        generation: u64,
        session: VideoSession,
        at: Timestamp,
    },

    /// A view asked the playback surface to seek and resume playback.
    ///
    /// Emitted for every proposal, including one equal to the current
    /// position — each proposal is a directive, not a value update.
    CursorProposed {
        seconds: f64,
        source: CursorSource,
        at: Timestamp,
    },
}

struct HubState {
    session: VideoSession,
    cursor: Option<f64>,
}

/// Shared hub handle; create once and clone the `Arc` into every view.
pub struct SessionHub {
    state: RwLock<HubState>,
    /// Bumped on every session replacement, never on cursor changes.
    generation: AtomicU64,
    event_tx: tokio::sync::broadcast::Sender<SessionEvent>,
}

impl SessionHub {
    pub fn new() -> Self {
        let (event_tx, _) = tokio::sync::broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(HubState {
                session: VideoSession::default(),
                cursor: None,
            }),
            generation: AtomicU64::new(0),
            event_tx,
        }
    }

    /// Subscribe to all session events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Current session identity (cloned snapshot).
    pub async fn session(&self) -> VideoSession {
        self.state.read().await.session.clone()
    }

    /// Last proposed cursor position, if any.
    pub async fn cursor(&self) -> Option<f64> {
        self.state.read().await.cursor
    }

    /// Current session generation. Captured by views at load start and
    /// compared at completion to discard responses for a superseded
    /// session.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Replace the active video wholesale and notify every observer.
    ///
    /// The cursor is cleared — a position from the previous video has no
    /// meaning against the new one. Returns the new generation.
    pub async fn replace_session(&self, session: VideoSession) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        {
            let mut state = self.state.write().await;
            state.session = session.clone();
            state.cursor = None;
        }

        tracing::info!(
            generation,
            video_id = session.id.as_deref().unwrap_or("<none>"),
            "Session replaced",
        );

        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.event_tx.send(SessionEvent::SessionReplaced {
            generation,
            session,
            at: chrono::Utc::now(),
        });
        generation
    }

    /// Propose a playback position. Always broadcast, even when equal to
    /// the current value: the surface must seek and resume on every
    /// proposal.
    pub async fn propose_cursor(&self, seconds: f64, source: CursorSource) {
        self.state.write().await.cursor = Some(seconds);

        tracing::debug!(seconds, ?source, "Cursor proposed");

        let _ = self.event_tx.send(SessionEvent::CursorProposed {
            seconds,
            source,
            at: chrono::Utc::now(),
        });
    }
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
