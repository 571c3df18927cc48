//! View controllers for the clipsight client.
//!
//! One uploaded video fans out into five independent analytical views —
//! semantic search, question answering, face clusters, named entities,
//! and the event timeline — that all read the shared session hub and
//! may propose playback positions back to it. Each view owns its own
//! loading/error/data state and fails independently; coordination is
//! hub-and-spoke through the session id and cursor, never view-to-view.

pub mod entities;
pub mod faces;
pub mod playback;
pub mod qa;
pub mod search;
pub mod state;
pub mod sync;
pub mod tabs;
pub mod timeline;
pub mod upload;

pub use entities::{EntityBrowser, EntityFilter};
pub use faces::{FacesView, TagDraft, TagOutcome};
pub use playback::{spawn_playback, MediaSurface};
pub use qa::QaView;
pub use search::SearchView;
pub use state::LoadState;
pub use sync::{spawn_view_sync, ViewSet};
pub use tabs::{Tab, TabSelector};
pub use timeline::{EventFilter, TimelineData, TimelineView};
pub use upload::{UploadCoordinator, UploadOutcome};
