//! Shared session state for the clipsight client.
//!
//! One video is under analysis at a time. [`hub::SessionHub`] owns that
//! identity plus the shared playback cursor, and fans out
//! [`hub::SessionEvent`]s so every view and the playback surface observe
//! replacements and cursor proposals uniformly. [`fence::LoadFence`]
//! is the per-view staleness guard for async completions.

pub mod fence;
pub mod hub;

pub use fence::LoadFence;
pub use hub::{CursorSource, SessionEvent, SessionHub, VideoSession};
