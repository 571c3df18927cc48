//! Per-view load state.
//!
//! Every result view moves through the same small machine:
//! `Idle -> Loading -> Ready | Failed`, returning to `Idle` when the
//! session is replaced. `Ready` with empty contents is a first-class
//! terminal state ("no results", "no faces", "no events") and is never
//! conflated with `Failed`.

/// Loading state of one result view's data set.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// No session, or the view was reset and nothing has loaded yet.
    Idle,
    /// A request is outstanding. Nothing is ever cancelled; a view stays
    /// here until a current-ticket completion arrives.
    Loading,
    /// Last load completed; possibly with empty contents.
    Ready(T),
    /// Last load failed. Local to this view; other views are unaffected.
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    /// The loaded data, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// The failure message, if the last load failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
