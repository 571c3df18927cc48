//! Tab selection: which single result view is visible.
//!
//! Purely a display concern — it gates which view's output the user
//! sees, never which requests run. Loading data must not move the
//! selection.

use std::sync::RwLock;

/// The five result views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Search,
    Qa,
    Faces,
    Entities,
    Timeline,
}

impl Tab {
    /// Label the tab bar shows.
    pub fn label(self) -> &'static str {
        match self {
            Tab::Search => "Search",
            Tab::Qa => "Ask",
            Tab::Faces => "People",
            Tab::Entities => "Entities",
            Tab::Timeline => "Timeline",
        }
    }
}

/// Holds the active tab.
#[derive(Debug, Default)]
pub struct TabSelector {
    active: RwLock<Tab>,
}

impl TabSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        *self.active.read().expect("tab lock poisoned")
    }

    pub fn select(&self, tab: Tab) {
        *self.active.write().expect("tab lock poisoned") = tab;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
