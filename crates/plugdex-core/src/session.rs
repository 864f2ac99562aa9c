//! Session-scoped handoff between the homepage and the directory view.
//!
//! Clicking a category badge on a homepage card parks the selection here; the
//! directory view consumes it on mount. Consumed means cleared: a second read
//! sees nothing.

/// Transient per-session state, one instance per page visit.
#[derive(Debug, Default)]
pub struct SessionState {
    filter_category: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a category selection for the directory view.
    pub fn set_filter_category(&mut self, value: impl Into<String>) {
        self.filter_category = Some(value.into());
    }

    /// Consume the pending category selection, clearing it.
    pub fn take_filter_category(&mut self) -> Option<String> {
        self.filter_category.take()
    }

    pub fn has_filter_category(&self) -> bool {
        self.filter_category.is_some()
    }
}
