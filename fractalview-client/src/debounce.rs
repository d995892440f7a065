use std::time::Duration;

use fractalview_core::ViewState;

/// Quiet period after the last pan/zoom change before a request is issued.
pub const DEBOUNCE_NAVIGATION: Duration = Duration::from_millis(150);

/// Quiet period after the last iteration-ceiling change.  Longer, because a
/// ceiling change triggers a markedly heavier recomputation server-side.
pub const DEBOUNCE_ITERATIONS: Duration = Duration::from_millis(300);

/// How expensive a view-state change is presumed to be to recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeClass {
    /// Pan, zoom, or resize: high frequency, cheap to reissue.
    Navigation,
    /// `max_iterations` changed.
    IterationCeiling,
}

impl ChangeClass {
    /// The debounce window this class of change waits out.
    pub fn debounce(self) -> Duration {
        match self {
            Self::Navigation => DEBOUNCE_NAVIGATION,
            Self::IterationCeiling => DEBOUNCE_ITERATIONS,
        }
    }
}

/// Classify a view-state transition for debounce selection.
///
/// Only the iteration ceiling selects the long window; every other field
/// change is navigation.
pub fn classify_change(old: &ViewState, new: &ViewState) -> ChangeClass {
    if old.max_iterations != new.max_iterations {
        ChangeClass::IterationCeiling
    } else {
        ChangeClass::Navigation
    }
}
