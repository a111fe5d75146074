use crate::core::{Change, FormField};

/// Focus state for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// One of the four text inputs.
    Field(FormField),
    /// The compare button.
    Trigger,
    /// The change list.
    Results,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Field(FormField::Workspace)
    }
}

impl Focus {
    /// Next stop in the focus cycle (wraps).
    pub fn next(self) -> Focus {
        match self {
            Focus::Field(field) => field.next().map_or(Focus::Trigger, Focus::Field),
            Focus::Trigger => Focus::Results,
            Focus::Results => Focus::Field(FormField::Workspace),
        }
    }

    /// Previous stop in the focus cycle (wraps).
    pub fn prev(self) -> Focus {
        match self {
            Focus::Field(field) => field.prev().map_or(Focus::Results, Focus::Field),
            Focus::Trigger => Focus::Field(FormField::ToCommit),
            Focus::Results => Focus::Trigger,
        }
    }
}

/// UI mode (normal vs input modes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Normal navigation and editing.
    #[default]
    Normal,
    /// Typing a filter for the change list.
    FilterResults,
}

/// Request lifecycle: busy flag, last error, and the displayed change list.
#[derive(Debug, Default)]
pub struct RequestState {
    /// A request is in flight.
    pub loading: bool,
    /// Message for the error region.
    pub error: Option<String>,
    /// Changes from the last successful request.
    pub changes: Vec<Change>,
}

/// Result list navigation and filter state.
#[derive(Debug, Default)]
pub struct ResultsState {
    /// Selected index into `RequestState::changes`.
    pub selected_idx: usize,
    /// Scroll offset (first visible entry).
    pub scroll: usize,
    /// Filter query string.
    pub filter: String,
    /// Filtered change indices (empty = show all).
    pub filtered_indices: Vec<usize>,
}

/// UI mode and message state.
#[derive(Debug, Default)]
pub struct UiState {
    /// Current mode.
    pub mode: Mode,
    /// Local error (clipboard and similar), shown in the bottom bar.
    pub error: Option<String>,
    /// Status message.
    pub status: Option<String>,
    /// Dirty flag for redraw.
    pub dirty: bool,
}
