//! Application state and lifecycle.

use crate::core::{
    Change, ChangeSummary, CompareBackend, CompareClient, CompareForm, CredentialProvider,
    FuzzyMatcher,
};
use crate::theme::Theme;

mod external;
mod filter;
mod navigation;
mod request;
mod state;
mod worker_state;

pub use state::{Focus, Mode, RequestState, ResultsState, UiState};
use worker_state::WorkerState;

/// Application state.
pub struct App {
    /// The four compare inputs.
    pub form: CompareForm,
    /// Current focus.
    pub focus: Focus,
    /// Loading flag, error and change list.
    pub request: RequestState,
    /// Change list selection and filter.
    pub results: ResultsState,
    /// UI state (mode, messages).
    pub ui: UiState,
    /// Should the app quit?
    pub should_quit: bool,
    /// Current color theme.
    pub theme: Theme,
    /// Endpoint shown in the top bar.
    pub endpoint: String,

    credentials: Box<dyn CredentialProvider>,
    worker: WorkerState,
    fuzzy_matcher: FuzzyMatcher,
}

impl App {
    /// Create an App talking to the backend at `base_url`.
    pub fn new(
        form: CompareForm,
        base_url: &str,
        credentials: Box<dyn CredentialProvider>,
        theme_name: Option<&str>,
    ) -> anyhow::Result<Self> {
        let client = CompareClient::new(base_url)?;
        let endpoint = client.endpoint().to_string();

        let mut app = Self::with_backend(form, Box::new(client), credentials);
        app.theme = Theme::load(theme_name.unwrap_or("default"));
        app.endpoint = endpoint;
        Ok(app)
    }

    /// Create an App with an explicit backend (used by tests and embedders).
    pub fn with_backend(
        form: CompareForm,
        backend: Box<dyn CompareBackend>,
        credentials: Box<dyn CredentialProvider>,
    ) -> Self {
        Self {
            form,
            focus: Focus::default(),
            request: RequestState::default(),
            results: ResultsState::default(),
            ui: UiState {
                dirty: true,
                ..Default::default()
            },
            should_quit: false,
            theme: Theme::default(),
            endpoint: String::new(),
            credentials,
            worker: WorkerState::new(backend),
            fuzzy_matcher: FuzzyMatcher::new(),
        }
    }

    /// All changes from the last successful request.
    pub fn changes(&self) -> &[Change] {
        &self.request.changes
    }

    /// Get the currently selected change.
    pub fn selected_change(&self) -> Option<&Change> {
        self.request.changes.get(self.results.selected_idx)
    }

    /// Per-kind counts of the current change list.
    pub fn summary(&self) -> ChangeSummary {
        ChangeSummary::from_changes(&self.request.changes)
    }

    /// Mark dirty for redraw.
    pub fn mark_dirty(&mut self) {
        self.ui.dirty = true;
    }

    /// Clear dirty flag after drawing.
    pub fn clear_dirty(&mut self) {
        self.ui.dirty = false;
    }

    /// Drop bottom-bar messages so the key hints come back.
    pub fn clear_messages(&mut self) {
        let had_error = self.ui.error.take().is_some();
        let had_status = self.ui.status.take().is_some();
        if had_error || had_status {
            self.ui.dirty = true;
        }
    }

    /// Ask the main loop to exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CompareError, FormField, StaticCredentials};

    struct NoopBackend;

    impl CompareBackend for NoopBackend {
        fn compare(&self, _form: &CompareForm, _token: &str) -> Result<Vec<Change>, CompareError> {
            Ok(Vec::new())
        }
    }

    fn app() -> App {
        App::with_backend(
            CompareForm::default(),
            Box::new(NoopBackend),
            Box::new(StaticCredentials::none()),
        )
    }

    #[test]
    fn starts_idle_on_first_field() {
        let app = app();
        assert_eq!(app.focus, Focus::Field(FormField::Workspace));
        assert!(!app.request.loading);
        assert!(app.request.error.is_none());
        assert!(app.changes().is_empty());
        assert!(app.selected_change().is_none());
        assert!(app.ui.dirty);
    }

    #[test]
    fn worker_state_initializes_defaults() {
        let app = app();
        assert_eq!(app.worker.next_request_id, 1);
        assert!(app.worker.pending_request_id.is_none());
    }

    #[test]
    fn new_rejects_bad_base_url() {
        let result = App::new(
            CompareForm::default(),
            "ftp://example.com",
            Box::new(StaticCredentials::none()),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn focus_cycle_wraps_both_ways() {
        let mut focus = Focus::default();
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(focus);
            focus = focus.next();
        }
        assert_eq!(focus, Focus::default());
        assert_eq!(seen[4], Focus::Trigger);
        assert_eq!(seen[5], Focus::Results);
        assert_eq!(Focus::default().prev(), Focus::Results);
        assert_eq!(Focus::Trigger.prev(), Focus::Field(FormField::ToCommit));
    }
}
