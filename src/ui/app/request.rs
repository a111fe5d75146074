use super::super::worker::{CompareRequest, CompareResponse};
use super::App;
use crate::core::{FALLBACK_ERROR_MESSAGE, MISSING_TOKEN_MESSAGE};

/// Trigger label while idle.
pub const IDLE_LABEL: &str = "Compare Commits";

/// Trigger label while a request is in flight.
pub const BUSY_LABEL: &str = "Comparing...";

impl App {
    /// Start a comparison with the current form values.
    ///
    /// Ignored while a request is in flight. Without a token the error is set
    /// and nothing is sent.
    pub fn submit(&mut self) {
        if self.request.loading {
            return;
        }

        self.request.error = None;
        self.clear_messages();
        self.ui.dirty = true;

        let Some(token) = self.credentials.access_token() else {
            self.request.error = Some(MISSING_TOKEN_MESSAGE.to_string());
            return;
        };

        let id = self.worker.next_request_id;
        self.worker.next_request_id += 1;

        let request = CompareRequest {
            id,
            form: self.form.clone(),
            token,
        };

        if !self.worker.compare.send(request) {
            log::error!("compare worker is not running");
            self.request.error = Some(FALLBACK_ERROR_MESSAGE.to_string());
            return;
        }

        log::info!(
            "compare {} {}/{} {}..{}",
            id,
            self.form.workspace,
            self.form.repo_slug,
            self.form.from_commit,
            self.form.to_commit
        );
        self.worker.pending_request_id = Some(id);
        self.request.loading = true;
    }

    /// Apply any finished responses from the worker.
    pub fn poll_worker(&mut self) {
        while let Ok(msg) = self.worker.compare.response_rx.try_recv() {
            match msg {
                CompareResponse::Loaded { id, changes } => {
                    if self.worker.pending_request_id != Some(id) {
                        continue;
                    }
                    self.settle();
                    self.request.error = None;
                    self.request.changes = changes;
                    self.reset_results();
                }
                CompareResponse::Failed { id, message } => {
                    if self.worker.pending_request_id != Some(id) {
                        continue;
                    }
                    // The previous change list stays on screen.
                    self.settle();
                    self.request.error = Some(message);
                }
            }
        }
    }

    /// Whether the trigger accepts input.
    pub fn trigger_enabled(&self) -> bool {
        !self.request.loading
    }

    /// Current trigger label.
    pub fn trigger_label(&self) -> &'static str {
        if self.request.loading {
            BUSY_LABEL
        } else {
            IDLE_LABEL
        }
    }

    fn settle(&mut self) {
        self.clear_messages();
        self.worker.pending_request_id = None;
        self.request.loading = false;
        self.ui.dirty = true;
    }

    fn reset_results(&mut self) {
        self.results.selected_idx = 0;
        self.results.scroll = 0;
        self.results.filter.clear();
        self.results.filtered_indices.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc, Mutex};
    use std::time::{Duration, Instant};

    use super::*;
    use crate::core::{
        Change, CompareBackend, CompareError, CompareForm, StaticCredentials,
    };

    /// Backend that blocks each call until the test releases it.
    struct GatedBackend {
        calls: Arc<AtomicUsize>,
        gate: Mutex<mpsc::Receiver<Result<Vec<Change>, CompareError>>>,
    }

    impl CompareBackend for GatedBackend {
        fn compare(&self, _form: &CompareForm, _token: &str) -> Result<Vec<Change>, CompareError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.gate.lock().unwrap();
            gate.recv().unwrap_or_else(|_| Ok(Vec::new()))
        }
    }

    struct Harness {
        app: App,
        calls: Arc<AtomicUsize>,
        release: mpsc::Sender<Result<Vec<Change>, CompareError>>,
    }

    fn harness(token: Option<&str>) -> Harness {
        let calls = Arc::new(AtomicUsize::new(0));
        let (release, gate) = mpsc::channel();
        let backend = GatedBackend {
            calls: Arc::clone(&calls),
            gate: Mutex::new(gate),
        };
        let credentials = match token {
            Some(t) => StaticCredentials::new(t),
            None => StaticCredentials::none(),
        };
        let app = App::with_backend(
            CompareForm::new("acme", "widgets", "abc", "def"),
            Box::new(backend),
            Box::new(credentials),
        );
        Harness {
            app,
            calls,
            release,
        }
    }

    fn wait_until_settled(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.request.loading && Instant::now() < deadline {
            app.poll_worker();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!app.request.loading, "request did not settle");
    }

    fn added(path: &str) -> Change {
        Change::Added {
            path: path.to_string(),
        }
    }

    #[test]
    fn missing_token_sets_error_without_request() {
        let mut h = harness(None);
        h.app.submit();
        assert_eq!(h.app.request.error.as_deref(), Some("Access token is missing."));
        assert!(!h.app.request.loading);
        assert!(h.app.trigger_enabled());
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn loading_toggles_trigger_label() {
        let mut h = harness(Some("t0k"));
        assert_eq!(h.app.trigger_label(), IDLE_LABEL);

        h.app.submit();
        assert!(h.app.request.loading);
        assert!(!h.app.trigger_enabled());
        assert_eq!(h.app.trigger_label(), BUSY_LABEL);

        h.release.send(Ok(vec![added("a.txt")])).unwrap();
        wait_until_settled(&mut h.app);
        assert!(h.app.trigger_enabled());
        assert_eq!(h.app.trigger_label(), IDLE_LABEL);
        assert_eq!(h.app.changes(), &[added("a.txt")]);
    }

    #[test]
    fn submit_while_loading_is_ignored() {
        let mut h = harness(Some("t0k"));
        h.app.submit();
        h.app.submit();
        h.app.submit();

        h.release.send(Ok(vec![added("a.txt")])).unwrap();
        wait_until_settled(&mut h.app);
        assert_eq!(h.calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.app.worker.next_request_id, 2);
    }

    #[test]
    fn failure_keeps_previous_changes() {
        let mut h = harness(Some("t0k"));
        h.app.submit();
        h.release.send(Ok(vec![added("a.txt")])).unwrap();
        wait_until_settled(&mut h.app);

        h.app.submit();
        h.release
            .send(Err(CompareError::Backend {
                status: 404,
                message: Some("not found".to_string()),
            }))
            .unwrap();
        wait_until_settled(&mut h.app);

        assert_eq!(h.app.request.error.as_deref(), Some("not found"));
        assert_eq!(h.app.changes(), &[added("a.txt")]);
        assert!(h.app.trigger_enabled());
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let mut h = harness(Some("t0k"));
        h.app.submit();
        h.release
            .send(Err(CompareError::Backend {
                status: 500,
                message: None,
            }))
            .unwrap();
        wait_until_settled(&mut h.app);
        assert_eq!(h.app.request.error.as_deref(), Some(FALLBACK_ERROR_MESSAGE));
    }

    #[test]
    fn new_request_clears_error() {
        let mut h = harness(Some("t0k"));
        h.app.request.error = Some("old".to_string());
        h.app.submit();
        assert!(h.app.request.error.is_none());
        h.release.send(Ok(Vec::new())).unwrap();
        wait_until_settled(&mut h.app);
        assert!(h.app.request.error.is_none());
    }

    #[test]
    fn quitting_does_not_wait_for_in_flight_request() {
        let Harness {
            mut app,
            calls,
            release,
        } = harness(Some("t0k"));
        app.submit();
        let deadline = Instant::now() + Duration::from_secs(5);
        while calls.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(app.request.loading);

        app.quit();
        let start = Instant::now();
        drop(app);
        assert!(start.elapsed() < Duration::from_secs(1));
        drop(release);
    }

    #[test]
    fn settling_clears_bottom_bar_messages() {
        let mut h = harness(Some("t0k"));
        h.app.ui.error = Some("No change selected to copy".to_string());
        h.app.submit();
        assert!(h.app.ui.error.is_none());

        h.app.ui.status = Some("Copied a.txt to clipboard".to_string());
        h.release.send(Ok(vec![added("a.txt")])).unwrap();
        wait_until_settled(&mut h.app);
        assert!(h.app.ui.status.is_none());
    }

    #[test]
    fn success_replaces_list_and_resets_selection() {
        let mut h = harness(Some("t0k"));
        h.app.submit();
        h.release
            .send(Ok(vec![added("a.txt"), added("b.txt"), added("c.txt")]))
            .unwrap();
        wait_until_settled(&mut h.app);
        h.app.results.selected_idx = 2;

        h.app.submit();
        h.release.send(Ok(vec![added("z.txt")])).unwrap();
        wait_until_settled(&mut h.app);
        assert_eq!(h.app.results.selected_idx, 0);
        assert_eq!(h.app.selected_change(), Some(&added("z.txt")));
    }
}
