//! Background worker that runs compare requests off the UI thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::core::{Change, CompareBackend, CompareForm};

#[derive(Debug, Clone)]
pub(crate) struct CompareRequest {
    pub id: u64,
    pub form: CompareForm,
    pub token: String,
}

#[derive(Debug)]
pub(crate) enum CompareResponse {
    Loaded { id: u64, changes: Vec<Change> },
    Failed { id: u64, message: String },
}

pub(crate) struct CompareWorker {
    request_tx: Option<Sender<CompareRequest>>,
    pub response_rx: Receiver<CompareResponse>,
    handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for CompareWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompareWorker")
            .field("request_tx", &self.request_tx)
            .field("response_rx", &self.response_rx)
            .field("handle", &self.handle.as_ref().map(|_| "..."))
            .finish()
    }
}

impl CompareWorker {
    /// Queue a request. Returns false if the worker thread is gone.
    pub fn send(&self, request: CompareRequest) -> bool {
        match &self.request_tx {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        }
    }

    /// Let the thread finish on its own instead of joining it on drop.
    ///
    /// The thread exits after its current request, once it sees the
    /// response channel closed.
    pub fn detach(&mut self) {
        self.handle.take();
    }
}

pub(crate) fn spawn_compare_worker(backend: Box<dyn CompareBackend>) -> CompareWorker {
    let (request_tx, request_rx) = mpsc::channel::<CompareRequest>();
    let (response_tx, response_rx) = mpsc::channel::<CompareResponse>();

    let handle = thread::Builder::new()
        .name("commitdiff-compare".to_string())
        .spawn(move || worker_loop(backend, request_rx, response_tx));

    let handle = match handle {
        Ok(h) => Some(h),
        Err(e) => {
            log::error!("Failed to spawn compare worker: {}", e);
            None
        }
    };

    CompareWorker {
        request_tx: handle.as_ref().map(|_| request_tx),
        response_rx,
        handle,
    }
}

impl Drop for CompareWorker {
    fn drop(&mut self) {
        // Closing the request channel ends worker_loop; then join.
        self.request_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn worker_loop(
    backend: Box<dyn CompareBackend>,
    request_rx: Receiver<CompareRequest>,
    response_tx: Sender<CompareResponse>,
) {
    while let Ok(mut req) = request_rx.recv() {
        // Only the newest queued request is worth answering.
        while let Ok(next) = request_rx.try_recv() {
            req = next;
        }

        let response = run_request(backend.as_ref(), req);
        if response_tx.send(response).is_err() {
            break;
        }
    }
}

fn run_request(backend: &dyn CompareBackend, req: CompareRequest) -> CompareResponse {
    let CompareRequest { id, form, token } = req;

    match backend.compare(&form, &token) {
        Ok(changes) => CompareResponse::Loaded { id, changes },
        Err(e) => {
            log::warn!("compare request {} failed: {}", id, e);
            CompareResponse::Failed {
                id,
                message: e.user_message(),
            }
        }
    }
}
