use super::super::worker::{spawn_compare_worker, CompareWorker};
use crate::core::CompareBackend;

pub(super) struct WorkerState {
    pub(super) compare: CompareWorker,
    pub(super) next_request_id: u64,
    pub(super) pending_request_id: Option<u64>,
}

impl WorkerState {
    pub(super) fn new(backend: Box<dyn CompareBackend>) -> Self {
        Self {
            compare: spawn_compare_worker(backend),
            next_request_id: 1,
            pending_request_id: None,
        }
    }
}

impl Drop for WorkerState {
    fn drop(&mut self) {
        // A request still in flight may sit in the HTTP client until its
        // timeout; quitting must not wait for it.
        if let Some(id) = self.pending_request_id {
            log::debug!("detaching compare worker with request {} in flight", id);
            self.compare.detach();
        }
    }
}
