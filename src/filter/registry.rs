use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

/// Shared view of one in-flight worker: its generation plus the two flags
/// the coordination handshake runs on.
///
/// `cancel` is the cooperative cancellation request; the worker polls it once
/// per candidate scanned, so cancellation latency is bounded by one scan
/// step. `finished` is the worker's acknowledgment, set exactly once on every
/// exit path.
#[derive(Debug, Clone)]
pub(crate) struct WorkerHandle {
    generation: u64,
    cancel: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl WorkerHandle {
    pub(crate) fn new(generation: u64) -> Self {
        Self {
            generation,
            cancel: Arc::new(AtomicBool::new(false)),
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn request_cancel(&self) {
        self.cancel.store(true, AtomicOrdering::Release);
    }

    pub(crate) fn cancel_requested(&self) -> bool {
        self.cancel.load(AtomicOrdering::Acquire)
    }

    pub(crate) fn mark_finished(&self) {
        self.finished.store(true, AtomicOrdering::Release);
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished.load(AtomicOrdering::Acquire)
    }
}

/// In-flight workers for one control instance. Owned by the coordinator
/// behind a mutex; never static.
#[derive(Debug, Default)]
pub(crate) struct WorkerRegistry {
    workers: Vec<WorkerHandle>,
}

impl WorkerRegistry {
    pub(crate) fn register(&mut self, handle: WorkerHandle) {
        self.workers.push(handle);
    }

    /// Flip the cancel flag on every worker that has not yet finished.
    pub(crate) fn cancel_unfinished(&self) {
        for worker in &self.workers {
            if !worker.is_finished() {
                worker.request_cancel();
            }
        }
    }

    /// Whether every worker older than `generation` has acknowledged
    /// completion.
    pub(crate) fn predecessors_finished(&self, generation: u64) -> bool {
        self.workers
            .iter()
            .filter(|worker| worker.generation() < generation)
            .all(WorkerHandle::is_finished)
    }

    /// Drop finished workers older than `generation`.
    pub(crate) fn prune_finished_before(&mut self, generation: u64) {
        self.workers
            .retain(|worker| worker.generation() >= generation || !worker.is_finished());
    }

    /// Drop the entry for `generation` regardless of state. Used when a
    /// worker failed to spawn, so nothing ever waits on it.
    pub(crate) fn remove(&mut self, generation: u64) {
        self.workers.retain(|worker| worker.generation() != generation);
    }

    pub(crate) fn all_finished(&self) -> bool {
        self.workers.iter().all(WorkerHandle::is_finished)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.workers.len()
    }
}
