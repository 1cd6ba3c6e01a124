use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use crate::candidates::CandidateStore;
use crate::config::FilterConfig;

use super::FilterRequest;
use super::publish::UiSender;
use super::registry::{WorkerHandle, WorkerRegistry};
use super::worker::{self, WorkerContext};

/// Per-control controller that serializes filter requests.
///
/// Each [`submit`](Self::submit) allocates the next generation, requests
/// cancellation of every unfinished worker, and launches a fresh worker for
/// the new query. The calling (UI) thread never blocks: the wait for older
/// workers to acknowledge cancellation happens on the new worker's thread,
/// before it takes its candidate snapshot.
pub struct FilterCoordinator {
    config: FilterConfig,
    store: CandidateStore,
    registry: Arc<Mutex<WorkerRegistry>>,
    latest: Arc<AtomicU64>,
    ui: UiSender,
}

impl FilterCoordinator {
    pub fn new(store: CandidateStore, config: FilterConfig, ui: UiSender) -> Self {
        Self {
            config,
            store,
            registry: Arc::new(Mutex::new(WorkerRegistry::default())),
            latest: Arc::new(AtomicU64::new(0)),
            ui,
        }
    }

    /// Submit the control's current text as a new filter request.
    ///
    /// Returns immediately. Whatever worker wins the coordination handshake
    /// publishes through the UI queue; all older in-flight workers terminate
    /// without output. A failure to spawn the worker thread is logged and
    /// the request dropped, so typing is never blocked by a refresh that
    /// could not start.
    pub fn submit(&self, query: impl Into<String>) {
        let generation = self.latest.fetch_add(1, AtomicOrdering::AcqRel) + 1;
        let handle = WorkerHandle::new(generation);
        {
            let mut registry = self.lock_registry();
            registry.cancel_unfinished();
            registry.register(handle.clone());
        }

        let ctx = WorkerContext {
            request: FilterRequest {
                query: query.into(),
                generation,
            },
            handle: handle.clone(),
            registry: Arc::clone(&self.registry),
            store: self.store.clone(),
            config: self.config.clone(),
            latest: Arc::clone(&self.latest),
            ui: self.ui.clone(),
        };

        let spawned = thread::Builder::new()
            .name(format!("typeahead-filter-{generation}"))
            .spawn(move || worker::run(ctx));
        if let Err(err) = spawned {
            log::warn!("could not spawn filter worker for generation {generation}: {err}");
            self.lock_registry().remove(generation);
        }
    }

    /// The store this coordinator filters. Mutations through the returned
    /// handle are picked up by the next submitted request.
    #[must_use]
    pub fn candidates(&self) -> &CandidateStore {
        &self.store
    }

    /// Most recently allocated generation (0 before the first submit).
    #[must_use]
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(AtomicOrdering::Acquire)
    }

    /// Block until every registered worker has acknowledged completion.
    /// Intended for orderly shutdown and for tests; the UI thread should
    /// never need it.
    pub fn wait_for_idle(&self) {
        loop {
            if self.lock_registry().all_finished() {
                return;
            }
            thread::sleep(self.config.poll_interval());
        }
    }

    #[cfg(test)]
    pub(crate) fn register_for_test(&self, handle: WorkerHandle) {
        self.lock_registry().register(handle);
    }

    fn lock_registry(&self) -> MutexGuard<'_, WorkerRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
