use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::{Mutex, PoisonError};
use std::thread;

use crate::candidates::CandidateStore;
use crate::config::FilterConfig;
use crate::pattern::QueryPattern;

use super::publish::{self, UiSender};
use super::registry::{WorkerHandle, WorkerRegistry};
use super::FilterRequest;

/// Ordered output of one filter pass: the anchored segment (store-order
/// prefix matches) followed by the ranked segment (substring matches sorted
/// by earliest offset, then lexicographically).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    anchored: Vec<String>,
    ranked: Vec<String>,
}

impl MatchResult {
    /// Candidates matching from position 0, in store order.
    #[must_use]
    pub fn anchored(&self) -> &[String] {
        &self.anchored
    }

    /// Remaining substring matches in ranked order.
    #[must_use]
    pub fn ranked(&self) -> &[String] {
        &self.ranked
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.anchored.len() + self.ranked.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchored.is_empty() && self.ranked.is_empty()
    }

    /// All candidates in publish order: anchored segment first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.anchored
            .iter()
            .chain(self.ranked.iter())
            .map(String::as_str)
    }
}

/// Everything a spawned worker needs; moved onto its thread.
pub(crate) struct WorkerContext {
    pub(crate) request: FilterRequest,
    pub(crate) handle: WorkerHandle,
    pub(crate) registry: Arc<Mutex<WorkerRegistry>>,
    pub(crate) store: CandidateStore,
    pub(crate) config: FilterConfig,
    pub(crate) latest: Arc<AtomicU64>,
    pub(crate) ui: UiSender,
}

/// Thread body for one filter worker.
///
/// Phase one waits (fixed poll interval, no timeout) for every older worker
/// to acknowledge completion, so at most one worker ever scans toward the
/// result buffer. Phase two snapshots the store and runs the two match
/// passes. Every exit path marks the handle finished, which is what the
/// next generation's wait loop is watching.
pub(crate) fn run(ctx: WorkerContext) {
    let generation = ctx.request.generation;

    if !wait_for_predecessors(&ctx) {
        log::debug!("filter worker {generation} superseded before scanning");
        ctx.handle.mark_finished();
        return;
    }
    lock_registry(&ctx.registry).prune_finished_before(generation);

    let snapshot = ctx.store.snapshot();
    let result = match QueryPattern::compile(&ctx.request.query, &ctx.config) {
        Ok(pattern) => {
            match scan(&pattern, &snapshot, &ctx.handle, ctx.config.offset_key_width) {
                Some(result) => result,
                None => {
                    log::debug!("filter worker {generation} canceled mid-scan");
                    ctx.handle.mark_finished();
                    return;
                }
            }
        }
        // Fail-soft: a bad pattern yields an empty result for this
        // generation rather than an error the host would have to handle.
        Err(err) => {
            log::warn!("pattern compilation failed for generation {generation}: {err}");
            MatchResult::default()
        }
    };

    if ctx.handle.cancel_requested() {
        log::debug!("filter worker {generation} canceled before publishing");
        ctx.handle.mark_finished();
        return;
    }

    publish::publish(&ctx.ui, generation, Arc::clone(&ctx.latest), result);
    ctx.handle.mark_finished();
}

fn wait_for_predecessors(ctx: &WorkerContext) -> bool {
    let generation = ctx.request.generation;
    loop {
        if ctx.handle.cancel_requested() {
            return false;
        }
        if lock_registry(&ctx.registry).predecessors_finished(generation) {
            return true;
        }
        thread::sleep(ctx.config.poll_interval());
    }
}

fn lock_registry(registry: &Mutex<WorkerRegistry>) -> std::sync::MutexGuard<'_, WorkerRegistry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run both match passes over `snapshot`. Returns `None` when the worker's
/// cancel flag is observed; the flag is checked once per candidate in each
/// pass so cancellation latency never exceeds one scan step.
pub(crate) fn scan(
    pattern: &QueryPattern,
    snapshot: &[String],
    handle: &WorkerHandle,
    offset_key_width: usize,
) -> Option<MatchResult> {
    let mut anchored = Vec::new();
    let mut anchored_indices = HashSet::new();
    for (index, candidate) in snapshot.iter().enumerate() {
        if handle.cancel_requested() {
            return None;
        }
        if pattern.matches_prefix(candidate) {
            anchored.push(candidate.clone());
            anchored_indices.insert(index);
        }
    }

    if pattern.abort_ranking() {
        return Some(MatchResult {
            anchored,
            ranked: Vec::new(),
        });
    }

    let mut keyed: Vec<(String, &String)> = Vec::new();
    for (index, candidate) in snapshot.iter().enumerate() {
        if handle.cancel_requested() {
            return None;
        }
        if anchored_indices.contains(&index) {
            continue;
        }
        if let Some(offset) = pattern.first_offset(candidate) {
            let key = format!("{offset:0offset_key_width$}{candidate}");
            keyed.push((key, candidate));
        }
    }
    // Stable sort: duplicate candidates share a key and keep store order.
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    let ranked = keyed.into_iter().map(|(_, candidate)| candidate.clone()).collect();

    Some(MatchResult { anchored, ranked })
}
