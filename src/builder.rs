use crate::candidates::CandidateStore;
use crate::config::FilterConfig;
use crate::filter::{FilterCoordinator, UiPump, ui_channel};

/// A small builder for wiring up a filtering pipeline.
///
/// Seeds the candidate store, applies configuration overrides, and connects
/// the coordinator to a UI pump over a fresh action queue.
pub struct PipelineBuilder {
    config: FilterConfig,
    candidates: Vec<String>,
}

impl PipelineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: FilterConfig::default(),
            candidates: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn with_config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    /// Override just the abort marker character.
    #[must_use]
    pub fn with_abort_marker(mut self, marker: char) -> Self {
        self.config.abort_marker = marker;
        self
    }

    /// Seed the candidate store.
    #[must_use]
    pub fn with_candidates<I>(mut self, candidates: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.candidates
            .extend(candidates.into_iter().map(Into::into));
        self
    }

    /// Build the wired pipeline. The coordinator belongs to the control
    /// instance; the pump belongs to the UI event loop.
    #[must_use]
    pub fn build(self) -> (FilterCoordinator, UiPump) {
        let store = CandidateStore::new();
        if !self.candidates.is_empty() {
            store.set_all(self.candidates);
        }
        let (ui, pump) = ui_channel();
        (FilterCoordinator::new(store, self.config, ui), pump)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
