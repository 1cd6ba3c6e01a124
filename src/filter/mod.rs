//! The per-keystroke filtering pipeline: request coordination, cancelable
//! scan workers, and UI-thread result publication.

mod coordinator;
mod publish;
mod registry;
mod worker;

#[cfg(test)]
mod tests;

pub use coordinator::FilterCoordinator;
pub use publish::{HostState, SuggestionView, UiPump, UiSender, ui_channel};
pub use worker::MatchResult;

/// One filter request: the text at the time of the change notification and
/// the generation distinguishing it from its predecessors and successors.
#[derive(Debug, Clone)]
pub(crate) struct FilterRequest {
    pub(crate) query: String,
    pub(crate) generation: u64,
}
