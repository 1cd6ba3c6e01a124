//! Incremental, cancelable suggestion filtering for type-ahead text inputs.
//!
//! The crate covers the machinery between a text-change notification and the
//! suggestion popup: a shared [`CandidateStore`], per-request pattern
//! compilation, short-lived scan workers with cooperative cancellation, and
//! generation-checked publication onto the single UI thread. Rendering,
//! popup geometry, and keyboard handling stay with the host; it plugs in
//! through the [`SuggestionView`] trait and drives the [`UiPump`] from its
//! event loop.
//!
//! ```
//! use typeahead::{PipelineBuilder, HostState, SuggestionView};
//!
//! struct Popup {
//!     rows: Vec<String>,
//!     open: bool,
//! }
//!
//! impl SuggestionView for Popup {
//!     fn clear_suggestions(&mut self) {
//!         self.rows.clear();
//!     }
//!     fn append_suggestion(&mut self, candidate: &str) {
//!         self.rows.push(candidate.to_string());
//!     }
//!     fn set_popup_visible(&mut self, visible: bool) {
//!         self.open = visible;
//!     }
//!     fn host_state(&self) -> HostState {
//!         HostState::interactive()
//!     }
//! }
//!
//! let (coordinator, pump) = PipelineBuilder::new()
//!     .with_candidates(["foobar", "barfoo", "xfoo"])
//!     .build();
//! let mut popup = Popup { rows: Vec::new(), open: false };
//!
//! // On every text change:
//! coordinator.submit("foo");
//!
//! // On every event-loop tick:
//! coordinator.wait_for_idle(); // hosts just pump; tests settle first
//! pump.pump(&mut popup);
//! assert_eq!(popup.rows, ["foobar", "xfoo", "barfoo"]);
//! assert!(popup.open);
//! ```

mod builder;
mod candidates;
mod config;
mod filter;
mod pattern;

pub use builder::PipelineBuilder;
pub use candidates::CandidateStore;
pub use config::FilterConfig;
pub use filter::{
    FilterCoordinator, HostState, MatchResult, SuggestionView, UiPump, UiSender, ui_channel,
};
pub use pattern::{PatternError, QueryPattern};
