use std::time::Duration;

use crate::candidates::CandidateStore;
use crate::config::FilterConfig;

use super::publish::{HostState, SuggestionView, UiPump, ui_channel};
use super::registry::WorkerHandle;
use super::FilterCoordinator;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

struct RecordingView {
    items: Vec<String>,
    popup_visible: Option<bool>,
    host: HostState,
}

impl RecordingView {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            popup_visible: None,
            host: HostState::interactive(),
        }
    }
}

impl SuggestionView for RecordingView {
    fn clear_suggestions(&mut self) {
        self.items.clear();
    }

    fn append_suggestion(&mut self, candidate: &str) {
        self.items.push(candidate.to_string());
    }

    fn set_popup_visible(&mut self, visible: bool) {
        self.popup_visible = Some(visible);
    }

    fn host_state(&self) -> HostState {
        self.host
    }
}

fn pipeline(candidates: &[&str]) -> (FilterCoordinator, UiPump) {
    init_logging();
    let store = CandidateStore::new();
    store.set_all(candidates.iter().copied());
    let (ui, pump) = ui_channel();
    (
        FilterCoordinator::new(store, FilterConfig::default(), ui),
        pump,
    )
}

fn settle(coordinator: &FilterCoordinator, pump: &UiPump, view: &mut RecordingView) {
    coordinator.wait_for_idle();
    pump.pump(view);
}

#[test]
fn single_request_publishes_in_ranked_order() {
    let (coordinator, pump) = pipeline(&["foobar", "barfoo", "xfoo"]);
    let mut view = RecordingView::new();

    coordinator.submit("foo");
    settle(&coordinator, &pump, &mut view);

    assert_eq!(view.items, ["foobar", "xfoo", "barfoo"]);
    assert_eq!(view.popup_visible, Some(true));
    assert_eq!(coordinator.latest_generation(), 1);
}

#[test]
fn only_the_last_generation_is_visible_after_settling() {
    let (coordinator, pump) = pipeline(&["alpha", "beta", "albatross"]);
    let mut view = RecordingView::new();

    coordinator.submit("al");
    coordinator.submit("bet");
    coordinator.submit("be");
    settle(&coordinator, &pump, &mut view);

    assert_eq!(view.items, ["beta"]);
    assert_eq!(coordinator.latest_generation(), 3);
}

#[test]
fn same_query_twice_is_idempotent() {
    let (coordinator, pump) = pipeline(&["zoom", "boot", "aloof", "ooze"]);
    let mut view = RecordingView::new();

    coordinator.submit("oo");
    settle(&coordinator, &pump, &mut view);
    let first = view.items.clone();

    coordinator.submit("oo");
    settle(&coordinator, &pump, &mut view);

    assert_eq!(view.items, first);
    assert_eq!(view.items, ["ooze", "boot", "zoom", "aloof"]);
}

#[test]
fn no_matches_hides_the_popup() {
    let (coordinator, pump) = pipeline(&["alpha", "beta"]);
    let mut view = RecordingView::new();

    coordinator.submit("zzz");
    settle(&coordinator, &pump, &mut view);

    assert!(view.items.is_empty());
    assert_eq!(view.popup_visible, Some(false));
}

#[test]
fn empty_query_publishes_the_store_in_order() {
    let (coordinator, pump) = pipeline(&["b", "a", "c"]);
    let mut view = RecordingView::new();

    coordinator.submit("");
    settle(&coordinator, &pump, &mut view);

    assert_eq!(view.items, ["b", "a", "c"]);
}

#[test]
fn worker_waits_for_an_unfinished_predecessor() {
    let (coordinator, pump) = pipeline(&["alpha"]);
    let mut view = RecordingView::new();

    // Stand-in for an older worker that has not yet acknowledged.
    let blocker = WorkerHandle::new(0);
    coordinator.register_for_test(blocker.clone());

    coordinator.submit("al");
    std::thread::sleep(Duration::from_millis(50));
    pump.pump(&mut view);
    assert!(view.items.is_empty(), "worker scanned past a live predecessor");

    blocker.mark_finished();
    settle(&coordinator, &pump, &mut view);
    assert_eq!(view.items, ["alpha"]);
}

#[test]
fn superseded_worker_terminates_without_publishing() {
    let (coordinator, pump) = pipeline(&["alpha", "beta"]);
    let mut view = RecordingView::new();

    // Hold both submissions behind a stand-in predecessor so the first
    // worker is still in its wait phase when the second cancels it.
    let blocker = WorkerHandle::new(0);
    coordinator.register_for_test(blocker.clone());

    coordinator.submit("al");
    coordinator.submit("bet");
    blocker.mark_finished();
    settle(&coordinator, &pump, &mut view);

    assert_eq!(view.items, ["beta"]);
    assert_eq!(view.popup_visible, Some(true));
}

#[test]
fn store_mutation_between_requests_is_observed() {
    let (coordinator, pump) = pipeline(&["foo"]);
    let mut view = RecordingView::new();

    coordinator.submit("foo");
    settle(&coordinator, &pump, &mut view);
    assert_eq!(view.items, ["foo"]);

    coordinator.candidates().add("foonew");
    coordinator.candidates().remove("foo");
    coordinator.submit("foo");
    settle(&coordinator, &pump, &mut view);
    assert_eq!(view.items, ["foonew"]);
}

#[test]
fn abort_marker_queries_publish_anchored_matches_only() {
    let (coordinator, pump) = pipeline(&["key*one", "xkey*", "key*"]);
    let mut view = RecordingView::new();

    coordinator.submit("key*");
    settle(&coordinator, &pump, &mut view);

    assert_eq!(view.items, ["key*one", "key*"]);
}

#[test]
fn result_for_a_disabled_host_arrives_hidden() {
    let (coordinator, pump) = pipeline(&["alpha"]);
    let mut view = RecordingView::new();
    view.host.enabled = false;

    coordinator.submit("al");
    settle(&coordinator, &pump, &mut view);

    assert_eq!(view.items, ["alpha"]);
    assert_eq!(view.popup_visible, Some(false));
}
