use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::worker::MatchResult;

/// Interactive state of the host text control, sampled on the UI thread at
/// publish time. A result computed while the control was live must not force
/// the popup open after the control stopped being interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostState {
    pub focused: bool,
    pub visible: bool,
    pub editable: bool,
    pub enabled: bool,
}

impl HostState {
    /// State of a control that may show its popup.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            focused: true,
            visible: true,
            editable: true,
            enabled: true,
        }
    }

    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.focused && self.visible && self.editable && self.enabled
    }
}

/// UI-side surface the pipeline publishes into: the suggestion list, the
/// popup visibility signal, and the host-state probe used for gating.
pub trait SuggestionView {
    /// Remove every entry from the visible suggestion list.
    fn clear_suggestions(&mut self);

    /// Append one candidate to the visible suggestion list.
    fn append_suggestion(&mut self, candidate: &str);

    /// Show or hide the suggestion popup.
    fn set_popup_visible(&mut self, visible: bool);

    /// Current interactive state of the host control.
    fn host_state(&self) -> HostState;
}

type UiAction = Box<dyn FnOnce(&mut dyn SuggestionView) + Send>;

/// Worker-side handle for scheduling publish actions onto the UI thread.
#[derive(Clone)]
pub struct UiSender {
    tx: Sender<UiAction>,
}

/// UI-thread side of the action queue. The host event loop calls
/// [`UiPump::pump`] to drain pending publishes; nothing here blocks.
pub struct UiPump {
    rx: Receiver<UiAction>,
}

/// Create the single-consumer action queue connecting workers to the UI
/// thread.
#[must_use]
pub fn ui_channel() -> (UiSender, UiPump) {
    let (tx, rx) = mpsc::channel();
    (UiSender { tx }, UiPump { rx })
}

impl UiPump {
    /// Apply every queued publish action to `view`, in arrival order.
    pub fn pump(&self, view: &mut dyn SuggestionView) {
        loop {
            match self.rx.try_recv() {
                Ok(action) => action(view),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
    }
}

/// Schedule `result` for application on the UI thread.
///
/// The queued action re-validates on arrival: a result whose generation is no
/// longer the latest is dropped outright, and a non-empty result only forces
/// the popup visible while the host control is still interactive. An empty
/// result always hides the popup.
pub(crate) fn publish(ui: &UiSender, generation: u64, latest: Arc<AtomicU64>, result: MatchResult) {
    let action: UiAction = Box::new(move |view| {
        if latest.load(AtomicOrdering::Acquire) != generation {
            log::trace!("dropping stale result for generation {generation}");
            return;
        }
        view.clear_suggestions();
        for candidate in result.iter() {
            view.append_suggestion(candidate);
        }
        let visible = !result.is_empty() && view.host_state().is_interactive();
        view.set_popup_visible(visible);
    });
    if ui.tx.send(action).is_err() {
        log::trace!("ui pump gone; discarding result for generation {generation}");
    }
}
