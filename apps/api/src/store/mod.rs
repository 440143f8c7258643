//! The single wizard-state container.
//!
//! State only changes through [`CvStore::dispatch`]. After every applied
//! action the store notifies its observers; persistence is one of them.

pub mod actions;
pub mod handlers;
pub mod persistence;

use std::sync::Arc;

use tracing::debug;

use crate::models::cv::WizardState;

pub use actions::{reduce, Action};

/// What happened to the state. Carries the new state.
#[derive(Debug, Clone, Copy)]
pub enum StoreEvent<'a> {
    Changed(&'a WizardState),
    /// `resetAll` ran; durable copies should be dropped.
    Reset(&'a WizardState),
}

pub trait StoreObserver: Send + Sync {
    fn notify(&self, event: StoreEvent<'_>);
}

pub struct CvStore {
    state: WizardState,
    observers: Vec<Arc<dyn StoreObserver>>,
}

impl CvStore {
    pub fn new(initial: WizardState) -> Self {
        Self {
            state: initial,
            observers: Vec::new(),
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn subscribe(&mut self, observer: Arc<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    /// Applies `action`. Returns `false` when it was declined; observers are
    /// only told about applied actions.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let name = action.name();
        let is_reset = matches!(action, Action::ResetAll);

        let Some(next) = reduce(&self.state, action) else {
            debug!(action = name, "action declined");
            return false;
        };
        self.state = next;
        debug!(action = name, step = self.state.step, "action applied");

        let event = if is_reset {
            StoreEvent::Reset(&self.state)
        } else {
            StoreEvent::Changed(&self.state)
        };
        for observer in &self.observers {
            observer.notify(event);
        }
        true
    }
}

impl Default for CvStore {
    fn default() -> Self {
        Self::new(WizardState::initial())
    }
}
