//! Async drill-down controller.
//!
//! Wraps [`DrillCoordinator`] with real fetches: every selection spawns a
//! task whose response goes back through the coordinator, which drops it if
//! the selection moved on in the meantime. State changes are published on a
//! `watch` channel.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

use crate::api::CostApi;
use costlens_core::drilldown::{DrillCommand, DrillContext, DrillCoordinator, DrillState, Resolution};

/// Coordinator and the fetch it last started, updated under one lock.
#[derive(Debug, Default)]
struct DrillSlot {
    coordinator: DrillCoordinator,
    in_flight: Option<AbortHandle>,
}

/// Drives drill-down fetches for one screen.
pub struct DrillDownController {
    api: Arc<dyn CostApi>,
    slot: Arc<Mutex<DrillSlot>>,
    state: Arc<watch::Sender<DrillState>>,
    abort_superseded: bool,
}

impl DrillDownController {
    /// Creates a controller that aborts superseded fetches.
    #[must_use]
    pub fn new(api: Arc<dyn CostApi>) -> Self {
        let (state, _) = watch::channel(DrillState::default());
        Self {
            api,
            slot: Arc::new(Mutex::new(DrillSlot::default())),
            state: Arc::new(state),
            abort_superseded: true,
        }
    }

    /// Keeps superseded fetches running; their responses are still discarded.
    #[must_use]
    pub fn without_abort(mut self) -> Self {
        self.abort_superseded = false;
        self
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DrillState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> DrillState {
        self.state.borrow().clone()
    }

    /// Selects `entity`, or deselects it if it is already selected.
    ///
    /// Returns the spawned fetch, if one was started.
    pub async fn select(&self, entity: &str, context: DrillContext) -> Option<JoinHandle<()>> {
        let mut slot = self.slot.lock().await;
        let command = slot.coordinator.select(entity, context);
        self.state.send_replace(slot.coordinator.state().clone());
        self.abort_in_flight(&mut slot);

        let DrillCommand::Fetch(request) = command else {
            return None;
        };

        let api = Arc::clone(&self.api);
        let shared = Arc::clone(&self.slot);
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            let outcome = api.details(&request.entity, request.context).await;
            let mut slot = shared.lock().await;
            if slot.coordinator.resolve(&request, outcome) == Resolution::Applied {
                state.send_replace(slot.coordinator.state().clone());
            }
        });

        slot.in_flight = Some(handle.abort_handle());
        Some(handle)
    }

    /// Clears the selection after a filter change, invalidating any fetch in flight.
    pub async fn reset(&self) {
        let mut slot = self.slot.lock().await;
        slot.coordinator.reset();
        self.state.send_replace(slot.coordinator.state().clone());
        self.abort_in_flight(&mut slot);
        debug!("drill-down reset");
    }

    fn abort_in_flight(&self, slot: &mut DrillSlot) {
        let superseded = slot.in_flight.take();
        if let Some(handle) = superseded.filter(|_| self.abort_superseded) {
            handle.abort();
        }
    }
}
