//! Drill-down selection state machine.

use std::fmt::Display;

use tracing::{debug, error};

use super::types::{DetailRecord, DrillContext, DrillState};

/// A detail fetch the caller must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillRequest {
    /// Generation captured when the request was issued.
    pub generation: u64,
    /// Entity to fetch details for.
    pub entity: String,
    /// Period scope of the fetch.
    pub context: DrillContext,
}

/// Outcome of [`DrillCoordinator::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillCommand {
    /// A new entity was selected; fetch its details.
    Fetch(DrillRequest),
    /// The selected entity was selected again and is now deselected.
    Cleared,
}

/// Outcome of [`DrillCoordinator::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The response belonged to the current selection and was applied.
    Applied,
    /// A newer selection superseded the request; the response was dropped.
    Stale,
}

/// Owns [`DrillState`] and discards responses of superseded selections.
///
/// Every selection change bumps a generation counter. A response is applied
/// only when the generation captured in its [`DrillRequest`] still equals the
/// current one.
#[derive(Debug, Default)]
pub struct DrillCoordinator {
    state: DrillState,
    generation: u64,
}

impl DrillCoordinator {
    /// Creates a coordinator with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &DrillState {
        &self.state
    }

    /// Current generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Selects `entity` within `context`.
    ///
    /// Selecting the already selected entity deselects it. Any other entity
    /// clears the previous details, enters the loading state and returns the
    /// request to issue.
    pub fn select(&mut self, entity: &str, context: DrillContext) -> DrillCommand {
        self.generation += 1;

        if self.state.selected_entity.as_deref() == Some(entity) {
            self.state = DrillState::default();
            debug!(entity, generation = self.generation, "drill-down deselected");
            return DrillCommand::Cleared;
        }

        self.state = DrillState {
            selected_entity: Some(entity.to_string()),
            details: Vec::new(),
            loading: true,
        };
        debug!(entity, generation = self.generation, "drill-down selected");

        DrillCommand::Fetch(DrillRequest {
            generation: self.generation,
            entity: entity.to_string(),
            context,
        })
    }

    /// Clears the selection after a year, month or mode change.
    ///
    /// Requests issued before the reset become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = DrillState::default();
    }

    /// Returns true if `request` still matches the current selection.
    #[must_use]
    pub fn is_current(&self, request: &DrillRequest) -> bool {
        request.generation == self.generation
            && self.state.selected_entity.as_deref() == Some(request.entity.as_str())
    }

    /// Applies the outcome of `request` unless it has been superseded.
    ///
    /// A failed fetch shows as "no details": the error is logged and the
    /// state ends up empty and not loading.
    pub fn resolve<E: Display>(
        &mut self,
        request: &DrillRequest,
        outcome: Result<Vec<DetailRecord>, E>,
    ) -> Resolution {
        if !self.is_current(request) {
            debug!(
                entity = %request.entity,
                generation = request.generation,
                current = self.generation,
                "discarding stale drill-down response"
            );
            return Resolution::Stale;
        }

        self.state.details = match outcome {
            Ok(details) => details,
            Err(err) => {
                error!(entity = %request.entity, error = %err, "drill-down fetch failed");
                Vec::new()
            }
        };
        self.state.loading = false;
        Resolution::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drilldown::types::DrillTarget;
    use rust_decimal_macros::dec;

    fn ctx() -> DrillContext {
        DrillContext::year(DrillTarget::Sector, 2024)
    }

    fn detail(text: &str) -> DetailRecord {
        DetailRecord {
            date: None,
            account_description: text.to_string(),
            cost_center: None,
            detail_text: None,
            amount: dec!(10),
            count: None,
        }
    }

    fn fetch(command: DrillCommand) -> DrillRequest {
        match command {
            DrillCommand::Fetch(request) => request,
            DrillCommand::Cleared => panic!("expected a fetch"),
        }
    }

    #[test]
    fn test_select_enters_loading() {
        let mut coordinator = DrillCoordinator::new();
        let request = fetch(coordinator.select("TI", ctx()));

        assert_eq!(request.entity, "TI");
        assert_eq!(request.context, ctx());
        assert!(coordinator.state().loading);
        assert!(coordinator.state().details.is_empty());
    }

    #[test]
    fn test_resolve_applies_current() {
        let mut coordinator = DrillCoordinator::new();
        let request = fetch(coordinator.select("TI", ctx()));

        let resolution = coordinator.resolve::<String>(&request, Ok(vec![detail("a")]));

        assert_eq!(resolution, Resolution::Applied);
        assert_eq!(coordinator.state().details, vec![detail("a")]);
        assert!(!coordinator.state().loading);
    }

    #[test]
    fn test_reselect_toggles_off() {
        let mut coordinator = DrillCoordinator::new();
        let request = fetch(coordinator.select("TI", ctx()));
        coordinator.resolve::<String>(&request, Ok(vec![detail("a")]));

        assert_eq!(coordinator.select("TI", ctx()), DrillCommand::Cleared);
        assert_eq!(coordinator.state(), &DrillState::default());
    }

    #[test]
    fn test_late_response_of_previous_selection_is_dropped() {
        let mut coordinator = DrillCoordinator::new();
        let slow = fetch(coordinator.select("A", ctx()));
        let fast = fetch(coordinator.select("B", ctx()));

        assert_eq!(
            coordinator.resolve::<String>(&fast, Ok(vec![detail("b")])),
            Resolution::Applied
        );
        assert_eq!(
            coordinator.resolve::<String>(&slow, Ok(vec![detail("a")])),
            Resolution::Stale
        );
        assert_eq!(coordinator.state().selected_entity.as_deref(), Some("B"));
        assert_eq!(coordinator.state().details, vec![detail("b")]);
    }

    #[test]
    fn test_aba_reselection_drops_first_response() {
        let mut coordinator = DrillCoordinator::new();
        let first = fetch(coordinator.select("A", ctx()));
        let _ = fetch(coordinator.select("B", ctx()));
        let second = fetch(coordinator.select("A", ctx()));

        assert_eq!(
            coordinator.resolve::<String>(&first, Ok(vec![detail("old")])),
            Resolution::Stale
        );
        assert!(coordinator.state().loading);
        assert_eq!(
            coordinator.resolve::<String>(&second, Ok(vec![detail("new")])),
            Resolution::Applied
        );
    }

    #[test]
    fn test_failure_degrades_to_empty() {
        let mut coordinator = DrillCoordinator::new();
        let request = fetch(coordinator.select("TI", ctx()));

        let resolution = coordinator.resolve(&request, Err("connection refused"));

        assert_eq!(resolution, Resolution::Applied);
        assert!(coordinator.state().details.is_empty());
        assert!(!coordinator.state().loading);
        assert_eq!(coordinator.state().selected_entity.as_deref(), Some("TI"));
    }

    #[test]
    fn test_reset_invalidates_in_flight_request() {
        let mut coordinator = DrillCoordinator::new();
        let request = fetch(coordinator.select("TI", ctx()));
        coordinator.reset();

        assert_eq!(
            coordinator.resolve::<String>(&request, Ok(vec![detail("a")])),
            Resolution::Stale
        );
        assert_eq!(coordinator.state(), &DrillState::default());
    }
}
