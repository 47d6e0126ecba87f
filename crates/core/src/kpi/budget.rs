//! Budget lookup keyed by display name.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::summary::ResponsibleParty;

/// Key under which a responsible party's budget is stored and looked up.
///
/// The display alias wins when set and non-blank; otherwise the canonical name.
#[must_use]
pub fn resolve_entity_key(party: &ResponsibleParty) -> &str {
    party
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .unwrap_or(&party.name)
}

/// Monthly budget per entity.
///
/// Amounts are keyed by [`resolve_entity_key`]. Canonical names of aliased
/// parties still resolve, so aggregates labelled either way find their budget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetMap {
    amounts: HashMap<String, Decimal>,
    canonical: HashMap<String, String>,
}

impl BudgetMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from the responsible-party listing.
    #[must_use]
    pub fn from_parties(parties: &[ResponsibleParty]) -> Self {
        let mut map = Self::new();
        for party in parties {
            let key = resolve_entity_key(party);
            if key != party.name {
                map.canonical.insert(party.name.clone(), key.to_string());
            }
            map.amounts.insert(key.to_string(), party.monthly_budget);
        }
        map
    }

    /// Sets the monthly budget of an entity.
    pub fn insert(&mut self, entity: impl Into<String>, monthly: Decimal) {
        self.amounts.insert(entity.into(), monthly);
    }

    fn key_for<'a>(&'a self, entity: &'a str) -> &'a str {
        if self.amounts.contains_key(entity) {
            entity
        } else {
            self.canonical.get(entity).map_or(entity, String::as_str)
        }
    }

    /// Monthly budget of an entity; zero when none is configured.
    #[must_use]
    pub fn budget_for(&self, entity: &str) -> Decimal {
        self.amounts
            .get(self.key_for(entity))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns true if a positive budget is configured for `entity`.
    #[must_use]
    pub fn has_budget(&self, entity: &str) -> bool {
        self.budget_for(entity) > Decimal::ZERO
    }

    /// Label to show for an entity: its display alias when it is a canonical name.
    #[must_use]
    pub fn label_for<'a>(&'a self, entity: &'a str) -> &'a str {
        self.canonical.get(entity).map_or(entity, String::as_str)
    }

    /// Sum of all configured monthly budgets.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.amounts.values().copied().sum()
    }

    /// Number of entities with a budget entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Returns true when no budgets are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}
