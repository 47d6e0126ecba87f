//! Normalized period x entity matrix.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

/// Month (1-12) in yearly matrices, day of month in daily matrices.
pub type PeriodKey = u32;

/// Aggregates of a single period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodEntry {
    /// Period total as reported by the backend.
    pub total: Decimal,
    /// Entity totals within the period.
    pub entities: HashMap<String, Decimal>,
}

/// Period -> entity aggregates, plus the entity universe in first-appearance order.
///
/// Entity names are kept exactly as received: two names differing only in
/// case are distinct entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedMatrix {
    periods: BTreeMap<PeriodKey, PeriodEntry>,
    entity_order: Vec<String>,
    range_breakdown: Option<HashMap<String, Decimal>>,
}

impl NormalizedMatrix {
    /// Creates an empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `period`, creating a zeroed one if missing.
    pub(crate) fn entry_mut(&mut self, period: PeriodKey) -> &mut PeriodEntry {
        self.periods.entry(period).or_default()
    }

    /// Records an entity value for a period, extending the universe on first sight.
    pub(crate) fn set_entity(&mut self, period: PeriodKey, entity: &str, value: Decimal) {
        self.note_entity(entity);
        self.entry_mut(period).entities.insert(entity.to_string(), value);
    }

    /// Records an entity total that is not attributed to any single period.
    pub(crate) fn set_range_total(&mut self, entity: &str, value: Decimal) {
        self.note_entity(entity);
        self.range_breakdown
            .get_or_insert_with(HashMap::new)
            .insert(entity.to_string(), value);
    }

    fn note_entity(&mut self, entity: &str) {
        if !self.entity_order.iter().any(|e| e == entity) {
            self.entity_order.push(entity.to_string());
        }
    }

    /// Returns true when the matrix has neither periods nor entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty() && self.entity_order.is_empty()
    }

    /// Returns the entry of a period, if present.
    #[must_use]
    pub fn period(&self, period: PeriodKey) -> Option<&PeriodEntry> {
        self.periods.get(&period)
    }

    /// Returns the total of a period, zero when absent.
    #[must_use]
    pub fn period_total(&self, period: PeriodKey) -> Decimal {
        self.periods.get(&period).map_or(Decimal::ZERO, |p| p.total)
    }

    /// Returns an entity's value within a period, zero when absent.
    #[must_use]
    pub fn entity_value(&self, period: PeriodKey, entity: &str) -> Decimal {
        self.periods
            .get(&period)
            .and_then(|p| p.entities.get(entity))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Iterates periods in ascending order.
    pub fn periods(&self) -> impl Iterator<Item = (PeriodKey, &PeriodEntry)> {
        self.periods.iter().map(|(k, v)| (*k, v))
    }

    /// Number of periods present.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Largest period key present.
    #[must_use]
    pub fn last_period(&self) -> Option<PeriodKey> {
        self.periods.keys().next_back().copied()
    }

    /// Entity universe in first-appearance order.
    #[must_use]
    pub fn entities(&self) -> &[String] {
        &self.entity_order
    }

    /// Returns true if `entity` belongs to the universe.
    #[must_use]
    pub fn contains_entity(&self, entity: &str) -> bool {
        self.entity_order.iter().any(|e| e == entity)
    }

    /// Sum of all period totals.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.periods.values().map(|p| p.total).sum()
    }

    /// Per-entity totals over the whole matrix, in first-appearance order.
    ///
    /// Matrices built from range-level entity totals (daily summaries) report
    /// those instead of summing per-period breakdowns.
    #[must_use]
    pub fn entity_totals(&self) -> Vec<(String, Decimal)> {
        if let Some(breakdown) = &self.range_breakdown {
            return self
                .entity_order
                .iter()
                .map(|e| (e.clone(), breakdown.get(e).copied().unwrap_or(Decimal::ZERO)))
                .collect();
        }

        self.entity_order
            .iter()
            .map(|e| {
                let total: Decimal = self
                    .periods
                    .values()
                    .filter_map(|p| p.entities.get(e))
                    .copied()
                    .sum();
                (e.clone(), total)
            })
            .collect()
    }

    /// Per-entity totals within one period, in first-appearance order.
    #[must_use]
    pub fn period_entity_totals(&self, period: PeriodKey) -> Vec<(String, Decimal)> {
        let Some(entry) = self.periods.get(&period) else {
            return Vec::new();
        };

        self.entity_order
            .iter()
            .filter_map(|e| entry.entities.get(e).map(|v| (e.clone(), *v)))
            .collect()
    }

    /// Values of `entity` for periods `1..=last`, zero where missing.
    #[must_use]
    pub fn series(&self, entity: &str, last: PeriodKey) -> Vec<Decimal> {
        (1..=last).map(|p| self.entity_value(p, entity)).collect()
    }
}
