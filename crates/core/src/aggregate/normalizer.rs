//! Builds normalized matrices from flat backend rows.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::matrix::{NormalizedMatrix, PeriodKey};
use crate::summary::{EntityPeriodTotal, EntityTotal, PeriodTotal};

/// Folds flat aggregate rows into a [`NormalizedMatrix`].
pub struct Normalizer;

impl Normalizer {
    /// Normalizes period totals and period x entity totals.
    ///
    /// Every period present in either list gets an entry, defaulting to a zero
    /// total and no entities. Periods whose entity values do not add up to the
    /// period total are logged as a data-quality warning and kept as-is.
    #[must_use]
    pub fn normalize(
        period_totals: &[PeriodTotal],
        entity_totals: &[EntityPeriodTotal],
    ) -> NormalizedMatrix {
        let mut matrix = NormalizedMatrix::new();

        for row in period_totals {
            matrix.entry_mut(row.period).total = row.total;
        }
        for row in entity_totals {
            matrix.set_entity(row.period, &row.entity, row.total);
        }

        Self::check_entity_sums(&matrix);
        debug!(
            periods = matrix.period_count(),
            entities = matrix.entities().len(),
            "normalized aggregate matrix"
        );
        matrix
    }

    /// Normalizes a daily summary: days carry totals, entities carry month totals.
    ///
    /// Every day in `recorded_days` gets an entry even without a listed
    /// total, so the matrix holds every day with recorded data.
    #[must_use]
    pub fn normalize_daily(
        day_totals: &[PeriodTotal],
        month_entities: &[EntityTotal],
        recorded_days: &[PeriodKey],
    ) -> NormalizedMatrix {
        let mut matrix = NormalizedMatrix::new();

        for day in recorded_days {
            matrix.entry_mut(*day);
        }
        for row in day_totals {
            matrix.entry_mut(row.period).total = row.total;
        }
        for row in month_entities {
            matrix.set_range_total(&row.entity, row.total);
        }

        debug!(
            days = matrix.period_count(),
            entities = matrix.entities().len(),
            "normalized daily matrix"
        );
        matrix
    }

    /// Transposes entity -> period series into a matrix whose period totals
    /// are the sums of the listed entities.
    ///
    /// `order` fixes the first-appearance order; series missing from it are
    /// appended by name.
    #[must_use]
    pub fn from_entity_series(
        series: &HashMap<String, BTreeMap<PeriodKey, Decimal>>,
        order: &[String],
    ) -> NormalizedMatrix {
        let mut names: Vec<&String> = order.iter().filter(|n| series.contains_key(*n)).collect();
        let mut rest: Vec<&String> = series.keys().filter(|n| !order.contains(*n)).collect();
        rest.sort();
        names.extend(rest);

        let mut matrix = NormalizedMatrix::new();
        for name in names {
            for (period, value) in &series[name] {
                matrix.set_entity(*period, name, *value);
                matrix.entry_mut(*period).total += *value;
            }
        }
        matrix
    }

    /// Builds a one-period matrix from range-level entity totals.
    #[must_use]
    pub fn single_period(period: PeriodKey, total: Decimal, entities: &[EntityTotal]) -> NormalizedMatrix {
        let mut matrix = NormalizedMatrix::new();
        matrix.entry_mut(period).total = total;
        for row in entities {
            matrix.set_entity(period, &row.entity, row.total);
        }
        matrix
    }

    fn check_entity_sums(matrix: &NormalizedMatrix) {
        for (period, entry) in matrix.periods() {
            if entry.entities.is_empty() {
                continue;
            }
            let entity_sum: Decimal = entry.entities.values().copied().sum();
            if entity_sum != entry.total {
                warn!(
                    period,
                    period_total = %entry.total,
                    entity_sum = %entity_sum,
                    "entity totals do not add up to the period total"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn period(period: u32, total: Decimal) -> PeriodTotal {
        PeriodTotal { period, total }
    }

    fn cell(period: u32, entity: &str, total: Decimal) -> EntityPeriodTotal {
        EntityPeriodTotal {
            period,
            entity: entity.to_string(),
            total,
        }
    }

    #[test]
    fn test_normalize_populates_both_sides() {
        let matrix = Normalizer::normalize(
            &[period(1, dec!(1000)), period(2, dec!(1200))],
            &[
                cell(1, "X", dec!(600)),
                cell(1, "Y", dec!(400)),
                cell(2, "X", dec!(700)),
                cell(2, "Y", dec!(500)),
            ],
        );

        assert_eq!(matrix.period_total(1), dec!(1000));
        assert_eq!(matrix.entity_value(2, "Y"), dec!(500));
        assert_eq!(matrix.entities(), &["X".to_string(), "Y".to_string()]);
    }

    #[test]
    fn test_period_only_in_entity_list_gets_zero_total() {
        let matrix = Normalizer::normalize(&[period(1, dec!(10))], &[cell(4, "X", dec!(5))]);

        let entry = matrix.period(4).unwrap();
        assert_eq!(entry.total, Decimal::ZERO);
        assert_eq!(entry.entities["X"], dec!(5));
    }

    #[test]
    fn test_period_only_in_total_list_gets_no_entities() {
        let matrix = Normalizer::normalize(&[period(3, dec!(10))], &[]);

        assert!(matrix.period(3).unwrap().entities.is_empty());
    }

    #[test]
    fn test_entity_names_are_case_sensitive() {
        let matrix = Normalizer::normalize(
            &[period(1, dec!(3))],
            &[cell(1, "Acme", dec!(1)), cell(1, "ACME", dec!(2))],
        );

        assert_eq!(matrix.entities().len(), 2);
    }

    #[test]
    fn test_mismatched_sums_are_kept() {
        let matrix = Normalizer::normalize(&[period(1, dec!(100))], &[cell(1, "X", dec!(40))]);

        assert_eq!(matrix.period_total(1), dec!(100));
        assert_eq!(matrix.entity_value(1, "X"), dec!(40));
    }

    #[test]
    fn test_normalize_daily() {
        let matrix = Normalizer::normalize_daily(
            &[period(2, dec!(30)), period(5, dec!(20))],
            &[EntityTotal {
                entity: "TI".to_string(),
                total: dec!(50),
                transactions: None,
            }],
            &[],
        );

        assert_eq!(matrix.last_period(), Some(5));
        assert_eq!(matrix.grand_total(), dec!(50));
        assert_eq!(matrix.entity_totals(), vec![("TI".to_string(), dec!(50))]);
    }

    #[test]
    fn test_normalize_daily_keeps_recorded_days_without_totals() {
        let matrix = Normalizer::normalize_daily(&[period(2, dec!(30))], &[], &[2, 9]);

        assert_eq!(matrix.last_period(), Some(9));
        assert!(matrix.period(9).is_some());
        assert_eq!(matrix.period_total(9), Decimal::ZERO);
        assert_eq!(matrix.grand_total(), dec!(30));
    }

    #[test]
    fn test_from_entity_series_respects_order_hint() {
        let mut series = HashMap::new();
        series.insert(
            "B".to_string(),
            BTreeMap::from([(1, dec!(10)), (2, dec!(20))]),
        );
        series.insert("A".to_string(), BTreeMap::from([(1, dec!(5))]));
        series.insert("C".to_string(), BTreeMap::from([(2, dec!(1))]));

        let matrix = Normalizer::from_entity_series(&series, &["B".to_string(), "A".to_string()]);

        assert_eq!(
            matrix.entities(),
            &["B".to_string(), "A".to_string(), "C".to_string()]
        );
        assert_eq!(matrix.period_total(1), dec!(15));
        assert_eq!(matrix.period_total(2), dec!(21));
    }

    #[test]
    fn test_single_period() {
        let matrix = Normalizer::single_period(
            4,
            dec!(90),
            &[EntityTotal {
                entity: "ACME".to_string(),
                total: dec!(90),
                transactions: Some(2),
            }],
        );

        assert_eq!(matrix.period_count(), 1);
        assert_eq!(matrix.entity_value(4, "ACME"), dec!(90));
    }
}
