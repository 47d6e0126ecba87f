//! Ranking of entities for charts and reports.

use rust_decimal::Decimal;

use super::selection::{EntitySelection, MAX_SELECTION};
use crate::aggregate::NormalizedMatrix;

/// Number of entities charted when nothing is pinned.
pub const DEFAULT_TOP_N: usize = 5;

/// Picks which entities a chart or report shows.
pub struct RankingEngine;

impl RankingEngine {
    /// Entity totals sorted descending; ties keep first-appearance order.
    #[must_use]
    pub fn ranked_totals(matrix: &NormalizedMatrix) -> Vec<(String, Decimal)> {
        let mut totals = matrix.entity_totals();
        // Stable sort: equal totals stay in first-appearance order.
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals
    }

    /// The `n` largest entities by total, `n` capped at [`MAX_SELECTION`].
    #[must_use]
    pub fn top_n(matrix: &NormalizedMatrix, n: usize) -> Vec<String> {
        Self::ranked_totals(matrix)
            .into_iter()
            .take(n.min(MAX_SELECTION))
            .map(|(name, _)| name)
            .collect()
    }

    /// Entities to chart.
    ///
    /// A non-empty selection whose members all exist in `matrix` is returned
    /// in user order. Otherwise, including when any member is stale, the
    /// default top-`n` ranking is used.
    #[must_use]
    pub fn rank(
        matrix: &NormalizedMatrix,
        selection: Option<&EntitySelection>,
        n: usize,
    ) -> Vec<String> {
        match selection {
            Some(selection) if selection.is_usable_for(matrix) => selection.members().to_vec(),
            Some(selection) if !selection.is_empty() => {
                tracing::debug!(
                    selected = selection.len(),
                    "stale entity selection, falling back to top-n"
                );
                Self::top_n(matrix, n)
            }
            _ => Self::top_n(matrix, n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Normalizer;
    use crate::summary::EntityPeriodTotal;
    use rust_decimal_macros::dec;

    fn cell(period: u32, entity: &str, total: Decimal) -> EntityPeriodTotal {
        EntityPeriodTotal {
            period,
            entity: entity.to_string(),
            total,
        }
    }

    fn matrix() -> NormalizedMatrix {
        Normalizer::normalize(
            &[],
            &[
                cell(1, "Low", dec!(10)),
                cell(1, "TieA", dec!(50)),
                cell(1, "High", dec!(90)),
                cell(2, "TieB", dec!(50)),
                cell(2, "Mid", dec!(30)),
                cell(2, "Tiny", dec!(1)),
            ],
        )
    }

    #[test]
    fn test_top_n_descending_with_stable_ties() {
        assert_eq!(
            RankingEngine::top_n(&matrix(), 3),
            vec!["High", "TieA", "TieB"]
        );
    }

    #[test]
    fn test_default_top_five() {
        let ranked = RankingEngine::rank(&matrix(), None, DEFAULT_TOP_N);
        assert_eq!(ranked, vec!["High", "TieA", "TieB", "Mid", "Low"]);
    }

    #[test]
    fn test_n_is_capped() {
        let ranked = RankingEngine::top_n(&matrix(), 50);
        assert_eq!(ranked.len(), 6);
    }

    #[test]
    fn test_valid_selection_keeps_user_order() {
        let selection = EntitySelection::from_names(["Tiny", "High"]);
        assert_eq!(
            RankingEngine::rank(&matrix(), Some(&selection), DEFAULT_TOP_N),
            vec!["Tiny", "High"]
        );
    }

    #[test]
    fn test_stale_selection_falls_back_to_top_n() {
        let selection = EntitySelection::from_names(["Tiny", "Removed Last Year"]);
        assert_eq!(
            RankingEngine::rank(&matrix(), Some(&selection), 2),
            vec!["High", "TieA"]
        );
    }

    #[test]
    fn test_empty_selection_uses_top_n() {
        let selection = EntitySelection::new();
        assert_eq!(
            RankingEngine::rank(&matrix(), Some(&selection), 1),
            vec!["High"]
        );
    }

    #[test]
    fn test_empty_matrix_ranks_nothing() {
        let empty = NormalizedMatrix::new();
        let selection = EntitySelection::from_names(["X"]);
        assert!(RankingEngine::rank(&empty, Some(&selection), 5).is_empty());
        assert!(RankingEngine::rank(&empty, None, 5).is_empty());
    }
}
