//! Free-text search over drill-down details.

use rust_decimal::Decimal;

use super::types::DetailRecord;

/// Details matching a search, with their summed amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSearch<'a> {
    /// Matching records, in original order.
    pub records: Vec<&'a DetailRecord>,
    /// Sum of the matching amounts.
    pub total: Decimal,
}

impl DetailSearch<'_> {
    /// Number of matches.
    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Case-insensitive substring search over account description, cost-center
/// and detail text. A blank query matches everything.
#[must_use]
pub fn search_details<'a>(records: &'a [DetailRecord], query: &str) -> DetailSearch<'a> {
    let needle = query.trim().to_lowercase();
    let records: Vec<&DetailRecord> = records
        .iter()
        .filter(|r| needle.is_empty() || matches(r, &needle))
        .collect();
    let total: Decimal = records.iter().map(|r| r.amount).sum();

    DetailSearch { records, total }
}

fn matches(record: &DetailRecord, needle: &str) -> bool {
    [
        Some(record.account_description.as_str()),
        record.cost_center.as_deref(),
        record.detail_text.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}
