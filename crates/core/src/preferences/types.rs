//! Preference value object.

use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::ranking::EntitySelection;
use costlens_shared::types::ViewMode;

/// Filters and pinned entities of the analysis screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewPreferences {
    /// Last selected screen mode.
    pub mode: ViewMode,
    /// Last selected year.
    pub year: Option<i32>,
    /// Last selected month.
    pub month: Option<u32>,
    /// Pinned cost centers. Kept across year and month changes.
    #[serde(alias = "selection")]
    pub sector_selection: EntitySelection,
    /// Pinned suppliers, kept apart from the cost centers.
    pub supplier_selection: EntitySelection,
    /// Supplier screen shows a single month instead of the whole year.
    pub supplier_monthly: bool,
}

impl ViewPreferences {
    /// Month in view, falling back to `today` for missing or invalid parts.
    #[must_use]
    pub fn period(&self, today: YearMonth) -> YearMonth {
        let year = self.year.unwrap_or(today.year());
        let month = self.month.unwrap_or(today.month());
        YearMonth::new(year, month).unwrap_or(today)
    }

    /// Pinned entities of the dimension `mode` charts.
    #[must_use]
    pub fn selection(&self, mode: ViewMode) -> &EntitySelection {
        match mode {
            ViewMode::Suppliers => &self.supplier_selection,
            ViewMode::Annual | ViewMode::Monthly | ViewMode::Daily => &self.sector_selection,
        }
    }

    /// Mutable access to the selection of `mode`'s dimension.
    pub fn selection_mut(&mut self, mode: ViewMode) -> &mut EntitySelection {
        match mode {
            ViewMode::Suppliers => &mut self.supplier_selection,
            ViewMode::Annual | ViewMode::Monthly | ViewMode::Daily => &mut self.sector_selection,
        }
    }

    /// Stores a new mode and month, leaving the selections untouched.
    pub fn set_filters(&mut self, mode: ViewMode, period: YearMonth) {
        self.mode = mode;
        self.year = Some(period.year());
        self.month = Some(period.month());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> YearMonth {
        YearMonth::new(2025, 6).unwrap()
    }

    #[test]
    fn test_period_falls_back_to_today() {
        let prefs = ViewPreferences {
            year: Some(2023),
            ..ViewPreferences::default()
        };
        assert_eq!(prefs.period(today()), YearMonth::new(2023, 6).unwrap());

        let invalid = ViewPreferences {
            month: Some(13),
            ..ViewPreferences::default()
        };
        assert_eq!(invalid.period(today()), today());
    }

    #[test]
    fn test_set_filters_keeps_selection() {
        let mut prefs = ViewPreferences {
            sector_selection: EntitySelection::from_names(["TI"]),
            ..ViewPreferences::default()
        };

        prefs.set_filters(ViewMode::Daily, YearMonth::new(2024, 2).unwrap());

        assert_eq!(prefs.mode, ViewMode::Daily);
        assert_eq!(prefs.month, Some(2));
        assert!(prefs.selection(ViewMode::Daily).contains("TI"));
    }

    #[test]
    fn test_suppliers_have_their_own_selection() {
        let mut prefs = ViewPreferences {
            sector_selection: EntitySelection::from_names(["TI", "RH"]),
            ..ViewPreferences::default()
        };

        prefs.selection_mut(ViewMode::Suppliers).toggle("ACME");

        assert_eq!(prefs.selection(ViewMode::Annual).members(), &["TI".to_string(), "RH".to_string()]);
        assert_eq!(prefs.selection(ViewMode::Suppliers).members(), &["ACME".to_string()]);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"mode": "monthly", "year": 2024, "month": 3, "selection": ["A", "B"]}"#;
        let prefs: ViewPreferences = serde_json::from_str(json).unwrap();

        assert_eq!(prefs.mode, ViewMode::Monthly);
        assert_eq!(prefs.sector_selection.members(), &["A".to_string(), "B".to_string()]);
        assert!(prefs.supplier_selection.is_empty());

        let empty: ViewPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ViewPreferences::default());
    }
}
