//! Dashboard view modes.

use serde::{Deserialize, Serialize};

/// Which screen the aggregates are derived for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Twelve months of one year, periods are months.
    #[default]
    Annual,
    /// A single month out of a yearly matrix.
    Monthly,
    /// Days of one month, periods are days.
    Daily,
    /// Supplier breakdown for a year, or for a month when a month is set.
    Suppliers,
}

impl ViewMode {
    /// Number of monthly budgets that make up the budget for the range.
    #[must_use]
    pub const fn budget_months(self) -> u32 {
        match self {
            Self::Annual | Self::Suppliers => 12,
            Self::Monthly | Self::Daily => 1,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Annual => write!(f, "annual"),
            Self::Monthly => write!(f, "monthly"),
            Self::Daily => write!(f, "daily"),
            Self::Suppliers => write!(f, "suppliers"),
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "annual" => Ok(Self::Annual),
            "monthly" => Ok(Self::Monthly),
            "daily" => Ok(Self::Daily),
            "suppliers" => Ok(Self::Suppliers),
            _ => Err(format!("Unknown view mode: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_budget_months() {
        assert_eq!(ViewMode::Annual.budget_months(), 12);
        assert_eq!(ViewMode::Monthly.budget_months(), 1);
        assert_eq!(ViewMode::Daily.budget_months(), 1);
        assert_eq!(ViewMode::Suppliers.budget_months(), 12);
    }

    #[test]
    fn test_view_mode_round_trip_through_str() {
        for mode in [
            ViewMode::Annual,
            ViewMode::Monthly,
            ViewMode::Daily,
            ViewMode::Suppliers,
        ] {
            assert_eq!(ViewMode::from_str(&mode.to_string()).unwrap(), mode);
        }
        assert_eq!(ViewMode::from_str("DAILY").unwrap(), ViewMode::Daily);
        assert!(ViewMode::from_str("weekly").is_err());
    }
}
