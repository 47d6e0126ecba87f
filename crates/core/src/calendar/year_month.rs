//! Calendar month value type.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// Number of months in a year.
pub const MONTHS_PER_YEAR: u32 = 12;

const SHORT_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

const LONG_LABELS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Calendar errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// Month outside 1..=12.
    #[error("invalid month {0}, expected 1-12")]
    InvalidMonth(u32),

    /// Year outside the range chrono can represent.
    #[error("year {0} is out of range")]
    YearOutOfRange(i32),
}

/// A month of a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year/month, validating the month.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(CalendarError::YearOutOfRange(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current month in local time.
    #[must_use]
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// Year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    /// Month, 1-12.
    #[must_use]
    pub fn month(self) -> u32 {
        self.month
    }

    /// The month before, wrapping January to December of the previous year.
    #[must_use]
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: MONTHS_PER_YEAR,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month after, wrapping December to January of the next year.
    #[must_use]
    pub fn next(self) -> Self {
        if self.month == MONTHS_PER_YEAR {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Number of days in this month.
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 1)
            .and_then(|first| first.pred_opt())
            .map_or(31, |last| last.day())
    }

    /// Short label, e.g. "Fev".
    #[must_use]
    pub fn short_label(self) -> &'static str {
        month_short_label(self.month)
    }

    /// Long label, e.g. "Fevereiro".
    #[must_use]
    pub fn long_label(self) -> &'static str {
        LONG_LABELS[self.index()]
    }

    fn index(self) -> usize {
        // month is validated to 1..=12 on construction
        (self.month - 1) as usize
    }
}

/// Short label of a month number; empty for values outside 1..=12.
#[must_use]
pub fn month_short_label(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| SHORT_LABELS.get(i as usize))
        .copied()
        .unwrap_or("")
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.long_label(), self.year)
    }
}
