//! Year/month navigation for report filters.

mod year_month;

pub use year_month::{CalendarError, MONTHS_PER_YEAR, YearMonth, month_short_label};
