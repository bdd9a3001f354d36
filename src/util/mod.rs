use std::ops::Range;
use chrono::{Datelike, NaiveDate, Utc};

/// First day of the month (inclusive) to first day of the next month (exclusive).
pub(crate) fn month_range(year: i32, month: u32) -> Range<NaiveDate> {
    let first_day = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_month_year = if month == 12 { year + 1 } else { year };
    let first_day_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1).unwrap();

    first_day..first_day_next_month
}

pub(crate) fn current_month() -> (i32, u32) {
    let today = Utc::now().naive_utc().date();
    (today.year(), today.month())
}

/// Budget and reporting periods are keyed by "YYYY-MM".
pub(crate) fn month_key(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}
