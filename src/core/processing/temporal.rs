use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Half-open calendar interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// From the first day of `start_month` up to the first day of the month after
    /// `end_month`. Both months belong to `year`; a December end rolls into January of
    /// the next year.
    pub fn for_months(year: i32, start_month: u32, end_month: u32) -> Result<Self> {
        for month in [start_month, end_month] {
            if !(1..=12).contains(&month) {
                return Err(Error::InvalidMonth { month });
            }
        }
        if end_month < start_month {
            return Err(Error::InvalidMonthRange {
                start: start_month,
                end: end_month,
            });
        }

        let start = first_of_month(year, start_month)?;
        let end = if end_month == 12 {
            first_of_month(year + 1, 1)?
        } else {
            first_of_month(year, end_month + 1)?
        };

        debug!("Date range for {}-{:02}..{:02}: [{}, {})", year, start_month, end_month, start, end);
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Year of the first day in the range
    pub fn year(&self) -> i32 {
        self.start.year()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(Error::InvalidDate { year, month })
}
