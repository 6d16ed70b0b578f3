use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::errors::{BudgetError, Result};

/// A half-open range of calendar dates: `start` is included, `end` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    /// Fails with [`BudgetError::InvalidRange`] unless `end` is strictly after `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(BudgetError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// The last date included in the interval.
    pub fn last_day(&self) -> NaiveDate {
        self.end - Duration::days(1)
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}
