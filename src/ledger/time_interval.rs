use std::{fmt, str::FromStr};

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{BudgetError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl FromStr for TimeUnit {
    type Err = BudgetError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "day" | "days" | "daily" => Ok(TimeUnit::Day),
            "week" | "weeks" | "weekly" => Ok(TimeUnit::Week),
            "month" | "months" | "monthly" => Ok(TimeUnit::Month),
            "year" | "years" | "yearly" | "annually" => Ok(TimeUnit::Year),
            _ => Err(BudgetError::UnsupportedUnit(raw.trim().to_string())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Day => "Day",
            TimeUnit::Week => "Week",
            TimeUnit::Month => "Month",
            TimeUnit::Year => "Year",
        };
        f.write_str(name)
    }
}

/// The spacing between two occurrences of a recurring transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    pub every: u32,
    pub unit: TimeUnit,
}

impl TimeInterval {
    pub fn new(every: u32, unit: TimeUnit) -> Self {
        Self { every, unit }
    }

    pub fn days(every: u32) -> Self {
        Self::new(every, TimeUnit::Day)
    }

    pub fn weeks(every: u32) -> Self {
        Self::new(every, TimeUnit::Week)
    }

    pub fn months(every: u32) -> Self {
        Self::new(every, TimeUnit::Month)
    }

    pub fn years(every: u32) -> Self {
        Self::new(every, TimeUnit::Year)
    }

    /// Builds an interval from a count and a textual unit such as `"month"`.
    pub fn parse(every: u32, unit: &str) -> Result<Self> {
        Ok(Self::new(every, unit.parse()?))
    }

    pub fn label(&self) -> String {
        match (self.every, self.unit) {
            (1, TimeUnit::Day) => "Daily".into(),
            (1, TimeUnit::Week) => "Weekly".into(),
            (1, TimeUnit::Month) => "Monthly".into(),
            (1, TimeUnit::Year) => "Yearly".into(),
            (n, unit) => format!("Every {} {}{}", n, unit, if n > 1 { "s" } else { "" }),
        }
    }

    /// Returns `origin` shifted forward by `steps` whole intervals.
    ///
    /// Month and year shifts are applied as a single calendar offset from the
    /// origin and clamp to the last day of the target month, so a series
    /// anchored on the 31st keeps landing on month ends instead of drifting.
    /// Returns `None` when the result falls outside chrono's calendar.
    pub fn nth_after(&self, origin: NaiveDate, steps: u32) -> Option<NaiveDate> {
        let count = self.every.checked_mul(steps)?;
        match self.unit {
            TimeUnit::Day => origin.checked_add_days(Days::new(u64::from(count))),
            TimeUnit::Week => {
                origin.checked_add_days(Days::new(u64::from(count).checked_mul(7)?))
            }
            TimeUnit::Month => origin.checked_add_months(Months::new(count)),
            TimeUnit::Year => origin.checked_add_months(Months::new(count.checked_mul(12)?)),
        }
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_step_per_unit() {
        let start = date(2025, 1, 1);
        assert_eq!(TimeInterval::days(3).nth_after(start, 1), Some(date(2025, 1, 4)));
        assert_eq!(TimeInterval::weeks(2).nth_after(start, 1), Some(date(2025, 1, 15)));
        assert_eq!(TimeInterval::months(1).nth_after(start, 1), Some(date(2025, 2, 1)));
        assert_eq!(TimeInterval::years(1).nth_after(start, 1), Some(date(2026, 1, 1)));
    }

    #[test]
    fn month_shift_clamps_to_month_end() {
        let monthly = TimeInterval::months(1);
        let origin = date(2016, 1, 31);
        assert_eq!(monthly.nth_after(origin, 1), Some(date(2016, 2, 29)));
        assert_eq!(monthly.nth_after(origin, 2), Some(date(2016, 3, 31)));
        assert_eq!(monthly.nth_after(origin, 3), Some(date(2016, 4, 30)));
        assert_eq!(monthly.nth_after(date(2015, 1, 31), 1), Some(date(2015, 2, 28)));
    }

    #[test]
    fn leap_day_yearly_rolls_back_in_common_years() {
        let yearly = TimeInterval::years(1);
        let origin = date(2016, 2, 29);
        assert_eq!(yearly.nth_after(origin, 1), Some(date(2017, 2, 28)));
        assert_eq!(yearly.nth_after(origin, 4), Some(date(2020, 2, 29)));
    }

    #[test]
    fn zero_steps_is_identity() {
        let origin = date(2016, 7, 4);
        assert_eq!(TimeInterval::weeks(3).nth_after(origin, 0), Some(origin));
    }

    #[test]
    fn overflow_yields_none() {
        let origin = date(2016, 1, 1);
        assert_eq!(TimeInterval::years(u32::MAX).nth_after(origin, 2), None);
        assert_eq!(TimeInterval::days(1).nth_after(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn parses_units_case_insensitively() {
        assert_eq!("Month".parse::<TimeUnit>().unwrap(), TimeUnit::Month);
        assert_eq!(" weeks ".parse::<TimeUnit>().unwrap(), TimeUnit::Week);
        assert_eq!("annually".parse::<TimeUnit>().unwrap(), TimeUnit::Year);
        assert_eq!(
            TimeInterval::parse(3, "days").unwrap(),
            TimeInterval::days(3)
        );
    }

    #[test]
    fn rejects_unknown_unit() {
        let err = "fortnight".parse::<TimeUnit>().unwrap_err();
        assert!(matches!(err, BudgetError::UnsupportedUnit(unit) if unit == "fortnight"));
    }

    #[test]
    fn labels() {
        assert_eq!(TimeInterval::months(1).label(), "Monthly");
        assert_eq!(TimeInterval::months(3).label(), "Every 3 Months");
        assert_eq!(TimeInterval::days(2).to_string(), "Every 2 Days");
    }
}
