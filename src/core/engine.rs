use chrono::{Months, NaiveDate};
use tracing::debug;

use crate::{
    errors::{BudgetError, Result},
    ledger::{BudgetPeriod, DateInterval, RecurringTransaction},
};

const MONTHS_PER_YEAR: u32 = 12;

/// Counters describing one allocation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationSummary {
    pub rules: usize,
    pub occurrences: usize,
    pub placements: usize,
}

/// Turns recurrence rules into a month-by-month budget for one year.
#[derive(Debug, Clone, Copy)]
pub struct AllocationEngine {
    year: i32,
    window: DateInterval,
}

impl AllocationEngine {
    pub fn for_year(year: i32) -> Result<Self> {
        Ok(Self {
            year,
            window: Self::year_window(year)?,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn window(&self) -> &DateInterval {
        &self.window
    }

    /// Builds fresh periods for the engine's year and allocates `rules` once.
    pub fn compute(&self, rules: &[RecurringTransaction]) -> Result<Vec<BudgetPeriod>> {
        let mut periods = Self::build_periods(self.year)?;
        Self::allocate(&mut periods, rules, &self.window)?;
        Ok(periods)
    }

    /// `[Jan 1 year, Jan 1 year+1)`.
    pub fn year_window(year: i32) -> Result<DateInterval> {
        let start = first_of_month(year, 1)?;
        let end = start
            .checked_add_months(Months::new(MONTHS_PER_YEAR))
            .ok_or(BudgetError::InvalidYear(year))?;
        DateInterval::new(start, end)
    }

    /// One empty period per calendar month, in chronological order.
    pub fn build_periods(year: i32) -> Result<Vec<BudgetPeriod>> {
        (1..=MONTHS_PER_YEAR)
            .map(|month| {
                let start = first_of_month(year, month)?;
                let end = start
                    .checked_add_months(Months::new(1))
                    .ok_or(BudgetError::InvalidYear(year))?;
                Ok(BudgetPeriod::new(DateInterval::new(start, end)?))
            })
            .collect()
    }

    /// Offers every occurrence of every rule inside `window` to every period.
    ///
    /// Rules are expanded in input order and each rule's occurrences in
    /// chronological order, which fixes the order of the per-category
    /// occurrence lists. Nothing is de-duplicated: running this twice over
    /// the same periods counts every occurrence twice.
    ///
    /// Stops at the first occurrence whose amount would overflow a period
    /// total; periods already filled keep what they received.
    pub fn allocate(
        periods: &mut [BudgetPeriod],
        rules: &[RecurringTransaction],
        window: &DateInterval,
    ) -> Result<AllocationSummary> {
        let mut summary = AllocationSummary {
            rules: rules.len(),
            ..AllocationSummary::default()
        };
        for rule in rules {
            for occurrence in rule.occurrences_within(window) {
                summary.occurrences += 1;
                for period in periods.iter_mut() {
                    if period.add_occurrence(occurrence.clone())? {
                        summary.placements += 1;
                    }
                }
            }
        }
        debug!(
            rules = summary.rules,
            occurrences = summary.occurrences,
            placements = summary.placements,
            "allocated recurring transactions into {} period(s)",
            periods.len()
        );
        Ok(summary)
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(BudgetError::InvalidYear(year))
}
