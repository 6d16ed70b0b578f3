use std::iter::FusedIterator;

use chrono::NaiveDate;
use serde::Serialize;

use super::{DateInterval, Occurrence, TimeInterval};
use crate::errors::{BudgetError, Result};

/// A transaction that repeats every `interval`, starting on `initial_occurrence`
/// and, when `final_occurrence` is set, ending on or before that date.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecurringTransaction {
    amount: i64,
    category: String,
    description: Option<String>,
    initial_occurrence: NaiveDate,
    final_occurrence: Option<NaiveDate>,
    interval: TimeInterval,
}

impl RecurringTransaction {
    /// Creates an open-ended rule. `amount` is in minor currency units.
    pub fn new(
        amount: i64,
        category: impl Into<String>,
        initial_occurrence: NaiveDate,
        interval: TimeInterval,
    ) -> Result<Self> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(BudgetError::InvalidRule("category must not be empty".into()));
        }
        if interval.every == 0 {
            return Err(BudgetError::InvalidRule(
                "period count must be at least 1".into(),
            ));
        }
        Ok(Self {
            amount,
            category,
            description: None,
            initial_occurrence,
            final_occurrence: None,
            interval,
        })
    }

    /// Bounds the rule; `final_occurrence` is inclusive.
    pub fn ends_on(mut self, final_occurrence: Option<NaiveDate>) -> Result<Self> {
        if let Some(end) = final_occurrence {
            if end < self.initial_occurrence {
                return Err(BudgetError::InvalidRule(format!(
                    "final occurrence {} precedes initial occurrence {}",
                    end, self.initial_occurrence
                )));
            }
        }
        self.final_occurrence = final_occurrence;
        Ok(self)
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|text| !text.trim().is_empty());
        self
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn initial_occurrence(&self) -> NaiveDate {
        self.initial_occurrence
    }

    pub fn final_occurrence(&self) -> Option<NaiveDate> {
        self.final_occurrence
    }

    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    /// Every occurrence in chronological order. Unbounded rules yield an
    /// endless iterator, so callers must impose their own limit.
    pub fn occurrences(&self) -> Occurrences<'_> {
        Occurrences {
            rule: self,
            step: 0,
            exhausted: false,
        }
    }

    /// Occurrences falling inside `window`. Dates before the window are
    /// skipped and expansion stops at the first date at or past its end.
    pub fn occurrences_within<'a>(
        &'a self,
        window: &DateInterval,
    ) -> impl Iterator<Item = Occurrence> + 'a {
        let start = window.start();
        let end = window.end();
        self.occurrences()
            .skip_while(move |occurrence| occurrence.date < start)
            .take_while(move |occurrence| occurrence.date < end)
    }

    fn occurrence_on(&self, date: NaiveDate) -> Occurrence {
        Occurrence {
            amount: self.amount,
            category: self.category.clone(),
            description: self.description.clone(),
            date,
        }
    }
}

/// Cursor over the occurrences of a [`RecurringTransaction`].
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    rule: &'a RecurringTransaction,
    step: u32,
    exhausted: bool,
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        if self.exhausted {
            return None;
        }
        let last = self.rule.final_occurrence;
        let date = self
            .rule
            .interval
            .nth_after(self.rule.initial_occurrence, self.step)
            .filter(|date| last.map_or(true, |last| *date <= last));
        match (date, self.step.checked_add(1)) {
            (Some(date), Some(next_step)) => {
                self.step = next_step;
                Some(self.rule.occurrence_on(date))
            }
            (Some(date), None) => {
                self.exhausted = true;
                Some(self.rule.occurrence_on(date))
            }
            (None, _) => {
                self.exhausted = true;
                None
            }
        }
    }
}

impl FusedIterator for Occurrences<'_> {}
