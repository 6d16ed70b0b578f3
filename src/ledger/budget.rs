use std::collections::BTreeMap;

use serde::Serialize;

use super::{DateInterval, Occurrence};
use crate::errors::{BudgetError, Result};

/// Per-category totals for one slice of the budget year.
///
/// Allocation is append-only: offering the same occurrence twice counts it
/// twice, so a period set should be populated exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetPeriod {
    interval: DateInterval,
    total: i64,
    totals: BTreeMap<String, i64>,
    occurrences: BTreeMap<String, Vec<Occurrence>>,
}

impl BudgetPeriod {
    pub fn new(interval: DateInterval) -> Self {
        Self {
            interval,
            total: 0,
            totals: BTreeMap::new(),
            occurrences: BTreeMap::new(),
        }
    }

    pub fn interval(&self) -> &DateInterval {
        &self.interval
    }

    /// Records `occurrence` when its date falls inside this period and
    /// reports whether it was accepted.
    ///
    /// A total that would leave the `i64` range is rejected with
    /// [`BudgetError::AmountOverflow`] and leaves the period untouched.
    pub fn add_occurrence(&mut self, occurrence: Occurrence) -> Result<bool> {
        if !self.interval.contains(occurrence.date) {
            return Ok(false);
        }
        let overflow = || BudgetError::AmountOverflow {
            category: occurrence.category.clone(),
            date: occurrence.date,
        };
        let category_total = self
            .total_for(&occurrence.category)
            .checked_add(occurrence.amount)
            .ok_or_else(overflow)?;
        let total = self
            .total
            .checked_add(occurrence.amount)
            .ok_or_else(overflow)?;

        self.total = total;
        self.totals.insert(occurrence.category.clone(), category_total);
        self.occurrences
            .entry(occurrence.category.clone())
            .or_default()
            .push(occurrence);
        Ok(true)
    }

    pub fn categories(&self) -> Vec<String> {
        self.totals.keys().cloned().collect()
    }

    pub fn total_for(&self, category: &str) -> i64 {
        self.totals.get(category).copied().unwrap_or(0)
    }

    pub fn occurrences_for(&self, category: &str) -> &[Occurrence] {
        self.occurrences
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum across every category.
    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}
