#![doc(test(attr(deny(warnings))))]

//! Recurring-transaction budgeting: expands recurrence rules into dated
//! occurrences and totals them per category for each month of a year.
//!
//! ```
//! use chrono::NaiveDate;
//! use recur_budget::{core::AllocationEngine, ledger::{RecurringTransaction, TimeInterval}};
//!
//! let start = NaiveDate::from_ymd_opt(2016, 1, 15).unwrap();
//! let rule = RecurringTransaction::new(999, "Streaming", start, TimeInterval::months(1)).unwrap();
//! let periods = AllocationEngine::for_year(2016).unwrap().compute(&[rule]).unwrap();
//! assert!(periods.iter().all(|period| period.total_for("Streaming") == 999));
//! ```

pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod utils;

pub use errors::{BudgetError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("recur_budget tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
