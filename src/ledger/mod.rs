//! Budget domain types: date intervals, recurrence rules, occurrences and
//! the monthly periods they are allocated into.

pub mod budget;
pub mod date_interval;
pub mod recurring;
pub mod time_interval;
pub mod transaction;

pub use budget::BudgetPeriod;
pub use date_interval::DateInterval;
pub use recurring::{Occurrences, RecurringTransaction};
pub use time_interval::{TimeInterval, TimeUnit};
pub use transaction::Occurrence;
