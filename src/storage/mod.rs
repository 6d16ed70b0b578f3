//! Loading recurrence rules from external sources.

pub mod csv_rules;

use crate::{errors::Result, ledger::RecurringTransaction};

/// Anything that can hand the engine a validated list of rules.
pub trait RuleSource {
    fn load_rules(&self) -> Result<Vec<RecurringTransaction>>;
}

pub use csv_rules::{parse_amount, CsvRuleSource, LoadPolicy, RuleLoader};
