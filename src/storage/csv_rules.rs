use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    errors::{BudgetError, Result},
    ledger::{RecurringTransaction, TimeInterval},
};

use super::RuleSource;

const DATE_FORMAT: &str = "%Y-%m-%d";
const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// What to do with a row that fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Abort the whole load on the first bad row.
    #[default]
    Strict,
    /// Log the bad row and keep going.
    SkipInvalid,
}

#[derive(Debug, Deserialize)]
struct RuleRow {
    #[serde(default)]
    description: Option<String>,
    amount: String,
    category: String,
    start: String,
    #[serde(default)]
    end: Option<String>,
    every: String,
    unit: String,
    #[serde(default)]
    enabled: Option<String>,
}

/// Reads recurrence rules from delimited text with a header row.
///
/// Expected columns: `description, amount, category, start, end, every,
/// unit, enabled`. Disabled rows never leave the loader.
#[derive(Debug, Clone, Copy)]
pub struct RuleLoader {
    delimiter: u8,
    policy: LoadPolicy,
}

impl Default for RuleLoader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            policy: LoadPolicy::Strict,
        }
    }
}

impl RuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn load_path(&self, path: &Path) -> Result<Vec<RecurringTransaction>> {
        let file = File::open(path)?;
        self.load_reader(file)
    }

    pub fn load_str(&self, text: &str) -> Result<Vec<RecurringTransaction>> {
        self.load_reader(text.as_bytes())
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<RecurringTransaction>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();

        let mut rules = Vec::new();
        let mut disabled = 0usize;
        let mut skipped = 0usize;
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|pos| pos.line()).unwrap_or(0);
            match parse_record(&record, &headers, line) {
                Ok(Some(rule)) => rules.push(rule),
                Ok(None) => {
                    debug!(line, "skipping disabled rule");
                    disabled += 1;
                }
                Err(err) => match self.policy {
                    LoadPolicy::Strict => {
                        warn!(line, "rejecting rule on line {}: {}", line, err);
                        return Err(err);
                    }
                    LoadPolicy::SkipInvalid => {
                        warn!(line, "skipping invalid rule on line {}: {}", line, err);
                        skipped += 1;
                    }
                },
            }
        }

        info!(
            loaded = rules.len(),
            disabled, skipped, "loaded recurring transaction rules"
        );
        Ok(rules)
    }
}

/// A rules file on disk read through a [`RuleLoader`].
#[derive(Debug, Clone)]
pub struct CsvRuleSource {
    path: PathBuf,
    loader: RuleLoader,
}

impl CsvRuleSource {
    pub fn new(path: impl Into<PathBuf>, loader: RuleLoader) -> Self {
        Self {
            path: path.into(),
            loader,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RuleSource for CsvRuleSource {
    fn load_rules(&self) -> Result<Vec<RecurringTransaction>> {
        self.loader.load_path(&self.path)
    }
}

fn parse_record(
    record: &StringRecord,
    headers: &StringRecord,
    line: u64,
) -> Result<Option<RecurringTransaction>> {
    let row: RuleRow = record.deserialize(Some(headers)).map_err(|err| {
        BudgetError::MalformedRule {
            line,
            message: err.to_string(),
        }
    })?;
    let malformed = |message: String| BudgetError::MalformedRule { line, message };

    if !parse_enabled(row.enabled.as_deref()).map_err(malformed)? {
        return Ok(None);
    }

    let amount = parse_amount(&row.amount).map_err(malformed)?;
    let start = parse_date(&row.start)
        .map_err(|err| malformed(format!("start date: {err}")))?;
    let end = match non_empty(row.end.as_deref()) {
        Some(raw) => Some(parse_date(raw).map_err(|err| malformed(format!("end date: {err}")))?),
        None => None,
    };
    let every: u32 = row
        .every
        .parse()
        .map_err(|_| malformed(format!("period count `{}` is not a number", row.every)))?;
    if every == 0 {
        return Err(malformed("period count must be positive".into()));
    }
    let interval = TimeInterval::parse(every, &row.unit)?;
    if row.category.is_empty() {
        return Err(malformed("category is required".into()));
    }

    let rule = RecurringTransaction::new(amount, row.category, start, interval)?
        .ends_on(end)?
        .with_description(row.description);
    Ok(Some(rule))
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_enabled(raw: Option<&str>) -> std::result::Result<bool, String> {
    match non_empty(raw).map(str::to_ascii_lowercase).as_deref() {
        None => Ok(true),
        Some("true" | "yes" | "y" | "1") => Ok(true),
        Some("false" | "no" | "n" | "0") => Ok(false),
        Some(other) => Err(format!("enabled flag `{other}` is not a boolean")),
    }
}

fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|err| format!("`{raw}`: {err}"))
}

/// Converts a decimal currency value into minor units, rounding to the
/// nearest hundredth with midpoints away from zero.
pub fn parse_amount(raw: &str) -> std::result::Result<i64, String> {
    let trimmed = raw.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let cleaned: String = body
        .strip_prefix('$')
        .unwrap_or(body)
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    if cleaned.is_empty() || cleaned.starts_with(|ch: char| ch == '-' || ch == '+') {
        return Err(format!("amount `{raw}` is not a decimal number"));
    }
    let value: Decimal = cleaned
        .parse()
        .map_err(|_| format!("amount `{raw}` is not a decimal number"))?;
    let value = if negative { -value } else { value };
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| format!("amount `{raw}` is out of range"))
}
