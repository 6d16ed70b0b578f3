use chrono::NaiveDate;
use thiserror::Error;

/// Error type shared by the budgeting core, the rule loader and the CLI.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Invalid range: end {end} must be after start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Unsupported period unit: `{0}`")]
    UnsupportedUnit(String),
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
    #[error("Amount overflow: total for `{category}` exceeds the supported range at {date}")]
    AmountOverflow { category: String, date: NaiveDate },
    #[error("Amount overflow: total for {0} exceeds the supported range")]
    YearTotalOverflow(i32),
    #[error("Year {0} is outside the supported calendar range")]
    InvalidYear(i32),
    #[error("Malformed rule on line {line}: {message}")]
    MalformedRule { line: u64, message: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, BudgetError>;
