use chrono::NaiveDate;
use serde::Serialize;

/// One dated instance produced by expanding a recurring transaction.
///
/// Amounts are stored in minor currency units (cents).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Occurrence {
    pub amount: i64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl Occurrence {
    pub fn new(amount: i64, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            category: category.into(),
            description: None,
            date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
