//! Presentation of computed budget periods as text or JSON.

use std::fmt::Write as _;

use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;

use crate::{
    currency::Formatter,
    errors::{BudgetError, Result},
    ledger::BudgetPeriod,
};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OccurrenceLine {
    pub date: NaiveDate,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryLine {
    pub name: String,
    pub total: i64,
    pub occurrences: Vec<OccurrenceLine>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PeriodLine {
    pub start: NaiveDate,
    pub end_inclusive: NaiveDate,
    pub total: i64,
    pub categories: Vec<CategoryLine>,
}

/// Snapshot of a year's budget, amounts in minor units.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BudgetReport {
    pub year: i32,
    pub total: i64,
    pub periods: Vec<PeriodLine>,
}

impl BudgetReport {
    /// Fails with [`BudgetError::YearTotalOverflow`] when the period totals
    /// do not sum inside the `i64` range.
    pub fn from_periods(year: i32, periods: &[BudgetPeriod]) -> Result<Self> {
        let periods: Vec<PeriodLine> = periods.iter().map(period_line).collect();
        let total = periods
            .iter()
            .try_fold(0i64, |acc, period| acc.checked_add(period.total))
            .ok_or(BudgetError::YearTotalOverflow(year))?;
        Ok(Self {
            year,
            total,
            periods,
        })
    }
}

fn period_line(period: &BudgetPeriod) -> PeriodLine {
    let categories = period
        .categories()
        .into_iter()
        .map(|name| CategoryLine {
            total: period.total_for(&name),
            occurrences: period
                .occurrences_for(&name)
                .iter()
                .map(|occurrence| OccurrenceLine {
                    date: occurrence.date,
                    amount: occurrence.amount,
                    description: occurrence.description.clone(),
                })
                .collect(),
            name,
        })
        .collect();
    PeriodLine {
        start: period.interval().start(),
        end_inclusive: period.interval().last_day(),
        total: period.total(),
        categories,
    }
}

/// Text rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    pub details: bool,
    pub color: bool,
}

/// One line per period, `2016-01-01 - 2016-01-31: $9.99`, followed by the
/// category breakdown and, with `details`, each occurrence.
pub fn render_text(report: &BudgetReport, formatter: &Formatter, options: TextOptions) -> String {
    let mut out = String::new();
    for period in &report.periods {
        let heading = format!(
            "{} - {}: {}",
            period.start.format("%Y-%m-%d"),
            period.end_inclusive.format("%Y-%m-%d"),
            formatter.format(period.total)
        );
        if options.color {
            let _ = writeln!(out, "{}", heading.bold());
        } else {
            let _ = writeln!(out, "{heading}");
        }
        for category in &period.categories {
            let amount = formatter.format(category.total);
            let amount = if options.color && category.total < 0 {
                amount.red().to_string()
            } else {
                amount
            };
            let _ = writeln!(out, "    {}: {}", category.name, amount);
            if !options.details {
                continue;
            }
            for occurrence in &category.occurrences {
                let _ = write!(
                    out,
                    "        {} {}",
                    occurrence.date.format("%Y-%m-%d"),
                    formatter.format(occurrence.amount)
                );
                match &occurrence.description {
                    Some(text) => {
                        let _ = writeln!(out, " {text}");
                    }
                    None => out.push('\n'),
                }
            }
        }
    }
    let total = format!("Total {}: {}", report.year, formatter.format(report.total));
    if options.color {
        let _ = writeln!(out, "{}", total.bold());
    } else {
        let _ = writeln!(out, "{total}");
    }
    out
}

pub fn render_json(report: &BudgetReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
