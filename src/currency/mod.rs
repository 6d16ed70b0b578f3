//! Rendering of minor-unit amounts for reports.

use serde::{Deserialize, Serialize};

const MINOR_DIGITS: usize = 2;
const MINOR_PER_MAJOR: u64 = 100;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Number separators used when printing amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CurrencyDisplay {
    #[default]
    Symbol,
    Code,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "AUD" => "A$".into(),
        "CAD" => "C$".into(),
        _ => code.into(),
    }
}

/// Formats amounts held in hundredths of a currency unit.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    pub code: CurrencyCode,
    pub locale: LocaleConfig,
    pub negative_style: NegativeStyle,
    pub display: CurrencyDisplay,
}

impl Formatter {
    pub fn new(code: CurrencyCode, locale: LocaleConfig) -> Self {
        Self {
            code,
            locale,
            ..Self::default()
        }
    }

    pub fn with_negative_style(mut self, style: NegativeStyle) -> Self {
        self.negative_style = style;
        self
    }

    pub fn with_display(mut self, display: CurrencyDisplay) -> Self {
        self.display = display;
        self
    }

    pub fn format(&self, minor_units: i64) -> String {
        let magnitude = minor_units.unsigned_abs();
        let whole = group_digits(
            &(magnitude / MINOR_PER_MAJOR).to_string(),
            self.locale.grouping_separator,
        );
        let body = format!(
            "{}{}{:0width$}",
            whole,
            self.locale.decimal_separator,
            magnitude % MINOR_PER_MAJOR,
            width = MINOR_DIGITS
        );
        let body = match self.display {
            CurrencyDisplay::Symbol => format!("{}{}", symbol_for(self.code.as_str()), body),
            CurrencyDisplay::Code => format!("{} {}", self.code.as_str(), body),
        };
        if minor_units >= 0 {
            return body;
        }
        match self.negative_style {
            NegativeStyle::Sign => format!("-{}", body),
            NegativeStyle::Parentheses => format!("({})", body),
        }
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
