use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use thiserror::Error;
use typeshare::typeshare;

use super::shared::{format_amount, format_date, round_to_decimals, DisplayLocale};

/// Raw form state for one conversion, exactly as the user entered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub amount: String,
    pub from: String,
    pub to: String,
}

/// A request that passed validation; the only thing a provider ever sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionQuery {
    pub amount: Decimal,
    pub from: String,
    pub to: String,
}

#[typeshare]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub amount: Decimal,
    pub from: String,
    pub to: String,
    pub rate: Decimal,
    pub converted_amount: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct ConversionRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("request to the exchange rate provider failed: {0}")]
    Transport(String),

    #[error("exchange rate provider answered with HTTP {0}")]
    Status(u16),

    #[error("couldn't decode provider response: {0}")]
    Decode(String),

    #[error("exchange rate provider rejected the request: {0}")]
    Rejected(String),

    #[error("provider response is missing `{0}`")]
    Incomplete(&'static str),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ConversionError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ConversionError::Validation(_))
    }
}

pub fn parse_amount(raw: &str) -> Result<Decimal, ConversionError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConversionError::Validation("amount is required".into()));
    }
    let amount = raw
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| ConversionError::Validation(format!("'{}' is not a number", raw)))?;
    if amount <= Decimal::ZERO {
        return Err(ConversionError::Validation(
            "amount must be greater than zero".into(),
        ));
    }
    Ok(amount)
}

pub fn parse_currency_code(raw: &str, field: &str) -> Result<String, ConversionError> {
    let code = raw.trim();
    if code.is_empty() {
        return Err(ConversionError::Validation(format!("{} currency is required", field)));
    }
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConversionError::Validation(format!(
            "'{}' is not a currency code",
            code
        )));
    }
    Ok(code.to_ascii_uppercase())
}

impl ConversionRequest {
    pub fn new(amount: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        ConversionRequest {
            amount: amount.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn validate(&self) -> Result<ConversionQuery, ConversionError> {
        Ok(ConversionQuery {
            amount: parse_amount(&self.amount)?,
            from: parse_currency_code(&self.from, "source")?,
            to: parse_currency_code(&self.to, "target")?,
        })
    }
}

impl ConversionResult {
    pub fn rounded(self) -> Self {
        ConversionResult {
            rate: round_to_decimals(self.rate),
            converted_amount: round_to_decimals(self.converted_amount),
            ..self
        }
    }

    pub fn rate_line(&self) -> String {
        format!(
            "1 {} = {} {}",
            self.from,
            format_amount(self.rate),
            self.to
        )
    }

    pub fn exchange_line(&self) -> String {
        format!(
            "{} {} = {} {}",
            self.amount.normalize(),
            self.from,
            format_amount(self.converted_amount),
            self.to
        )
    }

    /// Date, rate and exchange rows, as shown in the widget's result table.
    pub fn rows(&self, locale: &DisplayLocale) -> Vec<ConversionRow> {
        vec![
            ConversionRow {
                label: "Date",
                value: format_date(self.date, locale),
            },
            ConversionRow {
                label: "Rate",
                value: self.rate_line(),
            },
            ConversionRow {
                label: "Exchange",
                value: self.exchange_line(),
            },
        ]
    }
}
