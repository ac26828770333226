//! Typed view-model of the converter widget. Each field maps onto one named
//! element of the form: the amount input, the two currency selects with
//! their flag images, and the exchange area under them.

use super::{
    conversion::{ConversionRequest, ConversionResult},
    currencies,
    shared::env::Settings,
};

pub const LOADING_TEXT: &str = "Getting exchange rate...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyField {
    pub code: String,
    pub flag_url: Option<String>,
}

impl CurrencyField {
    pub fn new(code: &str) -> Self {
        let code = code.trim().to_ascii_uppercase();
        CurrencyField {
            flag_url: currencies::flag_url(&code),
            code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeDisplay {
    Loading,
    Table(ConversionResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterView {
    pub amount: String,
    pub from: CurrencyField,
    pub to: CurrencyField,
    pub exchange: ExchangeDisplay,
}

impl ConverterView {
    pub fn new(amount: &str, from: &str, to: &str) -> Self {
        ConverterView {
            amount: amount.to_string(),
            from: CurrencyField::new(from),
            to: CurrencyField::new(to),
            exchange: ExchangeDisplay::Loading,
        }
    }

    pub fn with_defaults(settings: &Settings) -> Self {
        Self::new(
            &settings.default_amount.normalize().to_string(),
            &settings.default_from,
            &settings.default_to,
        )
    }

    pub fn field_mut(&mut self, side: Side) -> &mut CurrencyField {
        match side {
            Side::From => &mut self.from,
            Side::To => &mut self.to,
        }
    }

    /// Codes and flags travel together.
    pub fn swap_currencies(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    pub fn request(&self) -> ConversionRequest {
        ConversionRequest::new(
            self.amount.clone(),
            self.from.code.clone(),
            self.to.code.clone(),
        )
    }
}
