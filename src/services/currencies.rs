use serde::Serialize;
use typeshare::typeshare;

const FLAG_CDN: &str = "https://flagcdn.com/48x36";

#[typeshare]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    /// ISO 3166 alpha-2 code of the country whose flag represents the currency.
    pub country: &'static str,
}

const CURRENCIES: &[Currency] = &[
    Currency { code: "AED", country: "AE" },
    Currency { code: "ARS", country: "AR" },
    Currency { code: "AUD", country: "AU" },
    Currency { code: "BGN", country: "BG" },
    Currency { code: "BRL", country: "BR" },
    Currency { code: "CAD", country: "CA" },
    Currency { code: "CHF", country: "CH" },
    Currency { code: "CNY", country: "CN" },
    Currency { code: "CZK", country: "CZ" },
    Currency { code: "DKK", country: "DK" },
    Currency { code: "EGP", country: "EG" },
    Currency { code: "EUR", country: "EU" },
    Currency { code: "GBP", country: "GB" },
    Currency { code: "GEL", country: "GE" },
    Currency { code: "HKD", country: "HK" },
    Currency { code: "HUF", country: "HU" },
    Currency { code: "IDR", country: "ID" },
    Currency { code: "ILS", country: "IL" },
    Currency { code: "INR", country: "IN" },
    Currency { code: "JPY", country: "JP" },
    Currency { code: "KRW", country: "KR" },
    Currency { code: "KZT", country: "KZ" },
    Currency { code: "MXN", country: "MX" },
    Currency { code: "NOK", country: "NO" },
    Currency { code: "NZD", country: "NZ" },
    Currency { code: "PLN", country: "PL" },
    Currency { code: "RON", country: "RO" },
    Currency { code: "RUB", country: "RU" },
    Currency { code: "SEK", country: "SE" },
    Currency { code: "SGD", country: "SG" },
    Currency { code: "THB", country: "TH" },
    Currency { code: "TRY", country: "TR" },
    Currency { code: "UAH", country: "UA" },
    Currency { code: "USD", country: "US" },
    Currency { code: "ZAR", country: "ZA" },
];

impl Currency {
    pub fn flag_url(&self) -> String {
        format!("{}/{}.png", FLAG_CDN, self.country.to_lowercase())
    }
}

pub fn all() -> &'static [Currency] {
    CURRENCIES
}

pub fn find(code: &str) -> Option<&'static Currency> {
    let code = code.trim();
    CURRENCIES
        .iter()
        .find(|currency| currency.code.eq_ignore_ascii_case(code))
}

/// Flag for a code, or `None` when the code isn't in the catalogue.
pub fn flag_url(code: &str) -> Option<String> {
    find(code).map(Currency::flag_url)
}
