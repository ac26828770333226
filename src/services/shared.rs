pub mod env;
pub mod logger;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Locale of the rate date shown to the user. Amounts are never localized.
#[derive(Debug, Clone)]
pub struct DisplayLocale {
    pub dates: chrono::Locale,
}

impl Default for DisplayLocale {
    fn default() -> Self {
        DisplayLocale {
            dates: chrono::Locale::en_US,
        }
    }
}

impl DisplayLocale {
    /// Resolves a POSIX style name such as `de_AT`; unknown names fall back to
    /// English.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().split('.').next().unwrap_or_default();
        let dates = chrono::Locale::try_from(name.replace('-', "_").as_str())
            .unwrap_or(chrono::Locale::en_US);

        DisplayLocale { dates }
    }
}

pub fn round_to_decimals(input: Decimal) -> Decimal {
    let mut rounded = input.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Always two fractional digits, no grouping, `.` as separator.
pub fn format_amount(amount: Decimal) -> String {
    round_to_decimals(amount).to_string()
}

/// The provider reports a calendar day, so only the date part is shown.
pub fn format_date(date: NaiveDate, locale: &DisplayLocale) -> String {
    match date.and_hms_opt(0, 0, 0) {
        Some(midnight) => midnight
            .and_utc()
            .format_localized("%x", locale.dates)
            .to_string(),
        None => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_half_away_from_zero_with_two_digits() {
        assert_eq!(round_to_decimals(dec!(90.5)).to_string(), "90.50");
        assert_eq!(round_to_decimals(dec!(1.005)).to_string(), "1.01");
        assert_eq!(round_to_decimals(dec!(2)).to_string(), "2.00");
        assert_eq!(round_to_decimals(dec!(0.0149)).to_string(), "0.01");
    }

    #[test]
    fn amounts_are_plain_fixed_two_digits() {
        assert_eq!(format_amount(dec!(90.5)), "90.50");
        assert_eq!(format_amount(dec!(12345.678)), "12345.68");
        assert_eq!(format_amount(dec!(-1500)), "-1500.00");
        assert_eq!(format_amount(dec!(1234567.891)), "1234567.89");
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let locale = DisplayLocale::from_name("xx_YY");
        assert_eq!(locale.dates, chrono::Locale::en_US);
    }

    #[test]
    fn dates_use_the_locale_format() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 20).unwrap();
        assert_eq!(format_date(date, &DisplayLocale::default()), "01/20/2023");
        assert_eq!(format_date(date, &DisplayLocale::from_name("de_DE")), "20.01.2023");
    }
}
