use tabled::{Table, Tabled};

use crate::services::currencies::{all, Currency};

#[derive(Debug, Tabled)]
struct CurrencyRow {
    code: &'static str,
    flag: String,
}

impl From<&Currency> for CurrencyRow {
    fn from(currency: &Currency) -> Self {
        CurrencyRow {
            code: currency.code,
            flag: currency.flag_url(),
        }
    }
}

pub fn currencies() {
    let rows: Vec<CurrencyRow> = all().iter().map(CurrencyRow::from).collect();
    println!("{}", Table::new(&rows));
    println!("{} currencies available", rows.len());
}
