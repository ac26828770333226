use std::sync::Arc;

use owo_colors::{OwoColorize, Style};
use spinners_rs::{Spinner, Spinners};
use tabled::Table;

use crate::services::{
    controller::ConversionController,
    conversion::{parse_amount, ConversionResult},
    market_data::ExchangeRateHost,
    notifications::TerminalNotifier,
    shared::{env::Settings, DisplayLocale},
    view::{ConverterView, Side, LOADING_TEXT},
};

pub struct ConvertArgs {
    pub amount: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub swap: bool,
}

impl ConvertArgs {
    fn is_first_load(&self) -> bool {
        self.amount.is_none() && self.from.is_none() && self.to.is_none() && !self.swap
    }
}

pub async fn convert(args: ConvertArgs, settings: &Settings) -> anyhow::Result<()> {
    let provider = Arc::new(ExchangeRateHost::from_settings(settings)?);
    let first_load = args.is_first_load();

    let mut controller = ConversionController::new(
        provider,
        Arc::new(TerminalNotifier),
        ConverterView::with_defaults(settings),
    );
    if let Some(amount) = &args.amount {
        controller.set_amount(amount);
    }
    if let Some(from) = &args.from {
        controller.select_currency(Side::From, from).map_err(|e| {
            anyhow::anyhow!("{}, run `exchangebox currencies` for the list", e)
        })?;
    }
    if let Some(to) = &args.to {
        controller.select_currency(Side::To, to).map_err(|e| {
            anyhow::anyhow!("{}, run `exchangebox currencies` for the list", e)
        })?;
    }

    // bad input is reported by the notifier, keep the spinner off that line
    let mut sp = has_usable_input(controller.view(), args.swap).then(|| {
        let mut sp = Spinner::new(Spinners::Point, LOADING_TEXT);
        sp.start();
        sp
    });
    let outcome = if args.swap {
        controller.swap().await
    } else if first_load {
        controller.initialize().await
    } else {
        controller.submit_form().await
    };
    if let Some(sp) = sp.as_mut() {
        sp.stop();
        println!();
    }

    let result = outcome?;
    print_result(&result, &DisplayLocale::from_name(&settings.locale));
    Ok(())
}

fn has_usable_input(view: &ConverterView, swap: bool) -> bool {
    if swap {
        parse_amount(&view.amount).is_ok()
    } else {
        view.request().validate().is_ok()
    }
}

fn print_result(result: &ConversionResult, locale: &DisplayLocale) {
    let table = Table::new(result.rows(locale)).to_string();
    println!("{}", table);
    println!("====");
    let highlight = Style::new().black().on_white().bold();
    println!("{}", result.exchange_line().style(highlight));
}
