use std::fmt::Write;

use crate::services::{
    currencies,
    notifications::Notification,
    shared::DisplayLocale,
    view::{ConverterView, CurrencyField, ExchangeDisplay, LOADING_TEXT},
};

const STYLE: &str = "\
body{font-family:sans-serif;background:#f4f6fb;display:grid;place-items:center;min-height:100vh;margin:0}\
.currency-converter{background:#fff;border-radius:8px;padding:24px;width:360px;box-shadow:0 4px 16px rgba(0,0,0,.08)}\
.directions{display:flex;align-items:end;gap:8px;margin:16px 0}\
.select{display:flex;align-items:center;gap:6px}\
.select img{width:32px}\
.exchange{margin:16px 0}\
.exchange td:first-child{font-weight:bold;padding-right:12px}\
.notification{padding:8px 12px;border-radius:4px;margin-bottom:8px}\
.notification--warning{background:#fff4ce}\
.notification--danger{background:#fde2e1}";

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_select(name: &str, field: &CurrencyField) -> String {
    let mut html = String::new();
    html.push_str("<div class='select'>");
    if let Some(flag_url) = &field.flag_url {
        let _ = write!(html, "<img src='{}' alt='flag'>", escape_html(flag_url));
    }
    let _ = write!(html, "<select data-select='{0}' name='{0}'>", name);
    if currencies::find(&field.code).is_none() {
        let code = escape_html(&field.code);
        let _ = write!(html, "<option value='{0}' selected>{0}</option>", code);
    }
    for currency in currencies::all() {
        let selected = if currency.code == field.code { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value='{0}'{1}>{0}</option>",
            currency.code, selected
        );
    }
    html.push_str("</select></div>");
    html
}

fn render_exchange(exchange: &ExchangeDisplay, locale: &DisplayLocale) -> String {
    match exchange {
        ExchangeDisplay::Loading => LOADING_TEXT.to_string(),
        ExchangeDisplay::Table(result) => {
            let mut html = String::from("<table>");
            for row in result.rows(locale) {
                let _ = write!(
                    html,
                    "<tr><td><span>{}</span></td><td>{}</td></tr>",
                    row.label,
                    escape_html(&row.value)
                );
            }
            html.push_str("</table>");
            html
        }
    }
}

fn render_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|notification| {
            format!(
                "<div class='notification notification--{}' role='alert'>{}</div>",
                notification.severity,
                escape_html(&notification.content)
            )
        })
        .collect()
}

/// Full widget page for the given view-model state.
pub fn render_page(
    view: &ConverterView,
    notifications: &[Notification],
    locale: &DisplayLocale,
) -> String {
    format!(
        "<!doctype html>\
<html lang='en'>\
<head><meta charset='utf-8'><meta name='viewport' content='width=device-width, initial-scale=1'>\
<title>Currency Converter</title><style>{style}</style></head>\
<body><div class='app-container'>\
<div class='notifications'>{notifications}</div>\
<div class='currency-converter'><h2>Currency Converter</h2><div class='content'>\
<form data-form='' method='get' action='/convert'>\
<label><span>Enter Amount</span>\
<input type='number' value='{amount}' step='any' min='0' name='amount'></label>\
<div class='directions'>\
<label><span class='label'>From</span>{from}</label>\
<button class='icon' data-switch='' type='submit' formaction='/swap' title='Swap currencies'>&#8646;</button>\
<label><span class='label'>To</span>{to}</label>\
</div>\
<div class='exchange' data-exchange=''>{exchange}</div>\
<button type='submit'>Get Exchange Rate</button>\
</form></div></div></div></body></html>",
        style = STYLE,
        notifications = render_notifications(notifications),
        amount = escape_html(&view.amount),
        from = render_select("from", &view.from),
        to = render_select("to", &view.to),
        exchange = render_exchange(&view.exchange, locale),
    )
}
