use dotenvy::{dotenv, from_filename, var};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const DEFAULT_API_URL: &str = "https://api.exchangerate.host/convert";
pub const DEFAULT_FROM: &str = "USD";
pub const DEFAULT_TO: &str = "RUB";
pub const DEFAULT_LOCALE: &str = "en_US";
pub const DEFAULT_PORT: u16 = 8084;

/// Runtime configuration, resolved once at startup and handed to the CLI
/// and the web widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub default_from: String,
    pub default_to: String,
    pub default_amount: Decimal,
    pub locale: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            default_from: DEFAULT_FROM.to_string(),
            default_to: DEFAULT_TO.to_string(),
            default_amount: dec!(1),
            locale: DEFAULT_LOCALE.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let defaults = Settings::default();

        let default_amount = match get_env_variable("DEFAULT_AMOUNT") {
            Some(raw) => raw.trim().parse::<Decimal>().unwrap_or_else(|_| {
                tracing::warn!("DEFAULT_AMOUNT '{}' is not a number, using 1", raw);
                defaults.default_amount
            }),
            None => defaults.default_amount,
        };

        let port = match get_env_variable("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("PORT '{}' is not a valid port, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Settings {
            api_url: get_env_variable("EXCHANGE_API_URL").unwrap_or(defaults.api_url),
            api_key: get_env_variable("EXCHANGE_API_KEY").filter(|key| !key.trim().is_empty()),
            default_from: get_env_variable("DEFAULT_FROM")
                .map(|code| code.trim().to_ascii_uppercase())
                .unwrap_or(defaults.default_from),
            default_to: get_env_variable("DEFAULT_TO")
                .map(|code| code.trim().to_ascii_uppercase())
                .unwrap_or(defaults.default_to),
            default_amount,
            locale: get_env_variable("LOCALE").unwrap_or(defaults.locale),
            port,
        }
    }
}

pub fn check_for_env_variables() {
    // nothing is strictly required, the public endpoint works without a key
    match get_env_variable("EXCHANGE_API_URL") {
        Some(url) => println!("Exchange API URL set to {} ✅", url),
        None => println!("EXCHANGE_API_URL not set, using {} ⚠️", DEFAULT_API_URL),
    };
    match get_env_variable("EXCHANGE_API_KEY") {
        Some(_) => println!("Exchange API key set ✅"),
        None => println!("No EXCHANGE_API_KEY set, requests are sent without an access key. ⚠️"),
    };
    match get_env_variable("LOCALE") {
        Some(locale) => println!("Locale set to {} ✅", locale),
        None => println!("LOCALE not set, dates are formatted for {} ⚠️", DEFAULT_LOCALE),
    };
}

pub fn get_env_variable(variable_to_get: &str) -> Option<String> {
    let environment = var("RUST_ENV").unwrap_or_else(|_| "development".into());

    match environment.as_str() {
        "development" => from_filename(".env.dev").ok(),
        "production" => from_filename(".env.prod").ok(),
        _ => dotenv().ok(),
    };
    var(variable_to_get).ok()
}
