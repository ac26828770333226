use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::RateProvider;
use crate::services::{
    conversion::{ConversionQuery, ConversionResult, ProviderError},
    shared::env::Settings,
};

#[derive(Deserialize, Debug)]
struct ConvertResponse {
    #[serde(default)]
    success: bool,
    date: Option<NaiveDate>,
    info: Option<ConvertResponseInfo>,
    result: Option<Decimal>,
    error: Option<ConvertResponseError>,
}

#[derive(Deserialize, Debug)]
struct ConvertResponseInfo {
    // the apilayer flavour of the endpoint calls it `quote`
    #[serde(alias = "quote")]
    rate: Option<Decimal>,
    timestamp: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct ConvertResponseError {
    info: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Client for the exchangerate.host `/convert` endpoint.
pub struct ExchangeRateHost {
    client: Client,
    base_url: String,
    access_key: Option<String>,
}

impl ExchangeRateHost {
    pub fn new(base_url: &str, access_key: Option<String>) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("exchangebox/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ExchangeRateHost {
            client,
            base_url: base_url.to_string(),
            access_key,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        Self::new(&settings.api_url, settings.api_key.clone())
    }
}

fn into_result(
    query: &ConversionQuery,
    response: ConvertResponse,
) -> Result<ConversionResult, ProviderError> {
    if !response.success {
        let reason = response
            .error
            .and_then(|err| err.info.or(err.kind))
            .unwrap_or_else(|| "response reported success=false".to_string());
        return Err(ProviderError::Rejected(reason));
    }

    let rate = response
        .info
        .as_ref()
        .and_then(|info| info.rate)
        .ok_or(ProviderError::Incomplete("info.rate"))?;
    let converted_amount = response.result.ok_or(ProviderError::Incomplete("result"))?;
    let date = response
        .date
        .or_else(|| {
            response
                .info
                .as_ref()
                .and_then(|info| info.timestamp)
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
                .map(|ts| ts.date_naive())
        })
        .unwrap_or_else(|| Utc::now().date_naive());

    Ok(ConversionResult {
        amount: query.amount,
        from: query.from.clone(),
        to: query.to.clone(),
        rate,
        converted_amount,
        date,
    })
}

#[async_trait]
impl RateProvider for ExchangeRateHost {
    async fn convert(&self, query: &ConversionQuery) -> Result<ConversionResult, ProviderError> {
        let mut params = vec![
            ("from", query.from.clone()),
            ("to", query.to.clone()),
            ("amount", query.amount.normalize().to_string()),
        ];
        if let Some(key) = &self.access_key {
            params.push(("access_key", key.clone()));
        }

        tracing::debug!(
            "GET {} from={} to={} amount={}",
            self.base_url,
            query.from,
            query.to,
            query.amount
        );

        let res = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = res.text().await?;
        let response = serde_json::from_str::<ConvertResponse>(&body)?;
        into_result(query, response)
    }
}
