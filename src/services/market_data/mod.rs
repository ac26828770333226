pub mod exchange_rate_host;

use async_trait::async_trait;

use super::conversion::{ConversionQuery, ConversionResult, ProviderError};

pub use exchange_rate_host::ExchangeRateHost;

/// Source of live conversions. Implementations make exactly one outbound
/// call per `convert` and never retry.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn convert(&self, query: &ConversionQuery) -> Result<ConversionResult, ProviderError>;
}
