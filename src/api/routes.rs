use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handlers::{api_convert, api_currencies, convert, index, swap},
    AppState,
};

pub fn create_router(state: AppState) -> anyhow::Result<Router> {
    let widget_routes = Router::new()
        .route("/", get(index))
        .route("/convert", get(convert))
        .route("/swap", get(swap));

    let api_routes = Router::new()
        .route("/convert", get(api_convert))
        .route("/currencies", get(api_currencies));

    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let router = Router::new()
        .merge(widget_routes)
        .nest("/api", api_routes)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    Ok(router)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    use super::*;
    use crate::services::{
        conversion::{ConversionQuery, ConversionResult, ProviderError},
        market_data::RateProvider,
        shared::env::Settings,
    };

    struct FixedRate;

    #[async_trait]
    impl RateProvider for FixedRate {
        async fn convert(
            &self,
            query: &ConversionQuery,
        ) -> Result<ConversionResult, ProviderError> {
            if query.to == "XXX" {
                return Err(ProviderError::Rejected("unknown currency".into()));
            }
            Ok(ConversionResult {
                amount: query.amount,
                from: query.from.clone(),
                to: query.to.clone(),
                rate: dec!(90.5),
                converted_amount: dec!(90.5) * query.amount,
                date: NaiveDate::from_ymd_opt(2023, 1, 20).unwrap(),
            })
        }
    }

    fn router() -> Router {
        create_router(AppState::new(Arc::new(FixedRate), Settings::default())).unwrap()
    }

    async fn get_body(uri: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn index_shows_default_rate() {
        let (status, body) = get_body("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("1 USD = 90.50 RUB"));
    }

    #[tokio::test]
    async fn swap_page_converts_reversed_pair() {
        let (_, body) = get_body("/swap?amount=2&from=USD&to=EUR").await;
        assert!(body.contains("1 EUR = 90.50 USD"));
        assert!(body.contains("2 EUR = 181.00 USD"));
    }

    #[tokio::test]
    async fn empty_amount_renders_warning() {
        let (status, body) = get_body("/convert?amount=&from=USD&to=RUB").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("notification--warning"));
        assert!(body.contains("Please fill the fields."));
    }

    #[tokio::test]
    async fn api_returns_json_result() {
        let (status, body) = get_body("/api/convert?amount=1&from=usd&to=rub").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["rate"], "90.50");
        assert_eq!(json["from"], "USD");
        assert_eq!(json["date"], "2023-01-20");
    }

    #[tokio::test]
    async fn api_maps_errors_to_status_codes() {
        let (status, body) = get_body("/api/convert?amount=1&from=USD").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("validation_error"));

        let (status, body) = get_body("/api/convert?amount=1&from=USD&to=XXX").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("provider_error"));
    }

    #[tokio::test]
    async fn currencies_are_listed() {
        let (status, body) = get_body("/api/currencies").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"code\":\"USD\""));
    }
}
