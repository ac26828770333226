use routes::create_router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::services::{
    market_data::{ExchangeRateHost, RateProvider},
    shared::{env::Settings, DisplayLocale},
};

pub mod errors;
pub mod handlers;
pub mod page;
pub mod routes;

/// Shared by every request: the provider client and the startup settings.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn RateProvider>,
    pub settings: Arc<Settings>,
    pub locale: DisplayLocale,
}

impl AppState {
    pub fn new(provider: Arc<dyn RateProvider>, settings: Settings) -> Self {
        AppState {
            provider,
            locale: DisplayLocale::from_name(&settings.locale),
            settings: Arc::new(settings),
        }
    }
}

pub async fn api(settings: Settings) -> anyhow::Result<()> {
    let provider = Arc::new(ExchangeRateHost::from_settings(&settings)?);
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let router = create_router(AppState::new(provider, settings))?;

    let listener = TcpListener::bind(&addr).await?;
    info!("Currency converter widget listening on http://{}", addr);
    Ok(axum::serve(listener, router.into_make_service()).await?)
}
