use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{errors::ErrorResponse, page::render_page, AppState};
use crate::services::{
    controller::ConversionController,
    conversion::ConversionResult,
    currencies::{self, Currency},
    notifications::CollectingNotifier,
    view::ConverterView,
};

#[derive(Debug, Default, Deserialize)]
pub struct FormQuery {
    pub amount: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl FormQuery {
    fn into_view(self) -> ConverterView {
        ConverterView::new(
            self.amount.as_deref().unwrap_or_default(),
            self.from.as_deref().unwrap_or_default(),
            self.to.as_deref().unwrap_or_default(),
        )
    }
}

enum WidgetAction {
    Initialize,
    Submit,
    Swap,
}

/// One controller per request: the page is rebuilt from the submitted form
/// every time.
async fn run_widget(state: &AppState, view: ConverterView, action: WidgetAction) -> Html<String> {
    let notifier = Arc::new(CollectingNotifier::new());
    let mut controller = ConversionController::new(state.provider.clone(), notifier.clone(), view);

    let outcome = match action {
        WidgetAction::Initialize => controller.initialize().await,
        WidgetAction::Submit => controller.submit_form().await,
        WidgetAction::Swap => controller.swap().await,
    };
    match outcome {
        Err(err) if err.is_validation() => debug!("Widget input rejected: {}", err),
        Err(err) => warn!("Widget conversion failed: {}", err),
        Ok(_) => debug!("Widget state after action: {:?}", controller.state()),
    }

    let view = controller.into_view();
    Html(render_page(&view, &notifier.take(), &state.locale))
}

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let view = ConverterView::with_defaults(&state.settings);
    run_widget(&state, view, WidgetAction::Initialize).await
}

pub async fn convert(
    State(state): State<AppState>,
    Query(query): Query<FormQuery>,
) -> impl IntoResponse {
    run_widget(&state, query.into_view(), WidgetAction::Submit).await
}

pub async fn swap(
    State(state): State<AppState>,
    Query(query): Query<FormQuery>,
) -> impl IntoResponse {
    run_widget(&state, query.into_view(), WidgetAction::Swap).await
}

pub async fn api_convert(
    State(state): State<AppState>,
    Query(query): Query<FormQuery>,
) -> Result<Json<ConversionResult>, ErrorResponse> {
    let notifier = Arc::new(CollectingNotifier::new());
    let mut controller =
        ConversionController::new(state.provider.clone(), notifier, query.into_view());
    let result = controller.submit_form().await?;
    Ok(Json(result))
}

pub async fn api_currencies() -> Json<&'static [Currency]> {
    Json(currencies::all())
}
