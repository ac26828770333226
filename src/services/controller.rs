use std::sync::Arc;

use tracing::{error, info, warn};

use super::{
    conversion::{parse_amount, ConversionError, ConversionRequest, ConversionResult},
    currencies,
    market_data::RateProvider,
    notifications::{Notifier, Severity},
    view::{ConverterView, CurrencyField, ExchangeDisplay, Side},
};

pub const VALIDATION_MESSAGE: &str = "Please fill the fields.";
pub const PROVIDER_MESSAGE: &str = "Something went wrong, open dev console.";

/// `Displayed` and `Errored` are resting states: like `Idle` they accept the
/// next submit or swap, they just remember how the last cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Requesting,
    Displayed,
    Errored,
}

/// Drives one converter widget: reads the form, asks the provider, and puts
/// either a result table or a notification in front of the user.
pub struct ConversionController {
    provider: Arc<dyn RateProvider>,
    notifier: Arc<dyn Notifier>,
    view: ConverterView,
    state: ControllerState,
}

impl ConversionController {
    pub fn new(
        provider: Arc<dyn RateProvider>,
        notifier: Arc<dyn Notifier>,
        view: ConverterView,
    ) -> Self {
        ConversionController {
            provider,
            notifier,
            view,
            state: ControllerState::Idle,
        }
    }

    pub fn view(&self) -> &ConverterView {
        &self.view
    }

    pub fn into_view(self) -> ConverterView {
        self.view
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.view.amount = amount.to_string();
    }

    /// Changes one of the selects; the flag follows the code.
    pub fn select_currency(&mut self, side: Side, code: &str) -> Result<(), ConversionError> {
        let currency = currencies::find(code).ok_or_else(|| {
            ConversionError::Validation(format!("'{}' is not a supported currency", code.trim()))
        })?;
        *self.view.field_mut(side) = CurrencyField::new(currency.code);
        Ok(())
    }

    /// First load: convert with whatever the view was built with.
    pub async fn initialize(&mut self) -> Result<ConversionResult, ConversionError> {
        info!(
            "Loading initial rate {} -> {}",
            self.view.from.code, self.view.to.code
        );
        self.submit_form().await
    }

    pub async fn submit_form(&mut self) -> Result<ConversionResult, ConversionError> {
        let request = self.view.request();
        self.submit(request).await
    }

    pub async fn submit(
        &mut self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConversionError> {
        let query = match request.validate() {
            Ok(query) => query,
            Err(err) => {
                warn!("Conversion request rejected: {}", err);
                self.notifier.notify(Severity::Warning, VALIDATION_MESSAGE);
                return Err(err);
            }
        };

        let previous = std::mem::replace(&mut self.view.exchange, ExchangeDisplay::Loading);
        self.state = ControllerState::Requesting;

        match self.provider.convert(&query).await {
            Ok(result) => {
                let result = result.rounded();
                info!(
                    "Converted {} {} to {} {} at {}",
                    result.amount, result.from, result.converted_amount, result.to, result.rate
                );
                self.view.exchange = ExchangeDisplay::Table(result.clone());
                self.state = ControllerState::Displayed;
                Ok(result)
            }
            Err(err) => {
                error!("Conversion {} -> {} failed: {:?}", query.from, query.to, err);
                self.view.exchange = previous;
                self.state = ControllerState::Errored;
                self.notifier.notify(Severity::Danger, PROVIDER_MESSAGE);
                Err(err.into())
            }
        }
    }

    /// Exchanges the two currencies and converts again. An unusable amount
    /// leaves the selects as they were.
    pub async fn swap(&mut self) -> Result<ConversionResult, ConversionError> {
        if let Err(err) = parse_amount(&self.view.amount) {
            warn!("Swap rejected: {}", err);
            self.notifier.notify(Severity::Warning, VALIDATION_MESSAGE);
            return Err(err);
        }

        self.view.swap_currencies();
        self.submit_form().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::services::{
        conversion::{ConversionQuery, ProviderError},
        notifications::CollectingNotifier,
        shared::env::Settings,
    };

    struct FakeProvider {
        outcome: Result<ConversionResult, ProviderError>,
        queries: Mutex<Vec<ConversionQuery>>,
    }

    impl FakeProvider {
        fn answering(rate: rust_decimal::Decimal) -> Arc<Self> {
            Arc::new(FakeProvider {
                outcome: Ok(ConversionResult {
                    amount: dec!(0),
                    from: String::new(),
                    to: String::new(),
                    rate,
                    converted_amount: dec!(0),
                    date: NaiveDate::from_ymd_opt(2023, 1, 20).unwrap(),
                }),
                queries: Mutex::new(vec![]),
            })
        }

        fn failing(err: ProviderError) -> Arc<Self> {
            Arc::new(FakeProvider {
                outcome: Err(err),
                queries: Mutex::new(vec![]),
            })
        }

        fn calls(&self) -> Vec<ConversionQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RateProvider for FakeProvider {
        async fn convert(
            &self,
            query: &ConversionQuery,
        ) -> Result<ConversionResult, ProviderError> {
            self.queries.lock().unwrap().push(query.clone());
            self.outcome.clone().map(|template| ConversionResult {
                amount: query.amount,
                from: query.from.clone(),
                to: query.to.clone(),
                converted_amount: template.rate * query.amount,
                ..template
            })
        }
    }

    fn controller(
        provider: Arc<FakeProvider>,
        view: ConverterView,
    ) -> (ConversionController, Arc<CollectingNotifier>) {
        let notifier = Arc::new(CollectingNotifier::new());
        (
            ConversionController::new(provider, notifier.clone(), view),
            notifier,
        )
    }

    #[tokio::test]
    async fn invalid_requests_never_reach_the_provider() {
        let provider = FakeProvider::answering(dec!(90.5));
        let (mut controller, notifier) =
            controller(provider.clone(), ConverterView::new("1", "USD", "RUB"));

        for request in [
            ConversionRequest::new("", "USD", "RUB"),
            ConversionRequest::new("1", "", "RUB"),
            ConversionRequest::new("1", "USD", ""),
        ] {
            let err = controller.submit(request).await.unwrap_err();
            assert!(err.is_validation());
        }

        assert!(provider.calls().is_empty());
        let notifications = notifier.take();
        assert_eq!(notifications.len(), 3);
        assert!(notifications
            .iter()
            .all(|n| n.severity == Severity::Warning && n.content == VALIDATION_MESSAGE));
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[tokio::test]
    async fn successful_submit_renders_two_decimal_rate() {
        let provider = FakeProvider::answering(dec!(90.50));
        let (mut controller, notifier) =
            controller(provider, ConverterView::new("1", "USD", "RUB"));

        let result = controller.submit_form().await.unwrap();

        assert_eq!(result.rate_line(), "1 USD = 90.50 RUB");
        assert_eq!(result.exchange_line(), "1 USD = 90.50 RUB");
        assert_eq!(controller.view().exchange, ExchangeDisplay::Table(result.clone()));
        assert_eq!(controller.state(), ControllerState::Displayed);
        assert!(notifier.take().is_empty());
    }

    #[tokio::test]
    async fn swap_exchanges_pair_and_submits_once() {
        let provider = FakeProvider::answering(dec!(0.011));
        let (mut controller, _) =
            controller(provider.clone(), ConverterView::new("100", "USD", "RUB"));

        controller.swap().await.unwrap();

        assert_eq!(controller.view().from.code, "RUB");
        assert_eq!(controller.view().to.code, "USD");
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].from, "RUB");
        assert_eq!(calls[0].to, "USD");
        assert_eq!(calls[0].amount, dec!(100));
    }

    #[tokio::test]
    async fn swap_with_empty_amount_changes_nothing() {
        let provider = FakeProvider::answering(dec!(90.5));
        let (mut controller, notifier) =
            controller(provider.clone(), ConverterView::new(" ", "USD", "RUB"));

        let err = controller.swap().await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(controller.view().from.code, "USD");
        assert_eq!(controller.view().to.code, "RUB");
        assert!(provider.calls().is_empty());
        assert_eq!(notifier.take()[0].severity, Severity::Warning);
    }

    #[tokio::test]
    async fn provider_failure_keeps_previous_table() {
        let good = FakeProvider::answering(dec!(90.5));
        let (mut controller, _) = controller(good, ConverterView::new("1", "USD", "RUB"));
        let shown = controller.submit_form().await.unwrap();

        let notifier = Arc::new(CollectingNotifier::new());
        let mut controller = ConversionController::new(
            FakeProvider::failing(ProviderError::Rejected("response reported success=false".into())),
            notifier.clone(),
            controller.into_view(),
        );

        let err = controller.submit_form().await.unwrap_err();

        assert!(matches!(err, ConversionError::Provider(ProviderError::Rejected(_))));
        assert_eq!(controller.view().exchange, ExchangeDisplay::Table(shown));
        assert_eq!(controller.state(), ControllerState::Errored);
        let notifications = notifier.take();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].severity, Severity::Danger);
        assert_eq!(notifications[0].content, PROVIDER_MESSAGE);
    }

    #[tokio::test]
    async fn displayed_controller_accepts_the_next_submit() {
        let provider = FakeProvider::answering(dec!(90.5));
        let (mut controller, _) =
            controller(provider.clone(), ConverterView::new("1", "USD", "RUB"));

        controller.submit_form().await.unwrap();
        assert_eq!(controller.state(), ControllerState::Displayed);

        controller.set_amount("2");
        let second = controller.submit_form().await.unwrap();

        assert_eq!(controller.state(), ControllerState::Displayed);
        assert_eq!(second.converted_amount, dec!(181.00));
        assert_eq!(provider.calls().len(), 2);
    }

    #[tokio::test]
    async fn errored_controller_accepts_the_next_swap() {
        let provider = FakeProvider::failing(ProviderError::Status(503));
        let (mut controller, notifier) =
            controller(provider.clone(), ConverterView::new("1", "USD", "RUB"));

        controller.submit_form().await.unwrap_err();
        assert_eq!(controller.state(), ControllerState::Errored);

        controller.swap().await.unwrap_err();

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].from, "RUB");
        assert_eq!(controller.state(), ControllerState::Errored);
        assert_eq!(notifier.take().len(), 2);
    }

    #[tokio::test]
    async fn initialize_submits_defaults_once() {
        let provider = FakeProvider::answering(dec!(90.5));
        let (mut controller, _) = controller(
            provider.clone(),
            ConverterView::with_defaults(&Settings::default()),
        );

        controller.initialize().await.unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].from, "USD");
        assert_eq!(calls[0].to, "RUB");
        assert_eq!(calls[0].amount, dec!(1));
    }

    #[test]
    fn selecting_a_currency_updates_its_flag() {
        let (mut controller, _) = controller(
            FakeProvider::answering(dec!(1)),
            ConverterView::new("1", "USD", "RUB"),
        );

        controller.select_currency(Side::To, "eur").unwrap();
        assert_eq!(controller.view().to.code, "EUR");
        assert_eq!(
            controller.view().to.flag_url.as_deref(),
            Some("https://flagcdn.com/48x36/eu.png")
        );

        assert!(controller.select_currency(Side::From, "XYZ").is_err());
        assert_eq!(controller.view().from.code, "USD");
    }
}
