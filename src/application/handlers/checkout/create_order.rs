//! CreateOrderHandler - Command handler for opening a gateway order.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::Timestamp;
use crate::domain::payment::{CheckoutError, MajorAmount, OrderRequest};
use crate::ports::{GatewayOrder, PaymentGateway};

/// Command to create an order for a checkout amount.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    /// Amount in major units as sent by the client. `None` when absent or null.
    pub amount: Option<String>,
}

/// Result of order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order: GatewayOrder,
}

/// Handler for creating gateway orders.
pub struct CreateOrderHandler {
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
}

impl CreateOrderHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, currency: impl Into<String>) -> Self {
        Self {
            gateway,
            currency: currency.into(),
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, CheckoutError> {
        // 1. Validate and convert the amount
        let raw = cmd.amount.ok_or(CheckoutError::MissingAmount)?;
        let amount = MajorAmount::parse(&raw).map_err(CheckoutError::invalid_amount)?;
        let request = OrderRequest::for_checkout(amount, &self.currency, Timestamp::now())?;

        // 2. Open the order at the gateway
        let order = self
            .gateway
            .create_order(request.clone())
            .await
            .map_err(|e| {
                warn!(
                    amount = request.amount,
                    currency = %request.currency,
                    error = %e,
                    "Gateway order creation failed"
                );
                CheckoutError::gateway(e.to_string())
            })?;

        info!(
            order_id = %order.id,
            amount = order.amount,
            receipt = %request.receipt,
            "Order created"
        );

        Ok(CreateOrderResult { order })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::razorpay::MockPaymentGateway;
    use crate::domain::payment::AmountError;
    use crate::ports::GatewayError;

    fn handler(gateway: &MockPaymentGateway) -> CreateOrderHandler {
        CreateOrderHandler::new(Arc::new(gateway.clone()), "INR")
    }

    fn command(amount: Option<&str>) -> CreateOrderCommand {
        CreateOrderCommand {
            amount: amount.map(String::from),
        }
    }

    #[tokio::test]
    async fn amount_is_converted_to_minor_units() {
        let gateway = MockPaymentGateway::new();

        let result = handler(&gateway).handle(command(Some("10"))).await.unwrap();

        assert_eq!(result.order.amount, 1000);
        let requests = gateway.order_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount, 1000);
        assert_eq!(requests[0].currency, "INR");
        assert!(requests[0].capture_on_authorization);
        assert!(requests[0].receipt.starts_with("receipt_"));
    }

    #[tokio::test]
    async fn fractional_amount_rounds_half_away_from_zero() {
        let gateway = MockPaymentGateway::new();

        let result = handler(&gateway).handle(command(Some("19.995"))).await.unwrap();

        assert_eq!(result.order.amount, 2000);
    }

    #[tokio::test]
    async fn configured_currency_is_used() {
        let gateway = MockPaymentGateway::new();
        let handler = CreateOrderHandler::new(Arc::new(gateway.clone()), "USD");

        let result = handler.handle(command(Some("1"))).await.unwrap();

        assert_eq!(result.order.currency, "USD");
    }

    #[tokio::test]
    async fn missing_amount_fails_without_gateway_call() {
        let gateway = MockPaymentGateway::new();

        let err = handler(&gateway).handle(command(None)).await.unwrap_err();

        assert_eq!(err, CheckoutError::MissingAmount);
        assert!(!gateway.was_called("create_order"));
    }

    #[tokio::test]
    async fn zero_amount_is_missing() {
        let gateway = MockPaymentGateway::new();

        let err = handler(&gateway).handle(command(Some("0"))).await.unwrap_err();

        assert_eq!(err, CheckoutError::MissingAmount);
    }

    #[tokio::test]
    async fn negative_amount_is_invalid() {
        let gateway = MockPaymentGateway::new();

        let err = handler(&gateway).handle(command(Some("-5"))).await.unwrap_err();

        assert_eq!(err, CheckoutError::InvalidAmount(AmountError::NotPositive));
        assert!(!gateway.was_called("create_order"));
    }

    #[tokio::test]
    async fn non_numeric_amount_is_invalid() {
        let gateway = MockPaymentGateway::new();

        let err = handler(&gateway).handle(command(Some("ten"))).await.unwrap_err();

        assert!(matches!(err, CheckoutError::InvalidAmount(AmountError::NotANumber(_))));
    }

    #[tokio::test]
    async fn gateway_failure_is_a_gateway_error() {
        let gateway = MockPaymentGateway::new();
        gateway.set_error(GatewayError::authentication("Authentication failed"));

        let err = handler(&gateway).handle(command(Some("10"))).await.unwrap_err();

        assert!(matches!(err, CheckoutError::Gateway(_)));
    }
}
