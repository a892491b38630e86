//! Express checkout gateway trait

use crate::{
    error::CheckoutResult,
    money::Currency,
    nvp::NvpRequest,
    response::Response,
    types::{CheckoutOptions, CheckoutSession, PaymentAction},
};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Result of a buyer details fetch
#[derive(Debug, Clone)]
pub struct Details {
    /// Decoded token and payer id, present whatever the acknowledgement
    pub session: CheckoutSession,
    /// Provider response
    pub response: Response,
}

/// Express checkout gateway trait
///
/// Implement this trait for each redirect-style checkout gateway so callers
/// can drive them uniformly. The provider-side flow is
/// setup → buyer redirect → details → authorize/purchase; the gateway does not
/// enforce the order, it only rejects a step whose own inputs are missing.
#[async_trait]
pub trait ExpressCheckoutGateway: Send + Sync {
    /// Get gateway name
    fn name(&self) -> &'static str;

    /// Human readable gateway name
    fn display_name(&self) -> &'static str;

    /// Provider homepage
    fn homepage_url(&self) -> &'static str;

    /// ISO country codes the gateway accepts merchants from
    fn supported_countries(&self) -> &'static [&'static str];

    /// Currency sent when a call does not override it
    fn default_currency(&self) -> Currency;

    /// Is test/sandbox mode
    fn is_test(&self) -> bool;

    /// Begin a checkout
    async fn setup(
        &self,
        amount: Decimal,
        action: PaymentAction,
        options: &CheckoutOptions,
    ) -> CheckoutResult<Response>;

    /// Complete a checkout
    async fn do_action(
        &self,
        amount: Decimal,
        action: PaymentAction,
        options: &CheckoutOptions,
    ) -> CheckoutResult<Response>;

    /// Fetch buyer details with the URL-encoded values from the return redirect
    async fn get_details_for(&self, token: &str, payer_id: &str) -> CheckoutResult<Details>;

    /// Send a prepared request and classify the response
    async fn commit(&self, request: NvpRequest) -> CheckoutResult<Response>;

    /// Hosted checkout page for a token
    fn url_for_token(&self, token: &str) -> String;

    /// Begin a checkout that will be authorized
    async fn setup_authorize(
        &self,
        amount: Decimal,
        options: &CheckoutOptions,
    ) -> CheckoutResult<Response> {
        self.setup(amount, PaymentAction::Authorization, options)
            .await
    }

    /// Begin a checkout that will be captured immediately
    async fn setup_purchase(
        &self,
        amount: Decimal,
        options: &CheckoutOptions,
    ) -> CheckoutResult<Response> {
        self.setup(amount, PaymentAction::Sale, options).await
    }

    /// Authorize a checkout
    async fn authorize(
        &self,
        amount: Decimal,
        options: &CheckoutOptions,
    ) -> CheckoutResult<Response> {
        self.do_action(amount, PaymentAction::Authorization, options)
            .await
    }

    /// Authorize and capture a checkout
    async fn purchase(
        &self,
        amount: Decimal,
        options: &CheckoutOptions,
    ) -> CheckoutResult<Response> {
        self.do_action(amount, PaymentAction::Sale, options).await
    }
}
