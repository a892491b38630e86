//! PayPal Express Checkout (NVP) gateway

use crate::{
    config::GatewayConfig,
    error::{CheckoutError, CheckoutResult},
    hook::{LogHook, TracingLogHook},
    money::Currency,
    nvp::{NvpRequest, NvpResponse},
    provider::{Details, ExpressCheckoutGateway},
    request,
    response::{Response, failure_diagnostic},
    transport::{HttpTransport, Transport},
    types::{CheckoutOptions, CheckoutSession, Method, PaymentAction},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;

/// PayPal Express Checkout gateway
///
/// Holds only immutable configuration, so one instance can serve any number
/// of concurrent checkouts. The token and payer id travel between calls in a
/// [`CheckoutSession`].
pub struct PaypalExpress<T = HttpTransport> {
    config: GatewayConfig,
    transport: T,
    hook: Arc<dyn LogHook>,
}

impl PaypalExpress<HttpTransport> {
    /// Create a gateway using the default HTTP transport
    pub fn new(config: GatewayConfig) -> CheckoutResult<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config.transport).map_err(|e| {
            CheckoutError::Configuration(format!("failed to build HTTP client: {}", e))
        })?;
        Ok(Self::assemble(config, transport))
    }

    /// Create a gateway from `ARMATURE_CHECKOUT_*` environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        Self::new(GatewayConfig::from_env()?)
    }
}

impl<T: Transport> PaypalExpress<T> {
    /// Create a gateway with a custom transport
    pub fn with_transport(config: GatewayConfig, transport: T) -> CheckoutResult<Self> {
        config.validate()?;
        Ok(Self::assemble(config, transport))
    }

    fn assemble(config: GatewayConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            hook: Arc::new(TracingLogHook),
        }
    }

    /// Replace the diagnostic hook
    pub fn with_hook(mut self, hook: Arc<dyn LogHook>) -> Self {
        self.hook = hook;
        self
    }

    /// Gateway configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// NVP endpoint in use
    pub fn endpoint(&self) -> &'static str {
        self.config.mode.api_url()
    }

    fn log_commit(&self, action: PaymentAction, method: Method) {
        self.hook.log(&format!(
            "Commit Payment Action: {}, Method: {}",
            action, method
        ));
    }
}

impl<T> std::fmt::Debug for PaypalExpress<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaypalExpress")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: Transport> ExpressCheckoutGateway for PaypalExpress<T> {
    fn name(&self) -> &'static str {
        "paypal_express"
    }

    fn display_name(&self) -> &'static str {
        "PayPal Express Checkout"
    }

    fn homepage_url(&self) -> &'static str {
        "https://www.paypal.com/cgi-bin/webscr?cmd=xpt/merchant/ExpressCheckoutIntro-outside"
    }

    fn supported_countries(&self) -> &'static [&'static str] {
        &["US"]
    }

    fn default_currency(&self) -> Currency {
        self.config.currency
    }

    fn is_test(&self) -> bool {
        self.config.mode.is_test()
    }

    async fn setup(
        &self,
        amount: Decimal,
        action: PaymentAction,
        options: &CheckoutOptions,
    ) -> CheckoutResult<Response> {
        let request = request::setup_request(&self.config, amount, action, options)?;
        self.log_commit(action, Method::SetExpressCheckout);
        self.commit(request).await
    }

    async fn do_action(
        &self,
        amount: Decimal,
        action: PaymentAction,
        options: &CheckoutOptions,
    ) -> CheckoutResult<Response> {
        let request = request::do_action_request(&self.config, amount, action, options)?;
        self.log_commit(action, Method::DoExpressCheckoutPayment);
        self.commit(request).await
    }

    async fn get_details_for(&self, token: &str, payer_id: &str) -> CheckoutResult<Details> {
        let session = CheckoutSession::from_redirect(token, payer_id);
        let request = request::details_request(&self.config, token);

        self.hook
            .log(&format!("Commit Method: {}", Method::GetExpressCheckoutDetails));
        let response = self.commit(request).await?;

        Ok(Details { session, response })
    }

    async fn commit(&self, request: NvpRequest) -> CheckoutResult<Response> {
        let body = self
            .transport
            .post(self.endpoint(), request.encode())
            .await?;

        let params = NvpResponse::parse(&body);
        if let Some(diagnostic) = failure_diagnostic(&params) {
            self.hook.error_log(&diagnostic);
        }

        Ok(Response::from_nvp(params, self.is_test()))
    }

    fn url_for_token(&self, token: &str) -> String {
        format!("{}{}", self.config.mode.redirect_url(), token)
    }
}
