//! Checkout request types

use crate::money::Currency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment action requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentAction {
    /// Authorize only, capture later
    Authorization,
    /// Authorize and capture in one step
    Sale,
}

impl PaymentAction {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorization => "Authorization",
            Self::Sale => "Sale",
        }
    }
}

impl fmt::Display for PaymentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NVP API method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// Begin checkout, returns a token
    SetExpressCheckout,
    /// Fetch buyer details for a token
    GetExpressCheckoutDetails,
    /// Complete the payment
    DoExpressCheckoutPayment,
}

impl Method {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetExpressCheckout => "SetExpressCheckout",
            Self::GetExpressCheckoutDetails => "GetExpressCheckoutDetails",
            Self::DoExpressCheckoutPayment => "DoExpressCheckoutPayment",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token and payer id captured after the buyer returns from the provider.
///
/// Produced by `get_details_for` and handed back to `authorize`/`purchase`
/// through [`CheckoutOptions::session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Checkout token
    pub token: String,
    /// Payer id
    pub payer_id: String,
}

impl CheckoutSession {
    /// Create a session from already-decoded values
    pub fn new(token: impl Into<String>, payer_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            payer_id: payer_id.into(),
        }
    }

    /// Create a session from the URL-encoded values of the return redirect
    pub fn from_redirect(token: &str, payer_id: &str) -> Self {
        Self {
            token: url_decode(token),
            payer_id: url_decode(payer_id),
        }
    }
}

// `+` decodes to a space, a literal `&` is kept
fn url_decode(value: &str) -> String {
    url::form_urlencoded::parse(format!("v={}", value.replace('&', "%26")).as_bytes())
        .next()
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default()
}

/// Per-call checkout options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutOptions {
    /// Where the buyer lands after approving (setup)
    pub return_url: Option<String>,
    /// Where the buyer lands after cancelling (setup)
    pub cancel_return_url: Option<String>,
    /// Explicit token, takes precedence over the session
    pub token: Option<String>,
    /// Explicit payer id, takes precedence over the session
    pub payer_id: Option<String>,
    /// Currency override for this call
    pub currency: Option<Currency>,
    /// Session captured by a previous details fetch
    pub session: Option<CheckoutSession>,
}

impl CheckoutOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for starting a checkout
    pub fn with_urls(return_url: impl Into<String>, cancel_return_url: impl Into<String>) -> Self {
        Self::new()
            .return_url(return_url)
            .cancel_return_url(cancel_return_url)
    }

    /// Options for completing a checkout from a session
    pub fn from_session(session: CheckoutSession) -> Self {
        Self::new().session(session)
    }

    /// Set return URL
    pub fn return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    /// Set cancel URL
    pub fn cancel_return_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_return_url = Some(url.into());
        self
    }

    /// Set token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set payer id
    pub fn payer_id(mut self, payer_id: impl Into<String>) -> Self {
        self.payer_id = Some(payer_id.into());
        self
    }

    /// Override currency
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Attach a session
    pub fn session(mut self, session: CheckoutSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Token from explicit options, else from the session
    pub fn resolved_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .or_else(|| self.session.as_ref().map(|s| s.token.as_str()))
    }

    /// Payer id from explicit options, else from the session
    pub fn resolved_payer_id(&self) -> Option<&str> {
        self.payer_id
            .as_deref()
            .or_else(|| self.session.as_ref().map(|s| s.payer_id.as_str()))
    }
}
