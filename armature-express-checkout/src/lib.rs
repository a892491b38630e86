//! Express Checkout Module for Armature Framework
//!
//! Adapter for redirect-style Express Checkout gateways that speak a flat,
//! URL-encoded name/value protocol (NVP). Merchant intents go in, a uniform
//! [`Response`] comes out.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Express Checkout                             │
//! │                                                                  │
//! │  setup_authorize | setup_purchase | get_details_for              │
//! │  authorize | purchase | url_for_token                            │
//! │                            │                                     │
//! │                            ▼                                     │
//! │  ┌────────────┐   ┌────────────┐   ┌────────────┐              │
//! │  │  Request   │──▶│ Transport  │──▶│  Response  │──▶ Response  │
//! │  │  builder   │   │ (TLS POST) │   │ classifier │              │
//! │  └────────────┘   └────────────┘   └────────────┘              │
//! │                                           │                     │
//! │                                           ▼                     │
//! │                                      LogHook                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use armature_express_checkout::{
//!     CheckoutOptions, ExpressCheckoutGateway, GatewayConfig, PaypalExpress,
//! };
//! use rust_decimal::Decimal;
//!
//! let gateway = PaypalExpress::new(GatewayConfig::new("api_user", "api_pwd", "api_sig"))?;
//!
//! // 1. Begin checkout and send the buyer to the provider
//! let setup = gateway
//!     .setup_purchase(
//!         Decimal::new(2999, 2),
//!         &CheckoutOptions::with_urls("https://shop/return", "https://shop/cancel"),
//!     )
//!     .await?;
//! let redirect = gateway.url_for_token(setup.token().unwrap_or_default());
//!
//! // 2. Buyer comes back with ?token=...&PayerID=...
//! let details = gateway.get_details_for(&token, &payer_id).await?;
//!
//! // 3. Complete the payment
//! let payment = gateway
//!     .purchase(Decimal::new(2999, 2), &CheckoutOptions::from_session(details.session))
//!     .await?;
//!
//! if payment.success() {
//!     println!("paid: {:?}", payment.authorization());
//! }
//! ```
//!
//! Declines and other provider-side failures are not errors: they come back
//! as a [`Response`] with `success() == false`. Only configuration problems,
//! missing parameters and transport failures are returned as
//! [`CheckoutError`].

pub mod config;
pub mod error;
pub mod hook;
pub mod money;
pub mod nvp;
pub mod provider;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub mod providers;

pub use config::*;
pub use error::*;
pub use hook::{LogEntry, LogHook, MemoryLogHook, NoopLogHook, Severity, TracingLogHook};
pub use money::*;
pub use nvp::{NvpRequest, NvpResponse};
pub use provider::*;
pub use response::{AvsResult, ProviderError, Response, ResponseOptions};
pub use transport::*;
pub use types::*;

#[cfg(feature = "paypal")]
pub use providers::PaypalExpress;
