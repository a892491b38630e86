//! Express checkout gateway implementations

#[cfg(feature = "paypal")]
pub mod paypal;

#[cfg(feature = "paypal")]
pub use paypal::PaypalExpress;
