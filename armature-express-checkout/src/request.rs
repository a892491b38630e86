//! Request builders
//!
//! Each operation's field set is a pure function of the gateway
//! configuration and the call's inputs. Every request starts from the
//! authentication block and the operation fields are merged on top of it.

use crate::config::GatewayConfig;
use crate::error::{CheckoutError, CheckoutResult};
use crate::money::format_amount;
use crate::nvp::{NvpRequest, fields};
use crate::types::{CheckoutOptions, Method, PaymentAction};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;

/// Authentication and version block shared by every request
pub fn auth_fields(config: &GatewayConfig) -> NvpRequest {
    NvpRequest::new()
        .with(fields::USER, config.credentials.login.as_str())
        .with(fields::PWD, config.credentials.password.expose_secret())
        .with(fields::VERSION, config.version.as_str())
        .with(fields::SIGNATURE, config.credentials.signature.expose_secret())
        .with(fields::CURRENCYCODE, config.currency.code())
}

/// `SetExpressCheckout` request.
///
/// Fails with `MissingParameter` unless both `return_url` and
/// `cancel_return_url` are set.
pub fn setup_request(
    config: &GatewayConfig,
    amount: Decimal,
    action: PaymentAction,
    options: &CheckoutOptions,
) -> CheckoutResult<NvpRequest> {
    let (return_url, cancel_url) = match (&options.return_url, &options.cancel_return_url) {
        (Some(r), Some(c)) => (r, c),
        (r, c) => {
            return Err(missing(&[
                ("return_url", r.is_none()),
                ("cancel_return_url", c.is_none()),
            ]));
        }
    };

    let operation = NvpRequest::new()
        .with(fields::METHOD, Method::SetExpressCheckout.as_str())
        .with(fields::PAYMENTACTION, action.as_str())
        .with(fields::AMT, format_amount(amount))
        .with(fields::RETURNURL, return_url.as_str())
        .with(fields::CANCELURL, cancel_url.as_str());

    Ok(auth_fields(config)
        .merge(currency_override(options))
        .merge(operation))
}

/// `DoExpressCheckoutPayment` request.
///
/// Token and payer id come from the explicit options, else from the
/// attached session. Fails with `MissingParameter` if either resolves to
/// nothing.
pub fn do_action_request(
    config: &GatewayConfig,
    amount: Decimal,
    action: PaymentAction,
    options: &CheckoutOptions,
) -> CheckoutResult<NvpRequest> {
    let (token, payer_id) = match (options.resolved_token(), options.resolved_payer_id()) {
        (Some(t), Some(p)) => (t, p),
        (t, p) => {
            return Err(missing(&[
                ("token", t.is_none()),
                ("payer_id", p.is_none()),
            ]));
        }
    };

    let operation = NvpRequest::new()
        .with(fields::METHOD, Method::DoExpressCheckoutPayment.as_str())
        .with(fields::PAYMENTACTION, action.as_str())
        .with(fields::AMT, format_amount(amount))
        .with(fields::TOKEN, token)
        .with(fields::PAYERID, payer_id);

    Ok(auth_fields(config)
        .merge(currency_override(options))
        .merge(operation))
}

/// `GetExpressCheckoutDetails` request for a token, used as given
pub fn details_request(config: &GatewayConfig, token: &str) -> NvpRequest {
    auth_fields(config).merge(
        NvpRequest::new()
            .with(fields::METHOD, Method::GetExpressCheckoutDetails.as_str())
            .with(fields::TOKEN, token),
    )
}

fn currency_override(options: &CheckoutOptions) -> NvpRequest {
    match options.currency {
        Some(currency) => NvpRequest::new().with(fields::CURRENCYCODE, currency.code()),
        None => NvpRequest::new(),
    }
}

fn missing(checks: &[(&'static str, bool)]) -> CheckoutError {
    CheckoutError::MissingParameter(
        checks
            .iter()
            .filter(|(_, absent)| *absent)
            .map(|(name, _)| *name)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::types::CheckoutSession;

    fn config() -> GatewayConfig {
        GatewayConfig::new("merchant", "secret", "sig")
    }

    #[test]
    fn test_auth_block_order() {
        let request = auth_fields(&config());
        assert_eq!(
            request.keys().collect::<Vec<_>>(),
            vec!["USER", "PWD", "VERSION", "SIGNATURE", "CURRENCYCODE"]
        );
        assert_eq!(request.get("VERSION"), Some("59.0"));
        assert_eq!(request.get("CURRENCYCODE"), Some("EUR"));
    }

    #[test]
    fn test_setup_fields() {
        let options = CheckoutOptions::with_urls("https://shop/ok", "https://shop/cancel");
        let request =
            setup_request(&config(), Decimal::new(1999, 2), PaymentAction::Sale, &options).unwrap();

        assert_eq!(request.get("METHOD"), Some("SetExpressCheckout"));
        assert_eq!(request.get("PAYMENTACTION"), Some("Sale"));
        assert_eq!(request.get("AMT"), Some("19.99"));
        assert_eq!(request.get("RETURNURL"), Some("https://shop/ok"));
        assert_eq!(request.get("CANCELURL"), Some("https://shop/cancel"));
        assert_eq!(request.get("USER"), Some("merchant"));
        assert_eq!(request.len(), 10);
    }

    #[test]
    fn test_setup_missing_urls() {
        let err = setup_request(
            &config(),
            Decimal::from(10),
            PaymentAction::Authorization,
            &CheckoutOptions::new(),
        )
        .unwrap_err();
        assert_eq!(
            err.missing_parameters(),
            Some(&["return_url", "cancel_return_url"][..])
        );

        let err = setup_request(
            &config(),
            Decimal::from(10),
            PaymentAction::Authorization,
            &CheckoutOptions::new().return_url("https://shop/ok"),
        )
        .unwrap_err();
        assert_eq!(err.missing_parameters(), Some(&["cancel_return_url"][..]));
    }

    #[test]
    fn test_do_action_amounts() {
        let options = CheckoutOptions::new().token("EC-1").payer_id("P-1");

        let whole =
            do_action_request(&config(), Decimal::from(10), PaymentAction::Sale, &options).unwrap();
        let fractional =
            do_action_request(&config(), Decimal::new(105, 1), PaymentAction::Sale, &options)
                .unwrap();

        assert_eq!(whole.get("AMT"), Some("10.00"));
        assert_eq!(fractional.get("AMT"), Some("10.50"));
    }

    #[test]
    fn test_do_action_from_session() {
        let options = CheckoutOptions::from_session(CheckoutSession::new("EC-9", "PAYER9"));
        let request = do_action_request(
            &config(),
            Decimal::from(1),
            PaymentAction::Authorization,
            &options,
        )
        .unwrap();

        assert_eq!(request.get("METHOD"), Some("DoExpressCheckoutPayment"));
        assert_eq!(request.get("PAYMENTACTION"), Some("Authorization"));
        assert_eq!(request.get("TOKEN"), Some("EC-9"));
        assert_eq!(request.get("PAYERID"), Some("PAYER9"));
    }

    #[test]
    fn test_do_action_missing_token_and_payer() {
        let err = do_action_request(
            &config(),
            Decimal::from(1),
            PaymentAction::Sale,
            &CheckoutOptions::new(),
        )
        .unwrap_err();
        assert_eq!(err.missing_parameters(), Some(&["token", "payer_id"][..]));

        let err = do_action_request(
            &config(),
            Decimal::from(1),
            PaymentAction::Sale,
            &CheckoutOptions::new().token("EC-1"),
        )
        .unwrap_err();
        assert_eq!(err.missing_parameters(), Some(&["payer_id"][..]));
    }

    #[test]
    fn test_currency_override_keeps_position() {
        let options = CheckoutOptions::with_urls("a", "b").currency(Currency::USD);
        let request =
            setup_request(&config(), Decimal::from(5), PaymentAction::Sale, &options).unwrap();

        assert_eq!(request.get("CURRENCYCODE"), Some("USD"));
        assert_eq!(request.keys().nth(4), Some("CURRENCYCODE"));
    }

    #[test]
    fn test_details_uses_token_verbatim() {
        let request = details_request(&config(), "EC%2D123");
        assert_eq!(request.get("METHOD"), Some("GetExpressCheckoutDetails"));
        assert_eq!(request.get("TOKEN"), Some("EC%2D123"));
        assert!(request.get("PAYERID").is_none());
    }
}
