//! Response classification
//!
//! Collapses a decoded NVP response into the uniform [`Response`] every
//! operation returns. The rules:
//!
//! - success iff `ACK` is one of [`SUCCESS_CODES`]
//! - authorization is the first present of [`AUTHORIZATION_FIELDS`]
//! - message is the first non-empty of [`MESSAGE_FIELDS`]
//! - fraud review iff the first error code is [`FRAUD_REVIEW_CODE`]
//! - AVS and CVV results are carried when the provider sends them

use crate::nvp::{NvpResponse, fields};
use serde::Serialize;

/// Acknowledgement values that count as success
pub const SUCCESS_CODES: [&str; 2] = ["Success", "SuccessWithWarning"];

/// Acknowledgement value that triggers a diagnostic
pub const FAILURE: &str = "Failure";

/// Payment status of a payment held for review
pub const PENDING: &str = "Pending";

/// First error code the provider uses for payments under fraud review
pub const FRAUD_REVIEW_CODE: &str = "11610";

/// Authorization reference candidates, in priority order
pub const AUTHORIZATION_FIELDS: [&str; 3] = [
    fields::TRANSACTIONID,
    fields::AUTHORIZATIONID,
    fields::REFUNDTRANSACTIONID,
];

/// Message candidates, in priority order
pub const MESSAGE_FIELDS: [&str; 2] = [fields::L_LONGMESSAGE0, fields::ACK];

/// Message used when neither a long message nor an acknowledgement came back
pub const NO_ACK_MESSAGE: &str = "No acknowledgement received";

/// Address verification result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvsResult {
    /// Raw AVS code
    pub code: String,
}

/// Classification outputs attached to every response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseOptions {
    /// Gateway was built against the sandbox endpoint
    pub test: bool,
    /// Transaction, authorization or refund id
    pub authorization: Option<String>,
    /// Payment is held for fraud review
    pub fraud_review: bool,
    /// Address verification result
    pub avs_result: Option<AvsResult>,
    /// Card verification result
    pub cvv_result: Option<String>,
}

/// One `L_*n` error group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderError {
    /// Error code
    pub code: String,
    /// Short message
    pub short_message: Option<String>,
    /// Long message
    pub long_message: Option<String>,
    /// Severity (`Error` or `Warning`)
    pub severity: Option<String>,
}

/// Normalized result of one provider round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    success: bool,
    message: String,
    params: NvpResponse,
    options: ResponseOptions,
}

impl Response {
    /// Package classification outputs
    pub fn new(
        success: bool,
        message: impl Into<String>,
        params: NvpResponse,
        options: ResponseOptions,
    ) -> Self {
        Self {
            success,
            message: message.into(),
            params,
            options,
        }
    }

    /// Classify a decoded response
    pub fn from_nvp(params: NvpResponse, test: bool) -> Self {
        let options = ResponseOptions {
            test,
            authorization: authorization_from(&params).map(str::to_string),
            fraud_review: fraud_review(&params),
            avs_result: params.get(fields::AVSCODE).map(|code| AvsResult {
                code: code.to_string(),
            }),
            cvv_result: params.get(fields::CVV2CODE).map(str::to_string),
        };

        let success = successful(&params);
        let message = message_from(&params).to_string();
        Self::new(success, message, params, options)
    }

    /// Provider acknowledged success
    pub fn success(&self) -> bool {
        self.success
    }

    /// Long message or acknowledgement, never empty
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raw decoded fields
    pub fn params(&self) -> &NvpResponse {
        &self.params
    }

    /// Classification outputs
    pub fn options(&self) -> &ResponseOptions {
        &self.options
    }

    /// Gateway was in test mode
    pub fn test(&self) -> bool {
        self.options.test
    }

    /// Transaction reference
    pub fn authorization(&self) -> Option<&str> {
        self.options.authorization.as_deref()
    }

    /// Held for fraud review
    pub fn fraud_review(&self) -> bool {
        self.options.fraud_review
    }

    /// AVS result
    pub fn avs_result(&self) -> Option<&AvsResult> {
        self.options.avs_result.as_ref()
    }

    /// CVV result
    pub fn cvv_result(&self) -> Option<&str> {
        self.options.cvv_result.as_deref()
    }

    /// Raw acknowledgement
    pub fn ack(&self) -> Option<&str> {
        self.params.get(fields::ACK)
    }

    /// Checkout token, returned by setup and details calls
    pub fn token(&self) -> Option<&str> {
        self.params.get(fields::TOKEN)
    }

    /// Payer id, returned by the details call
    pub fn payer_id(&self) -> Option<&str> {
        self.params.get(fields::PAYERID)
    }

    /// Provider correlation id, for support requests
    pub fn correlation_id(&self) -> Option<&str> {
        self.params.get(fields::CORRELATIONID)
    }

    /// Payment is pending on the provider side
    pub fn is_pending(&self) -> bool {
        self.params.get(fields::PAYMENTSTATUS) == Some(PENDING)
    }

    /// All error groups, in index order
    pub fn errors(&self) -> Vec<ProviderError> {
        (0..)
            .map_while(|i| {
                let code = self.params.get(&fields::indexed(fields::L_ERRORCODE, i))?;
                let field = |prefix: &str| {
                    self.params
                        .get(&fields::indexed(prefix, i))
                        .map(str::to_string)
                };
                Some(ProviderError {
                    code: code.to_string(),
                    short_message: field(fields::L_SHORTMESSAGE),
                    long_message: field(fields::L_LONGMESSAGE),
                    severity: field(fields::L_SEVERITYCODE),
                })
            })
            .collect()
    }
}

/// `ACK` is one of [`SUCCESS_CODES`]
pub fn successful(params: &NvpResponse) -> bool {
    params
        .get(fields::ACK)
        .is_some_and(|ack| SUCCESS_CODES.contains(&ack))
}

/// First present of [`AUTHORIZATION_FIELDS`]
pub fn authorization_from(params: &NvpResponse) -> Option<&str> {
    params.first_of(&AUTHORIZATION_FIELDS)
}

/// First error code equals [`FRAUD_REVIEW_CODE`]
pub fn fraud_review(params: &NvpResponse) -> bool {
    params.get(fields::L_ERRORCODE0) == Some(FRAUD_REVIEW_CODE)
}

/// First non-empty of [`MESSAGE_FIELDS`], else [`NO_ACK_MESSAGE`]
pub fn message_from(params: &NvpResponse) -> &str {
    MESSAGE_FIELDS
        .iter()
        .filter_map(|key| params.get(key))
        .find(|value| !value.trim().is_empty())
        .unwrap_or(NO_ACK_MESSAGE)
}

/// Diagnostic line for a `Failure` acknowledgement, `None` otherwise
pub fn failure_diagnostic(params: &NvpResponse) -> Option<String> {
    if params.get(fields::ACK) != Some(FAILURE) {
        return None;
    }

    let field = |key: &str| params.get(key).unwrap_or_default();
    Some(format!(
        "Error code ({})\n {}.\n Reason: {}",
        field(fields::L_ERRORCODE0),
        field(fields::L_SHORTMESSAGE0),
        field(fields::L_LONGMESSAGE0)
    ))
}
