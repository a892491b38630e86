//! Gateway configuration
//!
//! Credentials, API version, default currency and the test/live switch.
//! Build it in code:
//!
//! ```rust
//! use armature_express_checkout::{Currency, GatewayConfig, Mode};
//!
//! let config = GatewayConfig::new("merchant_api1.example.com", "secret", "signature")
//!     .currency(Currency::USD)
//!     .mode(Mode::Live);
//! assert_eq!(config.mode, Mode::Live);
//! ```
//!
//! or load it from `ARMATURE_CHECKOUT_*` environment variables with
//! [`GatewayConfig::from_env`].

use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Currency;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Default NVP API version
pub const DEFAULT_VERSION: &str = "59.0";

/// Environment variable prefix used by [`GatewayConfig::from_env`]
pub const ENV_PREFIX: &str = "ARMATURE_CHECKOUT_";

/// Which provider environment the gateway talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Sandbox endpoint
    #[default]
    Test,
    /// Production endpoint
    Live,
}

impl Mode {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "test" | "sandbox" => Some(Self::Test),
            "live" | "production" => Some(Self::Live),
            _ => None,
        }
    }

    /// NVP API endpoint
    pub fn api_url(&self) -> &'static str {
        match self {
            Self::Test => "https://api-3t.sandbox.paypal.com/nvp",
            Self::Live => "https://api-3t.paypal.com/nvp",
        }
    }

    /// Hosted checkout page, the token is appended verbatim
    pub fn redirect_url(&self) -> &'static str {
        match self {
            Self::Test => {
                "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token="
            }
            Self::Live => "https://www.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=",
        }
    }

    /// Is sandbox mode
    pub fn is_test(&self) -> bool {
        matches!(self, Self::Test)
    }
}

/// API credentials
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// API username
    pub login: String,
    /// API password
    pub password: SecretString,
    /// API signature
    pub signature: SecretString,
}

impl Credentials {
    /// Create credentials
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            password: SecretString::new(password.into().into()),
            signature: SecretString::new(signature.into().into()),
        }
    }

    /// Check that no credential is blank
    pub fn validate(&self) -> CheckoutResult<()> {
        let mut missing = Vec::new();
        if self.login.trim().is_empty() {
            missing.push("login");
        }
        if self.password.expose_secret().trim().is_empty() {
            missing.push("password");
        }
        if self.signature.expose_secret().trim().is_empty() {
            missing.push("signature");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::Configuration(format!(
                "missing required credential(s): {}",
                missing.join(", ")
            )))
        }
    }
}

/// HTTP transport settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Total request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Connection timeout
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("armature-express-checkout/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Express checkout gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// API credentials
    #[serde(flatten)]
    pub credentials: Credentials,
    /// NVP API version
    #[serde(default = "default_version")]
    pub version: String,
    /// Currency sent with every request unless overridden per call
    #[serde(default)]
    pub currency: Currency,
    /// Test or live endpoint
    #[serde(default)]
    pub mode: Mode,
    /// HTTP transport settings
    #[serde(default)]
    pub transport: TransportConfig,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

impl GatewayConfig {
    /// Create a sandbox configuration with default version and currency
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Credentials::new(login, password, signature),
            version: default_version(),
            currency: Currency::default(),
            mode: Mode::default(),
            transport: TransportConfig::default(),
        }
    }

    /// Set API version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set default currency
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set mode
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Use production environment
    pub fn production(self) -> Self {
        self.mode(Mode::Live)
    }

    /// Set transport settings
    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Validate credentials and version
    pub fn validate(&self) -> CheckoutResult<()> {
        self.credentials.validate()?;
        if self.version.trim().is_empty() {
            return Err(CheckoutError::Configuration(
                "API version must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Load configuration from `ARMATURE_CHECKOUT_*` environment variables.
    ///
    /// `LOGIN`, `PASSWORD` and `SIGNATURE` are required; `VERSION`,
    /// `CURRENCY`, `MODE` and `TIMEOUT_SECS` are optional.
    pub fn from_env() -> CheckoutResult<Self> {
        let var = |name: &str| {
            env::var(format!("{}{}", ENV_PREFIX, name))
                .ok()
                .filter(|v| !v.trim().is_empty())
        };

        let login = var("LOGIN");
        let password = var("PASSWORD");
        let signature = var("SIGNATURE");

        let (login, password, signature) = match (login, password, signature) {
            (Some(l), Some(p), Some(s)) => (l, p, s),
            (l, p, s) => {
                let missing: Vec<String> = [("LOGIN", l), ("PASSWORD", p), ("SIGNATURE", s)]
                    .into_iter()
                    .filter(|(_, v)| v.is_none())
                    .map(|(k, _)| format!("{}{}", ENV_PREFIX, k))
                    .collect();
                return Err(CheckoutError::Configuration(format!(
                    "missing environment variable(s): {}",
                    missing.join(", ")
                )));
            }
        };

        let mut config = Self::new(login, password, signature);

        if let Some(version) = var("VERSION") {
            config.version = version;
        }

        if let Some(code) = var("CURRENCY") {
            config.currency = Currency::from_code(&code).ok_or_else(|| {
                CheckoutError::Configuration(format!("unsupported currency: {}", code))
            })?;
        }

        if let Some(mode) = var("MODE") {
            config.mode = Mode::from_str(&mode)
                .ok_or_else(|| CheckoutError::Configuration(format!("unknown mode: {}", mode)))?;
        }

        if let Some(secs) = var("TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                CheckoutError::Configuration(format!("invalid timeout: {}", secs))
            })?;
            config.transport.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::new("user", "pwd", "sig");
        assert_eq!(config.version, "59.0");
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.mode, Mode::Test);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GatewayConfig::new("user", "pwd", "sig")
            .version("204.0")
            .currency(Currency::USD)
            .production();

        assert_eq!(config.version, "204.0");
        assert_eq!(config.currency, Currency::USD);
        assert!(!config.mode.is_test());
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let err = GatewayConfig::new("user", "", " ").validate().unwrap_err();
        match err {
            CheckoutError::Configuration(msg) => {
                assert!(msg.contains("password"));
                assert!(msg.contains("signature"));
                assert!(!msg.contains("login"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_secrets_redacted_in_debug() {
        let config = GatewayConfig::new("user", "hunter2", "sig-abc");
        let debug = format!("{:?}", config);
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("sig-abc"));
    }

    #[test]
    fn test_mode_urls() {
        assert_eq!(Mode::Test.api_url(), "https://api-3t.sandbox.paypal.com/nvp");
        assert_eq!(Mode::Live.api_url(), "https://api-3t.paypal.com/nvp");
        assert!(Mode::Test.redirect_url().ends_with("token="));
        assert_eq!(Mode::from_str("LIVE"), Some(Mode::Live));
        assert_eq!(Mode::from_str("sandbox"), Some(Mode::Test));
        assert_eq!(Mode::from_str("staging"), None);
    }

    #[test]
    fn test_deserialize() {
        let config: GatewayConfig = serde_json::from_str(
            r#"{"login":"user","password":"pwd","signature":"sig","currency":"USD","mode":"live"}"#,
        )
        .unwrap();

        assert_eq!(config.credentials.login, "user");
        assert_eq!(config.version, "59.0");
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.mode, Mode::Live);
        assert_eq!(config.transport.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_from_env() {
        unsafe {
            env::set_var("ARMATURE_CHECKOUT_LOGIN", "env-user");
            env::set_var("ARMATURE_CHECKOUT_PASSWORD", "env-pwd");
            env::set_var("ARMATURE_CHECKOUT_SIGNATURE", "env-sig");
            env::set_var("ARMATURE_CHECKOUT_CURRENCY", "gbp");
            env::set_var("ARMATURE_CHECKOUT_MODE", "live");
            env::set_var("ARMATURE_CHECKOUT_TIMEOUT_SECS", "5");
        }

        let config = GatewayConfig::from_env().unwrap();
        assert_eq!(config.credentials.login, "env-user");
        assert_eq!(config.credentials.password.expose_secret(), "env-pwd");
        assert_eq!(config.currency, Currency::GBP);
        assert_eq!(config.mode, Mode::Live);
        assert_eq!(config.transport.timeout, Duration::from_secs(5));

        unsafe {
            env::remove_var("ARMATURE_CHECKOUT_SIGNATURE");
        }

        let err = GatewayConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("ARMATURE_CHECKOUT_SIGNATURE"));

        unsafe {
            env::remove_var("ARMATURE_CHECKOUT_LOGIN");
            env::remove_var("ARMATURE_CHECKOUT_PASSWORD");
            env::remove_var("ARMATURE_CHECKOUT_CURRENCY");
            env::remove_var("ARMATURE_CHECKOUT_MODE");
            env::remove_var("ARMATURE_CHECKOUT_TIMEOUT_SECS");
        }
    }
}
