//! Transport configuration.
//!
//! Everything the sender needs to pick and authenticate a transport is held
//! in [`TransportConfig`], built once (usually via [`FromEnv`]) and passed
//! into the sender at construction.

use crate::error::{EmailError, EmailResult};
use crate::providers::TransportKind;
use core_config::{ConfigError, Environment, FromEnv, env_flag, env_optional, env_parse_or};
use std::fmt;
use std::time::Duration;

/// Used as sender, and as recipient of last resort, when nothing is configured.
pub const DEFAULT_ADDRESS: &str = "no-reply@example.com";

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 465;
const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";
const DEFAULT_SEND_TIMEOUT_SECS: u64 = 30;

/// Credentials and endpoints for the available mail transports.
#[derive(Clone)]
pub struct TransportConfig {
    /// Production selects the hosted API when an API key is present.
    pub environment: Environment,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Implicit TLS relay. Disable only for local capture servers like Mailpit.
    pub smtp_use_tls: bool,
    /// Explicit sender address; falls back to `smtp_user`.
    pub from_address: Option<String>,
    pub resend_api_key: Option<String>,
    pub resend_api_url: String,
    /// Upper bound on a single outbound send.
    pub send_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            smtp_user: None,
            smtp_password: None,
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            smtp_use_tls: true,
            from_address: None,
            resend_api_key: None,
            resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
            send_timeout: Duration::from_secs(DEFAULT_SEND_TIMEOUT_SECS),
        }
    }
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into().trim().to_string();
    (!value.is_empty()).then_some(value)
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_smtp_credentials(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.smtp_user = non_blank(user);
        self.smtp_password = non_blank(password);
        self
    }

    pub fn with_smtp_server(mut self, host: impl Into<String>, port: u16, use_tls: bool) -> Self {
        self.smtp_host = host.into();
        self.smtp_port = port;
        self.smtp_use_tls = use_tls;
        self
    }

    pub fn with_from_address(mut self, from_address: impl Into<String>) -> Self {
        self.from_address = non_blank(from_address);
        self
    }

    pub fn with_resend_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.resend_api_key = non_blank(api_key);
        self
    }

    pub fn with_resend_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.resend_api_url = api_url.into();
        self
    }

    pub fn with_send_timeout(mut self, send_timeout: Duration) -> Self {
        self.send_timeout = send_timeout;
        self
    }

    /// SMTP user and password, only when both are present.
    pub fn smtp_credentials(&self) -> Option<(&str, &str)> {
        match (&self.smtp_user, &self.smtp_password) {
            (Some(user), Some(password)) => Some((user.as_str(), password.as_str())),
            _ => None,
        }
    }

    /// Configured address used when the user has none: explicit sender, else SMTP user.
    pub fn default_address(&self) -> Option<&str> {
        self.from_address.as_deref().or(self.smtp_user.as_deref())
    }

    /// The `From` address for outgoing mail.
    pub fn sender_address(&self) -> &str {
        self.default_address().unwrap_or(DEFAULT_ADDRESS)
    }

    /// Pick the transport for this configuration.
    ///
    /// Resend needs production mode and an API key; SMTP needs user and
    /// password. Anything else is [`EmailError::NoTransportConfigured`].
    pub fn select_transport(&self) -> EmailResult<TransportKind> {
        if self.environment.is_production() && self.resend_api_key.is_some() {
            Ok(TransportKind::Resend)
        } else if self.smtp_credentials().is_some() {
            Ok(TransportKind::Smtp)
        } else {
            Err(EmailError::NoTransportConfigured)
        }
    }
}

impl FromEnv for TransportConfig {
    /// Reads:
    /// - APP_ENV: "production" enables the hosted API
    /// - EMAIL_USER / EMAIL_PASS: SMTP credentials
    /// - EMAIL_FROM: sender address (defaults to EMAIL_USER)
    /// - SMTP_HOST / SMTP_PORT / SMTP_USE_TLS: defaults to Gmail over implicit TLS
    /// - RESEND_API_KEY / RESEND_API_URL
    /// - EMAIL_SEND_TIMEOUT_SECS: defaults to 30
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            smtp_user: env_optional("EMAIL_USER"),
            smtp_password: env_optional("EMAIL_PASS"),
            smtp_host: env_optional("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            smtp_port: env_parse_or("SMTP_PORT", DEFAULT_SMTP_PORT)?,
            smtp_use_tls: env_flag("SMTP_USE_TLS", true),
            from_address: env_optional("EMAIL_FROM"),
            resend_api_key: env_optional("RESEND_API_KEY"),
            resend_api_url: env_optional("RESEND_API_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_string()),
            send_timeout: Duration::from_secs(env_parse_or(
                "EMAIL_SEND_TIMEOUT_SECS",
                DEFAULT_SEND_TIMEOUT_SECS,
            )?),
        })
    }
}

// Secrets never reach logs.
impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| "<redacted>");
        f.debug_struct("TransportConfig")
            .field("environment", &self.environment)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_password", &redact(&self.smtp_password))
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_use_tls", &self.smtp_use_tls)
            .field("from_address", &self.from_address)
            .field("resend_api_key", &redact(&self.resend_api_key))
            .field("resend_api_url", &self.resend_api_url)
            .field("send_timeout", &self.send_timeout)
            .finish()
    }
}
