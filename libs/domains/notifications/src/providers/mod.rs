//! Email provider implementations.
//!
//! This module contains the `EmailProvider` trait, its SMTP and Resend
//! implementations, and the factory that picks between them.

mod resend;
mod smtp;

pub use resend::{ResendApiError, ResendProvider};
pub use smtp::SmtpProvider;

use crate::config::TransportConfig;
use crate::error::EmailResult;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// The mechanism used to deliver a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportKind {
    /// Direct relay through an SMTP server (Gmail by default).
    Smtp,
    /// Resend's hosted HTTP API.
    Resend,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Smtp => write!(f, "smtp"),
            TransportKind::Resend => write!(f, "resend"),
        }
    }
}

/// A fully addressed message, built fresh for every send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// What the transport handed back for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSendResult {
    pub transport: TransportKind,
    /// SMTP message id or Resend record id, when the transport reports one.
    pub message_id: Option<String>,
}

/// Trait for email sending providers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send one message. Exactly one outbound call, no retries.
    async fn send(&self, message: &MailMessage) -> EmailResult<MailSendResult>;

    fn kind(&self) -> TransportKind;
}

/// Builds the provider for a selected transport.
#[cfg_attr(test, mockall::automock)]
pub trait ProviderFactory: Send + Sync {
    fn build(
        &self,
        kind: TransportKind,
        config: &TransportConfig,
    ) -> EmailResult<Arc<dyn EmailProvider>>;
}

/// Builds the real lettre and reqwest backed providers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProviderFactory;

impl ProviderFactory for DefaultProviderFactory {
    fn build(
        &self,
        kind: TransportKind,
        config: &TransportConfig,
    ) -> EmailResult<Arc<dyn EmailProvider>> {
        let provider: Arc<dyn EmailProvider> = match kind {
            TransportKind::Smtp => Arc::new(SmtpProvider::new(config)?),
            TransportKind::Resend => Arc::new(ResendProvider::new(config)?),
        };
        Ok(provider)
    }
}
