//! Hooks for observing send attempts.
//!
//! The sender reports through a [`SendObserver`] instead of logging
//! directly, so callers can route events wherever they like. The default
//! [`TracingObserver`] turns them into `tracing` events.

use crate::error::EmailError;
use crate::providers::{MailMessage, MailSendResult, TransportKind};
use tracing::{debug, error, info};

/// Receives one callback per stage of a send.
pub trait SendObserver: Send + Sync {
    /// A transport was selected and the message is about to go out.
    fn on_attempt(&self, transport: TransportKind, message: &MailMessage);

    fn on_sent(&self, message: &MailMessage, result: &MailSendResult);

    /// Called for configuration failures as well as transport failures.
    fn on_failed(&self, message: &MailMessage, error: &EmailError);
}

/// Emits structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SendObserver for TracingObserver {
    fn on_attempt(&self, transport: TransportKind, message: &MailMessage) {
        debug!(
            transport = %transport,
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            "Sending order email"
        );
    }

    fn on_sent(&self, message: &MailMessage, result: &MailSendResult) {
        info!(
            transport = %result.transport,
            to = %message.to,
            message_id = ?result.message_id,
            "Order email sent"
        );
    }

    fn on_failed(&self, message: &MailMessage, error: &EmailError) {
        error!(to = %message.to, error = %error, "Order email failed");
    }
}
