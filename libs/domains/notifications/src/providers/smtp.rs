//! SMTP email provider implementation using lettre.
//!
//! Production-style relays (Gmail) use implicit TLS. Plaintext is only for
//! local capture servers such as Mailpit.

use super::{EmailProvider, MailMessage, MailSendResult, TransportKind};
use crate::config::TransportConfig;
use crate::error::{EmailError, EmailResult};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::debug;

/// SMTP email provider.
pub struct SmtpProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
    port: u16,
}

impl SmtpProvider {
    /// Create a provider from the SMTP section of the configuration.
    ///
    /// Fails with [`EmailError::NoTransportConfigured`] when user or password is missing.
    pub fn new(config: &TransportConfig) -> EmailResult<Self> {
        let (user, password) = config
            .smtp_credentials()
            .ok_or(EmailError::NoTransportConfigured)?;
        let credentials = Credentials::new(user.to_string(), password.to_string());

        let transport = if config.smtp_use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| EmailError::send_failed(TransportKind::Smtp, e))?
                .port(config.smtp_port)
                .credentials(credentials)
                .timeout(Some(config.send_timeout))
                .build()
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .credentials(credentials)
                .timeout(Some(config.send_timeout))
                .build()
        };

        Ok(Self {
            transport,
            host: config.smtp_host.clone(),
            port: config.smtp_port,
        })
    }

    /// Build a single-part HTML lettre message with a fresh `Message-ID`.
    fn build_message(message: &MailMessage) -> EmailResult<Message> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|e| EmailError::send_failed(TransportKind::Smtp, e))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| EmailError::send_failed(TransportKind::Smtp, e))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&message.subject)
            .message_id(None)
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())
            .map_err(|e| EmailError::send_failed(TransportKind::Smtp, e))
    }
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send(&self, message: &MailMessage) -> EmailResult<MailSendResult> {
        debug!(
            to = %message.to,
            subject = %message.subject,
            host = %self.host,
            port = %self.port,
            "Sending email via SMTP"
        );

        let email = Self::build_message(message)?;
        let message_id = email.headers().get_raw("Message-ID").map(str::to_string);

        let response = self.transport.send(email).await.map_err(|e| {
            debug!(to = %message.to, error = %e, "SMTP send rejected");
            EmailError::send_failed(TransportKind::Smtp, e)
        })?;

        debug!(
            to = %message.to,
            message_id = ?message_id,
            reply = ?response.message().next(),
            "SMTP server accepted message"
        );

        Ok(MailSendResult {
            transport: TransportKind::Smtp,
            message_id,
        })
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Smtp
    }
}
