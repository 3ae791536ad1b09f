//! Order notification service.

use crate::config::{DEFAULT_ADDRESS, TransportConfig};
use crate::error::EmailResult;
use crate::models::{Order, User};
use crate::observer::{SendObserver, TracingObserver};
use crate::providers::{
    DefaultProviderFactory, EmailProvider, MailMessage, MailSendResult, ProviderFactory,
};
use crate::templates;
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::instrument;

/// Sends order confirmation emails through the configured transport.
///
/// The provider is built on first use and shared by every later call, so one
/// sender can serve concurrent requests. A call never retries and never
/// falls back to another transport; errors go straight to the caller.
pub struct OrderNotificationSender {
    config: Arc<TransportConfig>,
    factory: Arc<dyn ProviderFactory>,
    provider: OnceCell<Arc<dyn EmailProvider>>,
    observer: Arc<dyn SendObserver>,
}

impl OrderNotificationSender {
    /// Create a sender backed by the real SMTP and Resend providers.
    pub fn new(config: TransportConfig) -> Self {
        Self::with_factory(config, DefaultProviderFactory)
    }

    /// Create a sender with a custom provider factory.
    pub fn with_factory(config: TransportConfig, factory: impl ProviderFactory + 'static) -> Self {
        Self {
            config: Arc::new(config),
            factory: Arc::new(factory),
            provider: OnceCell::new(),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the default tracing observer.
    pub fn with_observer(mut self, observer: impl SendObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// User email, else the configured default address, else [`DEFAULT_ADDRESS`].
    pub fn resolve_recipient(&self, user: Option<&User>) -> String {
        user.and_then(User::email)
            .or_else(|| self.config.default_address())
            .unwrap_or(DEFAULT_ADDRESS)
            .to_string()
    }

    /// Build the confirmation message, dating undated orders with the current time.
    pub fn build_message(&self, order: &Order, user: Option<&User>) -> MailMessage {
        self.build_message_at(order, user, Utc::now())
    }

    fn build_message_at(&self, order: &Order, user: Option<&User>, now: DateTime<Utc>) -> MailMessage {
        MailMessage {
            from: self.config.sender_address().to_string(),
            to: self.resolve_recipient(user),
            subject: templates::order_subject(&order.id),
            html: templates::render_order_confirmation(order, now),
        }
    }

    /// Send the confirmation for `order`.
    ///
    /// Performs exactly one outbound call to the selected transport. Fails
    /// with `NoTransportConfigured` before touching the network when no
    /// credentials are available, or `SendFailed` when the transport errors.
    #[instrument(skip_all, fields(order_id = %order.id))]
    pub async fn send_order_email(
        &self,
        order: &Order,
        user: Option<&User>,
    ) -> EmailResult<MailSendResult> {
        let message = self.build_message(order, user);

        let provider = match self.provider() {
            Ok(provider) => provider,
            Err(err) => {
                self.observer.on_failed(&message, &err);
                return Err(err);
            }
        };

        self.observer.on_attempt(provider.kind(), &message);

        match provider.send(&message).await {
            Ok(result) => {
                self.observer.on_sent(&message, &result);
                Ok(result)
            }
            Err(err) => {
                self.observer.on_failed(&message, &err);
                Err(err)
            }
        }
    }

    fn provider(&self) -> EmailResult<Arc<dyn EmailProvider>> {
        let kind = self.config.select_transport()?;
        self.provider
            .get_or_try_init(|| self.factory.build(kind, &self.config))
            .cloned()
    }
}
