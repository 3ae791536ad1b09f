//! Notifications Domain
//!
//! Sends the order-confirmation email after a storefront purchase.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Order Handler  │  ← Calls send_order_email after checkout
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ OrderNotifSender│  ← Resolves recipient, renders HTML, selects transport
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ ProviderFactory │  ← Builds the provider once, then reuses it
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ Email Provider  │  ← Resend (production) or SMTP (everything else)
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use core_config::FromEnv;
//! use domain_notifications::{OrderNotificationSender, TransportConfig};
//!
//! let sender = OrderNotificationSender::new(TransportConfig::from_env()?);
//!
//! // Errors surface to the caller; whether a failed email fails the
//! // checkout request is the handler's decision.
//! let result = sender.send_order_email(&order, Some(&user)).await?;
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod observer;
pub mod providers;
pub mod service;
pub mod templates;

// Re-export commonly used types
pub use config::{DEFAULT_ADDRESS, TransportConfig};
pub use error::{EmailError, EmailResult};
pub use models::{Order, OrderItem, User};
pub use observer::{SendObserver, TracingObserver};
pub use providers::{
    DefaultProviderFactory, EmailProvider, MailMessage, MailSendResult, ProviderFactory,
    ResendProvider, SmtpProvider, TransportKind,
};
pub use service::OrderNotificationSender;
