//! Error types for the notifications domain.

use crate::providers::TransportKind;
use thiserror::Error;

/// Boxed cause carried by [`EmailError::SendFailed`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for notification operations.
pub type EmailResult<T> = Result<T, EmailError>;

/// Errors that can occur while sending an order email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Neither hosted-API nor SMTP credentials are available.
    #[error("No email transport configured")]
    NoTransportConfigured,

    /// The transport call failed (network, auth, invalid address, API rejection).
    #[error("Failed to send email via {transport}: {source}")]
    SendFailed {
        transport: TransportKind,
        #[source]
        source: BoxError,
    },
}

impl EmailError {
    /// Wrap an underlying transport error, keeping it reachable through `source()`.
    pub fn send_failed(transport: TransportKind, source: impl Into<BoxError>) -> Self {
        EmailError::SendFailed {
            transport,
            source: source.into(),
        }
    }

    pub fn is_send_failed(&self) -> bool {
        matches!(self, EmailError::SendFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_send_failed_preserves_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = EmailError::send_failed(TransportKind::Smtp, cause);

        assert!(err.is_send_failed());
        assert_eq!(err.to_string(), "Failed to send email via smtp: refused");

        let source = err.source().expect("cause should be attached");
        let io = source
            .downcast_ref::<std::io::Error>()
            .expect("cause should be the original io::Error");
        assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
    }

    #[test]
    fn test_no_transport_message() {
        let err = EmailError::NoTransportConfigured;
        assert!(!err.is_send_failed());
        assert_eq!(err.to_string(), "No email transport configured");
    }
}
