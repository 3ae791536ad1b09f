//! Resend email provider implementation.

use super::{EmailProvider, MailMessage, MailSendResult, TransportKind};
use crate::config::TransportConfig;
use crate::error::{EmailError, EmailResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Resend email provider.
#[derive(Clone)]
pub struct ResendProvider {
    client: Client,
    api_key: String,
    api_url: String,
}

/// A non-2xx answer from the Resend API.
#[derive(Debug, Error)]
#[error("Resend API error ({status}): {message}")]
pub struct ResendApiError {
    pub status: StatusCode,
    /// Resend's error name, e.g. "validation_error".
    pub name: Option<String>,
    pub message: String,
}

impl ResendProvider {
    /// Create a provider from the Resend section of the configuration.
    ///
    /// Fails with [`EmailError::NoTransportConfigured`] when no API key is set.
    pub fn new(config: &TransportConfig) -> EmailResult<Self> {
        let api_key = config
            .resend_api_key
            .clone()
            .ok_or(EmailError::NoTransportConfigured)?;

        let client = Client::builder()
            .timeout(config.send_timeout)
            .build()
            .map_err(|e| EmailError::send_failed(TransportKind::Resend, e))?;

        Ok(Self {
            client,
            api_key,
            api_url: config.resend_api_url.trim_end_matches('/').to_string(),
        })
    }
}

// Resend API request/response structures

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    #[serde(default)]
    name: Option<String>,
    message: String,
}

#[async_trait]
impl EmailProvider for ResendProvider {
    async fn send(&self, message: &MailMessage) -> EmailResult<MailSendResult> {
        let request = ResendRequest {
            from: &message.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
        };

        debug!(
            to = %message.to,
            subject = %message.subject,
            "Sending email via Resend"
        );

        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                debug!(to = %message.to, error = %e, "Resend unreachable");
                EmailError::send_failed(TransportKind::Resend, e)
            })?;

        let status = response.status();

        if status.is_success() {
            let body: ResendResponse = response
                .json()
                .await
                .map_err(|e| EmailError::send_failed(TransportKind::Resend, e))?;

            debug!(to = %message.to, message_id = %body.id, "Resend accepted message");

            Ok(MailSendResult {
                transport: TransportKind::Resend,
                message_id: Some(body.id),
            })
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!(
                to = %message.to,
                status = %status,
                error = %error_body,
                "Resend rejected message"
            );

            let api_error = match serde_json::from_str::<ResendErrorBody>(&error_body) {
                Ok(body) => ResendApiError {
                    status,
                    name: body.name,
                    message: body.message,
                },
                Err(_) => ResendApiError {
                    status,
                    name: None,
                    message: error_body,
                },
            };

            Err(EmailError::send_failed(TransportKind::Resend, api_error))
        }
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Resend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::State,
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::post,
    };
    use serde_json::{Value, json};
    use std::error::Error as _;
    use std::sync::{Arc, Mutex};
    use tracing_test::traced_test;

    #[derive(Clone)]
    struct Stub {
        status: AxumStatus,
        reply: Value,
        received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    async fn handle(
        State(stub): State<Stub>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (AxumStatus, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        stub.received.lock().unwrap().push((auth, body));
        (stub.status, Json(stub.reply.clone()))
    }

    /// Serve `POST /emails` on an ephemeral port, answering with `status` and `reply`.
    async fn spawn_stub(status: AxumStatus, reply: Value) -> (String, Stub) {
        let stub = Stub {
            status,
            reply,
            received: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/emails", post(handle))
            .with_state(stub.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), stub)
    }

    fn provider(api_url: &str) -> ResendProvider {
        let config = TransportConfig::new()
            .with_resend_api_key("re_test_key")
            .with_resend_api_url(format!("{}/", api_url));
        ResendProvider::new(&config).unwrap()
    }

    fn message() -> MailMessage {
        MailMessage {
            from: "orders@shop.example".to_string(),
            to: "jane@example.com".to_string(),
            subject: "Order Confirmation - #123".to_string(),
            html: "<p>Shirt (M) x2 - ₹500</p>".to_string(),
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        let err = ResendProvider::new(&TransportConfig::new()).err().unwrap();
        assert!(matches!(err, EmailError::NoTransportConfigured));
    }

    #[tokio::test]
    async fn test_send_posts_message_and_returns_id() {
        let (url, stub) = spawn_stub(AxumStatus::OK, json!({ "id": "49a3999c-0ce1" })).await;

        let result = provider(&url).send(&message()).await.unwrap();

        assert_eq!(result.transport, TransportKind::Resend);
        assert_eq!(result.message_id.as_deref(), Some("49a3999c-0ce1"));

        let received = stub.received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let (auth, body) = &received[0];
        assert_eq!(auth.as_deref(), Some("Bearer re_test_key"));
        assert_eq!(
            body,
            &json!({
                "from": "orders@shop.example",
                "to": ["jane@example.com"],
                "subject": "Order Confirmation - #123",
                "html": "<p>Shirt (M) x2 - ₹500</p>"
            })
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_api_rejection_becomes_send_failed() {
        let (url, _stub) = spawn_stub(
            AxumStatus::UNPROCESSABLE_ENTITY,
            json!({
                "statusCode": 422,
                "name": "validation_error",
                "message": "Invalid `to` field."
            }),
        )
        .await;

        let err = provider(&url).send(&message()).await.unwrap_err();

        assert!(matches!(
            err,
            EmailError::SendFailed { transport: TransportKind::Resend, .. }
        ));
        let api_error = err
            .source()
            .and_then(|s| s.downcast_ref::<ResendApiError>())
            .expect("source should be the API error");
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.name.as_deref(), Some("validation_error"));
        assert_eq!(api_error.message, "Invalid `to` field.");

        assert!(logs_contain("Resend rejected message"));
        logs_assert(|lines: &[&str]| {
            match lines
                .iter()
                .find(|line| line.contains(" ERROR ") || line.contains(" INFO "))
            {
                Some(line) => Err(format!("provider logged above debug: {}", line)),
                None => Ok(()),
            }
        });
    }

    #[tokio::test]
    async fn test_unreachable_api_becomes_send_failed() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = provider(&format!("http://{}", addr))
            .send(&message())
            .await
            .unwrap_err();

        assert!(err.is_send_failed());
        assert!(
            err.source()
                .and_then(|s| s.downcast_ref::<reqwest::Error>())
                .is_some()
        );
    }
}
