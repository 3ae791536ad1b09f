//! Mailpit test infrastructure
//!
//! Provides a `TestMailpit` helper that runs a Mailpit SMTP capture server
//! and reads back what it received over its HTTP API.

use serde::Deserialize;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

const SMTP_PORT: u16 = 1025;
const HTTP_PORT: u16 = 8025;

/// A captured message as listed by `GET /api/v1/messages`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MailpitMessage {
    #[serde(rename = "ID")]
    pub id: String,
    /// `Message-ID` header without the angle brackets.
    #[serde(rename = "MessageID")]
    pub message_id: String,
    pub from: MailpitAddress,
    pub to: Vec<MailpitAddress>,
    pub subject: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MailpitAddress {
    pub address: String,
}

#[derive(Debug, Deserialize)]
struct MessageList {
    messages: Vec<MailpitMessage>,
}

/// Test Mailpit wrapper that ensures proper cleanup
///
/// Accepts any SMTP credentials over plaintext, so the SMTP provider can
/// run its authenticated path against it with TLS disabled.
pub struct TestMailpit {
    #[allow(dead_code)]
    container: ContainerAsync<GenericImage>,
    pub smtp_port: u16,
    pub api_url: String,
}

impl TestMailpit {
    /// Start a Mailpit container
    pub async fn new() -> Self {
        let container = GenericImage::new("axllent/mailpit", "v1.21")
            .with_exposed_port(SMTP_PORT.tcp())
            .with_exposed_port(HTTP_PORT.tcp())
            .with_wait_for(WaitFor::message_on_either_std("accessible via"))
            .with_env_var("MP_SMTP_AUTH_ACCEPT_ANY", "true")
            .with_env_var("MP_SMTP_AUTH_ALLOW_INSECURE", "true")
            .start()
            .await
            .expect("Failed to start Mailpit container");

        let smtp_port = container
            .get_host_port_ipv4(SMTP_PORT)
            .await
            .expect("Failed to get Mailpit SMTP port");
        let http_port = container
            .get_host_port_ipv4(HTTP_PORT)
            .await
            .expect("Failed to get Mailpit HTTP port");

        tracing::info!(smtp_port, http_port, "Test Mailpit ready");

        Self {
            container,
            smtp_port,
            api_url: format!("http://127.0.0.1:{}", http_port),
        }
    }

    /// Messages captured so far, newest first.
    pub async fn messages(&self) -> Vec<MailpitMessage> {
        self.fetch::<MessageList>("/api/v1/messages").await.messages
    }

    /// Raw HTML body of a captured message.
    pub async fn html(&self, id: &str) -> String {
        #[derive(Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct Detail {
            #[serde(rename = "HTML")]
            html: String,
        }

        self.fetch::<Detail>(&format!("/api/v1/message/{}", id))
            .await
            .html
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, path: &str) -> T {
        reqwest::get(format!("{}{}", self.api_url, path))
            .await
            .expect("Failed to reach Mailpit API")
            .error_for_status()
            .expect("Mailpit API returned an error")
            .json()
            .await
            .expect("Failed to decode Mailpit response")
    }
}

// Container is automatically cleaned up when TestMailpit is dropped
impl Drop for TestMailpit {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test Mailpit container");
    }
}
