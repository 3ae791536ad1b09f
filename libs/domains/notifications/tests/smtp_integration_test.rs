//! Integration tests for the SMTP transport
//!
//! These tests deliver through a real SMTP server (Mailpit via
//! testcontainers) and read the captured message back. They need Docker:
//!
//! ```text
//! cargo test -p domain_notifications --test smtp_integration_test -- --ignored
//! ```

use domain_notifications::*;
use test_utils::{TestDataBuilder, TestMailpit, assertions::*, init_test_tracing};

fn mailpit_config(mailpit: &TestMailpit) -> TransportConfig {
    TransportConfig::new()
        .with_smtp_credentials("shop@example.com", "any-password")
        .with_smtp_server("127.0.0.1", mailpit.smtp_port, false)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_order_email_delivered_over_smtp() {
    init_test_tracing();
    let mailpit = TestMailpit::new().await;
    let builder = TestDataBuilder::from_test_name("order_email_delivered_over_smtp");

    let order = Order::new(
        builder.order_id(),
        vec![
            OrderItem::new("Shirt", "M", 2, 500.0),
            OrderItem::new("Cap", "Free", 1, 199.0),
        ],
        1199.0,
    );
    let user = User::with_email(builder.email("jane"));

    let sender = OrderNotificationSender::new(mailpit_config(&mailpit));
    let result = sender.send_order_email(&order, Some(&user)).await.unwrap();
    assert_eq!(result.transport, TransportKind::Smtp);

    let messages = mailpit.messages().await;
    assert_eq!(messages.len(), 1);
    let captured = &messages[0];
    assert_eq!(
        result.message_id,
        Some(format!("<{}>", captured.message_id))
    );
    assert_eq!(captured.from.address, "shop@example.com");
    assert_eq!(captured.to[0].address, builder.email("jane"));
    assert_eq!(
        captured.subject,
        format!("Order Confirmation - #{}", builder.order_id())
    );

    let html = mailpit.html(&captured.id).await;
    assert_in_order(
        &html,
        &["Shirt (M) x2 - ₹500", "Cap (Free) x1 - ₹199", "Total: ₹1199"],
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_repeated_sends_are_not_deduplicated() {
    init_test_tracing();
    let mailpit = TestMailpit::new().await;
    let builder = TestDataBuilder::from_test_name("repeated_sends");

    let order = Order::new(builder.order_id(), vec![], 0.0);
    let sender = OrderNotificationSender::new(mailpit_config(&mailpit));

    sender.send_order_email(&order, None).await.unwrap();
    sender.send_order_email(&order, None).await.unwrap();

    let messages = mailpit.messages().await;
    assert_eq!(messages.len(), 2);
    let recipient = assert_some(messages[0].to.first(), "recipient");
    // No user email: falls back to the SMTP user.
    assert_eq!(recipient.address, "shop@example.com");
}
