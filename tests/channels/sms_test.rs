//! SMS adapter stub transport tests.

use courier::channels::sms::{compose_payload, SmsAdapter};
use courier::channels::{ChannelAdapter, ChannelError, Operation, Platform, SendOptions};

#[test]
fn payload_carries_sender_and_recipient() {
    let payload = compose_payload("+15550001111", "+15552223333", "ping");
    assert_eq!(payload["from"], "+15550001111");
    assert_eq!(payload["to"], "+15552223333");
    assert_eq!(payload["body"], "ping");
}

#[tokio::test]
async fn send_returns_synthetic_receipt() {
    let adapter = SmsAdapter::new("key".to_owned(), "+15550001111".to_owned());
    let delivery = adapter
        .send_text("+15552223333", "ping", &SendOptions::default())
        .await
        .expect("stub send should succeed");
    assert_eq!(delivery.platform, Platform::Sms);
    assert_eq!(delivery.body["success"], true);
    assert!(delivery.body["messageId"].is_string());
}

#[tokio::test]
async fn read_receipts_are_unsupported() {
    let adapter = SmsAdapter::new("key".to_owned(), "+15550001111".to_owned());
    let result = adapter.mark_read("msg-1", "").await;
    match result {
        Err(ChannelError::Unsupported { operation, .. }) => {
            assert_eq!(operation, Operation::MarkRead);
        }
        other => panic!("expected unsupported error, got: {other:?}"),
    }
}

#[tokio::test]
async fn media_is_unsupported() {
    let adapter = SmsAdapter::new("key".to_owned(), "+15550001111".to_owned());
    assert!(!adapter.supports_media());
    let result = adapter
        .send_media(
            "+15552223333",
            "https://example.com/i.png",
            None,
            courier::channels::MediaKind::Image,
        )
        .await;
    assert!(matches!(result, Err(ChannelError::Unsupported { .. })));
}
