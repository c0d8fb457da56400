//! Email adapter composition and stub transport tests.

use courier::channels::email::{compose_payload, EmailAdapter, DEFAULT_SUBJECT};
use courier::channels::{ChannelAdapter, ChannelError, Operation, Platform, SendOptions};

#[test]
fn explicit_subject_used_verbatim() {
    let payload = compose_payload("bot@example.com", None, "user@example.com", Some("X"), "body");
    assert_eq!(payload["subject"], "X");
}

#[test]
fn missing_subject_falls_back_to_placeholder() {
    let payload = compose_payload("bot@example.com", None, "user@example.com", None, "body");
    assert_eq!(payload["subject"], DEFAULT_SUBJECT);
    assert_eq!(payload["subject"], "No Subject");
}

#[test]
fn reply_to_included_only_when_configured() {
    let with = compose_payload(
        "bot@example.com",
        Some("support@example.com"),
        "user@example.com",
        None,
        "body",
    );
    assert_eq!(with["replyTo"], "support@example.com");

    let without = compose_payload("bot@example.com", None, "user@example.com", None, "body");
    assert!(without.get("replyTo").is_none());
}

#[tokio::test]
async fn send_returns_synthetic_receipt() {
    let adapter = EmailAdapter::new("bot@example.com".to_owned(), None);
    let options = SendOptions {
        subject: Some("hello".to_owned()),
    };
    let delivery = adapter
        .send_text("user@example.com", "body", &options)
        .await
        .expect("stub send should succeed");
    assert_eq!(delivery.platform, Platform::Email);
    assert_eq!(delivery.body["success"], true);
    assert!(delivery.body["messageId"].is_string());
}

#[tokio::test]
async fn mark_read_acks_by_message_id() {
    let adapter = EmailAdapter::new("bot@example.com".to_owned(), None);
    let delivery = adapter
        .mark_read("msg-1", "")
        .await
        .expect("stub ack should succeed");
    assert_eq!(delivery.body["success"], true);
}

#[tokio::test]
async fn media_is_unsupported() {
    let adapter = EmailAdapter::new("bot@example.com".to_owned(), None);
    let result = adapter
        .send_media(
            "user@example.com",
            "https://example.com/i.png",
            None,
            courier::channels::MediaKind::Image,
        )
        .await;
    match result {
        Err(ChannelError::Unsupported {
            platform, operation, ..
        }) => {
            assert_eq!(platform, Platform::Email);
            assert_eq!(operation, Operation::SendMedia);
        }
        other => panic!("expected unsupported error, got: {other:?}"),
    }
}

#[tokio::test]
async fn listing_is_empty_stub() {
    let adapter = EmailAdapter::new("bot@example.com".to_owned(), None);
    let delivery = adapter
        .list_conversations()
        .await
        .expect("stub listing should succeed");
    assert_eq!(delivery.body["count"], 0);
    assert_eq!(delivery.body["items"], serde_json::json!([]));
}
