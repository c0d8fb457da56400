//! WhatsApp Cloud API wire format tests.

use courier::channels::whatsapp::{build_media_payload, build_read_payload, build_text_payload};
use courier::channels::MediaKind;
use serde_json::json;

#[test]
fn text_envelope_exact_shape() {
    let payload = build_text_payload("15551234567", "hello");
    assert_eq!(
        payload,
        json!({
            "messaging_product": "whatsapp",
            "recipient_type": "individual",
            "to": "15551234567",
            "type": "text",
            "text": { "body": "hello" },
        })
    );
}

#[test]
fn image_envelope_keys_media_object_by_type() {
    let payload = build_media_payload(
        "15551234567",
        "https://example.com/pic.png",
        Some("a caption"),
        MediaKind::Image,
    );
    assert_eq!(payload["type"], "image");
    assert_eq!(payload["image"]["link"], "https://example.com/pic.png");
    assert_eq!(payload["image"]["caption"], "a caption");
    assert!(payload.get("document").is_none());
}

#[test]
fn document_envelope_keys_media_object_by_type() {
    let payload = build_media_payload(
        "15551234567",
        "https://example.com/contract.pdf",
        None,
        MediaKind::Document,
    );
    assert_eq!(payload["type"], "document");
    assert_eq!(payload["document"]["link"], "https://example.com/contract.pdf");
    assert!(payload["document"].get("caption").is_none());
    assert!(payload.get("image").is_none());
}

#[test]
fn read_envelope_is_status_update() {
    let payload = build_read_payload("wamid.abc123");
    assert_eq!(
        payload,
        json!({
            "messaging_product": "whatsapp",
            "status": "read",
            "message_id": "wamid.abc123",
        })
    );
}
