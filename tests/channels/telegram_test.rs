//! Telegram Bot API wire format and media routing tests.

use courier::channels::telegram::{build_media_payload, build_text_payload, media_method};
use courier::channels::MediaKind;
use serde_json::json;

#[test]
fn text_envelope_exact_shape() {
    let payload = build_text_payload("42", "<b>hi</b>");
    assert_eq!(
        payload,
        json!({
            "chat_id": "42",
            "text": "<b>hi</b>",
            "parse_mode": "HTML",
        })
    );
}

#[test]
fn image_kind_routes_to_send_photo() {
    assert_eq!(media_method(MediaKind::Image), "sendPhoto");
    assert_eq!(media_method(MediaKind::from_label("image")), "sendPhoto");
}

#[test]
fn non_image_kinds_route_to_send_document() {
    assert_eq!(media_method(MediaKind::Document), "sendDocument");
    assert_eq!(media_method(MediaKind::from_label("video")), "sendDocument");
    assert_eq!(media_method(MediaKind::from_label("document")), "sendDocument");
}

#[test]
fn photo_payload_uses_photo_key() {
    let payload = build_media_payload("42", "https://example.com/p.png", Some("cap"), MediaKind::Image);
    assert_eq!(payload["photo"], "https://example.com/p.png");
    assert_eq!(payload["caption"], "cap");
    assert!(payload.get("document").is_none());
}

#[test]
fn document_payload_uses_document_key() {
    let payload = build_media_payload("42", "https://example.com/d.pdf", None, MediaKind::Document);
    assert_eq!(payload["document"], "https://example.com/d.pdf");
    assert!(payload.get("photo").is_none());
    assert!(payload.get("caption").is_none());
}
