//! Platform identifier and media kind parsing tests.

use courier::channels::{MediaKind, Platform};

#[test]
fn parses_every_known_platform() {
    for platform in Platform::ALL {
        let parsed = platform.as_str().parse::<Platform>();
        assert_eq!(parsed, Ok(platform));
    }
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!("WhatsApp".parse::<Platform>(), Ok(Platform::Whatsapp));
    assert_eq!("TELEGRAM".parse::<Platform>(), Ok(Platform::Telegram));
}

#[test]
fn unknown_platform_fails_at_parse() {
    let result = "discord".parse::<Platform>();
    assert!(result.is_err());
    let err = match result {
        Ok(_) => panic!("unknown platform should not parse"),
        Err(err) => err,
    };
    assert!(err.to_string().contains("discord"));
    assert!(err.to_string().contains("whatsapp"));
}

#[test]
fn display_matches_config_keys() {
    assert_eq!(Platform::Whatsapp.to_string(), "whatsapp");
    assert_eq!(Platform::Linkedin.to_string(), "linkedin");
}

#[test]
fn serde_roundtrips_lowercase() {
    let json = serde_json::to_string(&Platform::Facebook).expect("platform should serialize");
    assert_eq!(json, "\"facebook\"");
    let back: Platform = serde_json::from_str(&json).expect("platform should deserialize");
    assert_eq!(back, Platform::Facebook);
}

#[test]
fn media_url_must_be_absolute() {
    use courier::channels::{validate_media_url, ChannelError};

    assert!(validate_media_url("https://example.com/a.png").is_ok());
    let result = validate_media_url("not a url");
    assert!(matches!(result, Err(ChannelError::InvalidMediaUrl(_))));
}

#[test]
fn media_kind_image_label() {
    assert_eq!(MediaKind::from_label("image"), MediaKind::Image);
    assert_eq!(MediaKind::from_label("IMAGE"), MediaKind::Image);
}

#[test]
fn media_kind_everything_else_is_document() {
    assert_eq!(MediaKind::from_label("document"), MediaKind::Document);
    assert_eq!(MediaKind::from_label("video"), MediaKind::Document);
    assert_eq!(MediaKind::from_label(""), MediaKind::Document);
}
