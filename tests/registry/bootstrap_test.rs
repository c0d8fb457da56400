//! Registry bootstrap tests: config sections to registered adapters.

use courier::channels::{ChannelError, Platform, SendOptions};
use courier::config::{
    ChannelsConfig, CourierConfig, EmailConfig, SmsConfig, TelegramConfig, WhatsAppConfig,
};
use courier::registry::ChannelRegistry;

fn whatsapp_and_sms_config() -> CourierConfig {
    CourierConfig {
        channels: ChannelsConfig {
            whatsapp: Some(WhatsAppConfig {
                access_token: "token".to_owned(),
                phone_number_id: "12345".to_owned(),
            }),
            sms: Some(SmsConfig {
                api_key: "key".to_owned(),
                from_number: "+15550001111".to_owned(),
            }),
            ..ChannelsConfig::default()
        },
        ..CourierConfig::default()
    }
}

#[test]
fn bootstrap_registers_only_present_sections() {
    let registry = ChannelRegistry::from_config(&whatsapp_and_sms_config());
    assert_eq!(
        registry.available_platforms(),
        vec![Platform::Whatsapp, Platform::Sms]
    );
}

#[tokio::test]
async fn absent_platform_dispatch_fails_with_registration_error() {
    let registry = ChannelRegistry::from_config(&whatsapp_and_sms_config());
    let result = registry
        .send_message(Platform::Telegram, "42", "hi", &SendOptions::default())
        .await;
    assert!(matches!(
        result,
        Err(ChannelError::NotRegistered {
            platform: Platform::Telegram
        })
    ));
}

#[test]
fn empty_config_registers_nothing() {
    let registry = ChannelRegistry::from_config(&CourierConfig::default());
    assert!(registry.available_platforms().is_empty());
    for platform in Platform::ALL {
        assert!(!registry.is_active(platform));
    }
}

#[test]
fn full_config_registers_all_platforms() {
    let config = CourierConfig {
        channels: ChannelsConfig {
            whatsapp: Some(WhatsAppConfig {
                access_token: "t".to_owned(),
                phone_number_id: "1".to_owned(),
            }),
            telegram: Some(TelegramConfig {
                bot_token: "t".to_owned(),
            }),
            instagram: Some(courier::config::InstagramConfig {
                access_token: "t".to_owned(),
            }),
            facebook: Some(courier::config::FacebookConfig {
                page_access_token: "t".to_owned(),
            }),
            email: Some(EmailConfig {
                from_address: "bot@example.com".to_owned(),
                reply_to: None,
            }),
            sms: Some(SmsConfig {
                api_key: "k".to_owned(),
                from_number: "+1555".to_owned(),
            }),
            linkedin: Some(courier::config::LinkedInConfig {
                access_token: "t".to_owned(),
            }),
        },
        ..CourierConfig::default()
    };

    let registry = ChannelRegistry::from_config(&config);
    assert_eq!(registry.available_platforms().len(), Platform::ALL.len());
}

#[test]
fn bootstrapped_capabilities_follow_the_platform() {
    let registry = ChannelRegistry::from_config(&whatsapp_and_sms_config());

    let whatsapp = registry.get(Platform::Whatsapp);
    let whatsapp = match whatsapp {
        Some(adapter) => adapter,
        None => panic!("whatsapp should be registered"),
    };
    assert!(whatsapp.supports_media());
    assert!(whatsapp.supports_read_receipts());

    let sms = registry.get(Platform::Sms);
    let sms = match sms {
        Some(adapter) => adapter,
        None => panic!("sms should be registered"),
    };
    assert!(!sms.supports_media());
    assert!(!sms.supports_read_receipts());
}
