use crate::modules::error::code::ErrorCode;
use crate::modules::settings::cli::RelayEncryption;
use crate::modules::smtp::manager::RelayConfig;
use crate::modules::smtp::relay::SmtpRelay;

fn relay_config() -> RelayConfig {
    RelayConfig {
        host: "127.0.0.1".into(),
        port: 2525,
        encryption: RelayEncryption::None,
        username: None,
        password: None,
        sender_email: "newsletter@example.com".into(),
        sender_name: Some("Newsletter".into()),
    }
}

#[tokio::test]
async fn compose_puts_every_recipient_in_to_header() {
    let relay = SmtpRelay::new(relay_config());
    let recipients = vec![
        "alice@example.com".to_string(),
        "bob@example.org".to_string(),
        "alice@example.com".to_string(),
    ];
    let message = relay
        .compose(&recipients, "Quarterly update", "<p>Hello</p>")
        .unwrap()
        .write_to_string()
        .unwrap();

    assert!(message.contains("Subject: Quarterly update"));
    assert!(message.contains("Newsletter"));
    assert!(message.contains("<newsletter@example.com>"));
    assert!(message.contains("alice@example.com"));
    assert!(message.contains("bob@example.org"));
    assert!(message.contains("text/html"));
    assert!(message.contains("Message-ID: <"));
}

#[tokio::test]
async fn compose_rejects_empty_recipient_list() {
    let relay = SmtpRelay::new(relay_config());
    let Err(err) = relay.compose(&[], "subject", "body") else {
        panic!("empty recipient list should be rejected");
    };
    assert_eq!(err.code(), ErrorCode::InvalidParameter);
}

#[test]
fn credentials_are_optional() {
    let config = relay_config();
    assert!(config.credentials().unwrap().is_none());
}

#[test]
fn username_falls_back_to_sender_email() {
    let mut config = relay_config();
    config.password = Some("app-password".into());
    assert!(config.credentials().unwrap().is_some());

    config.sender_email = " ".into();
    let Err(err) = config.credentials() else {
        panic!("missing login should be rejected");
    };
    assert_eq!(err.code(), ErrorCode::MissingConfiguration);
}
