// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::code::ErrorCode;
use crate::modules::error::BulkMailerResult;
use crate::modules::settings::cli::{RelayEncryption, SETTINGS};
use crate::modules::smtp::client::RelayClient;
use crate::raise_error;
use mail_send::{Credentials, SmtpClientBuilder};
use std::time::Duration;

/// Where and how to reach the outbound relay.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub encryption: RelayEncryption,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sender_email: String,
    pub sender_name: Option<String>,
}

impl RelayConfig {
    pub fn from_settings() -> Self {
        Self {
            host: SETTINGS.bulkmailer_smtp_host.clone(),
            port: SETTINGS.bulkmailer_smtp_port,
            encryption: SETTINGS.bulkmailer_smtp_encryption,
            username: SETTINGS.bulkmailer_smtp_username.clone(),
            password: SETTINGS.bulkmailer_smtp_password.clone(),
            sender_email: SETTINGS.bulkmailer_sender_email.clone(),
            sender_name: SETTINGS.bulkmailer_sender_name.clone(),
        }
    }

    /// Login for the relay. The username falls back to the sender address.
    pub(crate) fn credentials(&self) -> BulkMailerResult<Option<Credentials<String>>> {
        match (&self.username, &self.password) {
            (_, None) => Ok(None),
            (Some(username), Some(password)) => {
                Ok(Some(Credentials::new(username.clone(), password.clone())))
            }
            (None, Some(password)) => {
                if self.sender_email.trim().is_empty() {
                    return Err(raise_error!(
                        "SMTP password is set, but neither a username nor a sender email is configured".into(),
                        ErrorCode::MissingConfiguration
                    ));
                }
                Ok(Some(Credentials::new(
                    self.sender_email.clone(),
                    password.clone(),
                )))
            }
        }
    }
}

pub struct SmtpClientManager {
    config: RelayConfig,
}

impl SmtpClientManager {
    pub fn new(config: RelayConfig) -> Self {
        Self { config }
    }

    pub async fn build(&self) -> BulkMailerResult<RelayClient> {
        let timeout = Duration::from_secs(30);
        let local_host = gethostname::gethostname()
            .to_str()
            .unwrap_or("[127.0.0.1]")
            .to_string();

        let mut builder = SmtpClientBuilder::new(self.config.host.clone(), self.config.port)
            .helo_host(local_host)
            .timeout(timeout);
        if let Some(credentials) = self.config.credentials()? {
            builder = builder.credentials(credentials);
        }

        let client = match self.config.encryption {
            RelayEncryption::Ssl => {
                let client = builder.implicit_tls(true).connect().await.map_err(|e| {
                    raise_error!(format!("{:#?}", e), ErrorCode::SmtpConnectionFailed)
                })?;
                RelayClient::Tls(client)
            }
            RelayEncryption::StartTls => {
                let client = builder.implicit_tls(false).connect().await.map_err(|e| {
                    raise_error!(format!("{:#?}", e), ErrorCode::SmtpConnectionFailed)
                })?;
                RelayClient::Tls(client)
            }
            RelayEncryption::None => {
                let client = builder.connect_plain().await.map_err(|e| {
                    raise_error!(format!("{:#?}", e), ErrorCode::SmtpConnectionFailed)
                })?;
                RelayClient::Plain(client)
            }
        };

        Ok(client)
    }
}
