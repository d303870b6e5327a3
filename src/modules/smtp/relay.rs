// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Cow;

use bb8::Pool;
use mail_send::mail_builder::{headers::address::Address, MessageBuilder};
use tracing::debug;

use crate::modules::error::code::ErrorCode;
use crate::modules::error::BulkMailerResult;
use crate::modules::smtp::client::Sender;
use crate::modules::smtp::manager::{RelayConfig, SmtpClientManager};
use crate::modules::smtp::pool::build_smtp_pool;
use crate::modules::smtp::transport::MailTransport;
use crate::modules::smtp::util::generate_message_id;
use crate::raise_error;

/// `MailTransport` that hands messages to the configured SMTP relay.
///
/// Every recipient goes into the `To` header of a single HTML message.
pub struct SmtpRelay {
    pool: Pool<SmtpClientManager>,
    sender: Address<'static>,
}

impl SmtpRelay {
    pub fn new(config: RelayConfig) -> Self {
        let sender = Address::new_address(
            config.sender_name.clone().map(Cow::Owned),
            Cow::Owned(config.sender_email.clone()),
        );
        Self {
            pool: build_smtp_pool(config),
            sender,
        }
    }

    pub(crate) fn compose(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> BulkMailerResult<MessageBuilder<'static>> {
        if recipients.is_empty() {
            return Err(raise_error!(
                "Cannot send a message without recipients".into(),
                ErrorCode::InvalidParameter
            ));
        }
        let to = Address::new_list(
            recipients
                .iter()
                .map(|r| Address::new_address(None::<Cow<'static, str>>, Cow::Owned(r.clone())))
                .collect(),
        );
        Ok(MessageBuilder::new()
            .from(self.sender.clone())
            .to(to)
            .subject(subject.to_string())
            .html_body(body.to_string())
            .message_id(generate_message_id()))
    }
}

impl MailTransport for SmtpRelay {
    async fn send(&self, recipients: &[String], subject: &str, body: &str) -> BulkMailerResult<()> {
        let message = self.compose(recipients, subject, body)?;
        let mut client = self.pool.get().await?;
        client.send_email(message).await?;
        debug!("Relay accepted message for {} recipient(s)", recipients.len());
        Ok(())
    }
}
