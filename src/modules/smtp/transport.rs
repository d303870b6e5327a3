// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::BulkMailerResult;
use std::future::Future;

/// Delivers one fully formed message to all of its recipients.
///
/// Callers treat every error as final for the message. Implementations must
/// not retry on their own.
pub trait MailTransport {
    fn send(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> impl Future<Output = BulkMailerResult<()>> + Send;
}
