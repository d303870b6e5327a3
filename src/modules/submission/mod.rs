// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::modules::error::code::ErrorCode;
use crate::modules::error::BulkMailerResult;
use crate::modules::recipients::ClassifiedRecipients;
use crate::modules::scheduler::store::ScheduleStore;
use crate::modules::smtp::transport::MailTransport;
use crate::raise_error;

pub mod payload;

pub const NOTHING_TO_SEND_MESSAGE: &str = "No valid emails to send to, but request was received.";
pub const SENT_MESSAGE: &str = "Emails sent successfully";
pub const SCHEDULED_MESSAGE: &str = "Email scheduled successfully";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmissionOutcome {
    /// No recipient survived validation. Nothing was sent or stored.
    NothingToSend,
    /// The relay accepted the message.
    Sent,
    /// Stored for the dispatch loop under `id`.
    Scheduled { id: u64 },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmissionReceipt {
    pub message: String,
    pub outcome: SubmissionOutcome,
    pub valid_emails: Vec<String>,
    pub invalid_emails: Vec<String>,
}

impl SubmissionReceipt {
    fn new(outcome: SubmissionOutcome, recipients: ClassifiedRecipients) -> Self {
        let message = match outcome {
            SubmissionOutcome::NothingToSend => NOTHING_TO_SEND_MESSAGE,
            SubmissionOutcome::Sent => SENT_MESSAGE,
            SubmissionOutcome::Scheduled { .. } => SCHEDULED_MESSAGE,
        };
        Self {
            message: message.to_string(),
            outcome,
            valid_emails: recipients.valid,
            invalid_emails: recipients.invalid,
        }
    }

    pub fn scheduled_id(&self) -> Option<u64> {
        match self.outcome {
            SubmissionOutcome::Scheduled { id } => Some(id),
            _ => None,
        }
    }
}

/// Sends a message right away or hands it to the schedule store, depending on
/// its delivery time.
pub struct SubmissionOrchestrator<S, T> {
    store: Arc<S>,
    transport: Arc<T>,
}

impl<S, T> SubmissionOrchestrator<S, T>
where
    S: ScheduleStore + Send + Sync + 'static,
    T: MailTransport + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, transport: Arc<T>) -> Self {
        Self { store, transport }
    }

    /// A `deliver_at` that is missing or not in the future means "send now".
    pub async fn submit(
        &self,
        recipients: ClassifiedRecipients,
        subject: String,
        body: String,
        deliver_at: Option<DateTime<Utc>>,
    ) -> BulkMailerResult<SubmissionReceipt> {
        if !recipients.has_valid() {
            info!(
                "Submission without valid recipients ({} rejected), nothing to do",
                recipients.invalid.len()
            );
            return Ok(SubmissionReceipt::new(
                SubmissionOutcome::NothingToSend,
                recipients,
            ));
        }

        match deliver_at.filter(|at| *at > Utc::now()) {
            Some(at) => {
                let id = self
                    .store
                    .create(
                        recipients.valid.clone(),
                        subject,
                        body,
                        at.timestamp_millis(),
                    )
                    .await
                    .map_err(|e| {
                        warn!("Failed to store scheduled send: {:#?}", e);
                        raise_error!(
                            format!("Failed to schedule email: {}", e),
                            ErrorCode::StorageError
                        )
                    })?;
                info!(
                    "Scheduled send {} for {} recipient(s) at {}",
                    id,
                    recipients.valid.len(),
                    at.to_rfc3339()
                );
                Ok(SubmissionReceipt::new(
                    SubmissionOutcome::Scheduled { id },
                    recipients,
                ))
            }
            None => {
                self.transport
                    .send(&recipients.valid, &subject, &body)
                    .await
                    .map_err(|e| {
                        warn!("Immediate send failed: {:#?}", e);
                        let code = if e.code().is_transport() {
                            e.code()
                        } else {
                            ErrorCode::SmtpCommandFailed
                        };
                        raise_error!(format!("Failed to send email: {}", e), code)
                    })?;
                info!("Sent message to {} recipient(s)", recipients.valid.len());
                Ok(SubmissionReceipt::new(SubmissionOutcome::Sent, recipients))
            }
        }
    }
}
