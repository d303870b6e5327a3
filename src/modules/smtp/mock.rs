// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::modules::error::code::ErrorCode;
use crate::modules::error::BulkMailerResult;
use crate::modules::smtp::transport::MailTransport;
use crate::raise_error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivered {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Records every call. Messages whose subject is listed in `reject_subjects`
/// are refused with `SmtpCommandFailed`.
#[derive(Default)]
pub struct RecordingTransport {
    pub calls: Mutex<Vec<Delivered>>,
    reject_subjects: HashSet<String>,
}

impl RecordingTransport {
    pub fn rejecting(subjects: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reject_subjects: subjects.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn calls(&self) -> Vec<Delivered> {
        self.calls.lock().unwrap().clone()
    }
}

impl MailTransport for RecordingTransport {
    async fn send(&self, recipients: &[String], subject: &str, body: &str) -> BulkMailerResult<()> {
        self.calls.lock().unwrap().push(Delivered {
            recipients: recipients.to_vec(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        if self.reject_subjects.contains(subject) {
            return Err(raise_error!(
                "550 5.1.1 mailbox unavailable".into(),
                ErrorCode::SmtpCommandFailed
            ));
        }
        Ok(())
    }
}
