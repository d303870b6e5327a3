use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A message waiting for, or done with, deferred delivery.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Object)]
pub struct ScheduledSend {
    /// Unique identifier assigned by the store.
    pub id: u64,
    /// Validated recipient addresses, in submission order.
    pub recipients: Vec<String>,
    pub subject: String,
    /// HTML body, sent as is.
    pub body: String,
    /// Unix epoch milliseconds (UTC) from which the send is eligible for dispatch.
    pub deliver_at: i64,
    pub status: SendStatus,
    /// Relay error recorded when the send was marked `Failed`.
    pub last_error: Option<String>,
    /// Unix epoch milliseconds when the record was created.
    pub created_at: i64,
    /// Unix epoch milliseconds of the last status change.
    pub updated_at: i64,
}

impl ScheduledSend {
    /// Pending and due at `as_of`.
    pub fn is_due(&self, as_of: i64) -> bool {
        self.status == SendStatus::Pending && self.deliver_at <= as_of
    }
}

/// Lifecycle of a scheduled send.
///
/// A send starts `Pending` and moves exactly once to `Sent` or `Failed`.
/// Both are terminal.
#[derive(Clone, Copy, Debug, Eq, Default, PartialEq, Serialize, Deserialize, Hash, Enum)]
pub enum SendStatus {
    /// Waiting for `deliver_at` to pass.
    #[default]
    Pending,
    /// The relay accepted the message.
    Sent,
    /// The relay rejected the message or could not be reached. Never retried.
    Failed,
}

impl SendStatus {
    pub fn code(&self) -> u32 {
        match &self {
            SendStatus::Pending => 1,
            SendStatus::Sent => 2,
            SendStatus::Failed => 3,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SendStatus::Pending)
    }
}

impl fmt::Display for SendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            SendStatus::Pending => "Pending",
            SendStatus::Sent => "Sent",
            SendStatus::Failed => "Failed",
        };
        write!(f, "{}", status_str)
    }
}

/// Result of one delivery attempt, as recorded by the dispatch loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SendOutcome {
    Sent,
    Failed,
}

impl From<SendOutcome> for SendStatus {
    fn from(outcome: SendOutcome) -> Self {
        match outcome {
            SendOutcome::Sent => SendStatus::Sent,
            SendOutcome::Failed => SendStatus::Failed,
        }
    }
}
