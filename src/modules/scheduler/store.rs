// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::{
    error::BulkMailerResult,
    scheduler::model::{ScheduledSend, SendOutcome, SendStatus},
};
use std::future::Future;

/// System of record for scheduled sends.
///
/// Both the submission path and the dispatch loop hold the same handle; the
/// store is their only synchronization point.
pub trait ScheduleStore {
    /// Persists a new `Pending` send and returns its id.
    ///
    /// `recipients` must be non-empty. Timestamps are Unix epoch milliseconds.
    fn create(
        &self,
        recipients: Vec<String>,
        subject: String,
        body: String,
        deliver_at: i64,
    ) -> impl Future<Output = BulkMailerResult<u64>> + Send;

    /// All `Pending` sends with `deliver_at <= as_of`, in no particular order.
    fn fetch_due(
        &self,
        as_of: i64,
    ) -> impl Future<Output = BulkMailerResult<Vec<ScheduledSend>>> + Send;

    /// Moves a `Pending` send to its terminal status. A send that is already
    /// terminal is left untouched.
    fn mark(
        &self,
        id: u64,
        outcome: SendOutcome,
        last_error: Option<String>,
    ) -> impl Future<Output = BulkMailerResult<()>> + Send;

    fn get(&self, id: u64) -> impl Future<Output = BulkMailerResult<Option<ScheduledSend>>> + Send;

    fn list(
        &self,
        status: Option<SendStatus>,
    ) -> impl Future<Output = BulkMailerResult<Vec<ScheduledSend>>> + Send;
}
