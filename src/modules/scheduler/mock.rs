// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::modules::error::code::ErrorCode;
use crate::modules::error::BulkMailerResult;
use crate::modules::scheduler::model::{ScheduledSend, SendOutcome, SendStatus};
use crate::modules::scheduler::nativedb::store::NativeDbScheduleStore;
use crate::modules::scheduler::store::ScheduleStore;
use crate::raise_error;

/// Wraps a real store and injects storage failures.
pub struct FaultyStore {
    pub inner: NativeDbScheduleStore,
    pub fail_create: bool,
    pub fail_fetch: bool,
    pub fail_mark_for: HashSet<u64>,
    pub create_calls: AtomicUsize,
}

impl FaultyStore {
    pub fn new(inner: NativeDbScheduleStore) -> Self {
        Self {
            inner,
            fail_create: false,
            fail_fetch: false,
            fail_mark_for: HashSet::new(),
            create_calls: AtomicUsize::new(0),
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

fn storage_down() -> crate::modules::error::BulkMailerError {
    raise_error!("database unavailable".into(), ErrorCode::StorageError)
}

impl ScheduleStore for FaultyStore {
    async fn create(
        &self,
        recipients: Vec<String>,
        subject: String,
        body: String,
        deliver_at: i64,
    ) -> BulkMailerResult<u64> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(storage_down());
        }
        self.inner
            .create(recipients, subject, body, deliver_at)
            .await
    }

    async fn fetch_due(&self, as_of: i64) -> BulkMailerResult<Vec<ScheduledSend>> {
        if self.fail_fetch {
            return Err(storage_down());
        }
        self.inner.fetch_due(as_of).await
    }

    async fn mark(
        &self,
        id: u64,
        outcome: SendOutcome,
        last_error: Option<String>,
    ) -> BulkMailerResult<()> {
        if self.fail_mark_for.contains(&id) {
            return Err(storage_down());
        }
        self.inner.mark(id, outcome, last_error).await
    }

    async fn get(&self, id: u64) -> BulkMailerResult<Option<ScheduledSend>> {
        self.inner.get(id).await
    }

    async fn list(&self, status: Option<SendStatus>) -> BulkMailerResult<Vec<ScheduledSend>> {
        self.inner.list(status).await
    }
}
