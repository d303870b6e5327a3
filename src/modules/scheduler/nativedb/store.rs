// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Instant;

use native_db::Database;
use tracing::{debug, warn};

use crate::id;
use crate::modules::database::{
    filter_by_secondary_key_impl, insert_impl, list_all_impl, secondary_find_impl, update_impl,
};
use crate::modules::error::code::ErrorCode;
use crate::modules::error::BulkMailerResult;
use crate::modules::scheduler::model::{ScheduledSend, SendOutcome, SendStatus};
use crate::modules::scheduler::nativedb::{ScheduledSendEntity, ScheduledSendEntityKey};
use crate::modules::scheduler::store::ScheduleStore;
use crate::{raise_error, utc_now};

/// `ScheduleStore` backed by a native_db database, either on disk or in memory.
#[derive(Clone)]
pub struct NativeDbScheduleStore {
    database: Arc<Database<'static>>,
}

impl NativeDbScheduleStore {
    pub fn new(database: Arc<Database<'static>>) -> Self {
        Self { database }
    }
}

impl ScheduleStore for NativeDbScheduleStore {
    async fn create(
        &self,
        recipients: Vec<String>,
        subject: String,
        body: String,
        deliver_at: i64,
    ) -> BulkMailerResult<u64> {
        if recipients.is_empty() {
            return Err(raise_error!(
                "A scheduled send needs at least one recipient".into(),
                ErrorCode::InvalidParameter
            ));
        }
        let now = utc_now!();
        let entity = ScheduledSendEntity {
            id: id!(64),
            recipients,
            subject,
            body,
            deliver_at,
            status: SendStatus::Pending,
            last_error: None,
            created_at: now,
            updated_at: now,
        };
        let id = entity.id;
        insert_impl(&self.database, entity).await?;
        debug!("Scheduled send {} stored, deliver_at={}", id, deliver_at);
        Ok(id)
    }

    async fn fetch_due(&self, as_of: i64) -> BulkMailerResult<Vec<ScheduledSend>> {
        let start = Instant::now();
        let pending = filter_by_secondary_key_impl::<ScheduledSendEntity>(
            &self.database,
            ScheduledSendEntityKey::status_code,
            SendStatus::Pending.code(),
        )
        .await?;
        let due: Vec<ScheduledSend> = pending
            .into_iter()
            .map(ScheduledSend::from)
            .filter(|send| send.is_due(as_of))
            .collect();
        debug!(
            "Fetched {} due sends from native_db in {:#?}",
            due.len(),
            start.elapsed()
        );
        Ok(due)
    }

    async fn mark(
        &self,
        id: u64,
        outcome: SendOutcome,
        last_error: Option<String>,
    ) -> BulkMailerResult<()> {
        let written = update_impl(
            &self.database,
            move |rw| {
                rw.get()
                    .secondary::<ScheduledSendEntity>(ScheduledSendEntityKey::id, id)
                    .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::StorageError))?
                    .ok_or_else(|| {
                        raise_error!(
                            format!("The scheduled send with id={} was not found.", id),
                            ErrorCode::ResourceNotFound
                        )
                    })
            },
            move |current| {
                if current.status.is_terminal() {
                    return Ok(None);
                }
                let mut updated = current.clone();
                updated.status = outcome.into();
                updated.last_error = match outcome {
                    SendOutcome::Sent => None,
                    SendOutcome::Failed => last_error,
                };
                updated.updated_at = utc_now!();
                Ok(Some(updated))
            },
        )
        .await?;

        if written.is_none() {
            warn!(
                "Scheduled send {} is already terminal; ignoring {:?}",
                id, outcome
            );
        }
        Ok(())
    }

    async fn get(&self, id: u64) -> BulkMailerResult<Option<ScheduledSend>> {
        let entity = secondary_find_impl::<ScheduledSendEntity>(
            &self.database,
            ScheduledSendEntityKey::id,
            id,
        )
        .await?;
        Ok(entity.map(Into::into))
    }

    async fn list(&self, status: Option<SendStatus>) -> BulkMailerResult<Vec<ScheduledSend>> {
        let entities = match status {
            Some(status) => {
                filter_by_secondary_key_impl::<ScheduledSendEntity>(
                    &self.database,
                    ScheduledSendEntityKey::status_code,
                    status.code(),
                )
                .await?
            }
            None => list_all_impl::<ScheduledSendEntity>(&self.database).await?,
        };
        let mut sends: Vec<ScheduledSend> = entities.into_iter().map(Into::into).collect();
        sends.sort_by_key(|send| (send.created_at, send.id));
        Ok(sends)
    }
}
