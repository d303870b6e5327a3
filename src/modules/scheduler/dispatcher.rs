// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::modules::error::BulkMailerResult;
use crate::modules::scheduler::model::SendOutcome;
use crate::modules::scheduler::periodic::PeriodicTask;
use crate::modules::scheduler::store::ScheduleStore;
use crate::modules::smtp::transport::MailTransport;
use crate::utc_now;

/// Tally of a single dispatch cycle.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DispatchReport {
    pub due: usize,
    pub sent: usize,
    pub failed: usize,
    pub mark_errors: usize,
}

/// Delivers every scheduled send whose time has come.
pub struct ScheduleDispatcher<S, T> {
    store: Arc<S>,
    transport: Arc<T>,
}

impl<S, T> Clone for ScheduleDispatcher<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            transport: self.transport.clone(),
        }
    }
}

impl<S, T> ScheduleDispatcher<S, T>
where
    S: ScheduleStore + Send + Sync + 'static,
    T: MailTransport + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, transport: Arc<T>) -> Self {
        Self { store, transport }
    }

    /// Sends every send due at `now` once and records the outcome.
    ///
    /// If the due sends cannot be fetched the cycle is skipped and the error is
    /// returned. Transport failures are terminal for the record; they are never
    /// retried. A failed status write is counted and the cycle moves on.
    pub async fn run_cycle(&self, now: i64) -> BulkMailerResult<DispatchReport> {
        let due = self.store.fetch_due(now).await.inspect_err(|e| {
            error!("Failed to fetch due scheduled sends, skipping cycle: {:#?}", e);
        })?;

        let mut report = DispatchReport {
            due: due.len(),
            ..Default::default()
        };

        for send in due {
            let (outcome, last_error) = match self
                .transport
                .send(&send.recipients, &send.subject, &send.body)
                .await
            {
                Ok(()) => {
                    info!(
                        "Scheduled send {} delivered to {} recipient(s)",
                        send.id,
                        send.recipients.len()
                    );
                    report.sent += 1;
                    (SendOutcome::Sent, None)
                }
                Err(e) => {
                    warn!("Scheduled send {} failed: {}", send.id, e);
                    report.failed += 1;
                    (SendOutcome::Failed, Some(e.to_string()))
                }
            };

            if let Err(e) = self.store.mark(send.id, outcome, last_error).await {
                error!(
                    "Failed to record {:?} for scheduled send {}: {:#?}",
                    outcome, send.id, e
                );
                report.mark_errors += 1;
            }
        }

        if report.due > 0 {
            info!(
                "Dispatch cycle finished: due={}, sent={}, failed={}, mark_errors={}",
                report.due, report.sent, report.failed, report.mark_errors
            );
        }
        Ok(report)
    }

    /// Starts the dispatch loop on its own task. It runs until shutdown.
    pub fn start(self, interval: Duration) -> JoinHandle<()> {
        let dispatcher = Arc::new(self);
        PeriodicTask::new("scheduled-send-dispatcher").start(
            move || {
                let dispatcher = dispatcher.clone();
                async move {
                    dispatcher.run_cycle(utc_now!()).await?;
                    Ok(())
                }
            },
            interval,
            false,
        )
    }
}
