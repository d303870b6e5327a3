// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use native_db::Database;

use crate::modules::error::BulkMailerResult;
use crate::modules::scheduler::dispatcher::ScheduleDispatcher;
use crate::modules::scheduler::nativedb::store::NativeDbScheduleStore;
use crate::modules::smtp::manager::RelayConfig;
use crate::modules::smtp::relay::SmtpRelay;
use crate::modules::submission::SubmissionOrchestrator;

pub trait Initialize {
    async fn initialize() -> BulkMailerResult<()>;
}

pub type ScheduleStoreImpl = NativeDbScheduleStore;
pub type TransportImpl = SmtpRelay;

/// Long-lived services shared by the HTTP handlers and the dispatch loop.
///
/// Built once at startup; the store and the relay are the same instances on
/// both sides.
pub struct AppContext {
    pub store: Arc<ScheduleStoreImpl>,
    pub transport: Arc<TransportImpl>,
    pub orchestrator: SubmissionOrchestrator<ScheduleStoreImpl, TransportImpl>,
}

impl AppContext {
    pub fn new(database: Arc<Database<'static>>, relay: RelayConfig) -> Self {
        let store = Arc::new(NativeDbScheduleStore::new(database));
        let transport = Arc::new(SmtpRelay::new(relay));
        let orchestrator = SubmissionOrchestrator::new(store.clone(), transport.clone());
        Self {
            store,
            transport,
            orchestrator,
        }
    }

    pub fn dispatcher(&self) -> ScheduleDispatcher<ScheduleStoreImpl, TransportImpl> {
        ScheduleDispatcher::new(self.store.clone(), self.transport.clone())
    }
}
