use std::sync::LazyLock;

use crate::modules::database::ModelsAdapter;
use crate::modules::scheduler::model::{ScheduledSend, SendStatus};
use native_db::*;
use native_model::native_model;
use native_model::Model;
use serde::{Deserialize, Serialize};

pub mod store;

pub static SCHEDULE_MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut adapter = ModelsAdapter::new();
    adapter.register_model::<ScheduledSendEntity>();
    adapter.models
});

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db(primary_key(pk -> String), secondary_key(status_code -> u32))]
pub struct ScheduledSendEntity {
    #[secondary_key(unique)]
    pub id: u64,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub deliver_at: i64,
    pub status: SendStatus,
    pub last_error: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ScheduledSendEntity {
    fn pk(&self) -> String {
        format!("{}_{}", self.created_at, self.id)
    }

    pub fn status_code(&self) -> u32 {
        self.status.code()
    }
}

impl From<ScheduledSendEntity> for ScheduledSend {
    fn from(entity: ScheduledSendEntity) -> Self {
        ScheduledSend {
            id: entity.id,
            recipients: entity.recipients,
            subject: entity.subject,
            body: entity.body,
            deliver_at: entity.deliver_at,
            status: entity.status,
            last_error: entity.last_error,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
