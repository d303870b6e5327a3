// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use poem::web::Data;
use poem_openapi::param::{Path, Query};
use poem_openapi::payload::Json;
use poem_openapi::OpenApi;

use crate::modules::context::AppContext;
use crate::modules::error::code::ErrorCode;
use crate::modules::rest::api::ApiTags;
use crate::modules::rest::ApiResult;
use crate::modules::scheduler::model::{ScheduledSend, SendStatus};
use crate::modules::scheduler::store::ScheduleStore;
use crate::raise_error;

pub struct ScheduleApi;

#[OpenApi(prefix_path = "/api/v1", tag = "ApiTags::Schedule")]
impl ScheduleApi {
    /// Lists scheduled sends, oldest first, optionally filtered by status.
    #[oai(
        path = "/scheduled-sends",
        method = "get",
        operation_id = "list_scheduled_sends"
    )]
    async fn list_scheduled_sends(
        &self,
        context: Data<&Arc<AppContext>>,
        /// Only return sends in this status
        status: Query<Option<SendStatus>>,
    ) -> ApiResult<Json<Vec<ScheduledSend>>> {
        Ok(Json(context.store.list(status.0).await?))
    }

    /// Returns one scheduled send.
    #[oai(
        path = "/scheduled-sends/:id",
        method = "get",
        operation_id = "get_scheduled_send"
    )]
    async fn get_scheduled_send(
        &self,
        context: Data<&Arc<AppContext>>,
        /// The id returned when the send was scheduled
        id: Path<u64>,
    ) -> ApiResult<Json<ScheduledSend>> {
        let id = id.0;
        let send = context.store.get(id).await?.ok_or_else(|| {
            raise_error!(
                format!("Scheduled send '{}' not found", id),
                ErrorCode::ResourceNotFound
            )
        })?;
        Ok(Json(send))
    }
}
