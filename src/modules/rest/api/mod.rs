// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem_openapi::{OpenApiService, Tags};
use schedule::ScheduleApi;
use send::SendMailApi;

use crate::bulkmailer_version;

pub mod schedule;
pub mod send;

#[derive(Tags)]
pub enum ApiTags {
    SendMail,
    Schedule,
}

type BulkMailerOpenApi = (SendMailApi, ScheduleApi);

pub fn create_openapi_service() -> OpenApiService<BulkMailerOpenApi, ()> {
    OpenApiService::new(
        (SendMailApi, ScheduleApi),
        "BulkMailerApi",
        bulkmailer_version!(),
    )
}
