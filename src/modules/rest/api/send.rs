use std::sync::Arc;

use poem::web::Data;
use poem_openapi::payload::Json;
use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object, OpenApi};

use crate::modules::context::AppContext;
use crate::modules::error::code::ErrorCode;
use crate::modules::rest::api::ApiTags;
use crate::modules::rest::ApiResult;
use crate::modules::submission::payload::{collect_recipients, parse_deliver_at};
use crate::modules::submission::SubmissionReceipt;
use crate::raise_error;

pub struct SendMailApi;

/// Form fields accepted by the send endpoint.
#[derive(Debug, Multipart)]
pub struct SendEmailForm {
    /// Message subject.
    pub subject: Option<String>,
    /// HTML body.
    pub body: Option<String>,
    /// Optional RFC 3339 delivery time, e.g. `2030-01-31T09:00:00Z`. Blank or past means send now.
    pub scheduled_time: Option<String>,
    /// Uploaded recipient list, one address per line. Takes precedence over `emails`.
    pub file: Option<Upload>,
    /// Recipients separated by commas or newlines.
    pub emails: Option<String>,
}

#[derive(Debug, Clone, Object)]
pub struct SendEmailResponse {
    pub message: String,
    pub valid_emails: Vec<String>,
    pub invalid_emails: Vec<String>,
    /// Id of the stored send when the message was scheduled.
    pub scheduled_id: Option<u64>,
}

impl From<SubmissionReceipt> for SendEmailResponse {
    fn from(receipt: SubmissionReceipt) -> Self {
        Self {
            scheduled_id: receipt.scheduled_id(),
            message: receipt.message,
            valid_emails: receipt.valid_emails,
            invalid_emails: receipt.invalid_emails,
        }
    }
}

#[OpenApi(prefix_path = "/api/v1", tag = "ApiTags::SendMail")]
impl SendMailApi {
    /// Sends a message to a list of recipients now, or stores it for later delivery.
    ///
    /// Recipients that do not look like an address are reported back and skipped.
    #[oai(path = "/send-email", method = "post", operation_id = "send_email")]
    async fn send_email(
        &self,
        context: Data<&Arc<AppContext>>,
        form: SendEmailForm,
    ) -> ApiResult<Json<SendEmailResponse>> {
        let deliver_at = parse_deliver_at(form.scheduled_time.as_deref())?;

        let upload = match form.file {
            Some(file) => Some(file.into_string().await.map_err(|_| {
                raise_error!(
                    "Failed to parse uploaded file".into(),
                    ErrorCode::InvalidParameter
                )
            })?),
            None => None,
        };
        let recipients = collect_recipients(upload.as_deref(), form.emails.as_deref());

        let receipt = context
            .orchestrator
            .submit(
                recipients,
                form.subject.unwrap_or_default(),
                form.body.unwrap_or_default(),
                deliver_at,
            )
            .await?;
        Ok(Json(receipt.into()))
    }
}
