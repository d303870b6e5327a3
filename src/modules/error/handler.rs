// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::{code::ErrorCode, ApiError, ApiErrorResponse, BulkMailerError};
use poem::IntoResponse;
use poem_openapi::payload::Json;

/// Error code for a poem framework error, if it is one we recognise.
fn framework_error_code(error: &poem::Error) -> Option<ErrorCode> {
    if error.is::<poem::error::NotFoundError>() {
        return Some(ErrorCode::ResourceNotFound);
    }
    if error.is::<poem::error::MethodNotAllowedError>() {
        return Some(ErrorCode::MethodNotAllowed);
    }
    let bad_input = error.is::<poem::error::ParsePathError>()
        || error.is::<poem::error::ParseQueryError>()
        || error.is::<poem::error::ParseMultipartError>()
        || error.is::<poem_openapi::error::ParseRequestPayloadError>()
        || error.is::<poem_openapi::error::ParseMultipartError>()
        || error.is::<poem_openapi::error::ContentTypeError>()
        || error.is::<poem_openapi::error::ParseParamError>()
        || error.is::<poem_openapi::error::ParsePathError>();
    bad_input.then_some(ErrorCode::InvalidParameter)
}

/// Maps framework errors onto the shared `{ message, code }` body.
pub async fn error_handler(error: poem::Error) -> impl poem::IntoResponse {
    if error.is::<BulkMailerError>() {
        return error.into_response();
    }

    let code = match framework_error_code(&error) {
        Some(code) => code,
        None if error.has_source() => ErrorCode::UnhandledPoemError,
        None => return error.into_response(),
    };

    let api_error = ApiError::new_with_error_code(error.to_string(), code as u32);
    let mut response = ApiErrorResponse::Generic(code.status(), Json(api_error)).into_response();
    // keep the framework's status, e.g. 415 for a wrong content type
    response.set_status(error.status());
    response
}
