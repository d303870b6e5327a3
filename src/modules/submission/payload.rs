// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};

use crate::modules::error::code::ErrorCode;
use crate::modules::error::BulkMailerResult;
use crate::modules::recipients::ClassifiedRecipients;
use crate::raise_error;

/// Parses an optional RFC 3339 delivery time. Blank input means "send now".
pub fn parse_deliver_at(raw: Option<&str>) -> BulkMailerResult<Option<DateTime<Utc>>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(raw)
        .map(|at| Some(at.with_timezone(&Utc)))
        .map_err(|_| {
            raise_error!(
                "Invalid scheduled_time format. Use RFC3339 format.".into(),
                ErrorCode::InvalidParameter
            )
        })
}

/// Picks the recipient source. An uploaded list wins over manual entry.
pub fn collect_recipients(upload: Option<&str>, manual: Option<&str>) -> ClassifiedRecipients {
    match (upload, manual) {
        (Some(text), _) => ClassifiedRecipients::from_upload(text),
        (None, Some(text)) => ClassifiedRecipients::from_manual_entry(text),
        (None, None) => ClassifiedRecipients::default(),
    }
}
