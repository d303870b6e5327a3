// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

//! Recipient list parsing.
//!
//! Raw input arrives either as an uploaded list (one address per line) or as a
//! manual entry separated by commas or newlines. Every token is trimmed and
//! classified on its own; empty tokens are dropped. Order is kept and
//! duplicates are not removed.

use poem_openapi::Object;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;


static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .unwrap_or_else(|e| panic!("address pattern must compile: {e}"))
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    Valid(String),
    Invalid(String),
}

/// Classifies a single raw token. Returns `None` when the trimmed token is empty.
pub fn classify(raw: &str) -> Option<Classification> {
    let token = raw.trim();
    if token.is_empty() {
        return None;
    }
    if ADDRESS_PATTERN.is_match(token) {
        Some(Classification::Valid(token.to_owned()))
    } else {
        Some(Classification::Invalid(token.to_owned()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Object)]
pub struct ClassifiedRecipients {
    /// Addresses accepted for delivery, in submission order.
    pub valid: Vec<String>,
    /// Tokens that did not look like an address, in submission order.
    pub invalid: Vec<String>,
}

impl ClassifiedRecipients {
    pub fn partition<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classified = ClassifiedRecipients::default();
        for token in tokens {
            match classify(token) {
                Some(Classification::Valid(address)) => classified.valid.push(address),
                Some(Classification::Invalid(raw)) => classified.invalid.push(raw),
                None => {}
            }
        }
        classified
    }

    /// One address per line, as found in an uploaded list.
    pub fn from_upload(text: &str) -> Self {
        Self::partition(text.lines())
    }

    /// Addresses separated by commas or newlines, as typed in a form field.
    pub fn from_manual_entry(text: &str) -> Self {
        Self::partition(text.split([',', '\n']))
    }

    pub fn has_valid(&self) -> bool {
        !self.valid.is_empty()
    }
}
