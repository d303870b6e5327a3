// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

pub mod common;
pub mod context;
pub mod database;
pub mod error;
pub mod logger;
pub mod recipients;
pub mod rest;
pub mod scheduler;
pub mod settings;
pub mod smtp;
pub mod submission;
pub mod utils;
