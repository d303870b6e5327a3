// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

pub mod client;
pub mod manager;
#[cfg(test)]
pub(crate) mod mock;
pub mod pool;
pub mod relay;
#[cfg(test)]
mod tests;
pub mod transport;
pub mod util;
