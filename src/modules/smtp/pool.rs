use crate::modules::error::BulkMailerError;
use crate::modules::error::BulkMailerResult;
use crate::modules::smtp::client::RelayClient;
use crate::modules::smtp::client::Sender;
use crate::modules::smtp::manager::{RelayConfig, SmtpClientManager};
use bb8::Pool;
use std::time::Duration;

impl bb8::ManageConnection for SmtpClientManager {
    type Connection = RelayClient;
    type Error = BulkMailerError;

    async fn connect(&self) -> BulkMailerResult<Self::Connection> {
        self.build().await
    }

    // call this function before using the connection
    async fn is_valid(&self, conn: &mut Self::Connection) -> BulkMailerResult<()> {
        conn.send_noop().await?;
        conn.reset().await
    }

    fn has_broken(&self, _: &mut Self::Connection) -> bool {
        false
    }
}

/// Connections are opened lazily, so an unreachable relay does not stop startup.
pub fn build_smtp_pool(config: RelayConfig) -> Pool<SmtpClientManager> {
    let manager = SmtpClientManager::new(config);
    Pool::builder()
        .connection_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(120))
        .retry_connection(true)
        .max_size(10)
        .min_idle(None)
        .test_on_check_out(true)
        .build_unchecked(manager)
}
