use std::sync::LazyLock;

use crate::modules::{
    context::Initialize, error::BulkMailerResult, utils::shutdown::shutdown_signal,
};
use tokio::sync::broadcast;
use tracing::info;

pub static SIGNAL_MANAGER: LazyLock<SignalManager> = LazyLock::new(SignalManager::new);

pub struct SignalManager {
    sender: broadcast::Sender<()>,
}

impl SignalManager {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        SignalManager { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.sender.subscribe()
    }

    /// Tells every subscriber to stop. Returns how many were listening.
    pub fn shutdown(&self) -> usize {
        self.sender.send(()).unwrap_or(0)
    }
}

impl Initialize for SignalManager {
    async fn initialize() -> BulkMailerResult<()> {
        tokio::spawn({
            async move {
                shutdown_signal().await;
                let listeners = SIGNAL_MANAGER.shutdown();
                info!(
                    "Shutdown signal received, stopping {} background task(s)",
                    listeners
                );
            }
        });
        Ok(())
    }
}
