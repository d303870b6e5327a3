use crate::modules::{common::signal::SIGNAL_MANAGER, error::BulkMailerResult};
use std::{future::Future, time::Duration};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{info, warn};

pub struct PeriodicTask {
    name: String,
}

impl PeriodicTask {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
        }
    }

    /// Runs `task` every `interval` until the process-wide shutdown signal fires.
    ///
    /// Each run is awaited before the next tick is taken, so runs never overlap.
    /// A run that outlasts the interval delays the following tick instead of
    /// triggering a burst of catch-up runs.
    pub fn start<F, T>(self, task: T, interval: Duration, run_immediately: bool) -> JoinHandle<()>
    where
        T: Fn() -> F + Send + Sync + 'static,
        F: Future<Output = BulkMailerResult<()>> + Send + 'static,
    {
        info!("Task '{}' started", &self.name);
        let name = self.name;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut shutdown = SIGNAL_MANAGER.subscribe();

            if !run_immediately {
                interval.tick().await; // discard first immediate tick
            }

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(e) = task().await {
                            warn!("Task '{}' failed: {:?}", name, e);
                        }
                    }
                    _ = shutdown.recv() => {
                        info!("Task '{}' shutting down due to shutdown signal", name);
                        break;
                    }
                }
            }

            info!("Task '{}' stopped", name);
        })
    }
}
