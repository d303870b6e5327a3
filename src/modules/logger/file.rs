use crate::modules::logger::{parse_log_level, LocalTimer};
use crate::modules::settings::cli::SETTINGS;
use crate::modules::settings::dir::DATA_DIR_MANAGER;
use std::sync::OnceLock;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

pub static LOG_WORKER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub fn setup_file_logger() -> Result<(), tracing::dispatcher::SetGlobalDefaultError> {
    let level = parse_log_level(&SETTINGS.bulkmailer_log_level);

    let Some(server_nonb) = server_log_writer() else {
        eprintln!(
            "Failed to open log directory {:?}, falling back to stdout",
            DATA_DIR_MANAGER.log_dir
        );
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_timer(LocalTimer)
            .finish();
        return tracing::subscriber::set_global_default(subscriber);
    };

    let server_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(false)
        .with_level(true)
        .with_writer(server_nonb)
        .with_target(true);

    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(server_layer);

    tracing::subscriber::set_global_default(subscriber)
}

fn server_log_writer() -> Option<NonBlocking> {
    let rolling = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("server")
        .max_log_files(SETTINGS.bulkmailer_max_server_log_files)
        .build(DATA_DIR_MANAGER.log_dir.clone())
        .ok()?;
    let (nb, guard) = tracing_appender::non_blocking(rolling);
    // keeps the background writer alive for the life of the process
    let _ = LOG_WORKER_GUARD.set(guard);
    Some(nb)
}
