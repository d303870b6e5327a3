use mimalloc::MiMalloc;
use modules::{
    common::{
        rustls::RelayTls,
        signal::{SignalManager, SIGNAL_MANAGER},
    },
    context::{AppContext, Initialize},
    database::manager::DatabaseManager,
    error::{code::ErrorCode, BulkMailerResult},
    logger,
    rest::{bind_http_listener, start_http_server},
    settings::{cli::SETTINGS, dir::DataDirManager},
    smtp::manager::RelayConfig,
};
use std::{sync::Arc, time::Duration};
use tracing::{error, info};

mod modules;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

static LOGO: &str = r#"
  ____        _ _    __  __       _ _
 | __ ) _   _| | | _|  \/  | __ _(_) | ___ _ __
 |  _ \| | | | | |/ / |\/| |/ _` | | |/ _ \ '__|
 | |_) | |_| | |   <| |  | | (_| | | |  __/ |
 |____/ \__,_|_|_|\_\_|  |_|\__,_|_|_|\___|_|
"#;

#[tokio::main]
async fn main() -> BulkMailerResult<()> {
    logger::initialize_logging();
    info!("{}", LOGO);
    info!("Starting bulkmailer");
    info!("Version:  {}", bulkmailer_version!());
    info!("Git:      [{}]", env!("GIT_HASH"));

    let context = match initialize().await {
        Ok(context) => context,
        Err(error) => {
            eprintln!("{:?}", error);
            return Err(error);
        }
    };

    let acceptor = bind_http_listener().await.inspect_err(|e| {
        error!("Failed to start REST server: {}", e);
    })?;

    let interval = Duration::from_secs(SETTINGS.bulkmailer_dispatch_interval_secs.max(1));
    info!("Dispatching scheduled sends every {:?}", interval);
    let dispatcher = context.dispatcher().start(interval);

    let server = tokio::spawn(start_http_server(context, acceptor));
    let result = server
        .await
        .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))
        .and_then(|served| served);
    if let Err(e) = &result {
        error!("REST server stopped with an error: {}", e);
        SIGNAL_MANAGER.shutdown();
    }

    if let Err(e) = dispatcher.await {
        error!("Dispatch loop ended abnormally: {:#?}", e);
    }
    result
}

/// Prepares the data directory, TLS and the scheduled send database, then wires
/// the shared services.
async fn initialize() -> BulkMailerResult<Arc<AppContext>> {
    SignalManager::initialize().await?;
    DataDirManager::initialize().await?;
    RelayTls::initialize().await?;
    let database = DatabaseManager::open_schedule_db()?;
    let relay = RelayConfig::from_settings();
    info!(
        "Relay: {}:{} ({}), sender <{}>",
        relay.host, relay.port, relay.encryption, relay.sender_email
    );
    Ok(Arc::new(AppContext::new(database, relay)))
}
