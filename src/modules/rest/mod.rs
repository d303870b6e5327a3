// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::common::error::ErrorCapture;
use crate::modules::common::log::Tracing;
use crate::modules::common::signal::SIGNAL_MANAGER;
use crate::modules::context::AppContext;
use crate::modules::error::code::ErrorCode;
use crate::modules::error::handler::error_handler;
use crate::modules::error::BulkMailerResult;
use crate::modules::settings::cli::SETTINGS;

use super::error::ApiErrorResponse;
use crate::raise_error;
use api::create_openapi_service;
use poem::listener::{Listener, TcpAcceptor, TcpListener};
use poem::middleware::CatchPanic;
use poem::{middleware::Cors, Endpoint, EndpointExt, Route, Server};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub mod api;

pub type ApiResult<T, E = ApiErrorResponse> = std::result::Result<T, E>;

const DESCRIPTION: &str = r#"
    Sends one message to a batch of recipients through an SMTP relay.

    Messages go out immediately, or are stored and delivered by a background dispatcher once their scheduled time has passed.
"#;

/// Builds the full route tree around the shared application context.
pub fn build_routes(context: Arc<AppContext>) -> impl Endpoint {
    let api_service = create_openapi_service()
        .description(DESCRIPTION)
        .summary("Bulk email sending with scheduled delivery");

    let swagger = api_service.swagger_ui();
    let spec_json = api_service.spec_endpoint();

    let open_api_route = Route::new()
        .nest_no_strip("/api/v1", api_service)
        .with(ErrorCapture)
        .with(Tracing);

    let cors = cors_policy(
        &SETTINGS.bulkmailer_cors_origins,
        SETTINGS.bulkmailer_cors_max_age,
    );

    Route::new()
        .nest("/api-docs/swagger", swagger)
        .nest("/api-docs/spec.json", spec_json)
        .nest_no_strip("/api/v1", open_api_route)
        .with(cors)
        .with(CatchPanic::new())
        .data(context)
        .catch_all_error(error_handler)
}

/// CORS for the configured origins. An empty set or `*` admits any origin.
pub(crate) fn cors_policy(origins: &HashSet<String>, max_age: i32) -> Cors {
    let mut cors = Cors::new();
    if !origins.is_empty() && !origins.contains("*") {
        cors = cors.allow_origins(origins.iter().cloned());
    }
    cors.allow_credentials(true)
        .allow_methods(vec!["GET", "POST", "OPTIONS", "HEAD"])
        .allow_headers(vec!["Content-Type", "Authorization"])
        .expose_headers(vec!["Accept"])
        .max_age(max_age)
}

/// Binds the HTTP port configured in settings.
pub async fn bind_http_listener() -> BulkMailerResult<TcpAcceptor> {
    let ip = SETTINGS
        .bulkmailer_bind_ip
        .clone()
        .unwrap_or("0.0.0.0".into());
    bind_acceptor(ip, SETTINGS.bulkmailer_http_port).await
}

pub(crate) async fn bind_acceptor(ip: String, port: u16) -> BulkMailerResult<TcpAcceptor> {
    TcpListener::bind((ip.clone(), port))
        .into_acceptor()
        .await
        .map_err(|e| {
            raise_error!(
                format!("Failed to bind {}:{}: {:#?}", ip, port, e),
                ErrorCode::InternalError
            )
        })
}

/// Serves the API on an already bound acceptor until shutdown is signalled.
pub async fn start_http_server(
    context: Arc<AppContext>,
    acceptor: TcpAcceptor,
) -> BulkMailerResult<()> {
    let mut shutdown = SIGNAL_MANAGER.subscribe();
    let server = Server::new_with_acceptor(acceptor)
        .name("BulkMailer API Service")
        .idle_timeout(Duration::from_secs(60))
        .run_with_graceful_shutdown(
            build_routes(context),
            async move {
                let _ = shutdown.recv().await;
            },
            Some(Duration::from_secs(5)),
        );
    info!(
        "BulkMailer API Service is now running on port {}.",
        SETTINGS.bulkmailer_http_port
    );
    server
        .await
        .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))
}
