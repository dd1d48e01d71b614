//! Server mode
//!
//! Builds the alias registry, starts the sweeper and serves the HTTP API
//! until the server exits or a shutdown signal arrives.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::services::{AppStartTime, configure_routes};
use crate::config::get_config;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let config = get_config();
    let startup = lifetime::startup::prepare_server_startup(&config);
    let link_service = startup.link_service.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count)
    .disable_signals()
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    warn!("Starting server at http://{}", bind_address);
    let server_handle = server.handle();

    // Wait for server or shutdown signal
    let result = tokio::select! {
        res = server => res.context("HTTP server error"),
        _ = lifetime::shutdown::listen_for_shutdown() => {
            server_handle.stop(true).await;
            Ok(())
        }
    };

    lifetime::shutdown::perform_shutdown_tasks(startup.sweeper).await;
    warn!(
        "Graceful shutdown complete ({} alias(es) discarded)",
        startup.registry.len()
    );

    result
}
