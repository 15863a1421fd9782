// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use qr_redirect_server::{
    api::router, config::AppConfig, error::ServerError, state::AppState, telemetry,
};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Local development convenience; production sets real environment variables.
    dotenvy::dotenv().ok();

    // Fails before anything binds if API_KEY is unset or a value is malformed.
    let config = AppConfig::from_env()?;
    telemetry::init(&config.server)?;

    let addr = config.server.bind_addr();
    tracing::info!(
        default_target = %config.default_target_url,
        debug = config.server.debug,
        "Starting QR redirect server"
    );

    let app = router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
