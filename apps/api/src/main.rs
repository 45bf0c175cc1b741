//! Login throttle API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod attempt_sweeper;
mod client_key;
mod dto;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use login_throttle_application::LoginThrottleService;
use login_throttle_core::AppError;
use login_throttle_infrastructure::{InMemoryAttemptStore, SystemClock};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::api_config::{ApiConfig, init_tracing};
use crate::attempt_sweeper::spawn_attempt_sweeper;
use crate::client_key::ClientKeyResolver;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let policy = config.throttle_policy()?;

    let login_throttle = LoginThrottleService::new(
        Arc::new(InMemoryAttemptStore::new()),
        Arc::new(SystemClock),
        policy,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = spawn_attempt_sweeper(login_throttle.clone(), config.sweep_interval, shutdown_rx);

    let app_state = AppState::new(
        login_throttle,
        ClientKeyResolver::new(config.trusted_proxies.clone()),
    );
    let app = api_router::build_router(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        %address,
        max_attempts = policy.max_attempts(),
        ban_seconds = policy.ban_duration().as_secs(),
        trusted_proxies = config.trusted_proxies.len(),
        "login-throttle-api listening"
    );

    let served = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|error| AppError::Internal(format!("api server error: {error}")));

    if shutdown_tx.send(true).is_err() {
        warn!("login attempt sweeper already stopped");
    }
    if let Err(error) = sweeper.await {
        error!(error = %error, "login attempt sweeper task failed");
    }

    served
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }

    info!("shutdown signal received");
}
