use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/login/status",
            get(handlers::login_throttle::login_status_handler),
        )
        .route(
            "/api/login/permit",
            post(handlers::login_throttle::login_permit_handler),
        )
        .route(
            "/api/login/failures",
            post(handlers::login_throttle::record_login_failure_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
