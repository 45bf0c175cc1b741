//! Login throttle endpoints used by the authentication flow.
//!
//! Every endpoint keys the throttle on the client behind the request, derived
//! from the peer address and `X-Forwarded-For`.

use std::net::SocketAddr;

use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use login_throttle_core::AppError;
use tracing::info;

use crate::dto::{LoginStatusResponse, retry_after_seconds};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;


pub async fn login_status_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> ApiResult<Json<LoginStatusResponse>> {
    let client_key = state.client_key_resolver.resolve(&headers, peer.ip())?;
    let status = state.login_throttle.status(&client_key);

    Ok(Json(LoginStatusResponse::from_status(
        status,
        state.login_throttle.policy(),
    )))
}

/// Answers `204` when the client may attempt a login and `429` while it is
/// blocked.
pub async fn login_permit_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let client_key = state.client_key_resolver.resolve(&headers, peer.ip())?;
    let status = state.login_throttle.status(&client_key);

    if !status.blocked {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    info!(client_key = %client_key, "rejected login attempt from blocked client");

    let notice = state.login_throttle.policy().block_notice();
    let mut response = ApiError::from(AppError::RateLimited(notice)).into_response();
    if let Some(remaining) = status.retry_after {
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from(retry_after_seconds(remaining)));
    }

    Ok(response)
}

/// Records a failed authentication and answers with the unauthorized error
/// the authentication flow returns to its client.
pub async fn record_login_failure_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> ApiError {
    let client_key = match state.client_key_resolver.resolve(&headers, peer.ip()) {
        Ok(client_key) => client_key,
        Err(error) => return error.into(),
    };
    state.login_throttle.record_failure(&client_key);

    let error = ApiError::from(AppError::Unauthorized("authentication failed".to_owned()));
    if state.login_throttle.is_blocked(&client_key) {
        return error.with_blocked_request(state.login_throttle.policy().block_notice());
    }

    error
}
