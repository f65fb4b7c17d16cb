//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::extract::ClientIp;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id or alias to its original URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// # Click Tracking
///
/// The click is recorded before the response is sent; the counter and the
/// click row are written in one transaction. The client IP is stored as
/// `unknown` when it cannot be determined.
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
/// Returns 410 Gone if the link has expired.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
) -> Result<Response, AppError> {
    let target = state.redirect_service.follow(&key, ip).await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response())
}
