//! Handler for per-link analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::link::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click count and the five most recent client IPs of a link.
///
/// # Endpoint
///
/// `GET /analytics/{key}`
///
/// # Response
///
/// ```json
/// {
///   "clickCount": 7,
///   "lastFiveIps": ["10.0.0.7", "10.0.0.6", "10.0.0.5", "10.0.0.4", "10.0.0.3"]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
pub async fn analytics_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let analytics = state.stats_service.get_analytics(&key).await?;

    Ok(Json(analytics.into()))
}
