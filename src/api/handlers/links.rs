//! Handlers for link inspection, listing and deletion.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::link::{LinkInfoResponse, LinkListItem};
use crate::error::AppError;
use crate::state::AppState;

/// Describes a link.
///
/// # Endpoint
///
/// `GET /info/{key}`
///
/// Expired links are still described.
///
/// # Response
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "createdAt": "2024-05-01T12:00:00.000Z",
///   "clickCount": 1
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
pub async fn info_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkInfoResponse>, AppError> {
    let info = state.link_service.get_info(&key).await?;

    Ok(Json(info.into()))
}

/// Lists every link with its last five click IPs.
///
/// # Endpoint
///
/// `GET /all-links`
///
/// `shortUrl` is built the same way as in the creation response.
pub async fn all_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkListItem>>, AppError> {
    let links = state.stats_service.list_all().await?;

    let items = links
        .into_iter()
        .map(|activity| LinkListItem {
            id: activity.link.id,
            short_url: state.short_url(&activity.link),
            original_url: activity.link.original_url,
            short_id: activity.link.short_id,
            created_at: activity.link.created_at,
            click_count: activity.link.click_count,
            last_five_ips: activity.recent_ips,
        })
        .collect();

    Ok(Json(items))
}

/// Deletes a link and its click history.
///
/// # Endpoint
///
/// `DELETE /delete/{key}`
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
pub async fn delete_link_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&key).await?;

    Ok(StatusCode::NO_CONTENT)
}
