//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "expiresAt": "2030-01-01T00:00:00Z",  // optional
///   "alias": "ex1"                         // optional, max 20 characters
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": "6f1c0c8e-5d0a-4a53-9a34-2b0c8f0f4f11",
///   "shortId": "ex1",
///   "shortUrl": "http://localhost:3001/ex1"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for malformed JSON or invalid fields.
/// Returns 409 Conflict if the alias is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state.link_service.create_link(payload.into()).await?;

    let response = ShortenResponse {
        id: link.id,
        short_url: state.short_url(&link),
        short_id: link.short_id,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
