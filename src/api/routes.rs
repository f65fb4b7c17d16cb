//! API route configuration.

use crate::api::handlers::{
    all_links_handler, analytics_handler, delete_link_handler, health_handler, info_handler,
    redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All public routes.
///
/// # Endpoints
///
/// - `POST   /shorten`          - Create a short link
/// - `GET    /all-links`        - List links with recent click IPs
/// - `GET    /info/{key}`       - Link description
/// - `GET    /analytics/{key}`  - Click count and last five IPs
/// - `DELETE /delete/{key}`     - Delete a link and its clicks
/// - `GET    /health`           - Health check
/// - `GET    /{key}`            - Redirect (301)
///
/// Static segments take precedence over `/{key}`, which is why those words
/// are reserved as aliases.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/all-links", get(all_links_handler))
        .route("/info/{key}", get(info_handler))
        .route("/analytics/{key}", get(analytics_handler))
        .route("/delete/{key}", delete(delete_link_handler))
        .route("/health", get(health_handler))
        .route("/{key}", get(redirect_handler))
}
