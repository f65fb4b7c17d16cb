//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::services::CreateLink;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional expiry timestamp (RFC 3339). After it, redirects return 410 Gone.
    pub expires_at: Option<DateTime<Utc>>,

    /// Optional caller-chosen key, used in place of a generated short id.
    #[validate(length(max = 20, message = "Alias max length is 20 characters"))]
    pub alias: Option<String>,
}

impl From<ShortenRequest> for CreateLink {
    fn from(request: ShortenRequest) -> Self {
        CreateLink {
            original_url: request.original_url,
            expires_at: request.expires_at,
            alias: request.alias,
        }
    }
}

/// Response for a created link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub id: Uuid,
    pub short_id: String,
    pub short_url: String,
}
