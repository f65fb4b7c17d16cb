//! Click entity representing a single recorded redirect.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// IP recorded when the client address could not be determined.
pub const UNKNOWN_IP: &str = "unknown";

/// A click event recorded when a shortened link is followed.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: Uuid,
    pub ip_address: String,
    pub created_at: DateTime<Utc>,
}

impl Click {
    /// Creates a new Click instance.
    pub fn new(id: i64, link_id: Uuid, ip_address: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            link_id,
            ip_address,
            created_at,
        }
    }
}

/// Input data for recording a new click.
///
/// The timestamp is set by the storage layer.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: Uuid,
    pub ip_address: String,
}

impl NewClick {
    /// Builds a click for `link_id`, falling back to [`UNKNOWN_IP`].
    pub fn new(link_id: Uuid, ip_address: Option<String>) -> Self {
        Self {
            link_id,
            ip_address: ip_address
                .filter(|ip| !ip.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_IP.to_string()),
        }
    }
}
