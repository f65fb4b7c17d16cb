//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A shortened URL link with its click counter.
///
/// `short_id` is always resolvable. When the link was created with an alias,
/// `short_id` holds the alias as well, so both lookups land on the same row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub id: Uuid,
    pub short_id: String,
    pub original_url: String,
    pub alias: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub click_count: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: Uuid,
        short_id: String,
        original_url: String,
        alias: Option<String>,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        click_count: i64,
    ) -> Self {
        Self {
            id,
            short_id,
            original_url,
            alias,
            created_at,
            expires_at,
            click_count,
        }
    }

    /// Returns true if the link lapsed strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e < now)
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Key used when composing the public short URL.
    ///
    /// Always the short id; an alias is stored as the short id.
    pub fn public_key(&self) -> &str {
        &self.short_id
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_id: String,
    pub original_url: String,
    pub alias: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// A link together with the IPs of its most recent clicks, newest first.
#[derive(Debug, Clone)]
pub struct LinkActivity {
    pub link: Link,
    pub recent_ips: Vec<String>,
}
