//! Redirect resolution and click recording.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::application::resolver::LinkResolver;
use crate::domain::entities::NewClick;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// Service turning a key into a redirect target while accounting the click.
///
/// # Request Flow
///
/// 1. Resolve the key (short id or alias)
/// 2. Reject links whose `expires_at` is strictly before now
/// 3. Record the click and increment the counter in one storage transaction
/// 4. Return the original URL
///
/// Expired or missing links leave the counter and click rows untouched.
pub struct RedirectService {
    resolver: LinkResolver,
    clicks: Arc<dyn ClickRepository>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self {
            resolver: LinkResolver::new(links),
            clicks,
        }
    }

    /// Follows `key` at the current time.
    ///
    /// `client_ip` is stored as `"unknown"` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `key`.
    /// Returns [`AppError::Expired`] if the link has lapsed.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn follow(&self, key: &str, client_ip: Option<String>) -> Result<String, AppError> {
        self.follow_at(key, client_ip, Utc::now()).await
    }

    /// Follows `key` as of `now`.
    ///
    /// # Errors
    ///
    /// See [`Self::follow`].
    pub async fn follow_at(
        &self,
        key: &str,
        client_ip: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let link = self.resolver.resolve(key).await?;
        tracing::debug!(key, link_id = %link.id, "Resolved redirect key");

        if link.is_expired_at(now) {
            tracing::debug!(key, expires_at = ?link.expires_at, "Link expired");
            return Err(AppError::expired(
                "Link expired",
                json!({ "key": key, "expires_at": link.expires_at }),
            ));
        }

        let click = self
            .clicks
            .record_click(NewClick::new(link.id, client_ip))
            .await?;

        tracing::info!(
            link_id = %link.id,
            click_id = click.id,
            ip = %click.ip_address,
            "Click recorded"
        );

        Ok(link.original_url)
    }
}
