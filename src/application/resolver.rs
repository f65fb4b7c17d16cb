//! Key resolution shared by every read path.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkActivity};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Resolves a key (generated short id or alias) to a stored link.
///
/// Redirect, info, analytics and delete all go through this type so the
/// lookup rule is the same everywhere.
#[derive(Clone)]
pub struct LinkResolver {
    links: Arc<dyn LinkRepository>,
}

impl LinkResolver {
    pub fn new(links: Arc<dyn LinkRepository>) -> Self {
        Self { links }
    }

    /// Returns the link whose short id or alias equals `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, key: &str) -> Result<Link, AppError> {
        self.links
            .find_by_key(key)
            .await?
            .ok_or_else(|| not_found(key))
    }

    /// Same as [`Self::resolve`], also loading the newest `limit` click IPs.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn resolve_with_activity(
        &self,
        key: &str,
        limit: i64,
    ) -> Result<LinkActivity, AppError> {
        self.links
            .find_activity_by_key(key, limit)
            .await?
            .ok_or_else(|| not_found(key))
    }

    /// Returns true if `key` already resolves to a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn is_taken(&self, key: &str) -> Result<bool, AppError> {
        Ok(self.links.find_by_key(key).await?.is_some())
    }
}

fn not_found(key: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "key": key }))
}
