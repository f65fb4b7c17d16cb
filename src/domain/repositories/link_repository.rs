//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkActivity, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for managing short links.
///
/// Every lookup by key treats `short_id` and `alias` as a single namespace:
/// a key matches a link when it equals either column.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds the link whose `short_id` or `alias` equals `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_key(&self, key: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by key together with the IPs of its newest `limit` clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_activity_by_key(
        &self,
        key: &str,
        limit: i64,
    ) -> Result<Option<LinkActivity>, AppError>;

    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short id or alias already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Removes a link and its clicks.
    ///
    /// Returns `Ok(false)` if no link had this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Lists every link, newest first, each with the IPs of its newest
    /// `limit` clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_with_recent_clicks(&self, limit: i64) -> Result<Vec<LinkActivity>, AppError>;

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
