//! Click analytics and link listing service.

use std::sync::Arc;

use crate::application::resolver::LinkResolver;
use crate::domain::entities::LinkActivity;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// Number of recent client IPs reported per link.
pub const RECENT_CLICKS_LIMIT: i64 = 5;

/// Click summary of a single link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAnalytics {
    pub click_count: i64,
    /// IPs of the most recent clicks, newest first.
    pub last_five_ips: Vec<String>,
}

impl From<LinkActivity> for LinkAnalytics {
    fn from(activity: LinkActivity) -> Self {
        Self {
            click_count: activity.link.click_count,
            last_five_ips: activity.recent_ips,
        }
    }
}

/// Store-wide totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSummary {
    pub links: i64,
    pub clicks: i64,
}

/// Service for read-only click statistics.
pub struct StatsService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
    resolver: LinkResolver,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self {
            resolver: LinkResolver::new(links.clone()),
            links,
            clicks,
        }
    }

    /// Returns the click count and last five IPs of the link behind `key`.
    ///
    /// Expired links are still reported.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `key`.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_analytics(&self, key: &str) -> Result<LinkAnalytics, AppError> {
        self.resolver
            .resolve_with_activity(key, RECENT_CLICKS_LIMIT)
            .await
            .map(LinkAnalytics::from)
    }

    /// Lists every link with its last five click IPs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_all(&self) -> Result<Vec<LinkActivity>, AppError> {
        self.links.list_with_recent_clicks(RECENT_CLICKS_LIMIT).await
    }

    /// Counts stored links and recorded clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn summary(&self) -> Result<StatsSummary, AppError> {
        Ok(StatsSummary {
            links: self.links.count().await?,
            clicks: self.clicks.count().await?,
        })
    }

    /// Counts stored links.
    ///
    /// Used by the health check as a database probe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.links.count().await
    }
}
