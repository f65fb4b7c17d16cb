//! DTOs for link info, analytics and listing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::services::{LinkAnalytics, LinkInfo};

/// Public description of a link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkInfoResponse {
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
}

impl From<LinkInfo> for LinkInfoResponse {
    fn from(info: LinkInfo) -> Self {
        Self {
            original_url: info.original_url,
            created_at: info.created_at,
            click_count: info.click_count,
        }
    }
}

/// Click summary of a link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub click_count: i64,
    pub last_five_ips: Vec<String>,
}

impl From<LinkAnalytics> for AnalyticsResponse {
    fn from(analytics: LinkAnalytics) -> Self {
        Self {
            click_count: analytics.click_count,
            last_five_ips: analytics.last_five_ips,
        }
    }
}

/// One entry of the all-links listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkListItem {
    pub id: Uuid,
    pub original_url: String,
    pub short_url: String,
    pub short_id: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_five_ips: Vec<String>,
}
