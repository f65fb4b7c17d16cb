//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, LinkActivity, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Row shape of a link joined with its newest click IPs.
#[derive(sqlx::FromRow)]
struct LinkActivityRow {
    #[sqlx(flatten)]
    link: Link,
    recent_ips: Vec<String>,
}

impl From<LinkActivityRow> for LinkActivity {
    fn from(row: LinkActivityRow) -> Self {
        LinkActivity {
            link: row.link,
            recent_ips: row.recent_ips,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// A key matching one row's `short_id` and another row's `alias` resolves to
/// the `short_id` match.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, short_id, original_url, alias, created_at, expires_at, click_count
            FROM links
            WHERE short_id = $1 OR alias = $1
            ORDER BY (short_id = $1) DESC
            LIMIT 1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_activity_by_key(
        &self,
        key: &str,
        limit: i64,
    ) -> Result<Option<LinkActivity>, AppError> {
        let row = sqlx::query_as::<_, LinkActivityRow>(
            r#"
            SELECT
                l.id,
                l.short_id,
                l.original_url,
                l.alias,
                l.created_at,
                l.expires_at,
                l.click_count,
                COALESCE(rc.ips, ARRAY[]::text[]) AS recent_ips
            FROM links l
            LEFT JOIN LATERAL (
                SELECT array_agg(c.ip_address ORDER BY c.created_at DESC, c.id DESC) AS ips
                FROM (
                    SELECT id, ip_address, created_at
                    FROM clicks
                    WHERE link_id = l.id
                    ORDER BY created_at DESC, id DESC
                    LIMIT $2
                ) c
            ) rc ON TRUE
            WHERE l.short_id = $1 OR l.alias = $1
            ORDER BY (l.short_id = $1) DESC
            LIMIT 1
            "#,
        )
        .bind(key)
        .bind(limit)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(LinkActivity::from))
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (short_id, original_url, alias, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, short_id, original_url, alias, created_at, expires_at, click_count
            "#,
        )
        .bind(&new_link.short_id)
        .bind(&new_link.original_url)
        .bind(&new_link.alias)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_with_recent_clicks(&self, limit: i64) -> Result<Vec<LinkActivity>, AppError> {
        let rows = sqlx::query_as::<_, LinkActivityRow>(
            r#"
            SELECT
                l.id,
                l.short_id,
                l.original_url,
                l.alias,
                l.created_at,
                l.expires_at,
                l.click_count,
                COALESCE(rc.ips, ARRAY[]::text[]) AS recent_ips
            FROM links l
            LEFT JOIN LATERAL (
                SELECT array_agg(c.ip_address ORDER BY c.created_at DESC, c.id DESC) AS ips
                FROM (
                    SELECT id, ip_address, created_at
                    FROM clicks
                    WHERE link_id = l.id
                    ORDER BY created_at DESC, id DESC
                    LIMIT $1
                ) c
            ) rc ON TRUE
            ORDER BY l.created_at DESC, l.id
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(LinkActivity::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
