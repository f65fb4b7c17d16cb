//! PostgreSQL implementation of click repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{PgConnection, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click accounting.
///
/// The counter increment and the click insert run inside one transaction.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Adds one to the link's counter in a single statement.
///
/// Returns `false` if the link does not exist.
async fn increment_click_count(conn: &mut PgConnection, link_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE id = $1")
        .bind(link_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() == 1)
}

async fn insert_click(conn: &mut PgConnection, new_click: &NewClick) -> Result<Click, sqlx::Error> {
    sqlx::query_as::<_, Click>(
        r#"
        INSERT INTO clicks (link_id, ip_address)
        VALUES ($1, $2)
        RETURNING id, link_id, ip_address, created_at
        "#,
    )
    .bind(new_click.link_id)
    .bind(&new_click.ip_address)
    .fetch_one(&mut *conn)
    .await
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tx = self.pool.begin().await?;

        if !increment_click_count(&mut *tx, new_click.link_id).await? {
            // Dropping the transaction rolls it back.
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": new_click.link_id }),
            ));
        }

        let click = insert_click(&mut *tx, &new_click).await?;

        tx.commit().await?;

        Ok(click)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
