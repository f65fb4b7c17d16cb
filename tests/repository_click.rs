//! PostgreSQL click repository tests.
//!
//! Needs `DATABASE_URL`; each test runs in a fresh migrated database.

use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use linktally::AppError;
use linktally::domain::entities::{NewClick, NewLink};
use linktally::domain::repositories::{ClickRepository, LinkRepository};
use linktally::infrastructure::persistence::{PgClickRepository, PgLinkRepository};

async fn seed_link(pool: &PgPool) -> Uuid {
    let links = PgLinkRepository::new(Arc::new(pool.clone()));
    links
        .create(NewLink {
            short_id: "abc12345".to_string(),
            original_url: "https://example.com".to_string(),
            alias: None,
            expires_at: None,
        })
        .await
        .unwrap()
        .id
}

#[sqlx::test]
async fn test_record_click_increments_counter(pool: PgPool) {
    let link_id = seed_link(&pool).await;
    let clicks = PgClickRepository::new(Arc::new(pool.clone()));

    let click = clicks
        .record_click(NewClick::new(link_id, Some("10.0.0.1".to_string())))
        .await
        .unwrap();

    assert_eq!(click.link_id, link_id);
    assert_eq!(click.ip_address, "10.0.0.1");

    let count: i64 = sqlx::query_scalar("SELECT click_count FROM links WHERE id = $1")
        .bind(link_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(clicks.count().await.unwrap(), 1);
}

#[sqlx::test]
async fn test_record_click_for_missing_link_rolls_back(pool: PgPool) {
    let clicks = PgClickRepository::new(Arc::new(pool));

    let err = clicks
        .record_click(NewClick::new(Uuid::new_v4(), None))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(clicks.count().await.unwrap(), 0);
}

#[sqlx::test]
async fn test_concurrent_clicks_are_all_counted(pool: PgPool) {
    let link_id = seed_link(&pool).await;
    let clicks = Arc::new(PgClickRepository::new(Arc::new(pool.clone())));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let clicks = clicks.clone();
            tokio::spawn(async move {
                clicks
                    .record_click(NewClick::new(link_id, Some(format!("10.0.1.{i}"))))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let count: i64 = sqlx::query_scalar("SELECT click_count FROM links WHERE id = $1")
        .bind(link_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 20);
    assert_eq!(clicks.count().await.unwrap(), 20);
}
