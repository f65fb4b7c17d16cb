#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::Request;
use axum::{Extension, Router, ServiceExt};
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use linktally::AppError;
use linktally::api::routes::routes;
use linktally::routes::app_router;
use linktally::domain::entities::{Click, Link, LinkActivity, NewClick, NewLink};
use linktally::domain::repositories::{ClickRepository, LinkRepository};
use linktally::state::{AppSettings, AppState};
use linktally::utils::key_generator::KeyGenerator;

pub const BASE_URL: &str = "http://sho.rt";

/// Links and clicks shared by [`MemoryLinkRepository`] and [`MemoryClickRepository`].
#[derive(Default)]
pub struct MemoryStore {
    links: Vec<Link>,
    clicks: Vec<Click>,
    next_click_id: i64,
    pub fail: bool,
}

impl MemoryStore {
    fn check(&self) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }

    fn find(&self, key: &str) -> Option<&Link> {
        self.links
            .iter()
            .find(|l| l.short_id == key)
            .or_else(|| self.links.iter().find(|l| l.alias.as_deref() == Some(key)))
    }

    fn recent_ips(&self, link_id: Uuid, limit: i64) -> Vec<String> {
        let mut clicks: Vec<&Click> = self.clicks.iter().filter(|c| c.link_id == link_id).collect();
        clicks.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        clicks
            .into_iter()
            .take(limit as usize)
            .map(|c| c.ip_address.clone())
            .collect()
    }

    fn activity(&self, link: &Link, limit: i64) -> LinkActivity {
        LinkActivity {
            link: link.clone(),
            recent_ips: self.recent_ips(link.id, limit),
        }
    }

    pub fn clicks_for(&self, link_id: Uuid) -> usize {
        self.clicks.iter().filter(|c| c.link_id == link_id).count()
    }

    pub fn total_clicks(&self) -> usize {
        self.clicks.len()
    }

    pub fn link(&self, key: &str) -> Option<Link> {
        self.find(key).cloned()
    }
}

pub type SharedStore = Arc<Mutex<MemoryStore>>;

pub struct MemoryLinkRepository {
    store: SharedStore,
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<Link>, AppError> {
        let store = self.store.lock().unwrap();
        store.check()?;
        Ok(store.find(key).cloned())
    }

    async fn find_activity_by_key(
        &self,
        key: &str,
        limit: i64,
    ) -> Result<Option<LinkActivity>, AppError> {
        let store = self.store.lock().unwrap();
        store.check()?;
        Ok(store.find(key).map(|link| store.activity(link, limit)))
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut store = self.store.lock().unwrap();
        store.check()?;

        let taken = store.links.iter().any(|l| {
            l.short_id == new_link.short_id
                || (new_link.alias.is_some() && l.alias == new_link.alias)
        });
        if taken {
            return Err(AppError::conflict(
                "Short id or alias already exists",
                json!({ "short_id": new_link.short_id }),
            ));
        }

        let link = Link::new(
            Uuid::new_v4(),
            new_link.short_id,
            new_link.original_url,
            new_link.alias,
            Utc::now(),
            new_link.expires_at,
            0,
        );
        store.links.push(link.clone());

        Ok(link)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut store = self.store.lock().unwrap();
        store.check()?;

        let before = store.links.len();
        store.links.retain(|l| l.id != id);
        store.clicks.retain(|c| c.link_id != id);

        Ok(store.links.len() < before)
    }

    async fn list_with_recent_clicks(&self, limit: i64) -> Result<Vec<LinkActivity>, AppError> {
        let store = self.store.lock().unwrap();
        store.check()?;

        let mut links: Vec<&Link> = store.links.iter().collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(links
            .into_iter()
            .map(|link| store.activity(link, limit))
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let store = self.store.lock().unwrap();
        store.check()?;
        Ok(store.links.len() as i64)
    }
}

pub struct MemoryClickRepository {
    store: SharedStore,
}

#[async_trait]
impl ClickRepository for MemoryClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut store = self.store.lock().unwrap();
        store.check()?;

        let Some(link) = store.links.iter_mut().find(|l| l.id == new_click.link_id) else {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": new_click.link_id }),
            ));
        };
        link.click_count += 1;

        store.next_click_id += 1;
        let click = Click::new(
            store.next_click_id,
            new_click.link_id,
            new_click.ip_address,
            Utc::now(),
        );
        store.clicks.push(click.clone());

        Ok(click)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let store = self.store.lock().unwrap();
        store.check()?;
        Ok(store.clicks.len() as i64)
    }
}

/// Generator replaying a fixed list of ids, then repeating the last one.
pub struct FixedKeyGenerator {
    keys: Mutex<Vec<String>>,
}

impl FixedKeyGenerator {
    pub fn new(keys: &[&str]) -> Self {
        Self {
            keys: Mutex::new(keys.iter().rev().map(|k| k.to_string()).collect()),
        }
    }
}

impl KeyGenerator for FixedKeyGenerator {
    fn generate(&self) -> Result<String, AppError> {
        let mut keys = self.keys.lock().unwrap();
        let key = if keys.len() > 1 {
            keys.pop()
        } else {
            keys.last().cloned()
        };
        Ok(key.unwrap_or_else(|| "fixed001".to_string()))
    }
}

pub fn settings(behind_proxy: bool) -> AppSettings {
    AppSettings {
        base_url: BASE_URL.to_string(),
        behind_proxy,
        key_generation_attempts: 5,
    }
}

pub fn create_test_state() -> (AppState, SharedStore) {
    create_test_state_with(settings(false), None)
}

pub fn create_test_state_with(
    settings: AppSettings,
    generator: Option<Arc<dyn KeyGenerator>>,
) -> (AppState, SharedStore) {
    let store: SharedStore = Arc::new(Mutex::new(MemoryStore::default()));
    let links = Arc::new(MemoryLinkRepository {
        store: store.clone(),
    });
    let clicks = Arc::new(MemoryClickRepository {
        store: store.clone(),
    });

    let state = match generator {
        Some(generator) => AppState::with_generator(links, clicks, generator, settings),
        None => AppState::new(links, clicks, settings),
    };

    (state, store)
}

/// Full route table over `state`, with `peer` as the connection address when given.
pub fn test_server(state: AppState, peer: Option<SocketAddr>) -> TestServer {
    let mut app: Router = routes().with_state(state);
    if let Some(addr) = peer {
        app = app.layer(Extension(ConnectInfo(addr)));
    }

    TestServer::new(app).unwrap()
}

/// The production router (tracing, trailing-slash normalization) served over
/// a real socket with connect info, as `server::run` does.
pub fn app_server(state: AppState) -> TestServer {
    let app = ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(
        app_router(state),
    );

    TestServer::builder().http_transport().build(app).unwrap()
}

pub fn insert_link(
    store: &SharedStore,
    short_id: &str,
    url: &str,
    expires_at: Option<DateTime<Utc>>,
) -> Link {
    let link = Link::new(
        Uuid::new_v4(),
        short_id.to_string(),
        url.to_string(),
        None,
        Utc::now(),
        expires_at,
        0,
    );
    store.lock().unwrap().links.push(link.clone());
    link
}
