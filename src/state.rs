//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::config::Config;
use crate::domain::entities::Link;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::utils::key_generator::{KeyGenerator, RandomKeyGenerator};

/// HTTP-facing settings carried in [`AppState`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Prefix of every `shortUrl`, without trailing slash.
    pub base_url: String,
    pub behind_proxy: bool,
    pub key_generation_attempts: usize,
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            behind_proxy: config.behind_proxy,
            key_generation_attempts: config.key_generation_attempts,
        }
    }
}

/// Application state cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub stats_service: Arc<StatsService>,
    pub base_url: String,
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires services over the given repositories with the default key generator.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickRepository>,
        settings: AppSettings,
    ) -> Self {
        Self::with_generator(
            links,
            clicks,
            Arc::new(RandomKeyGenerator::default()),
            settings,
        )
    }

    /// Wires services with an explicit short id generator.
    pub fn with_generator(
        links: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickRepository>,
        generator: Arc<dyn KeyGenerator>,
        settings: AppSettings,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(
                links.clone(),
                generator,
                settings.key_generation_attempts,
            )),
            redirect_service: Arc::new(RedirectService::new(links.clone(), clicks.clone())),
            stats_service: Arc::new(StatsService::new(links, clicks)),
            base_url: settings.base_url,
            behind_proxy: settings.behind_proxy,
        }
    }

    /// Public short URL of `link`.
    pub fn short_url(&self, link: &Link) -> String {
        format!("{}/{}", self.base_url, link.public_key())
    }
}
