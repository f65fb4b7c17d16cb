//! Link creation, inspection and deletion service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use url::Url;

use crate::application::resolver::LinkResolver;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::key_generator::{KeyGenerator, validate_alias};

/// Default number of generated candidates tried before giving up.
pub const DEFAULT_KEY_GENERATION_ATTEMPTS: usize = 5;

/// Validated input for creating a link.
#[derive(Debug, Clone)]
pub struct CreateLink {
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub alias: Option<String>,
}

/// Read-only view of a link returned by [`LinkService::get_info`].
///
/// Expired links are still described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
}

impl From<Link> for LinkInfo {
    fn from(link: Link) -> Self {
        Self {
            original_url: link.original_url,
            created_at: link.created_at,
            click_count: link.click_count,
        }
    }
}

/// Service for creating, describing and deleting shortened links.
///
/// Aliases and generated short ids live in one namespace: an alias is
/// stored as the link's short id, and every candidate key is checked against
/// both columns before insertion.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    resolver: LinkResolver,
    generator: Arc<dyn KeyGenerator>,
    max_attempts: usize,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        generator: Arc<dyn KeyGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            resolver: LinkResolver::new(links.clone()),
            links,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Creates a short link.
    ///
    /// # Key Selection
    ///
    /// - If `alias` is provided, it is validated and used as the short id
    /// - Otherwise a random short id is generated, retrying up to
    ///   `max_attempts` times while the candidate is already taken
    ///
    /// An empty alias counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `original_url` is empty or not an absolute HTTP(S) URL
    /// - The alias is too long, malformed or reserved
    ///
    /// Returns [`AppError::Conflict`] if the alias is already used as a short
    /// id or alias, or if no free short id could be generated.
    pub async fn create_link(&self, input: CreateLink) -> Result<Link, AppError> {
        let original_url = validate_original_url(&input.original_url)?;
        let alias = input.alias.filter(|a| !a.is_empty());

        let short_id = if let Some(alias) = &alias {
            validate_alias(alias)?;

            if self.resolver.is_taken(alias).await? {
                return Err(AppError::conflict(
                    "Alias already in use",
                    json!({ "alias": alias }),
                ));
            }

            alias.clone()
        } else {
            self.generate_unique_key().await?
        };

        let new_link = NewLink {
            short_id,
            original_url,
            alias,
            expires_at: input.expires_at,
        };

        let link = self.links.create(new_link).await?;

        tracing::info!(
            link_id = %link.id,
            short_id = %link.short_id,
            aliased = link.alias.is_some(),
            "Link created"
        );

        Ok(link)
    }

    /// Describes the link behind `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `key`.
    pub async fn get_info(&self, key: &str) -> Result<LinkInfo, AppError> {
        self.resolver.resolve(key).await.map(LinkInfo::from)
    }

    /// Deletes the link behind `key` together with its clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `key`, including
    /// when a concurrent delete removed it first.
    pub async fn delete_link(&self, key: &str) -> Result<(), AppError> {
        let link = self.resolver.resolve(key).await?;

        if !self.links.delete(link.id).await? {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "key": key }),
            ));
        }

        tracing::info!(link_id = %link.id, short_id = %link.short_id, "Link deleted");

        Ok(())
    }

    /// Generates a short id that does not resolve to any link yet.
    async fn generate_unique_key(&self) -> Result<String, AppError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate()?;

            if !self.resolver.is_taken(&candidate).await? {
                return Ok(candidate);
            }

            tracing::warn!(attempt, candidate = %candidate, "Generated short id collided");
        }

        Err(AppError::conflict(
            "Failed to generate a unique short id",
            json!({ "attempts": self.max_attempts }),
        ))
    }
}

/// Checks that the destination is a non-empty absolute HTTP(S) URL.
fn validate_original_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            "originalUrl is required",
            json!({ "field": "originalUrl" }),
        ));
    }

    let parsed = Url::parse(trimmed).map_err(|e| {
        AppError::bad_request(
            "Invalid URL format",
            json!({ "field": "originalUrl", "reason": e.to_string() }),
        )
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::bad_request(
            "Only http and https URLs can be shortened",
            json!({ "scheme": parsed.scheme() }),
        ));
    }

    // Store the serialized form: tabs and newlines dropped, non-ASCII
    // percent-encoded, so it is always a valid `Location` value.
    Ok(parsed.to_string())
}
