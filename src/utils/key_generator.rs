//! Short id generation and alias validation.
//!
//! Generated ids and aliases share one alphabet: the URL-safe base64 set
//! `A-Z a-z 0-9 - _`, so either can be used verbatim as a path segment.

use crate::error::AppError;
use base64::Engine as _;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of generated short ids.
pub const SHORT_ID_LENGTH: usize = 8;

/// Maximum alias length in characters.
pub const MAX_ALIAS_LENGTH: usize = 20;

/// Route segments an alias cannot take, since the fixed routes shadow them.
const RESERVED_KEYS: &[&str] = &["all-links", "analytics", "delete", "health", "info", "shorten"];

static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias pattern is valid"));

/// Strategy for producing candidate short ids.
///
/// Uniqueness is not the generator's concern: [`crate::application::services::LinkService`]
/// checks every candidate against storage and retries on collision.
pub trait KeyGenerator: Send + Sync {
    /// Produces a new candidate short id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no entropy is available.
    fn generate(&self) -> Result<String, AppError>;
}

/// Random URL-safe id generator backed by the OS entropy source.
///
/// Draws `ceil(length * 6 / 8)` random bytes and encodes them as URL-safe
/// base64 without padding, truncated to `length` characters.
#[derive(Debug, Clone)]
pub struct RandomKeyGenerator {
    length: usize,
}

impl RandomKeyGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomKeyGenerator {
    fn default() -> Self {
        Self::new(SHORT_ID_LENGTH)
    }
}

impl KeyGenerator for RandomKeyGenerator {
    fn generate(&self) -> Result<String, AppError> {
        let mut buffer = vec![0u8; (self.length * 6).div_ceil(8)];

        getrandom::fill(&mut buffer).map_err(|e| {
            AppError::internal(
                "Failed to generate random bytes",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let mut key = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buffer);
        key.truncate(self.length);

        Ok(key)
    }
}

/// Validates a caller-supplied alias.
///
/// # Rules
///
/// - Length: 1-20 characters
/// - Allowed characters: letters, digits, `-` and `_`
/// - Cannot be a reserved route segment
///
/// Uniqueness is checked separately against storage.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    let length = alias.chars().count();

    if length == 0 || length > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            "Alias max length is 20 characters",
            json!({ "provided_length": length, "max_length": MAX_ALIAS_LENGTH }),
        ));
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(AppError::bad_request(
            "Alias can only contain letters, digits, hyphens and underscores",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_KEYS.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_default_length() {
        let key = RandomKeyGenerator::default().generate().unwrap();
        assert_eq!(key.len(), SHORT_ID_LENGTH);
    }

    #[test]
    fn test_generate_custom_length() {
        for length in [1, 5, 8, 11, 16] {
            let key = RandomKeyGenerator::new(length).generate().unwrap();
            assert_eq!(key.len(), length);
        }
    }

    #[test]
    fn test_generate_url_safe_characters() {
        let generator = RandomKeyGenerator::default();
        for _ in 0..100 {
            let key = generator.generate().unwrap();
            assert!(
                key.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "unexpected character in {key}"
            );
        }
    }

    #[test]
    fn test_generated_keys_pass_alias_rules() {
        let key = RandomKeyGenerator::default().generate().unwrap();
        assert!(ALIAS_REGEX.is_match(&key));
    }

    #[test]
    fn test_generate_produces_unique_keys() {
        let generator = RandomKeyGenerator::default();
        let keys: HashSet<String> = (0..1000).map(|_| generator.generate().unwrap()).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_validate_alias_accepts_max_length() {
        assert!(validate_alias("abcdefghijklmnopqrst").is_ok());
    }

    #[test]
    fn test_validate_alias_rejects_too_long() {
        let err = validate_alias("abcdefghijklmnopqrstu").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("20 characters"));
    }

    #[test]
    fn test_validate_alias_rejects_empty() {
        assert!(validate_alias("").is_err());
    }

    #[test]
    fn test_validate_alias_mixed_case_and_symbols() {
        assert!(validate_alias("Ex_1-promo").is_ok());
    }

    #[test]
    fn test_validate_alias_rejects_path_characters() {
        assert!(validate_alias("a/b").is_err());
        assert!(validate_alias("a b").is_err());
        assert!(validate_alias("promo?x=1").is_err());
    }

    #[test]
    fn test_validate_alias_rejects_reserved() {
        for &reserved in RESERVED_KEYS {
            assert!(
                validate_alias(reserved).is_err(),
                "Reserved key '{}' should be invalid",
                reserved
            );
        }
    }
}
