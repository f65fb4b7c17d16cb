//! Repository trait definitions for the domain layer.
//!
//! These traits are the persistence contract the application services rely on.
//! Concrete implementations live in `crate::infrastructure::persistence`;
//! mock implementations are generated via `mockall` for unit tests.
//!
//! - [`LinkRepository`] - Link lookup, creation, deletion and listing
//! - [`ClickRepository`] - Atomic click recording
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod click_repository;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
