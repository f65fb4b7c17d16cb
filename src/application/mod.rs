//! Application layer implementing the link lifecycle.
//!
//! Services consume repository traits through injected handles and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! - [`resolver::LinkResolver`] - Shared short id / alias lookup
//! - [`services::LinkService`] - Link creation, info and deletion
//! - [`services::RedirectService`] - Expiration check and click recording
//! - [`services::StatsService`] - Analytics and listing projections

pub mod resolver;
pub mod services;
