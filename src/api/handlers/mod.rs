//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod health;
pub mod links;
pub mod redirect;
pub mod shorten;

pub use analytics::analytics_handler;
pub use health::health_handler;
pub use links::{all_links_handler, delete_link_handler, info_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
