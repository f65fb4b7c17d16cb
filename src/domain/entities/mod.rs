//! Core domain entities.
//!
//! - [`Link`] - A shortened URL mapping with its click counter
//! - [`Click`] - A recorded redirect against a link
//!
//! Creation inputs live in separate structs ([`NewLink`], [`NewClick`]);
//! [`LinkActivity`] pairs a link with its most recent click IPs.

pub mod click;
pub mod link;

pub use click::{Click, NewClick, UNKNOWN_IP};
pub use link::{Link, LinkActivity, NewLink};
