//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire. Request DTOs are checked with
//! `validator` before reaching the services.

pub mod health;
pub mod link;
pub mod shorten;
