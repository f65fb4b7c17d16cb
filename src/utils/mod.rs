//! Utility functions used across the application.
//!
//! - [`key_generator`] - Short id generation and alias validation
//! - [`client_ip`] - Client IP extraction from request metadata

pub mod client_ip;
pub mod key_generator;
