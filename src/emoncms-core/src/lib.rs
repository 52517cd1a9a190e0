//! emoncms Core Library
//!
//! Shared types for talking to an emoncms server:
//! - Client configuration
//! - The uniform request result shape
//! - Feed objects and the server's `{success, message}` envelope

pub mod config;
pub mod models;

// Re-export commonly used types
pub use config::ClientConfig;
pub use models::*;
