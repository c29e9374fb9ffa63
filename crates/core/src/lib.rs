//! kbchat core library
//!
//! This crate provides the foundational utilities for the kbchat CLI:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Startup configuration (environment + optional config file)

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
