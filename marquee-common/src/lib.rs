//! # Marquee Common Library
//!
//! Shared code for the Marquee listing directory:
//! - Error types
//! - Configuration loading (database path resolution)
//! - Database initialization and schema
//! - Canonical timestamp handling

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
