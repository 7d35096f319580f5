//! Scrabble Words - word lookup microservice
//!
//! This crate serves two read-only lookups against a dictionary of valid
//! Scrabble words stored in MySQL: a uniformly random word (optionally of a
//! given length) and validation of a supplied word.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod repository;
pub mod service;
pub mod types;
pub mod words;

// Re-export commonly used types and traits
pub use error::{Result, WordServiceError};
pub use types::*;

// Re-export key components
pub use repository::{InMemoryWordRepository, MySqlWordRepository, WordRepository};
pub use words::{RandomSelector, WordService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
