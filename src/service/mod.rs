//! Service layer for the scrabble-words service
//!
//! This module contains the shared application state and the health checks
//! built on top of it.

pub mod app;
pub mod health;

pub use app::{AppState, ServiceError};
pub use health::{HealthCheck, HealthStatus};
