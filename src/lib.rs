// Library crate for the duo coaching analytics service
// This file exposes the public API for integration tests

pub mod analytics;
pub mod config;
pub mod duo;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use analytics::{Event, EventKind, Match, Participant};
pub use config::{AppConfig, ConfigError};
pub use duo::{stable_duo_id, DuoError, DuoRepository, InMemoryDuoRepository, RetentionLimits};
pub use shared::{router, AppError, AppState};
