// Public API - what other modules can use
pub use errors::DuoError;
pub use handlers::{highlights, ingest_events, ingest_matches, playbook, record_journal, scorecard};
pub use models::{stable_duo_id, DuoRecord, JournalEntry};
pub use repository::{DuoRepository, InMemoryDuoRepository, RetentionLimits};
pub use service::DuoService;

// Internal modules
mod errors;
mod handlers;
pub mod ingest;
pub mod models;
pub mod repository;
mod service;
pub mod types;
pub mod window;
