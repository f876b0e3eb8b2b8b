//! The duo analytics core.
//!
//! Everything under this module is pure: builders take fully materialized
//! match and event slices and return serializable report documents. Missing
//! or malformed data never fails a builder; it degrades to defaults or to
//! an explicit `needs_*_events` sentinel.

pub mod classifiers;
pub mod decision;
pub mod features;
pub mod fingerprint;
pub mod leaks;
pub mod lenient;
pub mod math;
pub mod models;
pub mod reports;

pub use decision::{compute_decision_quality, DecisionQuality};
pub use features::{extract_features, MatchFeatures};
pub use fingerprint::{compute_synergy_fingerprint, SynergyFingerprint};
pub use models::{Event, EventKind, Match, Participant};
pub use reports::{
    build_duo_highlights, build_duo_scorecard, build_personalized_playbook, DuoHighlights,
    DuoScorecard, PersonalizedPlaybook,
};
