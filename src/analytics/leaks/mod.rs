pub mod augment_fit;
pub mod insufficient_data;
pub mod late_stabilization;
pub mod missed_bailout;
pub mod roll_discipline;

pub use augment_fit::AugmentFitCheck;
pub use insufficient_data::InsufficientDataCheck;
pub use late_stabilization::LateStabilizationCheck;
pub use missed_bailout::MissedBailoutCheck;
pub use roll_discipline::RollDisciplineCheck;

use serde::Serialize;

/// Priority constants for leak checks.
/// Lower values run first and therefore surface first in the report.
pub mod leak_priority {
    pub const INSUFFICIENT_DATA: u32 = 100;
    pub const LATE_STABILIZATION: u32 = 200;
    pub const ROLL_DISCIPLINE: u32 = 300;
    pub const MISSED_BAILOUT: u32 = 400;
    /// Always fires, so it must stay last.
    pub const AUGMENT_FIT: u32 = 900;
}

/// An actionable coaching gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leak {
    pub leak: &'static str,
    pub why_it_matters: &'static str,
    pub do_instead: &'static str,
}

/// Counts the grader derives once from matches and the event log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionSignals {
    /// Same-team games finishing 6th or worse.
    pub low_results: usize,
    /// Same-team games finishing 4th or better.
    pub top_results: usize,
    pub event_count: usize,
    pub panic_rolls: usize,
    pub missed_gifts: usize,
    pub low_gold_rolls: usize,
}

impl DecisionSignals {
    pub fn has_decision_events(&self) -> bool {
        self.event_count > 0
    }
}

pub trait LeakCheck: Send + Sync {
    fn detect(&self, signals: &DecisionSignals) -> Option<Leak>;

    fn priority(&self) -> u32;
}

pub fn default_checks() -> Vec<Box<dyn LeakCheck>> {
    let mut checks: Vec<Box<dyn LeakCheck>> = vec![
        Box::new(InsufficientDataCheck),
        Box::new(LateStabilizationCheck),
        Box::new(RollDisciplineCheck),
        Box::new(MissedBailoutCheck),
        Box::new(AugmentFitCheck),
    ];
    checks.sort_by_key(|check| check.priority());
    checks
}

/// Runs every check in priority order; each contributes at most one leak.
pub fn detect_leaks(signals: &DecisionSignals, checks: &[Box<dyn LeakCheck>]) -> Vec<Leak> {
    checks
        .iter()
        .filter_map(|check| check.detect(signals))
        .collect()
}
