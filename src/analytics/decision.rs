use serde::Serialize;

use super::leaks::{default_checks, detect_leaks, DecisionSignals, Leak};
use super::math::clamp;
use super::models::{CoachingTag, Event, EventKind, Match};

pub const BASE_GRADE: f64 = 68.0;
pub const RESULT_SWING_WEIGHT: f64 = 2.0;
pub const PANIC_ROLL_PENALTY: f64 = 3.0;
pub const MISSED_GIFT_PENALTY: f64 = 2.0;
/// Gold left after a roll-down below which the roll counts as unplanned.
pub const LOW_GOLD_FLOOR: i64 = 20;
/// Assumed gold when a roll-down did not record it, so it never reads as low.
pub const UNKNOWN_GOLD_AFTER: i64 = 99;
pub const SURFACED_LEAKS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    ProcessPlusOutcome,
    OutcomeWithCoverageWarnings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionQuality {
    pub grade: f64,
    /// Total leaks found, including the ones not surfaced.
    pub leak_count: usize,
    pub biggest_leaks: Vec<Leak>,
    pub evaluation_mode: EvaluationMode,
}

impl DecisionSignals {
    pub fn from_inputs(matches: &[Match], events: &[Event]) -> Self {
        let same_team = matches.iter().filter(|m| m.same_team);
        let low_results = same_team.clone().filter(|m| m.duo_placement() >= 6).count();
        let top_results = same_team.filter(|m| m.duo_placement() <= 4).count();

        let tagged = |tag: CoachingTag| events.iter().filter(|e| e.has_tag(tag)).count();
        let low_gold_rolls = events
            .iter()
            .filter(|e| e.is(EventKind::RollDown))
            .filter(|e| e.int_field("goldAfter").unwrap_or(UNKNOWN_GOLD_AFTER) < LOW_GOLD_FLOOR)
            .count();

        Self {
            low_results,
            top_results,
            event_count: events.len(),
            panic_rolls: tagged(CoachingTag::PanicRoll),
            missed_gifts: tagged(CoachingTag::MissedGift),
            low_gold_rolls,
        }
    }

    pub fn grade(&self) -> f64 {
        let swing = self.top_results as f64 - self.low_results as f64;
        clamp(
            BASE_GRADE + swing * RESULT_SWING_WEIGHT
                - self.panic_rolls as f64 * PANIC_ROLL_PENALTY
                - self.missed_gifts as f64 * MISSED_GIFT_PENALTY,
        )
    }
}

pub fn compute_decision_quality(matches: &[Match], events: &[Event]) -> DecisionQuality {
    let signals = DecisionSignals::from_inputs(matches, events);
    let mut leaks = detect_leaks(&signals, &default_checks());
    let leak_count = leaks.len();
    leaks.truncate(SURFACED_LEAKS);

    DecisionQuality {
        grade: signals.grade(),
        leak_count,
        biggest_leaks: leaks,
        evaluation_mode: if signals.has_decision_events() {
            EvaluationMode::ProcessPlusOutcome
        } else {
            EvaluationMode::OutcomeWithCoverageWarnings
        },
    }
}
