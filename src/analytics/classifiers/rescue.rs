use serde::Serialize;

use super::Withheld;
use crate::analytics::math::pct;
use crate::analytics::models::{count_kind, Event, EventKind};

/// Stage from which a rescue counts as late-game.
pub const CLUTCH_STAGE: i64 = 4;

/// Unlike the other classifiers, the empty rescue report still carries the
/// zeroed counters alongside the withheld rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RescueIndex {
    NeedsRoundEvents {
        rescue_rate: Withheld,
        missed_bailouts: Withheld,
        clutch_index: Withheld,
        rescue_events: usize,
        total_events: usize,
        clutch_wins: usize,
        successful_flips: usize,
    },
    Ok {
        /// Rescues over every logged event, not just round events.
        rescue_rate: Option<f64>,
        missed_bailouts: usize,
        clutch_index: Option<f64>,
        successful_flip_rate: Option<f64>,
        rescue_events: usize,
        total_events: usize,
        clutch_wins: usize,
        successful_flips: usize,
    },
}

fn is_flip(rescue: &Event) -> bool {
    rescue.str_field("roundOutcomeBefore") == Some("loss_likely")
        && rescue.str_field("roundOutcomeAfter") == Some("won")
}

fn is_clutch_win(rescue: &Event) -> bool {
    rescue.int_field("stageMajor").unwrap_or_default() >= CLUTCH_STAGE
        && rescue.flag("teammateAtRisk")
        && rescue.str_field("roundOutcomeAfter") == Some("won")
}

pub fn compute_rescue_index(events: &[Event]) -> RescueIndex {
    let total_events = events.len();
    let rescues: Vec<&Event> = events
        .iter()
        .filter(|e| e.is(EventKind::RescueArrival))
        .collect();

    if rescues.is_empty() {
        return RescueIndex::NeedsRoundEvents {
            rescue_rate: Withheld,
            missed_bailouts: Withheld,
            clutch_index: Withheld,
            rescue_events: 0,
            total_events,
            clutch_wins: 0,
            successful_flips: 0,
        };
    }

    let flips = rescues.iter().filter(|r| is_flip(r)).count();
    let clutch_wins = rescues.iter().filter(|r| is_clutch_win(r)).count();

    RescueIndex::Ok {
        rescue_rate: pct(rescues.len(), total_events),
        missed_bailouts: count_kind(events, EventKind::MissedBailout),
        clutch_index: pct(clutch_wins, rescues.len()),
        successful_flip_rate: pct(flips, rescues.len()),
        rescue_events: rescues.len(),
        total_events,
        clutch_wins,
        successful_flips: flips,
    }
}
