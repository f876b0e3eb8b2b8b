use chrono::{DateTime, Utc};
use serde::Serialize;

use super::same_team_within;
use crate::analytics::models::{count_kind, Event, EventKind, Match};

const EMPTY_HIGHLIGHT: &str = "No highlight events yet. Add journal/event tags to generate recaps.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuoHighlights {
    pub generated_at: DateTime<Utc>,
    pub highlights: Vec<String>,
}

/// Sentences are always ordered top-2 finishes, rescues, gifts.
pub fn build_duo_highlights(
    matches: &[Match],
    events: &[Event],
    generated_at: DateTime<Utc>,
) -> DuoHighlights {
    let top2s = same_team_within(matches, 2).count();
    let rescues = count_kind(events, EventKind::RescueArrival);
    let gifts = count_kind(events, EventKind::GiftSent);

    let mut highlights = Vec::new();
    if top2s > 0 {
        highlights.push(format!(
            "Reached Top 2 in {} same-team games in this window.",
            top2s
        ));
    }
    if rescues > 0 {
        highlights.push(format!("Triggered {} rescue arrivals.", rescues));
    }
    if gifts > 0 {
        highlights.push(format!("Sent {} tracked gifts to support duo spikes.", gifts));
    }
    if highlights.is_empty() {
        highlights.push(EMPTY_HIGHLIGHT.to_string());
    }

    DuoHighlights {
        generated_at,
        highlights,
    }
}
