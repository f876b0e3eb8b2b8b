use serde::Serialize;

use crate::analytics::models::{Event, EventKind};

/// Which signal families the event log currently feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCoverage {
    /// Match records are always present once a duo exists.
    pub match_payload: bool,
    pub round_timeline_events: bool,
    pub gift_events: bool,
    pub comms_signals: bool,
    pub intent_tags: bool,
}

pub fn build_data_coverage(events: &[Event]) -> DataCoverage {
    let any = |kind: EventKind| events.iter().any(|e| e.is(kind));
    DataCoverage {
        match_payload: true,
        round_timeline_events: !events.is_empty(),
        gift_events: any(EventKind::GiftSent),
        comms_signals: any(EventKind::CommsSnapshot),
        intent_tags: any(EventKind::IntentTag),
    }
}
