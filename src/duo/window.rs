use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use super::models::DuoRecord;
use crate::analytics::models::{Event, Match};

pub const MIN_WINDOW_DAYS: i64 = 1;
pub const MAX_WINDOW_DAYS: i64 = 365;

/// Clamps a requested window, substituting `default_days` when none (or 0) was given.
pub fn clamp_window_days(requested: Option<i64>, default_days: i64) -> i64 {
    requested
        .filter(|days| *days != 0)
        .unwrap_or(default_days)
        .clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS)
}

/// Matches and events visible within a trailing window.
#[derive(Debug, Clone, Default)]
pub struct WindowData {
    pub matches: Vec<Match>,
    pub events: Vec<Event>,
    /// Epoch milliseconds.
    pub cutoff: i64,
}

/// An event survives when it is unattached, attached to a match in the
/// window, or was logged at or after the cutoff.
pub fn window_data(record: &DuoRecord, window_days: i64, now: DateTime<Utc>) -> WindowData {
    let cutoff = (now - Duration::days(window_days)).timestamp_millis();

    let matches: Vec<Match> = record
        .matches()
        .into_iter()
        .filter(|m| m.game_datetime >= cutoff)
        .collect();
    let match_ids: HashSet<&str> = matches.iter().filter_map(|m| m.id.as_deref()).collect();

    let events = record
        .events
        .iter()
        .filter(|e| match e.match_id() {
            None => true,
            Some(id) => match_ids.contains(id) || e.created_at() >= cutoff,
        })
        .cloned()
        .collect();

    WindowData {
        matches,
        events,
        cutoff,
    }
}

/// Events relevant to a freshly submitted batch of matches.
pub fn events_for_matches(record: &DuoRecord, matches: &[Match]) -> Vec<Event> {
    let match_ids: HashSet<&str> = matches.iter().filter_map(|m| m.id.as_deref()).collect();
    record
        .events
        .iter()
        .filter(|e| e.match_id().map_or(true, |id| match_ids.contains(id)))
        .cloned()
        .collect()
}
