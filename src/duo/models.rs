use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;

use crate::analytics::models::{Event, Match};
use crate::analytics::reports::PersonalizedPlaybook;

/// Order-insensitive identifier for a pair of players.
pub fn stable_duo_id(player_a_puuid: &str, player_b_puuid: &str) -> String {
    let mut ids = [player_a_puuid, player_b_puuid];
    ids.sort_unstable();
    ids.join("::")
}

/// A post-game reflection recorded by the duo.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub match_id: Option<String>,
    pub plan_at32: Option<String>,
    pub executed: bool,
    pub tags: Vec<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
}

/// Everything stored for one duo.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuoRecord {
    pub duo_id: String,
    pub created_at: i64,
    pub player_a_puuid: String,
    pub player_b_puuid: String,
    pub matches_by_id: HashMap<String, Match>,
    pub events: Vec<Event>,
    pub journals: Vec<JournalEntry>,
    pub playbook_snapshot: Option<PersonalizedPlaybook>,
}

impl DuoRecord {
    pub fn new(player_a_puuid: &str, player_b_puuid: &str, created_at: i64) -> Self {
        Self {
            duo_id: stable_duo_id(player_a_puuid, player_b_puuid),
            created_at,
            player_a_puuid: player_a_puuid.to_string(),
            player_b_puuid: player_b_puuid.to_string(),
            matches_by_id: HashMap::new(),
            events: Vec::new(),
            journals: Vec::new(),
            playbook_snapshot: None,
        }
    }

    /// Stored matches, most recent first.
    pub fn matches(&self) -> Vec<Match> {
        let mut matches: Vec<Match> = self.matches_by_id.values().cloned().collect();
        matches.sort_by_key(|m| Reverse(m.game_datetime));
        matches
    }

    /// Drops the oldest matches beyond `max` by game time.
    pub fn cap_matches(&mut self, max: usize) {
        if self.matches_by_id.len() <= max {
            return;
        }
        let mut ids: Vec<(i64, String)> = self
            .matches_by_id
            .iter()
            .map(|(id, m)| (m.game_datetime, id.clone()))
            .collect();
        ids.sort_by_key(|(game_datetime, _)| Reverse(*game_datetime));
        for (_, stale_id) in ids.into_iter().skip(max) {
            self.matches_by_id.remove(&stale_id);
        }
    }

    /// Keeps only the most recent `max` events.
    pub fn cap_events(&mut self, max: usize) {
        keep_last(&mut self.events, max);
    }

    pub fn cap_journals(&mut self, max: usize) {
        keep_last(&mut self.journals, max);
    }
}

fn keep_last<T>(items: &mut Vec<T>, max: usize) {
    if items.len() > max {
        let excess = items.len() - max;
        items.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn game(id: &str, game_datetime: i64) -> Match {
        Match {
            id: Some(id.to_string()),
            game_datetime,
            ..Match::default()
        }
    }

    #[test]
    fn duo_id_ignores_player_order() {
        assert_eq!(stable_duo_id("zeta", "alpha"), "alpha::zeta");
        assert_eq!(stable_duo_id("alpha", "zeta"), stable_duo_id("zeta", "alpha"));
    }

    #[test]
    fn cap_matches_drops_oldest_games() {
        let mut record = DuoRecord::new("a", "b", 0);
        for (id, at) in [("m1", 10), ("m2", 30), ("m3", 20), ("m4", 5)] {
            record.matches_by_id.insert(id.to_string(), game(id, at));
        }
        record.cap_matches(2);

        let ids: Vec<_> = record
            .matches()
            .into_iter()
            .filter_map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["m2", "m3"]);
    }

    #[test]
    fn cap_events_keeps_the_tail() {
        let mut record = DuoRecord::new("a", "b", 0);
        record.events = (0..5).map(|i| Event::from(json!({"type": "roll_down", "n": i}))).collect();
        record.cap_events(2);
        assert_eq!(record.events.len(), 2);
        assert_eq!(record.events[0].field("n"), Some(&json!(3)));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(DuoRecord::new("b", "a", 7)).unwrap();
        assert_eq!(value["duoId"], json!("a::b"));
        assert_eq!(value["playerAPuuid"], json!("b"));
        assert!(value["playbookSnapshot"].is_null());
    }
}
