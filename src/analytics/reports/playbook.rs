use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::same_team_within;
use crate::analytics::features::top_traits;
use crate::analytics::models::{count_kind, Event, EventKind, Match, Participant};

pub const MAX_TOP_OPENERS: usize = 5;
pub const OPENER_TRAIT_LIMIT: usize = 2;
/// Worst duo placement that still counts as a playbook win.
pub const PLAYBOOK_WIN_CUTOFF: i64 = 4;
const FLEX_OPENER: &str = "Flex";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopOpener {
    pub id: String,
    pub match_id: Option<String>,
    pub patch: Option<String>,
    pub set_number: Option<i64>,
    pub player_a: Vec<String>,
    pub player_b: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSummary {
    pub roll_events: usize,
    pub gift_events: usize,
    pub same_team_games: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedPlaybook {
    pub generated_at: DateTime<Utc>,
    pub top_openers: Vec<TopOpener>,
    pub stable_greedy_plan: &'static str,
    pub both_tempo_plan: &'static str,
    pub banned_behaviors: Vec<&'static str>,
    pub signal_summary: SignalSummary,
}

fn opener_traits(participant: &Participant) -> Vec<String> {
    let traits = top_traits(participant, OPENER_TRAIT_LIMIT);
    if traits.is_empty() {
        vec![FLEX_OPENER.to_string()]
    } else {
        traits
    }
}

fn top_opener(index: usize, m: &Match) -> TopOpener {
    TopOpener {
        id: format!("{}-{}", m.id.as_deref().unwrap_or("match"), index),
        match_id: m.id.clone(),
        patch: m.patch.clone(),
        set_number: m.set_number,
        player_a: opener_traits(&m.player_a),
        player_b: opener_traits(&m.player_b),
    }
}

pub fn build_personalized_playbook(
    matches: &[Match],
    events: &[Event],
    generated_at: DateTime<Utc>,
) -> PersonalizedPlaybook {
    let top_openers: Vec<TopOpener> = same_team_within(matches, PLAYBOOK_WIN_CUTOFF)
        .take(MAX_TOP_OPENERS)
        .enumerate()
        .map(|(index, m)| top_opener(index, m))
        .collect();

    let signal_summary = SignalSummary {
        roll_events: count_kind(events, EventKind::RollDown),
        gift_events: count_kind(events, EventKind::GiftSent),
        same_team_games: matches.iter().filter(|m| m.same_team).count(),
    };

    debug!(
        openers = top_openers.len(),
        same_team_games = signal_summary.same_team_games,
        "Built personalized playbook"
    );

    PersonalizedPlaybook {
        generated_at,
        top_openers,
        stable_greedy_plan: "Default split: Player with stronger Stage 3 board stabilizes, partner greed-econs to Stage 4 roll.",
        both_tempo_plan: "When both sub-60 HP by Stage 3-5, dual stabilize and convert to Top 4 line.",
        banned_behaviors: vec![
            "Both players hard rolling before 4-1 without emergency call.",
            "No gift sent in Stage 3 when one partner is bleeding.",
            "Both players holding same carry components without pivot assignment.",
        ],
        signal_summary,
    }
}
