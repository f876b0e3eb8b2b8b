use serde::Serialize;
use std::cmp::Reverse;

use super::models::{Match, Participant};

/// How many top traits are compared for overlap.
pub const TOP_TRAIT_LIMIT: usize = 3;
/// Item count at which a non-leading damage dealer is read as a utility board.
pub const UTILITY_ITEM_THRESHOLD: usize = 8;

/// Per-match derived features. Recomputed on every report build.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFeatures {
    pub same_team: bool,
    pub won: bool,
    pub top4: bool,
    pub duo_placement: i64,
    pub carry_by_three_star_a: bool,
    pub carry_by_three_star_b: bool,
    pub carry_by_damage_a: bool,
    pub carry_by_damage_b: bool,
    pub utility_a: bool,
    pub utility_b: bool,
    pub both_level8_plus: bool,
    pub duo_damage_gap: f64,
    pub trait_overlap: usize,
}

/// Active traits ordered by style then unit count, limited to `limit`
/// non-empty names.
pub fn top_traits(participant: &Participant, limit: usize) -> Vec<String> {
    let mut active: Vec<_> = participant
        .traits
        .iter()
        .filter(|t| t.style > 0)
        .collect();
    active.sort_by_key(|t| (Reverse(t.style), Reverse(t.num_units)));

    active
        .into_iter()
        .take(limit)
        .filter_map(|t| t.name.as_deref().map(str::trim))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn extract_features(m: &Match) -> MatchFeatures {
    let a = &m.player_a;
    let b = &m.player_b;
    let duo_placement = m.duo_placement();

    let (a_stars, b_stars) = (a.three_star_count(), b.three_star_count());
    let (a_items, b_items) = (a.item_count(), b.item_count());
    let (a_damage, b_damage) = (a.total_damage_to_players, b.total_damage_to_players);

    let a_traits = top_traits(a, TOP_TRAIT_LIMIT);
    let b_traits = top_traits(b, TOP_TRAIT_LIMIT);
    let trait_overlap = a_traits
        .iter()
        .filter(|name| b_traits.contains(name))
        .count();

    MatchFeatures {
        same_team: m.same_team,
        won: m.same_team && duo_placement <= 2,
        top4: m.same_team && duo_placement <= 4,
        duo_placement,
        carry_by_three_star_a: a_stars > b_stars,
        carry_by_three_star_b: b_stars > a_stars,
        carry_by_damage_a: a_damage > b_damage,
        carry_by_damage_b: b_damage > a_damage,
        utility_a: a_items >= UTILITY_ITEM_THRESHOLD && a_damage < b_damage,
        utility_b: b_items >= UTILITY_ITEM_THRESHOLD && b_damage < a_damage,
        both_level8_plus: a.level >= 8 && b.level >= 8,
        duo_damage_gap: (a_damage - b_damage).abs(),
        trait_overlap,
    }
}
