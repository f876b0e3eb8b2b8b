use serde::Serialize;

use super::features::{extract_features, MatchFeatures};
use super::math::{clamp, pct};
use super::models::Match;

/// Confidence gained per match of damage-carry difference.
pub const CONFIDENCE_PER_MATCH: f64 = 12.5;
pub const MAX_WIN_PATTERNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stabilizer {
    #[serde(rename = "playerA")]
    PlayerA,
    #[serde(rename = "playerB")]
    PlayerB,
    #[serde(rename = "balanced")]
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CarryPattern {
    #[serde(rename = "playerA-carry-playerB-support")]
    PlayerACarry,
    #[serde(rename = "playerB-carry-playerA-support")]
    PlayerBCarry,
    #[serde(rename = "mixed-carry")]
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStatus {
    NeedsRoundEvents,
    NeedsGiftEvents,
}

/// A sub-report the match payload cannot feed yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsupportedSignal {
    pub status: SignalStatus,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderReceiver {
    pub likely_primary_stabilizer: Stabilizer,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrySupport {
    pub carry_pattern: CarryPattern,
    pub three_star_share_a: Option<f64>,
    pub three_star_share_b: Option<f64>,
    pub utility_share_a: Option<f64>,
    pub utility_share_b: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinPattern {
    pub key: &'static str,
    pub label: &'static str,
    pub hit_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSize {
    pub shared_games: usize,
    pub same_team_games: usize,
    pub wins: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyFingerprint {
    pub sender_receiver: SenderReceiver,
    pub carry_support: CarrySupport,
    pub board_timing_alignment: UnsupportedSignal,
    pub gift_usage_style: UnsupportedSignal,
    pub when_you_win_patterns: Vec<WinPattern>,
    pub sample_size: SampleSize,
}

struct PatternCandidate {
    key: &'static str,
    label: &'static str,
    predicate: fn(&MatchFeatures) -> bool,
}

/// Declaration order doubles as the tie-break order.
const WIN_PATTERN_CANDIDATES: [PatternCandidate; 3] = [
    PatternCandidate {
        key: "carry_split_damage",
        label: "One clear carry and one utility board",
        predicate: |f| f.duo_damage_gap >= 10.0,
    },
    PatternCandidate {
        key: "high_cap_boards",
        label: "Both players hit level 8+",
        predicate: |f| f.both_level8_plus,
    },
    PatternCandidate {
        key: "low_trait_conflict",
        label: "Lower trait overlap between partners",
        predicate: |f| f.trait_overlap <= 1,
    },
];

fn count_where(features: &[&MatchFeatures], predicate: impl Fn(&MatchFeatures) -> bool) -> usize {
    features.iter().filter(|f| predicate(**f)).count()
}

fn majority<T>(a: usize, b: usize, a_wins: T, b_wins: T, tie: T) -> T {
    match a.cmp(&b) {
        std::cmp::Ordering::Greater => a_wins,
        std::cmp::Ordering::Less => b_wins,
        std::cmp::Ordering::Equal => tie,
    }
}

fn win_patterns(wins: &[&MatchFeatures]) -> Vec<WinPattern> {
    let mut patterns: Vec<WinPattern> = WIN_PATTERN_CANDIDATES
        .iter()
        .filter_map(|candidate| {
            pct(count_where(wins, candidate.predicate), wins.len()).map(|hit_rate| WinPattern {
                key: candidate.key,
                label: candidate.label,
                hit_rate,
            })
        })
        .collect();

    // Stable sort keeps declaration order on ties.
    patterns.sort_by(|left, right| right.hit_rate.total_cmp(&left.hit_rate));
    patterns.truncate(MAX_WIN_PATTERNS);
    patterns
}

pub fn compute_synergy_fingerprint(matches: &[Match]) -> SynergyFingerprint {
    let features: Vec<MatchFeatures> = matches.iter().map(extract_features).collect();
    let same_team: Vec<&MatchFeatures> = features.iter().filter(|f| f.same_team).collect();
    let wins: Vec<&MatchFeatures> = features.iter().filter(|f| f.won).collect();

    let damage_carry_a = count_where(&same_team, |f| f.carry_by_damage_a);
    let damage_carry_b = count_where(&same_team, |f| f.carry_by_damage_b);
    let three_star_a = count_where(&same_team, |f| f.carry_by_three_star_a);
    let three_star_b = count_where(&same_team, |f| f.carry_by_three_star_b);
    let utility_a = count_where(&same_team, |f| f.utility_a);
    let utility_b = count_where(&same_team, |f| f.utility_b);

    SynergyFingerprint {
        sender_receiver: SenderReceiver {
            likely_primary_stabilizer: majority(
                damage_carry_a,
                damage_carry_b,
                Stabilizer::PlayerA,
                Stabilizer::PlayerB,
                Stabilizer::Balanced,
            ),
            confidence: clamp(damage_carry_a.abs_diff(damage_carry_b) as f64 * CONFIDENCE_PER_MATCH),
        },
        carry_support: CarrySupport {
            carry_pattern: majority(
                three_star_a,
                three_star_b,
                CarryPattern::PlayerACarry,
                CarryPattern::PlayerBCarry,
                CarryPattern::Mixed,
            ),
            three_star_share_a: pct(three_star_a, same_team.len()),
            three_star_share_b: pct(three_star_b, same_team.len()),
            utility_share_a: pct(utility_a, same_team.len()),
            utility_share_b: pct(utility_b, same_team.len()),
        },
        board_timing_alignment: UnsupportedSignal {
            status: SignalStatus::NeedsRoundEvents,
            reason: "Match payload does not expose per-stage board power spikes for Double Up.",
        },
        gift_usage_style: UnsupportedSignal {
            status: SignalStatus::NeedsGiftEvents,
            reason: "Gift timing/type requires round-level ingestion from in-client tracker or user tags.",
        },
        when_you_win_patterns: win_patterns(&wins),
        sample_size: SampleSize {
            shared_games: matches.len(),
            same_team_games: same_team.len(),
            wins: wins.len(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::models::{Participant, Unit};
    use serde_json::json;

    fn participant(placement: i64, damage: f64, level: i64) -> Participant {
        Participant {
            placement: Some(placement),
            total_damage_to_players: damage,
            level,
            ..Participant::default()
        }
    }

    fn duo(a: Participant, b: Participant, same_team: bool) -> Match {
        Match {
            player_a: a,
            player_b: b,
            same_team,
            ..Match::default()
        }
    }

    fn three_star_board() -> Vec<Unit> {
        vec![Unit {
            tier: 3,
            items: vec![],
        }]
    }

    #[test]
    fn empty_history_has_no_patterns_or_shares() {
        let report = compute_synergy_fingerprint(&[]);
        assert_eq!(report.sender_receiver.likely_primary_stabilizer, Stabilizer::Balanced);
        assert_eq!(report.sender_receiver.confidence, 0.0);
        assert_eq!(report.carry_support.carry_pattern, CarryPattern::Mixed);
        assert_eq!(report.carry_support.three_star_share_a, None);
        assert!(report.when_you_win_patterns.is_empty());
        assert_eq!(
            report.sample_size,
            SampleSize {
                shared_games: 0,
                same_team_games: 0,
                wins: 0
            }
        );
    }

    #[test]
    fn split_team_games_never_reach_same_team_subsets() {
        let matches = vec![
            duo(participant(1, 90.0, 9), participant(2, 10.0, 9), false),
            duo(participant(1, 90.0, 9), participant(2, 10.0, 9), false),
        ];
        let report = compute_synergy_fingerprint(&matches);
        assert_eq!(report.sample_size.shared_games, 2);
        assert_eq!(report.sample_size.same_team_games, 0);
        assert_eq!(report.sample_size.wins, 0);
        assert_eq!(report.sender_receiver.likely_primary_stabilizer, Stabilizer::Balanced);
    }

    #[test]
    fn damage_leader_becomes_stabilizer_with_scaled_confidence() {
        let matches = vec![
            duo(participant(3, 50.0, 8), participant(3, 20.0, 8), true),
            duo(participant(5, 45.0, 8), participant(5, 30.0, 8), true),
            duo(participant(4, 10.0, 8), participant(4, 30.0, 8), true),
            duo(participant(2, 60.0, 8), participant(2, 20.0, 8), true),
        ];
        let report = compute_synergy_fingerprint(&matches);
        assert_eq!(report.sender_receiver.likely_primary_stabilizer, Stabilizer::PlayerA);
        assert_eq!(report.sender_receiver.confidence, 25.0);
    }

    #[test]
    fn confidence_saturates_at_one_hundred() {
        let matches: Vec<Match> = (0..10)
            .map(|_| duo(participant(3, 10.0, 7), participant(3, 50.0, 7), true))
            .collect();
        let report = compute_synergy_fingerprint(&matches);
        assert_eq!(report.sender_receiver.likely_primary_stabilizer, Stabilizer::PlayerB);
        assert_eq!(report.sender_receiver.confidence, 100.0);
    }

    #[test]
    fn three_star_majority_sets_carry_pattern_and_shares() {
        let mut b = participant(4, 0.0, 7);
        b.units = three_star_board();
        let matches = vec![
            duo(participant(4, 0.0, 7), b.clone(), true),
            duo(participant(4, 0.0, 7), participant(4, 0.0, 7), true),
        ];
        let report = compute_synergy_fingerprint(&matches);
        assert_eq!(report.carry_support.carry_pattern, CarryPattern::PlayerBCarry);
        assert_eq!(report.carry_support.three_star_share_b, Some(50.0));
        assert_eq!(report.carry_support.three_star_share_a, Some(0.0));
    }

    #[test]
    fn win_patterns_scenario_with_damage_gap() {
        // 10 matches, 6 same team, 4 wins, 3 of those with a damage gap of 10+.
        let mut matches = vec![
            duo(participant(1, 40.0, 7), participant(2, 10.0, 7), true),
            duo(participant(2, 35.0, 7), participant(1, 15.0, 7), true),
            duo(participant(1, 5.0, 7), participant(2, 30.0, 7), true),
            duo(participant(1, 20.0, 7), participant(2, 22.0, 7), true),
            duo(participant(5, 20.0, 7), participant(6, 22.0, 7), true),
            duo(participant(7, 20.0, 7), participant(8, 22.0, 7), true),
        ];
        for _ in 0..4 {
            matches.push(duo(participant(1, 50.0, 9), participant(2, 0.0, 9), false));
        }

        let report = compute_synergy_fingerprint(&matches);
        assert_eq!(report.sample_size.shared_games, 10);
        assert_eq!(report.sample_size.same_team_games, 6);
        assert_eq!(report.sample_size.wins, 4);

        let split = report
            .when_you_win_patterns
            .iter()
            .find(|p| p.key == "carry_split_damage")
            .unwrap();
        assert_eq!(split.hit_rate, 75.0);
    }

    #[test]
    fn win_patterns_sorted_descending_with_stable_ties() {
        let matches = vec![
            duo(participant(1, 40.0, 7), participant(2, 10.0, 7), true),
            duo(participant(1, 40.0, 7), participant(2, 10.0, 7), true),
        ];
        let report = compute_synergy_fingerprint(&matches);
        let keys: Vec<_> = report.when_you_win_patterns.iter().map(|p| p.key).collect();
        // carry_split 100, low_trait_conflict 100, high_cap 0
        assert_eq!(keys, vec!["carry_split_damage", "low_trait_conflict", "high_cap_boards"]);
        assert!(report.when_you_win_patterns.len() <= MAX_WIN_PATTERNS);
    }

    #[test]
    fn stub_signals_serialize_as_status_sentinels() {
        let value = serde_json::to_value(compute_synergy_fingerprint(&[])).unwrap();
        assert_eq!(value["boardTimingAlignment"]["status"], json!("needs_round_events"));
        assert_eq!(value["giftUsageStyle"]["status"], json!("needs_gift_events"));
        assert_eq!(value["senderReceiver"]["likelyPrimaryStabilizer"], json!("balanced"));
        assert_eq!(value["carrySupport"]["carryPattern"], json!("mixed-carry"));
        assert!(value["carrySupport"]["utilityShareA"].is_null());
    }
}
