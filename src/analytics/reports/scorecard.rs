use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::analytics::classifiers::{
    build_data_coverage, compute_econ_coordination, compute_gift_efficiency, compute_rescue_index,
    DataCoverage, EconCoordination, GiftEfficiency, RescueIndex,
};
use crate::analytics::decision::{compute_decision_quality, DecisionQuality};
use crate::analytics::fingerprint::{compute_synergy_fingerprint, SynergyFingerprint};
use crate::analytics::models::{Event, Match};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayStatus {
    TemplateReady,
}

/// Static stage-by-stage coaching template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingReplay {
    pub status: ReplayStatus,
    pub stage2: &'static str,
    pub stage3: &'static str,
    pub stage4: &'static str,
    pub if_then_examples: Vec<&'static str>,
}

impl Default for CoachingReplay {
    fn default() -> Self {
        Self {
            status: ReplayStatus::TemplateReady,
            stage2: "Choose highest board strength opener from shops + slammable components.",
            stage3: "Declare duo plan: one stabilizes, one greed econ unless both sub-55 HP.",
            stage4: "Roll ownership: primary roller sends best-fit gift to partner.",
            if_then_examples: vec![
                "If no stable frontline by 4-1, pivot to 4-cost board and protect streak.",
                "If one player spikes 2-star carry early, partner greed to fast level and send utility gift.",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuoScorecard {
    pub generated_at: DateTime<Utc>,
    pub data_coverage: DataCoverage,
    pub synergy_fingerprint: SynergyFingerprint,
    pub gift_efficiency: GiftEfficiency,
    pub rescue_index: RescueIndex,
    pub econ_coordination: EconCoordination,
    pub decision_quality: DecisionQuality,
    pub coaching_replay: CoachingReplay,
}

pub fn build_duo_scorecard(
    matches: &[Match],
    events: &[Event],
    generated_at: DateTime<Utc>,
) -> DuoScorecard {
    let scorecard = DuoScorecard {
        generated_at,
        data_coverage: build_data_coverage(events),
        synergy_fingerprint: compute_synergy_fingerprint(matches),
        gift_efficiency: compute_gift_efficiency(events),
        rescue_index: compute_rescue_index(events),
        econ_coordination: compute_econ_coordination(events),
        decision_quality: compute_decision_quality(matches, events),
        coaching_replay: CoachingReplay::default(),
    };

    debug!(
        matches = matches.len(),
        events = events.len(),
        grade = scorecard.decision_quality.grade,
        leak_count = scorecard.decision_quality.leak_count,
        "Built duo scorecard"
    );

    scorecard
}
