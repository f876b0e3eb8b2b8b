use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use super::Withheld;
use crate::analytics::math::clamp;
use crate::analytics::models::{Event, EventKind};

/// Score lost for every stage where both partners rolled.
pub const OVERLAP_PENALTY: f64 = 18.0;

pub const STAGGER_SUGGESTIONS: [&str; 2] = [
    "Default: one player rolls on 3-2, partner rolls on 4-1.",
    "If both low HP at 3-5, call emergency dual roll only with explicit cap target.",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EconCoordination {
    NeedsRoundEvents {
        coordination_score: Withheld,
        stagger_suggestions: Vec<&'static str>,
    },
    Ok {
        coordination_score: f64,
        overlap_stages: Vec<String>,
        stagger_suggestions: Vec<&'static str>,
    },
}

fn stage_part(roll: &Event, name: &str) -> String {
    match roll.field(name) {
        None => "?".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// `"{stageMajor}-{stageMinor}"`, with `?` for a missing part.
pub fn stage_key(roll: &Event) -> String {
    format!(
        "{}-{}",
        stage_part(roll, "stageMajor"),
        stage_part(roll, "stageMinor")
    )
}

pub fn compute_econ_coordination(events: &[Event]) -> EconCoordination {
    let rolls: Vec<&Event> = events.iter().filter(|e| e.is(EventKind::RollDown)).collect();
    if rolls.is_empty() {
        return EconCoordination::NeedsRoundEvents {
            coordination_score: Withheld,
            stagger_suggestions: Vec::new(),
        };
    }

    // First-seen order is kept for the reported stage list.
    let mut order: Vec<String> = Vec::new();
    let mut rolls_by_stage: HashMap<String, usize> = HashMap::new();
    for roll in rolls {
        let key = stage_key(roll);
        let count = rolls_by_stage.entry(key.clone()).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }

    let overlap_stages: Vec<String> = order
        .into_iter()
        .filter(|stage| rolls_by_stage.get(stage).copied().unwrap_or_default() > 1)
        .collect();

    EconCoordination::Ok {
        coordination_score: clamp(100.0 - overlap_stages.len() as f64 * OVERLAP_PENALTY),
        overlap_stages,
        stagger_suggestions: STAGGER_SUGGESTIONS.to_vec(),
    }
}
