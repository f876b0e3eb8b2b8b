//! Top-level report documents assembled from the classifiers, the synergy
//! fingerprint and the decision grader. Each builder is stateless and takes
//! its `generated_at` timestamp from the caller.

pub mod highlights;
pub mod playbook;
pub mod scorecard;

pub use highlights::{build_duo_highlights, DuoHighlights};
pub use playbook::{build_personalized_playbook, PersonalizedPlaybook, SignalSummary, TopOpener};
pub use scorecard::{build_duo_scorecard, CoachingReplay, DuoScorecard};

use crate::analytics::models::Match;

/// Same-team games whose worse placement is at or above `cutoff`.
pub(crate) fn same_team_within(matches: &[Match], cutoff: i64) -> impl Iterator<Item = &Match> {
    matches
        .iter()
        .filter(move |m| m.same_team && m.duo_placement() <= cutoff)
}
