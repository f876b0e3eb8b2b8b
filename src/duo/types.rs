use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analytics::lenient;
use crate::analytics::models::Match;
use crate::analytics::reports::{DuoHighlights, DuoScorecard, PersonalizedPlaybook};

/// Request payload for storing a duo's normalized matches
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBatchRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub player_a_puuid: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub player_b_puuid: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub matches: Vec<Match>,
}

/// Raw events are normalized server-side, so they stay untyped here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBatchRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub duo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub match_id: Option<String>,
    #[serde(default)]
    pub events: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRequest {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub duo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub match_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub plan_at32: Option<String>,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub executed: bool,
    #[serde(default)]
    pub tags: Option<Value>,
}

/// Query string shared by the report endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuoReportQuery {
    #[serde(default)]
    pub duo_id: Option<String>,
    #[serde(default)]
    pub window_days: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBatchResponse {
    pub duo_id: String,
    pub stored: usize,
    pub total_matches: usize,
    pub scorecard: DuoScorecard,
    pub playbook: PersonalizedPlaybook,
    pub highlights: DuoHighlights,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBatchResponse {
    pub ok: bool,
    pub inserted: usize,
    pub total_events: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalResponse {
    pub ok: bool,
    pub journal_id: String,
    pub total_journals: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardResponse {
    pub duo_id: String,
    pub window_days: i64,
    pub match_count: usize,
    pub event_count: usize,
    pub scorecard: DuoScorecard,
    pub playbook: PersonalizedPlaybook,
    pub highlights: DuoHighlights,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybookResponse {
    pub duo_id: String,
    pub window_days: i64,
    pub playbook: PersonalizedPlaybook,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightsResponse {
    pub duo_id: String,
    pub window_days: i64,
    pub highlights: DuoHighlights,
}
