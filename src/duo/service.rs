use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::{
    errors::DuoError,
    ingest::{journal_events, normalize_event, normalize_tags},
    models::JournalEntry,
    repository::DuoRepository,
    types::{
        DuoReportQuery, EventBatchRequest, EventBatchResponse, HighlightsResponse,
        JournalRequest, JournalResponse, MatchBatchRequest, MatchBatchResponse, PlaybookResponse,
        ScorecardResponse,
    },
    window::{clamp_window_days, events_for_matches, window_data, WindowData},
};
use crate::analytics::lenient;
use crate::analytics::reports::{
    build_duo_highlights, build_duo_scorecard, build_personalized_playbook,
};

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn require_duo_id(duo_id: Option<&str>) -> Result<String, DuoError> {
    trimmed(duo_id).ok_or_else(|| DuoError::Validation("duoId is required.".to_string()))
}

/// Service for duo ingestion and report assembly
pub struct DuoService {
    repository: Arc<dyn DuoRepository>,
    default_window_days: i64,
}

impl DuoService {
    pub fn new(repository: Arc<dyn DuoRepository>, default_window_days: i64) -> Self {
        Self {
            repository,
            default_window_days,
        }
    }

    async fn ensure_known(&self, duo_id: &str) -> Result<(), DuoError> {
        if self.repository.contains_duo(duo_id).await? {
            Ok(())
        } else {
            Err(DuoError::UnknownDuo(duo_id.to_string()))
        }
    }

    /// Stores the submitted matches and reports on them together with the
    /// events already logged against them.
    #[instrument(skip(self, request), fields(match_count = request.matches.len()))]
    pub async fn ingest_matches(
        &self,
        request: MatchBatchRequest,
    ) -> Result<MatchBatchResponse, DuoError> {
        let (Some(player_a), Some(player_b)) = (
            trimmed(request.player_a_puuid.as_deref()),
            trimmed(request.player_b_puuid.as_deref()),
        ) else {
            return Err(DuoError::Validation(
                "playerAPuuid and playerBPuuid are required.".to_string(),
            ));
        };

        let now = Utc::now();
        let matches = request.matches;
        let outcome = self
            .repository
            .upsert_matches(&player_a, &player_b, matches.clone(), now.timestamp_millis())
            .await?;

        let record = self
            .repository
            .get_duo(&outcome.duo_id)
            .await?
            .ok_or_else(|| DuoError::UnknownDuo(outcome.duo_id.clone()))?;
        let events = events_for_matches(&record, &matches);

        info!(
            duo_id = %outcome.duo_id,
            stored = outcome.stored,
            total_matches = outcome.total_matches,
            "Duo matches ingested"
        );

        Ok(MatchBatchResponse {
            scorecard: build_duo_scorecard(&matches, &events, now),
            playbook: build_personalized_playbook(&matches, &events, now),
            highlights: build_duo_highlights(&matches, &events, now),
            duo_id: outcome.duo_id,
            stored: outcome.stored,
            total_matches: outcome.total_matches,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn ingest_events(
        &self,
        request: EventBatchRequest,
    ) -> Result<EventBatchResponse, DuoError> {
        let duo_id = require_duo_id(request.duo_id.as_deref())?;
        self.ensure_known(&duo_id).await?;

        let raw_events = match request.events {
            Some(Value::Array(events)) if !events.is_empty() => events,
            _ => return Err(DuoError::Validation("events array is required.".to_string())),
        };

        let now = Utc::now();
        let match_id = trimmed(request.match_id.as_deref());
        let normalized: Vec<_> = raw_events
            .iter()
            .filter_map(|raw| normalize_event(raw, match_id.as_deref(), now))
            .collect();
        if normalized.is_empty() {
            return Err(DuoError::Validation("No valid events to insert.".to_string()));
        }

        let inserted = normalized.len();
        debug!(
            duo_id = %duo_id,
            submitted = raw_events.len(),
            inserted,
            "Events normalized"
        );
        let total_events = self.repository.append_events(&duo_id, normalized).await?;

        Ok(EventBatchResponse {
            ok: true,
            inserted,
            total_events,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn record_journal(&self, request: JournalRequest) -> Result<JournalResponse, DuoError> {
        let duo_id = require_duo_id(request.duo_id.as_deref())?;
        self.ensure_known(&duo_id).await?;

        let now = Utc::now();
        let entry = JournalEntry {
            id: Uuid::new_v4().to_string(),
            match_id: trimmed(request.match_id.as_deref()),
            plan_at32: trimmed(request.plan_at32.as_deref()),
            executed: request.executed,
            tags: normalize_tags(request.tags.as_ref()),
            created_at: now.timestamp_millis(),
        };
        let events = journal_events(&entry, now);
        let journal_id = entry.id.clone();

        let total_journals = self
            .repository
            .append_journal(&duo_id, entry, events)
            .await?;

        info!(duo_id = %duo_id, journal_id = %journal_id, total_journals, "Journal recorded");

        Ok(JournalResponse {
            ok: true,
            journal_id,
            total_journals,
        })
    }

    async fn load_window(
        &self,
        query: &DuoReportQuery,
    ) -> Result<(String, i64, WindowData), DuoError> {
        let duo_id = require_duo_id(query.duo_id.as_deref())?;
        let requested = query
            .window_days
            .as_deref()
            .and_then(|raw| lenient::as_int(&Value::from(raw)));
        let window_days = clamp_window_days(requested, self.default_window_days);

        let record = self
            .repository
            .get_duo(&duo_id)
            .await?
            .ok_or_else(|| DuoError::DuoNotFound(duo_id.clone()))?;
        let window = window_data(&record, window_days, Utc::now());

        debug!(
            duo_id = %duo_id,
            window_days,
            matches = window.matches.len(),
            events = window.events.len(),
            "Loaded duo window"
        );

        Ok((duo_id, window_days, window))
    }

    #[instrument(skip(self))]
    pub async fn scorecard(&self, query: DuoReportQuery) -> Result<ScorecardResponse, DuoError> {
        let (duo_id, window_days, window) = self.load_window(&query).await?;
        let now = Utc::now();

        Ok(ScorecardResponse {
            duo_id,
            window_days,
            match_count: window.matches.len(),
            event_count: window.events.len(),
            scorecard: build_duo_scorecard(&window.matches, &window.events, now),
            playbook: build_personalized_playbook(&window.matches, &window.events, now),
            highlights: build_duo_highlights(&window.matches, &window.events, now),
        })
    }

    /// Builds the playbook and keeps it as the duo's latest snapshot.
    #[instrument(skip(self))]
    pub async fn playbook(&self, query: DuoReportQuery) -> Result<PlaybookResponse, DuoError> {
        let (duo_id, window_days, window) = self.load_window(&query).await?;
        let playbook = build_personalized_playbook(&window.matches, &window.events, Utc::now());

        self.repository
            .save_playbook_snapshot(&duo_id, playbook.clone())
            .await?;

        Ok(PlaybookResponse {
            duo_id,
            window_days,
            playbook,
        })
    }

    #[instrument(skip(self))]
    pub async fn highlights(&self, query: DuoReportQuery) -> Result<HighlightsResponse, DuoError> {
        let (duo_id, window_days, window) = self.load_window(&query).await?;

        Ok(HighlightsResponse {
            highlights: build_duo_highlights(&window.matches, &window.events, Utc::now()),
            duo_id,
            window_days,
        })
    }
}
